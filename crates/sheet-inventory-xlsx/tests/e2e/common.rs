//! Common utilities for E2E tests.
//!
//! Fixtures are assembled in memory with `zip::ZipWriter`: the tests only
//! need the handful of parts the reader looks at.

use std::io::{Cursor, Write};

use tempfile::NamedTempFile;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

/// Builder for a minimal XLSX package
#[derive(Debug, Default)]
pub struct Fixture {
    sheets: Vec<(String, String)>,
    shared_strings: Vec<String>,
    styles: Option<String>,
    date1904: bool,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sheet; `sheet_data` is the content of `<sheetData>`
    pub fn sheet(mut self, name: &str, sheet_data: &str) -> Self {
        self.sheets.push((name.to_string(), sheet_data.to_string()));
        self
    }

    pub fn shared_strings(mut self, strings: &[&str]) -> Self {
        self.shared_strings = strings.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Raw `xl/styles.xml` content
    pub fn styles(mut self, xml: &str) -> Self {
        self.styles = Some(xml.to_string());
        self
    }

    pub fn date1904(mut self) -> Self {
        self.date1904 = true;
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
            let options = zip::write::SimpleFileOptions::default();

            zip.start_file("[Content_Types].xml", options).unwrap();
            zip.write_all(CONTENT_TYPES.as_bytes()).unwrap();

            zip.start_file("_rels/.rels", options).unwrap();
            zip.write_all(PACKAGE_RELS.as_bytes()).unwrap();

            let mut sheets = String::new();
            let mut rels = String::new();
            for (i, (name, _)) in self.sheets.iter().enumerate() {
                let n = i + 1;
                sheets.push_str(&format!(
                    r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                    name, n, n
                ));
                rels.push_str(&format!(
                    r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                    n, n
                ));
            }
            let workbook_pr = if self.date1904 {
                r#"<workbookPr date1904="1"/>"#
            } else {
                ""
            };

            zip.start_file("xl/workbook.xml", options).unwrap();
            write!(
                zip,
                r#"<?xml version="1.0" encoding="UTF-8"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">{}<sheets>{}</sheets></workbook>"#,
                workbook_pr, sheets
            )
            .unwrap();

            zip.start_file("xl/_rels/workbook.xml.rels", options).unwrap();
            write!(
                zip,
                r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
                rels
            )
            .unwrap();

            if !self.shared_strings.is_empty() {
                let items: String = self
                    .shared_strings
                    .iter()
                    .map(|s| format!("<si><t>{}</t></si>", s))
                    .collect();
                zip.start_file("xl/sharedStrings.xml", options).unwrap();
                write!(
                    zip,
                    r#"<?xml version="1.0" encoding="UTF-8"?><sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{0}" uniqueCount="{0}">{1}</sst>"#,
                    self.shared_strings.len(),
                    items
                )
                .unwrap();
            }

            if let Some(styles) = &self.styles {
                zip.start_file("xl/styles.xml", options).unwrap();
                zip.write_all(styles.as_bytes()).unwrap();
            }

            for (i, (_, data)) in self.sheets.iter().enumerate() {
                zip.start_file(format!("xl/worksheets/sheet{}.xml", i + 1), options)
                    .unwrap();
                write!(
                    zip,
                    r#"<?xml version="1.0" encoding="UTF-8"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
                    data
                )
                .unwrap();
            }

            zip.finish().unwrap();
        }
        buf
    }

    /// Write the package to a temporary `.xlsx` file
    pub fn write_temp(&self) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".xlsx")
            .tempfile()
            .expect("create temp file");
        file.write_all(&self.to_bytes()).expect("write fixture");
        file.flush().expect("flush fixture");
        file
    }
}

/// The "Stock" workbook: header `ID, Name, Qty`, one data row with a
/// formula in C2 and a styled but empty row 3
pub fn stock_fixture() -> Fixture {
    Fixture::new()
        .shared_strings(&["ID", "Name", "Qty", "Widget"])
        .sheet(
            "Stock",
            r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c><c r="C1" t="s"><v>2</v></c></row><row r="2"><c r="A2"><v>1</v></c><c r="B2" t="s"><v>3</v></c><c r="C2"><f>B2*2</f><v>0</v></c></row><row r="3"><c r="A3" s="0"/><c r="B3" s="0"/><c r="C3" s="0"/></row>"#,
        )
}
