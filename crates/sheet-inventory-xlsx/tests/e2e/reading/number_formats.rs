//! Tests for surfacing number format codes on literal cells.

use std::io::Cursor;

use crate::Fixture;
use pretty_assertions::assert_eq;
use sheet_inventory_xlsx::XlsxReader;

const STYLES: &str = r##"<?xml version="1.0"?><styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><numFmts count="1"><numFmt numFmtId="165" formatCode="#,##0.00 &quot;MAD&quot;"/></numFmts><cellXfs count="3"><xf numFmtId="0"/><xf numFmtId="10"/><xf numFmtId="165"/></cellXfs></styleSheet>"##;

#[test]
fn test_number_format_codes() {
    let workbook = XlsxReader::read(Cursor::new(
        Fixture::new()
            .styles(STYLES)
            .sheet(
                "Prix",
                r#"<row r="1"><c r="A1"><v>1</v></c><c r="B1" s="1"><v>0.25</v></c><c r="C1" s="2"><v>1250.5</v></c><c r="D1" s="2"><f>C1*2</f></c></row>"#,
            )
            .to_bytes(),
    ))
    .unwrap();
    let sheet = workbook.worksheet(0).unwrap();

    let format_of = |col| {
        sheet
            .cell_at(1, col)
            .and_then(|c| c.number_format.as_deref())
    };
    assert_eq!(format_of(1), Some("General"));
    assert_eq!(format_of(2), Some("0.00%"));
    assert_eq!(format_of(3), Some("#,##0.00 \"MAD\""));
    // Formula cells carry no display format
    assert_eq!(format_of(4), None);
}

#[test]
fn test_missing_styles_part() {
    let workbook = XlsxReader::read(Cursor::new(
        Fixture::new()
            .sheet("Data", r#"<row r="1"><c r="A1" s="4"><v>2.5</v></c></row>"#)
            .to_bytes(),
    ))
    .unwrap();
    let sheet = workbook.worksheet(0).unwrap();

    assert_eq!(
        sheet.cell_at(1, 1).unwrap().number_format.as_deref(),
        Some("General")
    );
}
