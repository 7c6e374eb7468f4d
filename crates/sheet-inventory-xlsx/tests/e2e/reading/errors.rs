//! Tests for inputs that must fail to load.

use std::io::Write;

use sheet_inventory_xlsx::{XlsxError, XlsxReader};

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.xlsx");

    let err = XlsxReader::read_file(&path).unwrap_err();
    assert!(matches!(err, XlsxError::FileNotFound(ref p) if p == &path));
    assert!(err.to_string().contains("does-not-exist.xlsx"));
}

#[test]
fn test_text_file_is_rejected() {
    let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
    file.write_all(b"ID;Name;Qty\n1;Widget;2\n").unwrap();

    let err = XlsxReader::read_file(file.path()).unwrap_err();
    assert!(matches!(err, XlsxError::Zip(_)), "unexpected error: {err}");
}

#[test]
fn test_truncated_worksheet_xml() {
    let mut buf = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(std::io::Cursor::new(&mut buf));
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(b"<Types/>").unwrap();
        zip.start_file("xl/workbook.xml", options).unwrap();
        zip.write_all(br#"<workbook xmlns:r="r"><sheets><sheet name="S" sheetId="1" r:id="rId1"/></sheets></workbook>"#)
            .unwrap();
        zip.start_file("xl/_rels/workbook.xml.rels", options).unwrap();
        zip.write_all(br#"<Relationships><Relationship Id="rId1" Type="x/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#)
            .unwrap();
        zip.start_file("xl/worksheets/sheet1.xml", options).unwrap();
        zip.write_all(b"<worksheet><sheetData><row r=\"1\"><c r=\"A1\"><v>1</v></row>")
            .unwrap();
        zip.finish().unwrap();
    }

    let result = XlsxReader::read(std::io::Cursor::new(buf));
    assert!(matches!(result, Err(XlsxError::Xml(_))));
}

#[test]
fn test_missing_worksheet_part() {
    let mut buf = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(std::io::Cursor::new(&mut buf));
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(b"<Types/>").unwrap();
        zip.start_file("xl/workbook.xml", options).unwrap();
        zip.write_all(br#"<workbook xmlns:r="r"><sheets><sheet name="S" sheetId="1" r:id="rId1"/></sheets></workbook>"#)
            .unwrap();
        zip.start_file("xl/_rels/workbook.xml.rels", options).unwrap();
        zip.write_all(br#"<Relationships><Relationship Id="rId1" Type="x/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#)
            .unwrap();
        zip.finish().unwrap();
    }

    let result = XlsxReader::read(std::io::Cursor::new(buf));
    assert!(matches!(result, Err(XlsxError::MissingPart(ref p)) if p == "xl/worksheets/sheet1.xml"));
}
