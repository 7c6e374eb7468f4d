//! Tests for mapping native cell types into `CellValue`.

use std::io::Cursor;

use crate::Fixture;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use sheet_inventory_core::{CellValue, ValueKind};
use sheet_inventory_xlsx::XlsxReader;

fn read_single_sheet(fixture: Fixture) -> sheet_inventory_core::Workbook {
    XlsxReader::read(Cursor::new(fixture.to_bytes())).expect("Failed to read workbook")
}

#[test]
fn test_shared_and_inline_strings() {
    let workbook = read_single_sheet(
        Fixture::new()
            .shared_strings(&["Désignation", "a &amp; b"])
            .sheet(
                "Data",
                r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c><c r="C1" t="inlineStr"><is><t xml:space="preserve"> padded </t></is></c></row>"#,
            ),
    );
    let sheet = workbook.worksheet(0).expect("No worksheet");

    assert_eq!(sheet.value_at(1, 1), &CellValue::text("Désignation"));
    assert_eq!(sheet.value_at(1, 2), &CellValue::text("a & b"));
    assert_eq!(sheet.value_at(1, 3), &CellValue::text(" padded "));
}

#[test]
fn test_integers_and_floats() {
    let workbook = read_single_sheet(Fixture::new().sheet(
        "Data",
        r#"<row r="1"><c r="A1"><v>42</v></c><c r="B1"><v>3.5</v></c><c r="C1" t="n"><v>-7</v></c><c r="D1"><v>1E3</v></c></row>"#,
    ));
    let sheet = workbook.worksheet(0).expect("No worksheet");

    assert_eq!(sheet.value_at(1, 1), &CellValue::Integer(42));
    assert_eq!(sheet.value_at(1, 2), &CellValue::Float(3.5));
    assert_eq!(sheet.value_at(1, 3), &CellValue::Integer(-7));
    assert_eq!(sheet.value_at(1, 4), &CellValue::Float(1000.0));
}

#[test]
fn test_booleans_and_errors() {
    let workbook = read_single_sheet(Fixture::new().sheet(
        "Data",
        r#"<row r="1"><c r="A1" t="b"><v>0</v></c><c r="B1" t="e"><v>#DIV/0!</v></c></row>"#,
    ));
    let sheet = workbook.worksheet(0).expect("No worksheet");

    assert_eq!(sheet.value_at(1, 1), &CellValue::Boolean(false));
    assert_eq!(sheet.value_at(1, 2).kind(), Some(ValueKind::Text));
    assert_eq!(sheet.value_at(1, 2).as_text(), Some("#DIV/0!"));
}

#[test]
fn test_dates_from_number_formats() {
    let styles = r#"<?xml version="1.0"?><styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><numFmts count="1"><numFmt numFmtId="164" formatCode="dd/mm/yyyy"/></numFmts><cellXfs count="3"><xf numFmtId="0"/><xf numFmtId="14"/><xf numFmtId="164"/></cellXfs></styleSheet>"#;
    let workbook = read_single_sheet(Fixture::new().styles(styles).sheet(
        "Data",
        r#"<row r="1"><c r="A1" s="1"><v>45000</v></c><c r="B1" s="2"><v>45000.25</v></c><c r="C1" s="0"><v>45000</v></c></row>"#,
    ));
    let sheet = workbook.worksheet(0).expect("No worksheet");

    let expected = NaiveDate::from_ymd_opt(2023, 3, 15)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(sheet.value_at(1, 1), &CellValue::DateTime(expected));
    assert_eq!(
        sheet.value_at(1, 2),
        &CellValue::DateTime(expected + chrono::Duration::hours(6))
    );
    assert_eq!(sheet.value_at(1, 3), &CellValue::Integer(45000));
}

#[test]
fn test_date1904_system() {
    let styles = r#"<?xml version="1.0"?><styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><cellXfs count="2"><xf numFmtId="0"/><xf numFmtId="14"/></cellXfs></styleSheet>"#;
    let workbook = read_single_sheet(
        Fixture::new()
            .date1904()
            .styles(styles)
            .sheet("Data", r#"<row r="1"><c r="A1" s="1"><v>1</v></c></row>"#),
    );
    let sheet = workbook.worksheet(0).expect("No worksheet");

    let expected = NaiveDate::from_ymd_opt(1904, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(sheet.value_at(1, 1), &CellValue::DateTime(expected));
}

#[test]
fn test_bad_shared_string_index_is_skipped() {
    let workbook = read_single_sheet(
        Fixture::new()
            .shared_strings(&["only"])
            .sheet(
                "Data",
                r#"<row r="1"><c r="A1" t="s"><v>5</v></c><c r="B1" t="s"><v>0</v></c></row>"#,
            ),
    );
    let sheet = workbook.worksheet(0).expect("No worksheet");

    assert!(sheet.value_at(1, 1).is_empty());
    assert_eq!(sheet.value_at(1, 2), &CellValue::text("only"));
}
