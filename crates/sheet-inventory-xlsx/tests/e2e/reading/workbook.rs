//! Tests for workbook structure: sheet order, extent, files on disk.

use std::io::Cursor;

use crate::{stock_fixture, Fixture};
use pretty_assertions::assert_eq;
use sheet_inventory_xlsx::XlsxReader;

#[test]
fn test_sheet_order_preserved() {
    let fixture = Fixture::new()
        .sheet("Stock", "")
        .sheet("Ventes", r#"<row r="1"><c r="A1"><v>1</v></c></row>"#)
        .sheet("Achats", "");
    let workbook = XlsxReader::read(Cursor::new(fixture.to_bytes())).unwrap();

    assert_eq!(workbook.sheet_names(), vec!["Stock", "Ventes", "Achats"]);
    assert!(workbook.worksheet(0).unwrap().is_empty());
    assert_eq!(workbook.worksheet(1).unwrap().record_count(), 1);
}

#[test]
fn test_stock_extent_from_file() {
    let file = stock_fixture().write_temp();
    let workbook = XlsxReader::read_file(file.path()).expect("Failed to read workbook");
    let sheet = workbook.worksheet(0).expect("No worksheet");

    assert_eq!(sheet.name(), "Stock");
    assert_eq!((sheet.max_row(), sheet.max_column()), (3, 3));

    // Row 3 only holds blank records
    assert_eq!(sheet.row_cells(3).filter(|(_, c)| c.has_value()).count(), 0);
    assert_eq!(sheet.row_cells(1).filter(|(_, c)| c.has_value()).count(), 3);
}

#[test]
fn test_sparse_sheet_extent() {
    let fixture = Fixture::new().sheet(
        "Data",
        r#"<row r="2"><c r="B2"><v>1</v></c></row><row r="40"><c r="AA40" t="inlineStr"><is><t>far</t></is></c></row>"#,
    );
    let workbook = XlsxReader::read(Cursor::new(fixture.to_bytes())).unwrap();
    let sheet = workbook.worksheet(0).unwrap();

    assert_eq!((sheet.max_row(), sheet.max_column()), (40, 27));
    assert_eq!(sheet.record_count(), 2);
}

#[test]
fn test_long_sheet_name_is_read() {
    let long_name = "Inventaire trimestriel des stocks 2024-T";
    assert_eq!(long_name.chars().count(), 40);

    let fixture = Fixture::new()
        .sheet(long_name, r#"<row r="1"><c r="A1"><v>7</v></c></row>"#)
        .sheet("Ventes", "");
    let workbook = XlsxReader::read(Cursor::new(fixture.to_bytes())).unwrap();

    assert_eq!(workbook.sheet_names(), vec![long_name, "Ventes"]);
    assert_eq!(workbook.worksheet(0).unwrap().record_count(), 1);
}

#[test]
fn test_duplicate_sheet_name_is_skipped() {
    let fixture = Fixture::new()
        .sheet("Stock", r#"<row r="1"><c r="A1"><v>1</v></c></row>"#)
        .sheet("STOCK", r#"<row r="1"><c r="A1"><v>2</v></c></row>"#);
    let workbook = XlsxReader::read(Cursor::new(fixture.to_bytes())).unwrap();

    assert_eq!(workbook.sheet_names(), vec!["Stock"]);
}
