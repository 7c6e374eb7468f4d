//! Tests for reading formula cells.

use std::io::Cursor;

use crate::{stock_fixture, Fixture};
use pretty_assertions::assert_eq;
use sheet_inventory_core::{CellKind, ValueKind};
use sheet_inventory_xlsx::XlsxReader;

#[test]
fn test_formula_text_not_cached_value() {
    let workbook = XlsxReader::read(Cursor::new(stock_fixture().to_bytes())).unwrap();
    let sheet = workbook.worksheet_by_name("Stock").expect("Stock sheet");

    let c2 = sheet.cell("C2").unwrap().expect("C2 should exist");
    assert_eq!(c2.kind, CellKind::Formula);
    assert_eq!(c2.value.kind(), Some(ValueKind::Text));
    assert_eq!(c2.formula_text(), Some("=B2*2"));
}

#[test]
fn test_string_result_formula() {
    let workbook = XlsxReader::read(Cursor::new(
        Fixture::new()
            .sheet(
                "Calc",
                r#"<row r="1"><c r="A1" t="str"><f>CONCATENATE("a","b")</f><v>ab</v></c><c r="B1"><f>TODAY()</f><v>45000</v></c></row>"#,
            )
            .to_bytes(),
    ))
    .unwrap();
    let sheet = workbook.worksheet(0).unwrap();

    let formulas: Vec<_> = sheet.formula_cells().collect();
    assert_eq!(
        formulas,
        vec![(1, 1, "=CONCATENATE(\"a\",\"b\")"), (1, 2, "=TODAY()")]
    );
}

#[test]
fn test_shared_formula_block() {
    let data = r#"<row r="1"><c r="A1"><v>1</v></c><c r="B1"><f t="shared" ref="B1:D2" si="3">$A$1+A1</f></c><c r="C1"><f t="shared" si="3"/></c><c r="D1"><f t="shared" si="3"/></c></row><row r="2"><c r="A2"><v>2</v></c><c r="B2"><f t="shared" si="3"/></c></row>"#;
    let workbook = XlsxReader::read(Cursor::new(Fixture::new().sheet("Calc", data).to_bytes()))
        .unwrap();
    let sheet = workbook.worksheet(0).unwrap();

    let formulas: Vec<_> = sheet
        .formula_cells()
        .map(|(row, col, text)| (row, col, text.to_string()))
        .collect();
    assert_eq!(
        formulas,
        vec![
            (1, 2, "=$A$1+A1".to_string()),
            (1, 3, "=$A$1+B1".to_string()),
            (1, 4, "=$A$1+C1".to_string()),
            (2, 2, "=$A$1+A2".to_string()),
        ]
    );
}

#[test]
fn test_orphan_shared_formula_is_dropped() {
    let data = r#"<row r="1"><c r="A1"><f t="shared" si="9"/><v>3</v></c><c r="B1"><v>4</v></c></row>"#;
    let workbook = XlsxReader::read(Cursor::new(Fixture::new().sheet("Calc", data).to_bytes()))
        .unwrap();
    let sheet = workbook.worksheet(0).unwrap();

    // Falls back to the cached value as a literal
    assert!(!sheet.cell_at(1, 1).unwrap().is_formula());
    assert_eq!(sheet.formula_cells().count(), 0);
    assert_eq!(sheet.max_column(), 2);
}
