//! Header row detection

use sheet_inventory_core::{CellAddress, Worksheet};

/// Number of cells with a value in `row`
pub fn non_empty_count(sheet: &Worksheet, row: u32) -> usize {
    sheet.row_cells(row).filter(|(_, cell)| cell.has_value()).count()
}

/// Find the probable header row
///
/// Scans rows `1..=min(scan_rows, max_row)` top-down and returns the first
/// row with strictly more than `threshold` non-empty cells. A row with
/// exactly `threshold` cells does not qualify.
pub fn detect_header(sheet: &Worksheet, scan_rows: u32, threshold: usize) -> Option<u32> {
    let last_row = scan_rows.min(sheet.max_row());
    (1..=last_row).find(|&row| non_empty_count(sheet, row) > threshold)
}

/// Labels of a header row for columns `1..=min(max_columns, max_column)`
///
/// Empty header cells are named after their column (`ColD`).
pub fn header_labels(sheet: &Worksheet, row: u32, max_columns: u16) -> Vec<String> {
    let last_col = max_columns.min(sheet.max_column());
    (1..=last_col)
        .map(|col| {
            let value = sheet.value_at(row, col);
            if value.is_empty() {
                format!("Col{}", CellAddress::column_to_letters(col))
            } else {
                value.to_string()
            }
        })
        .collect()
}
