//! Cell-by-cell inventory and number formats

use serde::Serialize;
use sheet_inventory_core::{CellAddress, CellKind, ValueKind, Worksheet};

/// One non-empty cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryEntry {
    pub address: String,
    /// Display form of the value (formula text for formula cells)
    pub value: String,
    pub kind: CellKind,
    pub value_kind: ValueKind,
}

/// Number format of one non-empty cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatEntry {
    pub address: String,
    pub number_format: String,
}

/// Every non-empty cell, row-major
pub fn cell_inventory(sheet: &Worksheet) -> Vec<InventoryEntry> {
    sheet
        .iter_cells()
        .filter_map(|(row, col, cell)| {
            let value_kind = cell.value.kind()?;
            Some(InventoryEntry {
                address: CellAddress::new(row, col).to_a1_string(),
                value: cell.value.to_string(),
                kind: cell.kind,
                value_kind,
            })
        })
        .collect()
}

/// Number formats of the non-empty cells in rows `1..=max_rows`
///
/// Cells without a recorded format (formula cells) report `General`.
pub fn number_formats(sheet: &Worksheet, max_rows: u32) -> Vec<FormatEntry> {
    let last_row = max_rows.min(sheet.max_row());
    sheet
        .iter_rows(1, last_row)
        .filter(|(_, _, cell)| cell.has_value())
        .map(|(row, col, cell)| FormatEntry {
            address: CellAddress::new(row, col).to_a1_string(),
            number_format: cell
                .number_format
                .clone()
                .unwrap_or_else(|| "General".to_string()),
        })
        .collect()
}
