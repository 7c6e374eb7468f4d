//! Formula extraction and sampling

use ahash::AHashSet;
use serde::Serialize;
use sheet_inventory_core::{CellAddress, Worksheet};

use crate::options::FormulaMode;

/// A formula cell and its source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormulaEntry {
    /// A1-style address
    pub address: String,
    pub row: u32,
    pub column: u16,
    /// Formula text, leading `=` included
    pub text: String,
}

impl FormulaEntry {
    fn new(row: u32, column: u16, text: &str) -> Self {
        Self {
            address: CellAddress::new(row, column).to_a1_string(),
            row,
            column,
            text: text.to_string(),
        }
    }
}

/// Formula cells of a sheet in row-major order
///
/// Only the cell kind decides what a formula is; a literal text value
/// starting with `=` is not one.
pub fn extract_formulas(sheet: &Worksheet, mode: &FormulaMode) -> Vec<FormulaEntry> {
    match *mode {
        FormulaMode::Exhaustive => sheet
            .formula_cells()
            .map(|(row, col, text)| FormulaEntry::new(row, col, text))
            .collect(),

        FormulaMode::First { max_count } => sheet
            .formula_cells()
            .take(max_count)
            .map(|(row, col, text)| FormulaEntry::new(row, col, text))
            .collect(),

        FormulaMode::Deduplicated {
            max_count,
            max_rows,
        } => {
            let last_row = max_rows.map_or(sheet.max_row(), |rows| rows.min(sheet.max_row()));
            let mut seen = AHashSet::new();

            sheet
                .iter_rows(1, last_row)
                .filter_map(|(row, col, cell)| cell.formula_text().map(|text| (row, col, text)))
                .filter(|&(_, _, text)| seen.insert(text))
                .take(max_count)
                .map(|(row, col, text)| FormulaEntry::new(row, col, text))
                .collect()
        }
    }
}

/// Number of formula cells in the sheet
pub fn formula_count(sheet: &Worksheet) -> usize {
    sheet.formula_cells().count()
}
