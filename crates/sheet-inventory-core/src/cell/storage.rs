//! Cell storage implementation
//!
//! Sparse, row-ordered storage for worksheet cells. Only cell records that
//! the reader materialized are stored; a record may hold an empty value.

use std::collections::BTreeMap;

use super::CellValue;

/// Whether a cell holds a literal value or a formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum CellKind {
    /// Plain value typed in (or computed and stored) as-is
    #[default]
    Literal,
    /// Formula; the cell's value is the formula source text
    Formula,
}

/// Complete data for a single cell
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    /// The cell's value (formula source text for formula cells)
    pub value: CellValue,
    /// Literal vs. formula flag
    pub kind: CellKind,
    /// Display number format code, if the source carried one
    pub number_format: Option<String>,
}

impl Cell {
    /// Create a literal cell
    pub fn literal<V: Into<CellValue>>(value: V) -> Self {
        Self {
            value: value.into(),
            kind: CellKind::Literal,
            number_format: None,
        }
    }

    /// Create a formula cell from its source text
    ///
    /// A leading `=` is added when missing.
    pub fn formula<S: AsRef<str>>(text: S) -> Self {
        let text = text.as_ref();
        let text = if text.starts_with('=') {
            CellValue::text(text)
        } else {
            CellValue::text(format!("={}", text))
        };
        Self {
            value: text,
            kind: CellKind::Formula,
            number_format: None,
        }
    }

    /// Create a cell record with no value
    pub fn blank() -> Self {
        Self::default()
    }

    /// Attach a number format code
    pub fn with_number_format<S: Into<String>>(mut self, format: S) -> Self {
        self.number_format = Some(format.into());
        self
    }

    /// Check if the cell carries a non-null value
    pub fn has_value(&self) -> bool {
        !self.value.is_empty()
    }

    /// Check if the cell is a formula cell
    pub fn is_formula(&self) -> bool {
        self.kind == CellKind::Formula
    }

    /// Get the formula text if this is a formula cell
    pub fn formula_text(&self) -> Option<&str> {
        match self.kind {
            CellKind::Formula => self.value.as_text(),
            CellKind::Literal => None,
        }
    }
}

/// Sparse row-based storage for worksheet cells
///
/// Structure: `BTreeMap<row_index, BTreeMap<col_index, Cell>>`, so iteration
/// is always row-major then column-major. The extent only grows: the model
/// is read-only once loaded.
#[derive(Debug, Default)]
pub struct CellStorage {
    rows: BTreeMap<u32, BTreeMap<u16, Cell>>,
    max_row: u32,
    max_col: u16,
}

impl CellStorage {
    /// Create empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cell
    pub fn get(&self, row: u32, col: u16) -> Option<&Cell> {
        self.rows.get(&row).and_then(|r| r.get(&col))
    }

    /// Store a cell record, replacing any previous record at the position
    pub fn set(&mut self, row: u32, col: u16, cell: Cell) {
        self.max_row = self.max_row.max(row);
        self.max_col = self.max_col.max(col);
        self.rows.entry(row).or_default().insert(col, cell);
    }

    /// Highest row index holding a record (0 when empty)
    pub fn max_row(&self) -> u32 {
        self.max_row
    }

    /// Highest column index holding a record (0 when empty)
    pub fn max_col(&self) -> u16 {
        self.max_col
    }

    /// Number of stored records, blank ones included
    pub fn record_count(&self) -> usize {
        self.rows.values().map(|r| r.len()).sum()
    }

    /// Check if storage has no records at all
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over all records in row order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u16, &Cell)> {
        self.rows
            .iter()
            .flat_map(|(&row, cols)| cols.iter().map(move |(&col, cell)| (row, col, cell)))
    }

    /// Iterate over records in rows `first..=last`, row-major
    pub fn iter_rows(&self, first: u32, last: u32) -> impl Iterator<Item = (u32, u16, &Cell)> {
        // BTreeMap::range panics on an inverted range
        (first <= last)
            .then(|| self.rows.range(first..=last))
            .into_iter()
            .flatten()
            .flat_map(|(&row, cols)| cols.iter().map(move |(&col, cell)| (row, col, cell)))
    }

    /// Iterate over records in a single row
    pub fn iter_row(&self, row: u32) -> impl Iterator<Item = (u16, &Cell)> {
        self.rows
            .get(&row)
            .into_iter()
            .flat_map(|cols| cols.iter().map(|(&col, cell)| (col, cell)))
    }
}
