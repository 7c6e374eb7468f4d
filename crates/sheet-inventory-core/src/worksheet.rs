//! Worksheet type

use crate::cell::{Cell, CellAddress, CellStorage, CellValue};
use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};

static EMPTY_VALUE: CellValue = CellValue::Empty;

/// A worksheet (single sheet in a workbook)
///
/// Cells are addressed by 1-based `(row, col)`. The extent reported by
/// [`max_row`](Self::max_row) and [`max_column`](Self::max_column) is the
/// rectangle from A1 covering every cell record the sheet holds.
#[derive(Debug)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Cell storage
    cells: CellStorage,
}

impl Worksheet {
    /// Create a new, empty worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: CellStorage::new(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    // === Extent ===

    /// Highest row index holding a cell record (0 for an empty sheet)
    pub fn max_row(&self) -> u32 {
        self.cells.max_row()
    }

    /// Highest column index holding a cell record (0 for an empty sheet)
    pub fn max_column(&self) -> u16 {
        self.cells.max_col()
    }

    /// Check if the worksheet holds no cell records
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cell records, blank ones included
    pub fn record_count(&self) -> usize {
        self.cells.record_count()
    }

    // === Cell Access ===

    /// Get a cell by address string (e.g., "A1")
    pub fn cell(&self, address: &str) -> Result<Option<&Cell>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cells.get(addr.row, addr.col))
    }

    /// Get a cell by 1-based row and column indices
    pub fn cell_at(&self, row: u32, col: u16) -> Option<&Cell> {
        self.cells.get(row, col)
    }

    /// Get a cell's value, [`CellValue::Empty`] when there is no record
    pub fn value_at(&self, row: u32, col: u16) -> &CellValue {
        self.cells
            .get(row, col)
            .map(|c| &c.value)
            .unwrap_or(&EMPTY_VALUE)
    }

    /// Iterate over every cell record, row-major
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u16, &Cell)> {
        self.cells.iter()
    }

    /// Iterate over cell records in rows `first..=last`, row-major
    pub fn iter_rows(&self, first: u32, last: u32) -> impl Iterator<Item = (u32, u16, &Cell)> {
        self.cells.iter_rows(first, last)
    }

    /// Iterate over the cell records of one row, in column order
    pub fn row_cells(&self, row: u32) -> impl Iterator<Item = (u16, &Cell)> {
        self.cells.iter_row(row)
    }

    /// Iterate over all formula cells: (row, col, formula_text)
    pub fn formula_cells(&self) -> impl Iterator<Item = (u32, u16, &str)> {
        self.cells
            .iter()
            .filter_map(|(row, col, cell)| cell.formula_text().map(|text| (row, col, text)))
    }

    // === Loading ===

    /// Store a cell record at 1-based indices
    pub fn set_cell(&mut self, row: u32, col: u16, cell: Cell) -> Result<()> {
        self.validate_cell_position(row, col)?;
        self.cells.set(row, col, cell);
        Ok(())
    }

    /// Store a literal value by address string
    pub fn set_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell(addr.row, addr.col, Cell::literal(value))
    }

    /// Store a formula by address string
    pub fn set_formula(&mut self, address: &str, formula: &str) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell(addr.row, addr.col, Cell::formula(formula))
    }

    /// Validate cell position
    fn validate_cell_position(&self, row: u32, col: u16) -> Result<()> {
        if row == 0 || row > MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS));
        }
        if col == 0 || col > MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col as u32, MAX_COLS));
        }
        Ok(())
    }
}
