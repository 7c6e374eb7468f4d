//! # sheet-inventory-core
//!
//! Read-only data model shared by the sheet-inventory crates.
//!
//! - [`CellValue`] / [`ValueKind`] - the closed set of value types a cell can hold
//! - [`CellKind`] - literal vs. formula
//! - [`CellAddress`] - 1-based cell coordinates (e.g., "A1", "$B$2")
//! - [`Workbook`], [`Worksheet`] - ordered sheets of sparse cells
//!
//! ## Example
//!
//! ```rust
//! use sheet_inventory_core::{CellValue, Workbook, Worksheet};
//!
//! let mut sheet = Worksheet::new("Stock");
//! sheet.set_value("A1", "ID").unwrap();
//! sheet.set_value("A2", 1).unwrap();
//! sheet.set_formula("C2", "=B2*2").unwrap();
//!
//! let mut workbook = Workbook::new();
//! workbook.add_worksheet(sheet).unwrap();
//!
//! let sheet = workbook.worksheet(0).unwrap();
//! assert_eq!(sheet.max_row(), 2);
//! assert_eq!(sheet.max_column(), 3);
//! assert_eq!(sheet.value_at(2, 1), &CellValue::Integer(1));
//! ```

pub mod cell;
pub mod error;
pub mod workbook;
pub mod worksheet;

pub use cell::{Cell, CellAddress, CellKind, CellValue, SharedString, ValueKind};
pub use error::{Error, Result};
pub use workbook::Workbook;
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
