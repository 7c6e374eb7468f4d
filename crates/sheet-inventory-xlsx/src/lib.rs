//! # sheet-inventory-xlsx
//!
//! XLSX (Office Open XML) reader for sheet-inventory.
//!
//! The reader loads every worksheet into a read-only
//! [`Workbook`](sheet_inventory_core::Workbook), keeping formula source text
//! (never cached results) and each literal cell's number format code.

pub mod error;
pub mod number_format;
pub mod reader;

mod styles;

pub use error::{XlsxError, XlsxResult};
pub use number_format::NumberFormat;
pub use reader::XlsxReader;
