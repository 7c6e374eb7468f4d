//! Cell-related types
//!
//! This module contains:
//! - [`CellValue`] / [`ValueKind`] - The value stored in a cell and its kind
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`Cell`] / [`CellKind`] - Complete cell data: value, literal/formula flag, number format

mod address;
mod storage;
mod value;

pub use address::CellAddress;
pub use storage::{Cell, CellKind, CellStorage};
pub use value::{CellValue, SharedString, ValueKind};
