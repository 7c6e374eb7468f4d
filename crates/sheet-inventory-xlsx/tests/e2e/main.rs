//! End-to-end tests for sheet-inventory-xlsx.
//!
//! Each test builds the exact package it needs in memory (or in a temp
//! file), reads it back with `XlsxReader` and asserts on the loaded model.

mod common;
mod reading;

// Re-export common utilities for submodules
pub use common::*;
