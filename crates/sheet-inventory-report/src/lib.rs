//! # sheet-inventory-report
//!
//! Classifies the content of a [`Workbook`](sheet_inventory_core::Workbook)
//! and renders a bounded, deterministic inventory of it.
//!
//! Each sheet goes through independent read-only passes:
//!
//! - [`detect_header`] - first dense row near the top of the sheet
//! - [`extract_formulas`] - formula cells, exhaustive or sampled
//! - [`classify_columns`] - literal/formula counts and value kinds per column
//! - [`collect_references`] - A1 references used by formulas
//! - [`kind_histogram`] and [`cell_inventory`] for the deeper presets
//!
//! ## Example
//!
//! ```rust
//! use sheet_inventory_core::{Workbook, Worksheet};
//! use sheet_inventory_report::{render_report, ReportOptions, WorkbookReporter};
//!
//! let mut sheet = Worksheet::new("Stock");
//! sheet.set_value("A1", "ID").unwrap();
//! sheet.set_formula("C2", "=B2*2").unwrap();
//! let mut workbook = Workbook::new();
//! workbook.add_worksheet(sheet).unwrap();
//!
//! let report = WorkbookReporter::new(ReportOptions::default()).build(&workbook);
//! assert_eq!(report.sheets[0].formulas.entries[0].address, "C2");
//!
//! let text = render_report(&report);
//! assert!(text.contains("C2: =B2*2"));
//! ```

pub mod columns;
pub mod error;
pub mod formulas;
pub mod header;
pub mod histogram;
pub mod inventory;
pub mod options;
pub mod references;
pub mod render;
pub mod report;

pub use columns::{classify_columns, ColumnProfile, MAX_KINDS_SHOWN};
pub use error::{ReportError, ReportResult};
pub use formulas::{extract_formulas, formula_count, FormulaEntry};
pub use header::{detect_header, header_labels, non_empty_count};
pub use histogram::{kind_histogram, KindCount};
pub use inventory::{cell_inventory, number_formats, FormatEntry, InventoryEntry};
pub use options::{FormulaMode, PreviewLimit, ReportDepth, ReportOptions};
pub use references::{collect_references, extract_references};
pub use render::{render_json, render_report, render_workbook};
pub use report::{
    ColumnSummary, FormulaSection, HeaderSection, PreviewCell, RowPreview, SheetReport,
    WorkbookReport, WorkbookReporter,
};
