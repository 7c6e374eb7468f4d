//! Report options

use serde::Serialize;

/// Report presets
///
/// Each depth is the option set of one level of analysis, from a bounded
/// quick look to a full cell-by-cell inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportDepth {
    /// Header preview, unique formula sample, column kinds over 50 rows
    #[default]
    Quick,
    /// Adds the header labels, formula totals, cell references and the
    /// value-kind histogram; columns are profiled over 100 rows
    Detailed,
    /// Detailed plus every formula, every non-empty cell and number formats
    Full,
}

/// How formula cells are selected for the formula section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum FormulaMode {
    /// Every formula cell, no cap
    Exhaustive,
    /// Formulas whose text was not seen before, stopping after `max_count`
    /// entries; only rows `1..=max_rows` are scanned when bounded
    Deduplicated {
        max_count: usize,
        max_rows: Option<u32>,
    },
    /// The first `max_count` formula cells, duplicates included
    First { max_count: usize },
}

impl Default for FormulaMode {
    fn default() -> Self {
        FormulaMode::Deduplicated {
            max_count: DEFAULT_FORMULA_SAMPLE,
            max_rows: Some(200),
        }
    }
}

/// Which cells of a row a preview shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "limit", content = "count")]
pub enum PreviewLimit {
    /// Non-empty cells in columns `1..=n`
    Columns(u16),
    /// The first `n` non-empty cells, whatever their column
    NonEmpty(usize),
}

/// Default size of the deduplicated formula sample
pub const DEFAULT_FORMULA_SAMPLE: usize = 15;

/// Default header density threshold: a header row has strictly more
/// non-empty cells than this
pub const DEFAULT_HEADER_THRESHOLD: usize = 5;

/// Options for building a report
///
/// Row and column numbers are 1-based and inclusive. Ranges past the sheet
/// extent are clipped to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportOptions {
    /// Preset these options were derived from
    pub depth: ReportDepth,

    /// Rows scanned for a header candidate (default: 6)
    pub header_scan_rows: u32,
    /// Non-empty cell count a header row must exceed (default: 5)
    pub header_threshold: usize,
    /// Header labels listed when a header is found (default: 15)
    pub header_label_columns: u16,

    /// Rows shown in the header preview
    pub header_preview_rows: u32,
    /// Cells shown per header preview row
    pub header_preview_limit: PreviewLimit,
    /// Character limit for header preview values
    pub header_truncate_length: usize,

    /// Formula selection
    pub formula_mode: FormulaMode,

    /// First row of the column profile scan (default: 1)
    pub column_scan_start: u32,
    /// Last row of the column profile scan
    pub column_scan_rows: u32,
    /// Columns listed in the column type section (default: 20)
    pub max_columns_profiled: usize,

    /// First row of the data sample
    pub row_sample_start: u32,
    /// Last row of the data sample
    pub row_sample_end: u32,
    /// Columns shown in the data sample
    pub max_columns_shown: u16,
    /// Character limit for data sample values
    pub truncate_length: usize,

    /// Include the cell-reference section
    pub show_references: bool,
    /// Stop collecting references once more than this many were found
    /// (default: 50)
    pub reference_bound: usize,
    /// References listed in the rendered section (default: 20)
    pub references_shown: usize,

    /// Include the value-kind histogram
    pub show_kind_histogram: bool,
    /// First row counted by the histogram (default: 5)
    pub histogram_start: u32,
    /// Last row counted by the histogram (default: 100)
    pub histogram_end: u32,

    /// Include the cell inventory and number formats
    pub show_inventory: bool,
    /// Rows covered by the number format listing (default: 10)
    pub format_rows: u32,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self::quick()
    }
}

impl ReportOptions {
    /// Options for a depth preset
    pub fn for_depth(depth: ReportDepth) -> Self {
        match depth {
            ReportDepth::Quick => Self::quick(),
            ReportDepth::Detailed => Self::detailed(),
            ReportDepth::Full => Self::full(),
        }
    }

    /// Quick look: bounded previews and a unique formula sample
    pub fn quick() -> Self {
        Self {
            depth: ReportDepth::Quick,
            header_scan_rows: 6,
            header_threshold: DEFAULT_HEADER_THRESHOLD,
            header_label_columns: 15,
            header_preview_rows: 5,
            header_preview_limit: PreviewLimit::Columns(15),
            header_truncate_length: 40,
            formula_mode: FormulaMode::default(),
            column_scan_start: 1,
            column_scan_rows: 50,
            max_columns_profiled: 20,
            row_sample_start: 6,
            row_sample_end: 20,
            max_columns_shown: 12,
            truncate_length: 25,
            show_references: false,
            reference_bound: 50,
            references_shown: 20,
            show_kind_histogram: false,
            histogram_start: 5,
            histogram_end: 100,
            show_inventory: false,
            format_rows: 10,
        }
    }

    /// Detailed analysis
    pub fn detailed() -> Self {
        Self {
            depth: ReportDepth::Detailed,
            header_preview_rows: 9,
            header_preview_limit: PreviewLimit::NonEmpty(8),
            header_truncate_length: 50,
            formula_mode: FormulaMode::First { max_count: 20 },
            column_scan_rows: 100,
            row_sample_start: 5,
            row_sample_end: 15,
            max_columns_shown: 10,
            truncate_length: 30,
            show_references: true,
            show_kind_histogram: true,
            ..Self::quick()
        }
    }

    /// Full inventory
    pub fn full() -> Self {
        Self {
            depth: ReportDepth::Full,
            formula_mode: FormulaMode::Exhaustive,
            show_inventory: true,
            ..Self::detailed()
        }
    }

    /// Set the header density threshold
    pub fn with_header_threshold(mut self, threshold: usize) -> Self {
        self.header_threshold = threshold;
        self
    }

    /// Set the formula selection mode
    pub fn with_formula_mode(mut self, mode: FormulaMode) -> Self {
        self.formula_mode = mode;
        self
    }

    /// Set the row range of the column profile scan
    pub fn with_column_scan(mut self, first_row: u32, last_row: u32) -> Self {
        self.column_scan_start = first_row;
        self.column_scan_rows = last_row;
        self
    }

    /// Set the row range of the data sample
    pub fn with_row_sample(mut self, first_row: u32, last_row: u32) -> Self {
        self.row_sample_start = first_row;
        self.row_sample_end = last_row;
        self
    }
}
