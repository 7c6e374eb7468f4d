//! Report model and the reporter that builds it

use std::collections::BTreeSet;

use serde::Serialize;
use sheet_inventory_core::{Cell, CellAddress, Workbook, Worksheet};

use crate::columns::{classify_columns, ColumnProfile};
use crate::formulas::{extract_formulas, formula_count, FormulaEntry};
use crate::header::{detect_header, header_labels};
use crate::histogram::{kind_histogram, KindCount};
use crate::inventory::{cell_inventory, number_formats, FormatEntry, InventoryEntry};
use crate::options::{PreviewLimit, ReportOptions};
use crate::references::collect_references;

/// Marker appended to truncated values
pub const TRUNCATION_MARKER: &str = "...";

/// Report over a whole workbook
#[derive(Debug, Clone, Serialize)]
pub struct WorkbookReport {
    /// Options the report was built with
    pub options: ReportOptions,
    /// Sheet names in workbook order
    pub sheet_names: Vec<String>,
    pub sheets: Vec<SheetReport>,
}

/// Report over one sheet
#[derive(Debug, Clone, Serialize)]
pub struct SheetReport {
    pub name: String,
    pub max_row: u32,
    pub max_column: u16,
    pub header: HeaderSection,
    pub formulas: FormulaSection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<BTreeSet<String>>,
    /// Profiled columns, ascending, capped at `max_columns_profiled`
    pub columns: Vec<ColumnSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind_histogram: Option<Vec<KindCount>>,
    pub data_sample: Vec<RowPreview>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory: Option<Vec<InventoryEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_formats: Option<Vec<FormatEntry>>,
}

/// Header detection result and the top rows of the sheet
#[derive(Debug, Clone, Serialize)]
pub struct HeaderSection {
    /// Probable header row, `None` when no row is dense enough
    pub row: Option<u32>,
    /// Labels of the header row (empty without a header)
    pub labels: Vec<String>,
    pub preview: Vec<RowPreview>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormulaSection {
    pub entries: Vec<FormulaEntry>,
    /// All formula cells of the sheet, whatever was selected
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    /// Column letters
    pub column: String,
    pub index: u16,
    #[serde(flatten)]
    pub profile: ColumnProfile,
}

/// Non-empty cells of one row, within the column bound
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowPreview {
    pub row: u32,
    pub cells: Vec<PreviewCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewCell {
    /// Column letters
    pub column: String,
    /// Display value, possibly truncated
    pub value: String,
    pub is_formula: bool,
}

/// Builds [`WorkbookReport`]s
///
/// Every pass is read-only and recomputed per call; nothing is cached
/// between sheets or between calls.
#[derive(Debug, Clone, Default)]
pub struct WorkbookReporter {
    options: ReportOptions,
}

impl WorkbookReporter {
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    /// Report on every sheet, in workbook order
    pub fn build(&self, workbook: &Workbook) -> WorkbookReport {
        tracing::info!(sheets = workbook.sheet_count(), depth = ?self.options.depth, "Building report");

        WorkbookReport {
            options: self.options.clone(),
            sheet_names: workbook.sheet_names().into_iter().map(String::from).collect(),
            sheets: workbook.worksheets().map(|ws| self.build_sheet(ws)).collect(),
        }
    }

    /// Report on one sheet
    pub fn build_sheet(&self, sheet: &Worksheet) -> SheetReport {
        let _span = tracing::info_span!("sheet", name = sheet.name()).entered();
        let opts = &self.options;

        let header_row = detect_header(sheet, opts.header_scan_rows, opts.header_threshold);
        let header = HeaderSection {
            row: header_row,
            labels: header_row
                .map(|row| header_labels(sheet, row, opts.header_label_columns))
                .unwrap_or_default(),
            preview: preview_rows(
                sheet,
                1,
                opts.header_preview_rows,
                opts.header_preview_limit,
                opts.header_truncate_length,
            ),
        };

        let formulas = FormulaSection {
            entries: extract_formulas(sheet, &opts.formula_mode),
            total: formula_count(sheet),
        };

        let references = opts.show_references.then(|| {
            collect_references(
                sheet.formula_cells().map(|(_, _, text)| text),
                opts.reference_bound,
            )
        });

        let columns = classify_columns(sheet, opts.column_scan_start, opts.column_scan_rows)
            .into_iter()
            .take(opts.max_columns_profiled)
            .map(|(index, profile)| ColumnSummary {
                column: CellAddress::column_to_letters(index),
                index,
                profile,
            })
            .collect();

        let kind_histogram = opts
            .show_kind_histogram
            .then(|| kind_histogram(sheet, opts.histogram_start, opts.histogram_end));

        let data_sample = preview_rows(
            sheet,
            opts.row_sample_start,
            opts.row_sample_end,
            PreviewLimit::Columns(opts.max_columns_shown),
            opts.truncate_length,
        );

        let (inventory, number_formats) = if opts.show_inventory {
            (
                Some(cell_inventory(sheet)),
                Some(number_formats(sheet, opts.format_rows)),
            )
        } else {
            (None, None)
        };

        tracing::debug!(
            header = ?header.row,
            formulas = formulas.total,
            "Sheet analysed"
        );

        SheetReport {
            name: sheet.name().to_string(),
            max_row: sheet.max_row(),
            max_column: sheet.max_column(),
            header,
            formulas,
            references,
            columns,
            kind_histogram,
            data_sample,
            inventory,
            number_formats,
        }
    }
}

/// Non-empty cells of rows `first_row..=min(last_row, max_row)`, as many
/// per row as `limit` allows; rows with nothing to show are left out
pub fn preview_rows(
    sheet: &Worksheet,
    first_row: u32,
    last_row: u32,
    limit: PreviewLimit,
    truncate_length: usize,
) -> Vec<RowPreview> {
    let last_row = last_row.min(sheet.max_row());

    (first_row.max(1)..=last_row)
        .filter_map(|row| {
            let non_empty = sheet.row_cells(row).filter(|(_, cell)| cell.has_value());
            let shown: Vec<(u16, &Cell)> = match limit {
                PreviewLimit::Columns(max) => non_empty.take_while(|&(col, _)| col <= max).collect(),
                PreviewLimit::NonEmpty(max) => non_empty.take(max).collect(),
            };
            let cells: Vec<PreviewCell> = shown
                .into_iter()
                .map(|(col, cell)| PreviewCell {
                    column: CellAddress::column_to_letters(col),
                    value: truncate(&cell.value.to_string(), truncate_length),
                    is_formula: cell.is_formula(),
                })
                .collect();
            (!cells.is_empty()).then_some(RowPreview { row, cells })
        })
        .collect()
}

/// Cut `value` to `max_chars` characters, marking the cut
pub fn truncate(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}{}", &value[..byte_index], TRUNCATION_MARKER),
        None => value.to_string(),
    }
}
