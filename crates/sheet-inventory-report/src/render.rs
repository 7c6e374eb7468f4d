//! Text and JSON rendering of reports
//!
//! Every section prints something: when a pass finds nothing, the section
//! holds a placeholder line instead of being left out.

use std::fmt::{self, Write as _};

use sheet_inventory_core::Workbook;

use crate::error::ReportResult;
use crate::options::{FormulaMode, ReportOptions};
use crate::report::{RowPreview, SheetReport, WorkbookReport, WorkbookReporter};

pub const NO_HEADER: &str = "no header found";
pub const NO_FORMULAS: &str = "no formulas detected";
pub const NO_COLUMNS: &str = "no classifiable values";
pub const NO_ROWS: &str = "no data rows in range";
pub const NO_REFERENCES: &str = "no cell references";

const WIDTH: usize = 80;

/// Render a report as text
pub fn render_report(report: &WorkbookReport) -> String {
    report.to_string()
}

/// Build and render a report in one go
pub fn render_workbook(workbook: &Workbook, options: &ReportOptions) -> String {
    render_report(&WorkbookReporter::new(options.clone()).build(workbook))
}

/// Render a report as pretty-printed JSON
pub fn render_json(report: &WorkbookReport) -> ReportResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

fn banner(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    let rule = "=".repeat(WIDTH);
    writeln!(f, "{}", rule)?;
    writeln!(f, "{}", title)?;
    writeln!(f, "{}", rule)
}

fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{}:", title)?;
    writeln!(f, "{}", "-".repeat(WIDTH))
}

fn row_range(first: u32, last: u32) -> String {
    format!("rows {}-{}", first, last)
}

/// `L{row}: A:value | B:value`, formula cells passed through `tag`
fn write_rows(
    f: &mut fmt::Formatter<'_>,
    rows: &[RowPreview],
    tag: impl Fn(&str) -> String,
) -> fmt::Result {
    if rows.is_empty() {
        return writeln!(f, "{}", NO_ROWS);
    }
    for row in rows {
        let mut line = String::new();
        for (i, cell) in row.cells.iter().enumerate() {
            if i > 0 {
                line.push_str(" | ");
            }
            let value = if cell.is_formula {
                tag(&cell.value)
            } else {
                cell.value.clone()
            };
            write!(line, "{}:{}", cell.column, value)?;
        }
        writeln!(f, "L{}: {}", row.row, line)?;
    }
    Ok(())
}

impl fmt::Display for WorkbookReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        banner(f, "WORKBOOK INVENTORY")?;
        writeln!(f)?;
        writeln!(f, "Sheets: {}", self.sheet_names.len())?;
        writeln!(f, "Names: {}", self.sheet_names.join(", "))?;

        for sheet in &self.sheets {
            writeln!(f)?;
            let view = SheetView {
                sheet,
                options: &self.options,
            };
            write!(f, "{}", view)?;
        }

        writeln!(f)?;
        banner(f, "ANALYSIS COMPLETE")
    }
}

/// A sheet report together with the options that shaped it
struct SheetView<'a> {
    sheet: &'a SheetReport,
    options: &'a ReportOptions,
}

impl SheetView<'_> {
    fn header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let opts = self.options;
        let header = &self.sheet.header;

        section(
            f,
            &format!(
                "HEADER ({}, more than {} values)",
                row_range(1, opts.header_scan_rows),
                opts.header_threshold
            ),
        )?;
        match header.row {
            Some(row) => {
                writeln!(f, "Probable header row: {}", row)?;
                writeln!(f, "Columns: {}", header.labels.join(" | "))?;
            }
            None => writeln!(f, "{}", NO_HEADER)?,
        }

        section(
            f,
            &format!("HEADER PREVIEW ({})", row_range(1, opts.header_preview_rows)),
        )?;
        write_rows(f, &header.preview, |value| format!("{} [FORMULA]", value))
    }

    fn formulas(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formulas = &self.sheet.formulas;
        let title = match self.options.formula_mode {
            FormulaMode::Exhaustive => "FORMULAS (all)".to_string(),
            FormulaMode::Deduplicated {
                max_count,
                max_rows: Some(max_rows),
            } => format!("FORMULAS (unique, first {} within {})", max_count, row_range(1, max_rows)),
            FormulaMode::Deduplicated {
                max_count,
                max_rows: None,
            } => format!("FORMULAS (unique, first {})", max_count),
            FormulaMode::First { max_count } => format!("FORMULAS (first {})", max_count),
        };

        section(f, &title)?;
        if formulas.entries.is_empty() {
            writeln!(f, "{}", NO_FORMULAS)?;
        }
        for entry in &formulas.entries {
            writeln!(f, "{}: {}", entry.address, entry.text)?;
        }
        if let FormulaMode::First { .. } = self.options.formula_mode {
            writeln!(f)?;
            writeln!(f, "Total formulas: {}", formulas.total)?;
        }
        Ok(())
    }

    fn references(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(references) = &self.sheet.references else {
            return Ok(());
        };

        section(f, "REFERENCED CELLS (sample)")?;
        if references.is_empty() {
            return writeln!(f, "{}", NO_REFERENCES);
        }
        let shown: Vec<&str> = references
            .iter()
            .take(self.options.references_shown)
            .map(String::as_str)
            .collect();
        writeln!(f, "{}", shown.join(", "))
    }

    fn columns(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let opts = self.options;
        section(
            f,
            &format!(
                "COLUMN TYPES ({})",
                row_range(opts.column_scan_start, opts.column_scan_rows)
            ),
        )?;
        if self.sheet.columns.is_empty() {
            return writeln!(f, "{}", NO_COLUMNS);
        }
        for column in &self.sheet.columns {
            let kinds: Vec<&str> = column.profile.shown_kinds().map(|k| k.as_str()).collect();
            writeln!(
                f,
                "Col {}: kinds=[{}], formulas={}, literals={}",
                column.column,
                kinds.join(", "),
                column.profile.formula_count,
                column.profile.literal_count
            )?;
        }
        Ok(())
    }

    fn kind_histogram(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(histogram) = &self.sheet.kind_histogram else {
            return Ok(());
        };

        let opts = self.options;
        section(
            f,
            &format!("VALUE KINDS ({})", row_range(opts.histogram_start, opts.histogram_end)),
        )?;
        if histogram.is_empty() {
            return writeln!(f, "{}", NO_COLUMNS);
        }
        for entry in histogram {
            writeln!(f, "{}: {} occurrences", entry.kind, entry.count)?;
        }
        Ok(())
    }

    fn data_sample(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let opts = self.options;
        section(
            f,
            &format!(
                "DATA SAMPLE ({})",
                row_range(opts.row_sample_start, opts.row_sample_end)
            ),
        )?;
        write_rows(f, &self.sheet.data_sample, |value| {
            format!("[FORMULA: {}]", value)
        })
    }

    fn inventory(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(inventory) = &self.sheet.inventory {
            section(f, "CELL INVENTORY")?;
            if inventory.is_empty() {
                writeln!(f, "{}", NO_ROWS)?;
            }
            for entry in inventory {
                if entry.kind == sheet_inventory_core::CellKind::Formula {
                    writeln!(f, "{}: {}", entry.address, entry.value)?;
                } else {
                    writeln!(f, "{}: {} ({})", entry.address, entry.value, entry.value_kind)?;
                }
            }
        }

        if let Some(formats) = &self.sheet.number_formats {
            section(
                f,
                &format!("NUMBER FORMATS ({})", row_range(1, self.options.format_rows)),
            )?;
            if formats.is_empty() {
                writeln!(f, "{}", NO_ROWS)?;
            }
            for entry in formats {
                writeln!(f, "{}: {}", entry.address, entry.number_format)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for SheetView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        banner(f, &format!("SHEET: {}", self.sheet.name))?;
        writeln!(
            f,
            "Dimensions: {} rows x {} columns",
            self.sheet.max_row, self.sheet.max_column
        )?;

        self.header(f)?;
        self.formulas(f)?;
        self.references(f)?;
        self.columns(f)?;
        self.kind_histogram(f)?;
        self.data_sample(f)?;
        self.inventory(f)
    }
}
