//! Command-line arguments and their mapping onto `ReportOptions`

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, ValueEnum};
use sheet_inventory_report::{FormulaMode, PreviewLimit, ReportDepth, ReportOptions};

#[derive(Parser, Debug)]
#[command(name = "sheet-inventory")]
#[command(
    author,
    version,
    about = "Print a bounded inventory of a spreadsheet's contents"
)]
pub struct Cli {
    /// Input spreadsheet file (xlsx, xlsm)
    pub input: PathBuf,

    /// Report depth
    #[arg(short, long, value_enum, default_value_t = Depth::Quick)]
    pub depth: Depth,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the report to a file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Log more (-v: info, -vv: debug); RUST_LOG applies otherwise
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    pub overrides: Overrides,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    /// Header preview, unique formula sample, column kinds
    Quick,
    /// Adds header labels, formula totals, references and a kind histogram
    Detailed,
    /// Adds every formula, every cell and number formats
    Full,
}

impl From<Depth> for ReportDepth {
    fn from(depth: Depth) -> Self {
        match depth {
            Depth::Quick => ReportDepth::Quick,
            Depth::Detailed => ReportDepth::Detailed,
            Depth::Full => ReportDepth::Full,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Per-option overrides of the depth preset
#[derive(Args, Debug, Default)]
pub struct Overrides {
    /// Rows scanned for a header row
    #[arg(long, value_name = "ROWS")]
    pub header_scan_rows: Option<u32>,

    /// A header row has more than this many non-empty cells
    #[arg(long, value_name = "COUNT")]
    pub header_threshold: Option<usize>,

    /// Header labels listed when a header row is found
    #[arg(long, value_name = "COUNT")]
    pub header_label_columns: Option<u16>,

    /// Rows shown in the header preview
    #[arg(long, value_name = "ROWS")]
    pub header_preview_rows: Option<u32>,

    /// Header preview shows non-empty cells of the first COUNT columns
    #[arg(long, value_name = "COUNT", conflicts_with = "header_preview_cells")]
    pub header_preview_columns: Option<u16>,

    /// Header preview shows the first COUNT non-empty cells of each row
    #[arg(long, value_name = "COUNT")]
    pub header_preview_cells: Option<usize>,

    /// Character limit for header preview values
    #[arg(long, value_name = "CHARS")]
    pub header_truncate_length: Option<usize>,

    /// List every formula cell
    #[arg(long, conflicts_with = "formula_limit")]
    pub all_formulas: bool,

    /// Formulas listed in the formula section
    #[arg(long, value_name = "COUNT")]
    pub formula_limit: Option<usize>,

    /// Last row scanned for unique formulas (0: whole sheet)
    #[arg(long, value_name = "ROW")]
    pub formula_rows: Option<u32>,

    /// First row of the column type scan
    #[arg(long, value_name = "ROW")]
    pub column_scan_start: Option<u32>,

    /// Last row of the column type scan
    #[arg(long, value_name = "ROW")]
    pub column_scan_rows: Option<u32>,

    /// Columns listed in the column type section
    #[arg(long, value_name = "COUNT")]
    pub max_columns_profiled: Option<usize>,

    /// First row of the data sample
    #[arg(long, value_name = "ROW")]
    pub row_sample_start: Option<u32>,

    /// Last row of the data sample
    #[arg(long, value_name = "ROW")]
    pub row_sample_end: Option<u32>,

    /// Columns shown in the data sample
    #[arg(long, value_name = "COUNT")]
    pub max_columns_shown: Option<u16>,

    /// Character limit for data sample values
    #[arg(long, value_name = "CHARS")]
    pub truncate_length: Option<usize>,

    /// Stop collecting references past this many
    #[arg(long, value_name = "COUNT")]
    pub reference_bound: Option<usize>,

    /// References listed in the reference section
    #[arg(long, value_name = "COUNT")]
    pub references_shown: Option<usize>,

    /// First row counted by the value-kind histogram
    #[arg(long, value_name = "ROW")]
    pub histogram_start: Option<u32>,

    /// Last row counted by the value-kind histogram
    #[arg(long, value_name = "ROW")]
    pub histogram_end: Option<u32>,

    /// Rows covered by the number format listing
    #[arg(long, value_name = "ROWS")]
    pub format_rows: Option<u32>,

    /// Include the cell-reference section
    #[arg(long)]
    pub references: bool,

    /// Include the value-kind histogram
    #[arg(long)]
    pub histogram: bool,

    /// Include the cell inventory and number formats
    #[arg(long)]
    pub inventory: bool,
}

impl Overrides {
    /// Apply the overrides given on the command line
    pub fn apply(&self, options: &mut ReportOptions) {
        fn set<T: Copy>(target: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *target = value;
            }
        }

        set(&mut options.header_scan_rows, self.header_scan_rows);
        set(&mut options.header_threshold, self.header_threshold);
        set(&mut options.column_scan_start, self.column_scan_start);
        set(&mut options.column_scan_rows, self.column_scan_rows);
        set(&mut options.max_columns_profiled, self.max_columns_profiled);
        set(&mut options.row_sample_start, self.row_sample_start);
        set(&mut options.row_sample_end, self.row_sample_end);
        set(&mut options.max_columns_shown, self.max_columns_shown);
        set(&mut options.truncate_length, self.truncate_length);
        set(&mut options.reference_bound, self.reference_bound);
        set(&mut options.header_label_columns, self.header_label_columns);
        set(&mut options.header_preview_rows, self.header_preview_rows);
        set(&mut options.header_truncate_length, self.header_truncate_length);
        set(&mut options.references_shown, self.references_shown);
        set(&mut options.histogram_start, self.histogram_start);
        set(&mut options.histogram_end, self.histogram_end);
        set(&mut options.format_rows, self.format_rows);
        set(
            &mut options.header_preview_limit,
            self.header_preview_columns.map(PreviewLimit::Columns),
        );
        set(
            &mut options.header_preview_limit,
            self.header_preview_cells.map(PreviewLimit::NonEmpty),
        );

        options.show_references |= self.references;
        options.show_kind_histogram |= self.histogram;
        options.show_inventory |= self.inventory;

        if self.all_formulas {
            options.formula_mode = FormulaMode::Exhaustive;
        }
        if let Some(limit) = self.formula_limit {
            options.formula_mode = match options.formula_mode {
                FormulaMode::Deduplicated { max_rows, .. } => FormulaMode::Deduplicated {
                    max_count: limit,
                    max_rows,
                },
                FormulaMode::First { .. } | FormulaMode::Exhaustive => {
                    FormulaMode::First { max_count: limit }
                }
            };
        }
        if let (Some(rows), FormulaMode::Deduplicated { max_count, .. }) =
            (self.formula_rows, options.formula_mode)
        {
            options.formula_mode = FormulaMode::Deduplicated {
                max_count,
                max_rows: (rows > 0).then_some(rows),
            };
        }
    }
}

impl Cli {
    /// Preset for the chosen depth with the overrides applied
    pub fn report_options(&self) -> ReportOptions {
        let mut options = ReportOptions::for_depth(self.depth.into());
        self.overrides.apply(&mut options);
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sheet-inventory").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_are_quick() {
        let cli = parse(&["stock.xlsx"]);
        assert_eq!(cli.depth, Depth::Quick);
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.report_options(), ReportOptions::quick());
    }

    #[test]
    fn test_overrides() {
        let cli = parse(&[
            "stock.xlsx",
            "--depth",
            "detailed",
            "--header-threshold",
            "2",
            "--formula-limit",
            "5",
            "--inventory",
            "--truncate-length",
            "10",
        ]);
        let options = cli.report_options();

        assert_eq!(options.depth, ReportDepth::Detailed);
        assert_eq!(options.header_threshold, 2);
        assert_eq!(options.formula_mode, FormulaMode::First { max_count: 5 });
        assert!(options.show_inventory);
        assert_eq!(options.truncate_length, 10);
        assert_eq!(options.column_scan_rows, 100);
    }

    #[test]
    fn test_preview_and_section_overrides() {
        let options = parse(&[
            "s.xlsx",
            "--header-preview-rows",
            "3",
            "--header-preview-cells",
            "4",
            "--header-truncate-length",
            "12",
            "--header-label-columns",
            "6",
            "--references-shown",
            "5",
            "--histogram-start",
            "2",
            "--histogram-end",
            "30",
            "--format-rows",
            "4",
        ])
        .report_options();

        assert_eq!(options.header_preview_rows, 3);
        assert_eq!(options.header_preview_limit, PreviewLimit::NonEmpty(4));
        assert_eq!(options.header_truncate_length, 12);
        assert_eq!(options.header_label_columns, 6);
        assert_eq!(options.references_shown, 5);
        assert_eq!((options.histogram_start, options.histogram_end), (2, 30));
        assert_eq!(options.format_rows, 4);

        let options = parse(&["s.xlsx", "--depth", "detailed", "--header-preview-columns", "8"])
            .report_options();
        assert_eq!(options.header_preview_limit, PreviewLimit::Columns(8));
    }

    #[test]
    fn test_formula_rows() {
        let options = parse(&["s.xlsx", "--formula-rows", "0"]).report_options();
        assert_eq!(
            options.formula_mode,
            FormulaMode::Deduplicated {
                max_count: 15,
                max_rows: None
            }
        );

        let options = parse(&["s.xlsx", "--all-formulas"]).report_options();
        assert_eq!(options.formula_mode, FormulaMode::Exhaustive);
    }

    #[test]
    fn test_conflicting_formula_flags() {
        let result = Cli::try_parse_from([
            "sheet-inventory",
            "s.xlsx",
            "--all-formulas",
            "--formula-limit",
            "3",
        ]);
        assert!(result.is_err());
    }
}
