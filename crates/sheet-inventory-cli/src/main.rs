//! sheet-inventory - print what a spreadsheet contains

mod cli;

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use sheet_inventory_report::{render_json, render_report, WorkbookReporter};
use sheet_inventory_xlsx::XlsxReader;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, OutputFormat};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let workbook = XlsxReader::read_file(&cli.input)
        .with_context(|| format!("Failed to open '{}'", cli.input.display()))?;
    tracing::info!(
        path = %cli.input.display(),
        sheets = workbook.sheet_count(),
        "workbook loaded"
    );

    let report = WorkbookReporter::new(cli.report_options()).build(&workbook);
    let rendered = match cli.format {
        OutputFormat::Text => render_report(&report),
        OutputFormat::Json => render_json(&report).context("Failed to serialize report")?,
    };

    write_output(cli.output.as_deref(), &rendered)
}

/// `-v` flags win over `RUST_LOG`; warnings only by default
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    // Fails only if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn write_output(output: Option<&Path>, rendered: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(rendered.as_bytes())?;
            handle.flush()?;
        }
    }
    Ok(())
}
