//! Command-line interface components.
//!
//! Parses arguments, loads the input file, reports the scans found and
//! runs the requested export (or the batch bundle).

use crate::config::{ExportConfig, ImportConfig};
use crate::constants::{DEFAULT_ENCODING, DEFAULT_OUTPUT_FILE, DEFAULT_TXT_DELIMITER};
use crate::export::{ExportFormat, Exporter, ScanSelection, batch};
use crate::importer::Importer;
use crate::models::{Document, ScanMetadata};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::Parser;
use colored::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "cv-importer")]
#[command(about = "Import cyclic voltammetry data exported by PalmSens PStouch and convert it")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Input CSV file exported from PStouch
    #[arg(value_name = "INPUT_FILE")]
    pub input_file: PathBuf,

    /// Output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Excel)]
    pub format: ExportFormat,

    /// Index of the scan to export (0-based)
    #[arg(short, long, default_value_t = 0)]
    pub scan: usize,

    /// Export every scan side by side (CSV only)
    #[arg(long)]
    pub all_scans: bool,

    /// Input file encoding
    #[arg(short, long, default_value = DEFAULT_ENCODING)]
    pub encoding: String,

    /// Column delimiter for TXT output
    #[arg(long, default_value_t = DEFAULT_TXT_DELIMITER)]
    pub delimiter: char,

    /// List the scans found and exit without exporting
    #[arg(long)]
    pub list: bool,

    /// Print the scan listing as JSON
    #[arg(long, requires = "list")]
    pub json: bool,

    /// Write the full export bundle (workbook, per-scan CSV, TXT, CHI) into this directory
    #[arg(long, value_name = "DIR", conflicts_with = "list")]
    pub batch_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn import_config(&self) -> ImportConfig {
        ImportConfig::default().with_encoding(self.encoding.clone())
    }

    pub fn export_config(&self) -> ExportConfig {
        ExportConfig::default().with_txt_delimiter(self.delimiter)
    }

    /// Scans covered by a single-file export
    pub fn selection(&self) -> ScanSelection {
        if self.all_scans && self.format == ExportFormat::Csv {
            ScanSelection::All
        } else {
            ScanSelection::One(self.scan)
        }
    }
}

/// Install the tracing subscriber; `RUST_LOG` overrides the default level
pub fn setup_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cv_importer={}", level)));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Serializable scan listing
#[derive(Debug, Serialize)]
pub struct DocumentSummary<'a> {
    pub source_file: Option<&'a str>,
    pub date_time: Option<&'a str>,
    pub scan_count: usize,
    pub scans: Vec<ScanSummary<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ScanSummary<'a> {
    pub index: usize,
    pub name: &'a str,
    pub date: Option<NaiveDateTime>,
    #[serde(flatten)]
    pub metadata: &'a ScanMetadata,
}

impl<'a> DocumentSummary<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self {
            source_file: document.metadata().source_file.as_deref(),
            date_time: document.metadata().date_time.as_deref(),
            scan_count: document.scan_count(),
            scans: document
                .scans()
                .iter()
                .enumerate()
                .map(|(index, scan)| ScanSummary {
                    index,
                    name: scan.name(),
                    date: scan.date(),
                    metadata: scan.metadata(),
                })
                .collect(),
        }
    }
}

fn print_scans(document: &Document) {
    println!(
        "{} {} scans",
        "Loaded".bright_green(),
        document.scan_count().to_string().bright_white().bold()
    );
    for (index, scan) in document.scans().iter().enumerate() {
        println!(
            "  {}: {} {}",
            index.to_string().bright_yellow(),
            scan.name().bright_cyan(),
            format!("({} points)", scan.points()).bright_black()
        );
    }
}

/// Run the command described by `args`
pub fn run(args: Args) -> Result<()> {
    debug!("Command line arguments: {:?}", args);

    let importer = Importer::new(args.import_config());
    importer.config().validate()?;

    let document = importer
        .load_file(&args.input_file)
        .with_context(|| format!("Failed to load {}", args.input_file.display()))?;

    if args.list && args.json {
        let summary = DocumentSummary::new(&document);
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to serialize scan listing")?
        );
        return Ok(());
    }

    print_scans(&document);
    if args.list {
        return Ok(());
    }

    let exporter = Exporter::new(args.export_config());

    if let Some(batch_dir) = &args.batch_dir {
        return run_batch(&exporter, &document, batch_dir);
    }

    exporter
        .export(&document, args.format, &args.output, args.selection())
        .with_context(|| format!("{} export failed", args.format))?;
    println!(
        "{} {}",
        "File exported successfully:".bright_green(),
        args.output.display()
    );
    Ok(())
}

fn run_batch(exporter: &Exporter, document: &Document, batch_dir: &Path) -> Result<()> {
    println!(
        "{} {}",
        "Exporting analysis bundle to".bright_yellow(),
        batch_dir.display()
    );
    let report = batch::export_batch(exporter, document, batch_dir, true)?;

    for outcome in &report.outcomes {
        match &outcome.error {
            None => println!(
                "  {} {}",
                "✓".bright_green(),
                outcome.step.path.display()
            ),
            Some(e) => println!(
                "  {} {}: {}",
                "✗".bright_red(),
                outcome.step.path.display(),
                e
            ),
        }
    }

    if !report.is_success() {
        anyhow::bail!(
            "{} of {} exports failed",
            report.failed(),
            report.outcomes.len()
        );
    }
    println!("\n{}", "All operations completed!".bright_green().bold());
    Ok(())
}
