//! Export of imported documents to downstream formats.
//!
//! Every exporter reads a [`Document`] and writes one output file:
//! CSV through a polars `DataFrame`, an XLSX workbook, delimited plain
//! text, and CHI-style instrument text. Batch export reproduces the
//! standard analysis bundle in one directory.

pub mod batch;
pub mod chi;
pub mod csv;
pub mod excel;
pub mod txt;

use crate::config::ExportConfig;
use crate::error::{CvError, Result};
use crate::models::{Document, Scan};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

/// Output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Comma-separated potential/current columns
    Csv,
    /// XLSX workbook with metadata, per-scan and combined sheets
    Excel,
    /// Delimited plain text
    Txt,
    /// CH Instruments style text
    Chi,
}

impl ExportFormat {
    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xlsx",
            ExportFormat::Txt => "txt",
            ExportFormat::Chi => "chi",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Excel => "Excel",
            ExportFormat::Txt => "TXT",
            ExportFormat::Chi => "CHI",
        };
        f.write_str(name)
    }
}

/// Which scans an export covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanSelection {
    One(usize),
    All,
}

/// Scan at `index`, or `InvalidIndex`
pub fn select_scan(document: &Document, index: usize) -> Result<&Scan> {
    document.get_scan(index).ok_or(CvError::InvalidIndex {
        index,
        scan_count: document.scan_count(),
    })
}

/// Writes documents using a shared export configuration
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    config: ExportConfig,
}

impl Exporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Export in `format`. Excel always covers every scan; TXT and CHI need a single scan.
    pub fn export(
        &self,
        document: &Document,
        format: ExportFormat,
        path: &Path,
        selection: ScanSelection,
    ) -> Result<()> {
        self.config.validate()?;
        debug!("Exporting {} to {}", format, path.display());

        match (format, selection) {
            (ExportFormat::Csv, ScanSelection::One(index)) => {
                csv::write_scan(document, index, path)?
            }
            (ExportFormat::Csv, ScanSelection::All) => csv::write_all(document, path)?,
            (ExportFormat::Excel, _) => excel::write_workbook(
                document,
                path,
                self.config.sheet_data_start_row,
            )?,
            (ExportFormat::Txt, selection) => txt::write_scan(
                document,
                single_index(selection),
                path,
                self.config.txt_delimiter,
            )?,
            (ExportFormat::Chi, selection) => chi::write_scan(
                document,
                single_index(selection),
                path,
                self.config.chi_current_scale,
            )?,
        }

        info!("{} export written to {}", format, path.display());
        Ok(())
    }
}

/// TXT and CHI describe one scan; "all" falls back to the first
fn single_index(selection: ScanSelection) -> usize {
    match selection {
        ScanSelection::One(index) => index,
        ScanSelection::All => 0,
    }
}
