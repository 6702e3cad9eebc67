//! Batch export of the standard analysis bundle.
//!
//! Writes into one directory: a complete workbook, one CSV per scan, and
//! the first scan as plain text and CHI text. Each step is attempted
//! independently; failures are recorded in the report rather than
//! aborting the remaining steps.

use super::{ExportFormat, Exporter, ScanSelection};
use crate::error::{CvError, Result};
use crate::models::Document;

use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Workbook file name in the batch directory
pub const WORKBOOK_FILE: &str = "complete_voltammetry.xlsx";

/// One planned output file
#[derive(Debug, Clone, PartialEq)]
pub struct BatchStep {
    pub format: ExportFormat,
    pub selection: ScanSelection,
    pub path: PathBuf,
}

/// Result of one batch step
#[derive(Debug)]
pub struct StepOutcome {
    pub step: BatchStep,
    pub error: Option<CvError>,
}

/// Outcome of a batch export
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<StepOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.error.is_none()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Plan the bundle for a document with `scan_count` scans
pub fn plan(output_dir: &Path, scan_count: usize) -> Vec<BatchStep> {
    let mut steps = vec![BatchStep {
        format: ExportFormat::Excel,
        selection: ScanSelection::All,
        path: output_dir.join(WORKBOOK_FILE),
    }];

    steps.extend((0..scan_count).map(|index| BatchStep {
        format: ExportFormat::Csv,
        selection: ScanSelection::One(index),
        path: output_dir.join(format!("scan_{}.csv", index + 1)),
    }));

    for format in [ExportFormat::Txt, ExportFormat::Chi] {
        steps.push(BatchStep {
            format,
            selection: ScanSelection::One(0),
            path: output_dir.join(format!("scan_1.{}", format.extension())),
        });
    }

    steps
}

/// Create `output_dir` and write the bundle, showing progress when `show_progress` is set
pub fn export_batch(
    exporter: &Exporter,
    document: &Document,
    output_dir: &Path,
    show_progress: bool,
) -> Result<BatchReport> {
    std::fs::create_dir_all(output_dir).map_err(|e| CvError::export(output_dir, e))?;

    let steps = plan(output_dir, document.scan_count());
    debug!(
        "Batch export of {} files to {}",
        steps.len(),
        output_dir.display()
    );

    let progress_bar = if show_progress {
        let bar = ProgressBar::new(steps.len() as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    let mut report = BatchReport::default();
    for step in steps {
        progress_bar.set_message(format!("{} {}", step.format, step.path.display()));

        let error = exporter
            .export(document, step.format, &step.path, step.selection)
            .err();
        if let Some(e) = &error {
            warn!("Batch step {} failed: {}", step.path.display(), e);
        }
        report.outcomes.push(StepOutcome { step, error });
        progress_bar.inc(1);
    }

    progress_bar.finish_with_message(format!(
        "{} files written, {} failed",
        report.succeeded(),
        report.failed()
    ));
    Ok(report)
}
