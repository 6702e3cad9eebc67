//! CSV export through polars.
//!
//! Single-scan exports hold the two labelled columns of one scan. The
//! combined export places every scan side by side; shorter scans are
//! padded with nulls, which the writer emits as empty cells.

use super::select_scan;
use crate::constants::{
    CURRENT_LABEL, POTENTIAL_LABEL, combined_current_label, combined_potential_label,
};
use crate::error::{CvError, Result};
use crate::models::{Document, Scan};

use polars::prelude::{Column, CsvWriter, DataFrame, SerWriter};
use std::fs::File;
use std::path::Path;

/// Frame with the potential and current columns of one scan
pub fn scan_frame(scan: &Scan) -> Result<DataFrame> {
    let frame = DataFrame::new(vec![
        Column::new(POTENTIAL_LABEL.into(), scan.potential()),
        Column::new(CURRENT_LABEL.into(), scan.current()),
    ])?;
    Ok(frame)
}

/// Frame with every scan side by side, padded to the longest scan
pub fn combined_frame(document: &Document) -> Result<DataFrame> {
    let height = document.max_points();
    let mut columns = Vec::with_capacity(document.scan_count() * 2);

    for (index, scan) in document.scans().iter().enumerate() {
        columns.push(Column::new(
            combined_potential_label(index + 1).into(),
            pad(scan.potential(), height),
        ));
        columns.push(Column::new(
            combined_current_label(index + 1).into(),
            pad(scan.current(), height),
        ));
    }

    Ok(DataFrame::new(columns)?)
}

fn pad(values: &[f64], height: usize) -> Vec<Option<f64>> {
    (0..height).map(|i| values.get(i).copied()).collect()
}

/// Write one scan
pub fn write_scan(document: &Document, index: usize, path: &Path) -> Result<()> {
    let mut frame = scan_frame(select_scan(document, index)?)?;
    write_frame(&mut frame, path)
}

/// Write every scan side by side
pub fn write_all(document: &Document, path: &Path) -> Result<()> {
    let mut frame = combined_frame(document)?;
    write_frame(&mut frame, path)
}

fn write_frame(frame: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path).map_err(|e| CvError::export(path, e))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(frame)?;
    Ok(())
}
