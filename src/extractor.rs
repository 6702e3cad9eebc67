//! Series extraction from PStouch cyclic voltammetry exports.
//!
//! Locates the layout with [`crate::layout`], then reads every row after
//! the column-header row. Each scan owns two adjacent columns (potential
//! then current). A row contributes a point to a scan only when both of
//! that scan's cells parse; other scans on the same row are unaffected, so
//! scans may end up with different lengths.

use crate::config::ImportConfig;
use crate::constants::{COLUMNS_PER_SCAN, FIELD_SEPARATOR, generated_scan_name};
use crate::error::{CvError, Result};
use crate::layout;
use crate::models::{Document, DocumentMetadata, Scan};
use chrono::NaiveDateTime;
use tracing::{debug, warn};

/// Outcome of reading one scan's cell pair on one row
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    Numeric { potential: f64, current: f64 },
    Skipped,
}

impl Cell {
    /// Read the cell pair of scan `scan_index` from a split row
    pub fn read(fields: &[&str], scan_index: usize) -> Self {
        let potential_index = scan_index * COLUMNS_PER_SCAN;
        let current_index = potential_index + 1;

        let (Some(potential), Some(current)) =
            (fields.get(potential_index), fields.get(current_index))
        else {
            return Cell::Skipped;
        };

        match (parse_value(potential), parse_value(current)) {
            (Some(potential), Some(current)) => Cell::Numeric { potential, current },
            _ => Cell::Skipped,
        }
    }
}

/// Parse a numeric field with `.` as decimal separator, ignoring surrounding whitespace
fn parse_value(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok()
}

/// Accumulator for one scan's series
#[derive(Debug)]
struct ScanAccumulator {
    name: String,
    date: Option<NaiveDateTime>,
    potential: Vec<f64>,
    current: Vec<f64>,
    skipped: usize,
}

impl ScanAccumulator {
    fn new(name: String, date: Option<NaiveDateTime>) -> Self {
        Self {
            name,
            date,
            potential: Vec::new(),
            current: Vec::new(),
            skipped: 0,
        }
    }

    fn push(&mut self, cell: Cell) {
        match cell {
            Cell::Numeric { potential, current } => {
                self.potential.push(potential);
                self.current.push(current);
            }
            Cell::Skipped => self.skipped += 1,
        }
    }

    fn is_empty(&self) -> bool {
        self.potential.is_empty()
    }

    fn finish(self) -> Scan {
        if self.skipped > 0 {
            debug!(
                "Scan '{}': {} points, {} rows skipped",
                self.name,
                self.potential.len(),
                self.skipped
            );
        }
        Scan::from_series(self.name, self.date, self.potential, self.current)
    }
}

/// Builder threaded through the layout search and row loop
#[derive(Debug)]
struct DocumentBuilder {
    metadata: DocumentMetadata,
    scans: Vec<ScanAccumulator>,
}

impl DocumentBuilder {
    fn new(date_time: Option<String>) -> Self {
        Self {
            metadata: DocumentMetadata {
                date_time,
                source_file: None,
            },
            scans: Vec::new(),
        }
    }

    /// Create the scans, pairing each index with its name and date positionally
    fn with_scans(mut self, count: usize, names: &[String], dates: &[NaiveDateTime]) -> Self {
        if !dates.is_empty() && dates.len() != count {
            warn!(
                "{} measurement dates for {} scans; dates are assigned by position",
                dates.len(),
                count
            );
        }
        self.scans = (0..count)
            .map(|i| {
                let name = names
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| generated_scan_name(i));
                ScanAccumulator::new(name, dates.get(i).copied())
            })
            .collect();
        self
    }

    fn push_row(&mut self, row: &str) {
        let fields: Vec<&str> = row.split(FIELD_SEPARATOR).collect();
        for (index, scan) in self.scans.iter_mut().enumerate() {
            scan.push(Cell::read(&fields, index));
        }
    }

    fn build(self) -> Result<Document> {
        if self.scans.iter().all(ScanAccumulator::is_empty) {
            return Err(CvError::NoValidData);
        }
        let scans = self.scans.into_iter().map(ScanAccumulator::finish).collect();
        Ok(Document::new(self.metadata, scans))
    }
}

/// Extract a document from decoded lines using the default search bounds
pub fn parse_lines<L: AsRef<str>>(lines: &[L]) -> Result<Document> {
    parse_lines_with(lines, &ImportConfig::default())
}

/// Extract a document from decoded lines
pub fn parse_lines_with<L: AsRef<str>>(lines: &[L], config: &ImportConfig) -> Result<Document> {
    let date_time = lines
        .first()
        .and_then(|line| layout::file_date_time(line.as_ref()));

    let markers = layout::locate_markers(lines, config.metadata_search_lines);
    let names = markers
        .scan_headers
        .map(layout::scan_names)
        .unwrap_or_default();
    let dates = markers
        .measurement_dates
        .map(layout::measurement_dates)
        .unwrap_or_default();

    let header_index = layout::locate_column_header(lines, config.header_search_lines)
        .ok_or(CvError::NoColumnHeader)?;
    let scan_count = layout::scan_count(lines[header_index].as_ref());
    debug!(
        "Column headers at line {}: {} scans, {} names, {} dates",
        header_index,
        scan_count,
        names.len(),
        dates.len()
    );

    let mut builder = DocumentBuilder::new(date_time).with_scans(scan_count, &names, &dates);
    for line in &lines[header_index + 1..] {
        let row = line.as_ref().trim();
        if row.is_empty() {
            continue;
        }
        builder.push_row(row);
    }

    builder.build()
}

/// Extract a document from decoded text
pub fn parse_text(text: &str) -> Result<Document> {
    parse_text_with(text, &ImportConfig::default())
}

/// Extract a document from decoded text with explicit bounds
pub fn parse_text_with(text: &str, config: &ImportConfig) -> Result<Document> {
    parse_lines_with(&split_lines(text), config)
}

/// Split on `\r\n`, `\n` or a lone `\r`; a trailing terminator adds no empty line
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while let Some(end) = rest.find(['\r', '\n']) {
        lines.push(&rest[..end]);
        let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[end + terminator..];
    }
    if !rest.is_empty() {
        lines.push(rest);
    }
    lines
}
