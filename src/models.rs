//! Core data structures for imported voltammetry documents.
//!
//! A [`Document`] holds the scans reconstructed from one source file, in
//! column (acquisition) order. Documents are built once by the extractor
//! and only read afterwards.

use chrono::NaiveDateTime;
use serde::Serialize;

/// Closed interval covered by a series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Compute the range of a series. Returns `None` when empty.
    ///
    /// A NaN anywhere in the series makes both bounds NaN.
    pub fn of(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        if values.iter().any(|v| v.is_nan()) {
            return Some(Self {
                min: f64::NAN,
                max: f64::NAN,
            });
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self { min, max })
    }
}

/// Derived per-scan metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanMetadata {
    pub points: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub potential_range: Option<ValueRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_range: Option<ValueRange>,
}

/// One potential/current series from a single acquisition cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scan {
    name: String,
    date: Option<NaiveDateTime>,
    potential: Vec<f64>,
    current: Vec<f64>,
    metadata: ScanMetadata,
}

impl Scan {
    /// Build a scan from paired series; both must have the same length.
    pub(crate) fn from_series(
        name: String,
        date: Option<NaiveDateTime>,
        potential: Vec<f64>,
        current: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(potential.len(), current.len());
        let metadata = ScanMetadata {
            points: potential.len(),
            potential_range: ValueRange::of(&potential),
            current_range: ValueRange::of(&current),
        };
        Self {
            name,
            date,
            potential,
            current,
            metadata,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> Option<NaiveDateTime> {
        self.date
    }

    /// Potential values in V
    pub fn potential(&self) -> &[f64] {
        &self.potential
    }

    /// Current values in µA
    pub fn current(&self) -> &[f64] {
        &self.current
    }

    pub fn metadata(&self) -> &ScanMetadata {
        &self.metadata
    }

    pub fn points(&self) -> usize {
        self.metadata.points
    }

    /// Iterate `(potential, current)` pairs
    pub fn iter_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.potential
            .iter()
            .copied()
            .zip(self.current.iter().copied())
    }
}

/// File-level metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentMetadata {
    /// Second field of the first line, as written by the instrument
    pub date_time: Option<String>,
    /// Base name of the file the document was loaded from
    pub source_file: Option<String>,
}

/// All scans extracted from one source file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    metadata: DocumentMetadata,
    scans: Vec<Scan>,
}

impl Document {
    pub(crate) fn new(metadata: DocumentMetadata, scans: Vec<Scan>) -> Self {
        Self { metadata, scans }
    }

    /// Attach the originating file name
    pub(crate) fn with_source_file(mut self, source_file: Option<String>) -> Self {
        self.metadata.source_file = source_file;
        self
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    pub fn scans(&self) -> &[Scan] {
        &self.scans
    }

    pub fn scan_count(&self) -> usize {
        self.scans.len()
    }

    pub fn scan_names(&self) -> Vec<&str> {
        self.scans.iter().map(Scan::name).collect()
    }

    /// Scan at `index`, or `None` when out of range
    pub fn get_scan(&self, index: usize) -> Option<&Scan> {
        self.scans.get(index)
    }

    /// Length of the longest scan
    pub fn max_points(&self) -> usize {
        self.scans.iter().map(Scan::points).max().unwrap_or(0)
    }

    /// Base name for headers, falling back when the document was parsed from memory
    pub fn source_label(&self) -> &str {
        self.metadata.source_file.as_deref().unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_range() {
        let range = ValueRange::of(&[0.3, -0.2, 0.5]).unwrap();
        assert_eq!(range.min, -0.2);
        assert_eq!(range.max, 0.5);
        assert_eq!(ValueRange::of(&[]), None);
    }

    #[test]
    fn test_value_range_propagates_nan() {
        let range = ValueRange::of(&[1.0, f64::NAN, -1.0]).unwrap();
        assert!(range.min.is_nan());
        assert!(range.max.is_nan());

        let range = ValueRange::of(&[f64::NAN, f64::NAN]).unwrap();
        assert!(range.min.is_nan());
        assert!(range.max.is_nan());
    }

    #[test]
    fn test_scan_metadata_derived() {
        let scan = Scan::from_series(
            "CV 1".to_string(),
            None,
            vec![0.1, 0.2],
            vec![12.5, 13.1],
        );
        assert_eq!(scan.points(), 2);
        assert_eq!(
            scan.metadata().current_range,
            Some(ValueRange {
                min: 12.5,
                max: 13.1
            })
        );

        let empty = Scan::from_series("CV 2".to_string(), None, vec![], vec![]);
        assert_eq!(empty.points(), 0);
        assert!(empty.metadata().potential_range.is_none());
        assert!(empty.metadata().current_range.is_none());
    }

    #[test]
    fn test_document_queries() {
        let doc = Document::new(
            DocumentMetadata::default(),
            vec![
                Scan::from_series("A".to_string(), None, vec![1.0], vec![2.0]),
                Scan::from_series("B".to_string(), None, vec![], vec![]),
            ],
        );
        assert_eq!(doc.scan_count(), 2);
        assert_eq!(doc.scan_names(), vec!["A", "B"]);
        assert!(doc.get_scan(1).is_some());
        assert!(doc.get_scan(2).is_none());
        assert_eq!(doc.max_points(), 1);
        assert_eq!(doc.source_label(), "unknown");
    }
}
