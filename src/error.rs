//! Error handling for voltammetry import and export operations.
//!
//! Classifies load failures (missing file, unrecognised layout, no numeric
//! data, read faults) and export failures with enough context to report
//! them at the command-line boundary.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CvError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unable to find column headers (V, µA)")]
    NoColumnHeader,

    #[error("No valid data found in the file")]
    NoValidData,

    #[error("Error loading file: {message}")]
    Io { message: String },

    #[error("Invalid scan index {index} (document has {scan_count} scans)")]
    InvalidIndex { index: usize, scan_count: usize },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Export to {path} failed: {reason}")]
    Export { path: PathBuf, reason: String },

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

impl CvError {
    /// Wrap an I/O failure, keeping only its message
    pub fn io(source: std::io::Error) -> Self {
        Self::Io {
            message: source.to_string(),
        }
    }

    /// Wrap a write failure for a specific output path
    pub fn export(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Export {
            path: path.into(),
            reason: source.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CvError>;
