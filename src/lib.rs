//! Cyclic Voltammetry Importer Library
//!
//! A Rust library for importing cyclic voltammetry measurements exported
//! as CSV by PalmSens PStouch and converting them to formats used by
//! electrochemical analysis software.
//!
//! This library provides tools for:
//! - Decoding UTF-16 (or user-selected) exports
//! - Locating scan names, measurement dates and column headers heuristically
//! - Extracting interleaved potential/current columns into per-scan series
//! - Exporting to CSV, XLSX, delimited text and CHI-style text

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod extractor;
pub mod importer;
pub mod layout;
pub mod models;

// Re-export commonly used types
pub use config::{ExportConfig, ImportConfig};
pub use error::{CvError, Result};
pub use export::{ExportFormat, Exporter, ScanSelection};
pub use extractor::{Cell, parse_lines, parse_text};
pub use importer::Importer;
pub use models::{Document, DocumentMetadata, Scan, ScanMetadata, ValueRange};
