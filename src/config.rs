//! Configuration management and validation.
//!
//! Provides configuration structures for the import (text decoding and
//! layout search bounds) and export (delimiters, unit scaling, worksheet
//! layout) stages.

use crate::constants::{
    DEFAULT_ENCODING, DEFAULT_HEADER_SEARCH_LINES, DEFAULT_METADATA_SEARCH_LINES,
    DEFAULT_SHEET_DATA_START_ROW, DEFAULT_TXT_DELIMITER, MICROAMP_TO_AMP,
};
use crate::error::{CvError, Result};
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Settings for reading and locating the source layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// WHATWG encoding label of the source file (a BOM takes precedence)
    pub encoding: String,

    /// Lines inspected for the scan name and measurement date rows
    pub metadata_search_lines: usize,

    /// Lines inspected for the column-header row
    pub header_search_lines: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            encoding: DEFAULT_ENCODING.to_string(),
            metadata_search_lines: DEFAULT_METADATA_SEARCH_LINES,
            header_search_lines: DEFAULT_HEADER_SEARCH_LINES,
        }
    }
}

impl ImportConfig {
    /// Use a different source encoding
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Set the metadata search bound
    pub fn with_metadata_search_lines(mut self, lines: usize) -> Self {
        self.metadata_search_lines = lines;
        self
    }

    /// Set the column-header search bound
    pub fn with_header_search_lines(mut self, lines: usize) -> Self {
        self.header_search_lines = lines;
        self
    }

    /// Resolve the configured label to a decoder
    pub fn resolve_encoding(&self) -> Result<&'static Encoding> {
        Encoding::for_label(self.encoding.trim().as_bytes()).ok_or_else(|| {
            CvError::Configuration {
                message: format!("Unknown encoding label '{}'", self.encoding),
            }
        })
    }

    /// Check the configuration before a load
    pub fn validate(&self) -> Result<()> {
        if self.header_search_lines == 0 {
            return Err(CvError::Configuration {
                message: "header_search_lines must be at least 1".to_string(),
            });
        }
        let encoding = self.resolve_encoding()?;
        debug!(
            "Import config: encoding={}, metadata_search_lines={}, header_search_lines={}",
            encoding.name(),
            self.metadata_search_lines,
            self.header_search_lines
        );
        Ok(())
    }
}

/// Settings shared by the exporters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Column delimiter of plain-text exports
    pub txt_delimiter: char,

    /// Factor applied to current values in CHI exports
    pub chi_current_scale: f64,

    /// Zero-based worksheet row where per-scan data tables start
    pub sheet_data_start_row: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            txt_delimiter: DEFAULT_TXT_DELIMITER,
            chi_current_scale: MICROAMP_TO_AMP,
            sheet_data_start_row: DEFAULT_SHEET_DATA_START_ROW,
        }
    }
}

impl ExportConfig {
    /// Use a different plain-text delimiter
    pub fn with_txt_delimiter(mut self, delimiter: char) -> Self {
        self.txt_delimiter = delimiter;
        self
    }

    /// Check the configuration before an export
    pub fn validate(&self) -> Result<()> {
        if self.txt_delimiter == '\n' || self.txt_delimiter == '\r' {
            return Err(CvError::Configuration {
                message: "txt_delimiter cannot be a line break".to_string(),
            });
        }
        // Name and date rows sit above the data table
        if self.sheet_data_start_row < 2 {
            return Err(CvError::Configuration {
                message: "sheet_data_start_row must leave room for the scan name and date rows"
                    .to_string(),
            });
        }
        Ok(())
    }
}
