//! File-level import of PStouch cyclic voltammetry exports.
//!
//! Checks the input path, reads the whole file, decodes it with the
//! configured encoding and hands the lines to the extractor.

use crate::config::ImportConfig;
use crate::error::{CvError, Result};
use crate::extractor::parse_text_with;
use crate::models::Document;
use encoding_rs::Encoding;
use std::path::Path;
use tracing::{debug, error, info};

/// Loads voltammetry documents from disk
#[derive(Debug, Clone, Default)]
pub struct Importer {
    config: ImportConfig,
}

impl Importer {
    /// Create an importer with the given configuration
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Load and parse one export file
    pub fn load_file(&self, path: &Path) -> Result<Document> {
        let result = self.load(path);
        match &result {
            Ok(document) => info!(
                "Loaded {} scans from {}: {:?}",
                document.scan_count(),
                path.display(),
                document.scan_names()
            ),
            Err(e) => error!("Failed to load {}: {}", path.display(), e),
        }
        result
    }

    fn load(&self, path: &Path) -> Result<Document> {
        if !path.exists() {
            return Err(CvError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let text = self.read_text(path)?;
        let source_file = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());

        Ok(parse_text_with(&text, &self.config)?.with_source_file(source_file))
    }

    /// Read and decode the file, honouring a byte order mark over the configured label.
    ///
    /// Byte sequences that are invalid in the resolved encoding fail the read.
    pub fn read_text(&self, path: &Path) -> Result<String> {
        let configured = self.config.resolve_encoding()?;
        let bytes = std::fs::read(path).map_err(CvError::io)?;

        let (encoding, body) = match Encoding::for_bom(&bytes) {
            Some((encoding, bom_length)) => (encoding, &bytes[bom_length..]),
            None => (configured, &bytes[..]),
        };
        debug!(
            "Read {} bytes from {} as {}",
            bytes.len(),
            path.display(),
            encoding.name()
        );

        encoding
            .decode_without_bom_handling_and_without_replacement(body)
            .map(|text| text.into_owned())
            .ok_or_else(|| CvError::Io {
                message: format!(
                    "{} is not valid {} text",
                    path.display(),
                    encoding.name()
                ),
            })
    }
}
