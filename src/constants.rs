//! Application constants for the cyclic voltammetry importer
//!
//! This module contains the layout markers, search bounds, default values
//! and output labels used throughout the importer and exporters.

// =============================================================================
// Source Layout Markers
// =============================================================================

/// Marker identifying the row that carries scan names
pub const SCAN_HEADER_MARKER: &str = "Cyclic Voltammetry";

/// Marker identifying the row that carries per-scan measurement timestamps
pub const MEASUREMENT_DATE_MARKER: &str = "Date and time measurement:";

/// Potential unit marker expected in the column-header row
pub const POTENTIAL_UNIT_MARKER: &str = "V";

/// Current unit marker expected in the column-header row
pub const CURRENT_UNIT_MARKER: &str = "µA";

/// Field separator used by PStouch exports
pub const FIELD_SEPARATOR: char = ',';

/// Timestamp format of the measurement date row
pub const MEASUREMENT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Columns contributed by each scan (potential, current)
pub const COLUMNS_PER_SCAN: usize = 2;

// =============================================================================
// Search Bounds
// =============================================================================

/// Lines inspected for the scan name and measurement date rows
pub const DEFAULT_METADATA_SEARCH_LINES: usize = 10;

/// Lines inspected for the column-header row
pub const DEFAULT_HEADER_SEARCH_LINES: usize = 20;

// =============================================================================
// Import Defaults
// =============================================================================

/// PStouch writes its CSV exports as UTF-16
pub const DEFAULT_ENCODING: &str = "utf-16";

// =============================================================================
// Export Labels and Defaults
// =============================================================================

/// Column label for potential in single-scan exports
pub const POTENTIAL_LABEL: &str = "Potential (V)";

/// Column label for current in single-scan exports
pub const CURRENT_LABEL: &str = "Current (µA)";

/// Default delimiter for plain-text exports
pub const DEFAULT_TXT_DELIMITER: char = '\t';

/// Conversion factor from µA to A applied by the CHI exporter
pub const MICROAMP_TO_AMP: f64 = 1e-6;

/// Fractional digits of the CHI current column
pub const CHI_CURRENT_PRECISION: usize = 12;

/// Sentinel terminating the CHI header block
pub const CHI_HEADER_END: &str = "Header end";

/// Zero-based worksheet row where per-scan data tables start
pub const DEFAULT_SHEET_DATA_START_ROW: u32 = 3;

/// Timestamp format used in exported metadata
pub const EXPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Default CLI output file
pub const DEFAULT_OUTPUT_FILE: &str = "output.xlsx";

/// Worksheet names
pub mod sheets {
    pub const METADATA: &str = "Metadata";
    pub const ALL_SCANS: &str = "All_Scans";
}

/// Column label for a scan's potential in side-by-side exports (1-based)
pub fn combined_potential_label(scan_number: usize) -> String {
    format!("Scan_{}_Potential_V", scan_number)
}

/// Column label for a scan's current in side-by-side exports (1-based)
pub fn combined_current_label(scan_number: usize) -> String {
    format!("Scan_{}_Current_µA", scan_number)
}

/// Name given to a scan that has no entry in the scan name row
pub fn generated_scan_name(index: usize) -> String {
    format!("Scan {}", index + 1)
}

/// Worksheet name for a scan (1-based)
pub fn scan_sheet_name(scan_number: usize) -> String {
    format!("Scan_{}", scan_number)
}
