//! PStouch CSV layout location.
//!
//! The export has no fixed-position header. The scan name row, the
//! measurement date row and the column-header row are located with
//! bounded searches over the first lines of the file, and the scan count
//! is derived from the column-header row.

use crate::constants::{
    COLUMNS_PER_SCAN, CURRENT_UNIT_MARKER, FIELD_SEPARATOR, MEASUREMENT_DATE_FORMAT,
    MEASUREMENT_DATE_MARKER, POTENTIAL_UNIT_MARKER, SCAN_HEADER_MARKER,
};
use chrono::NaiveDateTime;
use tracing::{debug, warn};

/// Index of the first line among the first `max_lines` that satisfies `predicate`
pub fn find_within<L, P>(lines: &[L], max_lines: usize, mut predicate: P) -> Option<usize>
where
    L: AsRef<str>,
    P: FnMut(&str) -> bool,
{
    lines
        .iter()
        .take(max_lines)
        .position(|line| predicate(line.as_ref()))
}

/// Marker rows found near the top of the file
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MarkerRows<'a> {
    pub scan_headers: Option<&'a str>,
    pub measurement_dates: Option<&'a str>,
}

/// Find the scan name and measurement date rows within the first `max_lines`.
///
/// The last matching line wins for each marker. A line carrying both
/// markers is taken as the scan name row.
pub fn locate_markers<L: AsRef<str>>(lines: &[L], max_lines: usize) -> MarkerRows<'_> {
    let mut rows = MarkerRows::default();
    for line in lines.iter().take(max_lines).map(|line| line.as_ref()) {
        if line.contains(SCAN_HEADER_MARKER) {
            rows.scan_headers = Some(line.trim());
        } else if line.contains(MEASUREMENT_DATE_MARKER) {
            rows.measurement_dates = Some(line.trim());
        }
    }
    rows
}

/// Second field of the first line, if present
pub fn file_date_time(first_line: &str) -> Option<String> {
    first_line
        .trim()
        .split(FIELD_SEPARATOR)
        .nth(1)
        .map(|part| part.trim().to_string())
}

/// Scan names from the scan name row, in column order
pub fn scan_names(row: &str) -> Vec<String> {
    row.split(FIELD_SEPARATOR)
        .map(str::trim)
        .filter(|part| !part.is_empty() && part.contains(SCAN_HEADER_MARKER))
        .map(str::to_string)
        .collect()
}

/// Measurement timestamps from the date row.
///
/// Fields that fail to parse are dropped rather than replaced, so later
/// dates shift left relative to the scan columns.
pub fn measurement_dates(row: &str) -> Vec<NaiveDateTime> {
    row.split(FIELD_SEPARATOR)
        .map(str::trim)
        .filter(|part| !part.is_empty() && !part.contains(MEASUREMENT_DATE_MARKER))
        .filter_map(|part| {
            match NaiveDateTime::parse_from_str(part, MEASUREMENT_DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(e) => {
                    warn!("Ignoring unparseable measurement date '{}': {}", part, e);
                    None
                }
            }
        })
        .collect()
}

/// Whether a line carries both unit markers of the column-header row
pub fn is_column_header(line: &str) -> bool {
    line.contains(POTENTIAL_UNIT_MARKER) && line.contains(CURRENT_UNIT_MARKER)
}

/// Index of the column-header row within the first `max_lines`
pub fn locate_column_header<L: AsRef<str>>(lines: &[L], max_lines: usize) -> Option<usize> {
    let index = find_within(lines, max_lines, is_column_header);
    debug!("Column-header row: {:?}", index);
    index
}

/// Number of scans described by the column-header row; an odd trailing field is dropped
pub fn scan_count(header_row: &str) -> usize {
    header_row.trim().split(FIELD_SEPARATOR).count() / COLUMNS_PER_SCAN
}
