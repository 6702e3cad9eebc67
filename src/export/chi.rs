//! CH Instruments style text export.
//!
//! A short header block terminated by `Header end`, then one
//! `potential<TAB>current` line per point with current converted from µA
//! to A and written in scientific notation.

use super::select_scan;
use crate::constants::{CHI_CURRENT_PRECISION, CHI_HEADER_END};
use crate::error::{CvError, Result};
use crate::models::Document;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Format `value` in scientific notation with `precision` fractional digits
/// and a signed exponent of at least two digits, e.g. `1.250000000000e-05`.
pub fn format_scientific(value: f64, precision: usize) -> String {
    let formatted = format!("{:.*e}", precision, value);
    let Some((mantissa, exponent)) = formatted.split_once('e') else {
        // NaN and infinities have no exponent
        return formatted;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{}e{}{:0>2}", mantissa, sign, digits)
}

/// Write scan `index`, multiplying current by `current_scale`
pub fn write_scan(
    document: &Document,
    index: usize,
    path: &Path,
    current_scale: f64,
) -> Result<()> {
    let scan = select_scan(document, index)?;

    let write = || -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(writer, "CH Instruments Data Format")?;
        writeln!(writer, "Technique: Cyclic Voltammetry")?;
        writeln!(writer, "File: {}", document.source_label())?;
        if let Some(date) = scan.date() {
            writeln!(writer, "Date: {}", date.format("%m/%d/%Y"))?;
            writeln!(writer, "Time: {}", date.format("%H:%M:%S"))?;
        }
        writeln!(writer, "Scan: {}", scan.name())?;
        writeln!(writer, "Points: {}", scan.points())?;
        writeln!(writer, "{}", CHI_HEADER_END)?;

        for (potential, current) in scan.iter_points() {
            writeln!(
                writer,
                "{}\t{}",
                potential,
                format_scientific(current * current_scale, CHI_CURRENT_PRECISION)
            )?;
        }
        writer.flush()
    };

    write().map_err(|e| CvError::export(path, e))
}
