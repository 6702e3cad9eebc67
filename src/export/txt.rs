//! Delimited plain-text export of a single scan.

use super::select_scan;
use crate::constants::{CURRENT_LABEL, POTENTIAL_LABEL};
use crate::error::{CvError, Result};
use crate::models::Document;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write scan `index` as two delimited columns with a label row
pub fn write_scan(document: &Document, index: usize, path: &Path, delimiter: char) -> Result<()> {
    let scan = select_scan(document, index)?;

    let write = || -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(writer, "{}{}{}", POTENTIAL_LABEL, delimiter, CURRENT_LABEL)?;
        for (potential, current) in scan.iter_points() {
            writeln!(writer, "{}{}{}", potential, delimiter, current)?;
        }
        writer.flush()
    };

    write().map_err(|e| CvError::export(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_util::two_scan_document;
    use tempfile::TempDir;

    fn read_columns(path: &Path, delimiter: char) -> (String, Vec<f64>, Vec<f64>) {
        let content = std::fs::read_to_string(path).unwrap();
        let mut lines = content.lines();
        let header = lines.next().unwrap().to_string();
        let mut potential = Vec::new();
        let mut current = Vec::new();
        for line in lines {
            let (p, c) = line.split_once(delimiter).unwrap();
            potential.push(p.parse().unwrap());
            current.push(c.parse().unwrap());
        }
        (header, potential, current)
    }

    #[test]
    fn test_txt_round_trip() {
        let document = two_scan_document();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scan_1.txt");

        write_scan(&document, 0, &path, '\t').unwrap();

        let (header, potential, current) = read_columns(&path, '\t');
        let scan = document.get_scan(0).unwrap();
        assert_eq!(header, "Potential (V)\tCurrent (µA)");
        assert_eq!(potential, scan.potential());
        assert_eq!(current, scan.current());
    }

    #[test]
    fn test_txt_shortest_float_form() {
        let document = two_scan_document();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scan_1.txt");

        write_scan(&document, 0, &path, '\t').unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let rows: Vec<&str> = content.lines().skip(1).collect();
        assert_eq!(rows, vec!["-0.5\t-1.25", "0\t0.75", "0.5\t12.5"]);
    }

    #[test]
    fn test_txt_custom_delimiter() {
        let document = two_scan_document();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scan_2.txt");

        write_scan(&document, 1, &path, ';').unwrap();

        let (header, potential, _) = read_columns(&path, ';');
        assert_eq!(header, "Potential (V);Current (µA)");
        assert_eq!(potential, vec![-0.5, 0.0]);
    }
}
