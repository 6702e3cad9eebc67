//! Integration tests for importing PStouch exports from disk and converting them
//!
//! Fixtures are written as UTF-16LE with a byte order mark, the way PStouch
//! saves its CSV exports.

use clap::Parser;
use cv_importer::cli::{self, Args};
use cv_importer::export::batch::export_batch;
use cv_importer::{
    CvError, ExportConfig, ExportFormat, Exporter, ImportConfig, Importer, ScanSelection,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const THREE_SCAN_EXPORT: &str = "\
Date and time:,2024-05-14 16:02:11\r
Cyclic Voltammetry [1],,Cyclic Voltammetry [2],,Cyclic Voltammetry [3],\r
Date and time measurement:,2024-05-14 15:40:00,,2024-05-14 15:45:00,,2024-05-14 15:50:00,\r
V,µA,V,µA,V,µA\r
-0.200,-3.512,-0.200,-3.601,-0.200,-3.650\r
-0.190,-3.204,-0.190,-3.298,-0.190,-3.322\r
-0.180,-2.871,-0.180,-2.955,-0.180,-3.010\r
-0.170,-2.402,-0.170,-2.517,,\r
\r
";

fn write_utf16(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let mut bytes = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    let path = dir.path().join(name);
    fs::write(&path, bytes).unwrap();
    path
}

fn read_two_columns(path: &Path, delimiter: char) -> (Vec<f64>, Vec<f64>) {
    let content = fs::read_to_string(path).unwrap();
    content
        .lines()
        .skip(1)
        .map(|line| {
            let (p, c) = line.split_once(delimiter).unwrap();
            (p.parse::<f64>().unwrap(), c.parse::<f64>().unwrap())
        })
        .unzip()
}

#[test]
fn test_load_three_scan_export() {
    let dir = TempDir::new().unwrap();
    let path = write_utf16(&dir, "seconde misure.csv", THREE_SCAN_EXPORT);

    let document = Importer::default().load_file(&path).unwrap();

    assert_eq!(document.scan_count(), 3);
    assert_eq!(
        document.scan_names(),
        vec![
            "Cyclic Voltammetry [1]",
            "Cyclic Voltammetry [2]",
            "Cyclic Voltammetry [3]"
        ]
    );
    assert_eq!(
        document.metadata().date_time.as_deref(),
        Some("2024-05-14 16:02:11")
    );
    assert_eq!(
        document.metadata().source_file.as_deref(),
        Some("seconde misure.csv")
    );

    let points: Vec<usize> = document.scans().iter().map(|s| s.points()).collect();
    assert_eq!(points, vec![4, 4, 3]);
    for scan in document.scans() {
        assert_eq!(scan.potential().len(), scan.current().len());
        assert!(scan.date().is_some());
    }

    let third = document.get_scan(2).unwrap();
    let range = third.metadata().current_range.unwrap();
    assert_eq!(range.min, -3.650);
    assert_eq!(range.max, -3.010);
    assert!(document.get_scan(3).is_none());
}

#[test]
fn test_load_is_repeatable() {
    let dir = TempDir::new().unwrap();
    let path = write_utf16(&dir, "cv.csv", THREE_SCAN_EXPORT);
    let importer = Importer::default();

    let first = importer.load_file(&path).unwrap();
    let second = importer.load_file(&path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_missing_header_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_utf16(&dir, "bad.csv", "Date and time:,x\r\n1,2\r\n3,4\r\n");

    let result = Importer::default().load_file(&path);
    assert!(matches!(result, Err(CvError::NoColumnHeader)));
}

#[test]
fn test_non_numeric_rows_fail() {
    let dir = TempDir::new().unwrap();
    let path = write_utf16(&dir, "empty.csv", "V,µA,V,µA\r\nn/a,n/a,n/a,n/a\r\n");

    let result = Importer::default().load_file(&path);
    assert!(matches!(result, Err(CvError::NoValidData)));
}

#[test]
fn test_utf8_file_with_explicit_encoding() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("utf8.csv");
    fs::write(&path, "V,µA\n0.5,1.0\n").unwrap();

    let importer = Importer::new(ImportConfig::default().with_encoding("utf-8"));
    let document = importer.load_file(&path).unwrap();
    assert_eq!(document.get_scan(0).unwrap().current(), &[1.0]);
}

#[test]
fn test_txt_export_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = write_utf16(&dir, "cv.csv", THREE_SCAN_EXPORT);
    let document = Importer::default().load_file(&path).unwrap();

    let exporter = Exporter::new(ExportConfig::default().with_txt_delimiter(';'));
    for index in 0..document.scan_count() {
        let out = dir.path().join(format!("scan_{}.txt", index + 1));
        exporter
            .export(&document, ExportFormat::Txt, &out, ScanSelection::One(index))
            .unwrap();

        let (potential, current) = read_two_columns(&out, ';');
        let scan = document.get_scan(index).unwrap();
        assert_eq!(potential, scan.potential());
        assert_eq!(current, scan.current());
    }
}

#[test]
fn test_chi_export_scaling() {
    let dir = TempDir::new().unwrap();
    let path = write_utf16(&dir, "cv.csv", THREE_SCAN_EXPORT);
    let document = Importer::default().load_file(&path).unwrap();

    let out = dir.path().join("scan_2.chi");
    Exporter::default()
        .export(&document, ExportFormat::Chi, &out, ScanSelection::One(1))
        .unwrap();

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.contains("File: cv.csv\n"));
    assert!(content.contains("Date: 05/14/2024\nTime: 15:45:00\n"));

    let data: Vec<&str> = content
        .lines()
        .skip_while(|line| *line != "Header end")
        .skip(1)
        .collect();
    let scan = document.get_scan(1).unwrap();
    assert_eq!(data.len(), scan.points());
    assert_eq!(data[0], "-0.2\t-3.601000000000e-06");
}

#[test]
fn test_export_invalid_scan_index() {
    let dir = TempDir::new().unwrap();
    let path = write_utf16(&dir, "cv.csv", THREE_SCAN_EXPORT);
    let document = Importer::default().load_file(&path).unwrap();

    for format in [ExportFormat::Csv, ExportFormat::Txt, ExportFormat::Chi] {
        let out = dir.path().join(format!("bad.{}", format.extension()));
        let result = Exporter::default().export(&document, format, &out, ScanSelection::One(3));
        assert!(matches!(
            result,
            Err(CvError::InvalidIndex {
                index: 3,
                scan_count: 3
            })
        ));
    }
}

#[test]
fn test_batch_bundle() {
    let dir = TempDir::new().unwrap();
    let path = write_utf16(&dir, "cv.csv", THREE_SCAN_EXPORT);
    let document = Importer::default().load_file(&path).unwrap();
    let output_dir = dir.path().join("analysis_results");

    let report = export_batch(&Exporter::default(), &document, &output_dir, false).unwrap();

    assert!(report.is_success());
    for name in [
        "complete_voltammetry.xlsx",
        "scan_1.csv",
        "scan_2.csv",
        "scan_3.csv",
        "scan_1.txt",
        "scan_1.chi",
    ] {
        assert!(output_dir.join(name).exists(), "{} missing", name);
    }

    let (potential, _) = read_two_columns(&output_dir.join("scan_3.csv"), ',');
    assert_eq!(potential, vec![-0.2, -0.19, -0.18]);
}

#[test]
fn test_cli_run_exports_csv() {
    let dir = TempDir::new().unwrap();
    let input = write_utf16(&dir, "cv.csv", THREE_SCAN_EXPORT);
    let output = dir.path().join("all.csv");

    let args = Args::parse_from([
        "cv-importer",
        input.to_str().unwrap(),
        "-f",
        "csv",
        "--all-scans",
        "-o",
        output.to_str().unwrap(),
    ]);
    cli::run(args).unwrap();

    let content = fs::read_to_string(&output).unwrap();
    let header = content.lines().next().unwrap();
    assert_eq!(header.split(',').count(), 6);
    assert!(header.starts_with("Scan_1_Potential_V,Scan_1_Current_µA"));
}

#[test]
fn test_cli_run_missing_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("missing.csv");
    let args = Args::parse_from(["cv-importer", input.to_str().unwrap(), "--list"]);

    let error = cli::run(args).unwrap_err();
    assert!(matches!(
        error.downcast_ref::<CvError>(),
        Some(CvError::FileNotFound { .. })
    ));
}
