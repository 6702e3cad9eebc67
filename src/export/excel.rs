//! XLSX workbook export.
//!
//! Layout: a `Metadata` sheet, one `Scan_{n}` sheet per scan with the
//! scan name and date above the data table, and an `All_Scans` sheet with
//! every scan side by side.

use crate::constants::{
    CURRENT_LABEL, EXPORT_TIMESTAMP_FORMAT, POTENTIAL_LABEL, combined_current_label,
    combined_potential_label, scan_sheet_name, sheets,
};
use crate::error::{CvError, Result};
use crate::models::{Document, Scan};

use chrono::Local;
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, Worksheet};
use std::path::Path;

/// Write the workbook for `document`
pub fn write_workbook(document: &Document, path: &Path, data_start_row: RowNum) -> Result<()> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    write_metadata_sheet(workbook.add_worksheet(), document, &header)?;

    for (index, scan) in document.scans().iter().enumerate() {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(scan_sheet_name(index + 1))?;
        write_scan_sheet(worksheet, scan, data_start_row, &header)?;
    }

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheets::ALL_SCANS)?;
    write_combined_sheet(worksheet, document, &header, path)?;

    workbook.save(path)?;
    Ok(())
}

fn write_metadata_sheet(
    worksheet: &mut Worksheet,
    document: &Document,
    header: &Format,
) -> Result<()> {
    worksheet.set_name(sheets::METADATA)?;
    worksheet.write_string_with_format(0, 0, "Property", header)?;
    worksheet.write_string_with_format(0, 1, "Value", header)?;

    worksheet.write_string(1, 0, "Original file")?;
    worksheet.write_string(1, 1, document.source_label())?;

    worksheet.write_string(2, 0, "Import date")?;
    worksheet.write_string(
        2,
        1,
        Local::now().format(EXPORT_TIMESTAMP_FORMAT).to_string(),
    )?;

    worksheet.write_string(3, 0, "Number of scans")?;
    worksheet.write_number(3, 1, document.scan_count() as f64)?;
    Ok(())
}

fn write_scan_sheet(
    worksheet: &mut Worksheet,
    scan: &Scan,
    data_start_row: RowNum,
    header: &Format,
) -> Result<()> {
    worksheet.write_string(0, 0, format!("Name: {}", scan.name()))?;
    if let Some(date) = scan.date() {
        worksheet.write_string(
            1,
            0,
            format!(
                "Measurement date: {}",
                date.format(EXPORT_TIMESTAMP_FORMAT)
            ),
        )?;
    }

    worksheet.write_string_with_format(data_start_row, 0, POTENTIAL_LABEL, header)?;
    worksheet.write_string_with_format(data_start_row, 1, CURRENT_LABEL, header)?;
    for (row, (potential, current)) in (data_start_row + 1..).zip(scan.iter_points()) {
        worksheet.write_number(row, 0, potential)?;
        worksheet.write_number(row, 1, current)?;
    }
    Ok(())
}

fn write_combined_sheet(
    worksheet: &mut Worksheet,
    document: &Document,
    header: &Format,
    path: &Path,
) -> Result<()> {
    for (index, scan) in document.scans().iter().enumerate() {
        let col = ColNum::try_from(index * 2).map_err(|_| CvError::Export {
            path: path.to_path_buf(),
            reason: format!("too many scans for one worksheet ({})", document.scan_count()),
        })?;

        worksheet.write_string_with_format(0, col, combined_potential_label(index + 1), header)?;
        worksheet.write_string_with_format(0, col + 1, combined_current_label(index + 1), header)?;
        for (row, (potential, current)) in (1..).zip(scan.iter_points()) {
            worksheet.write_number(row, col, potential)?;
            worksheet.write_number(row, col + 1, current)?;
        }
    }
    Ok(())
}
