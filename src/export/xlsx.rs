use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook, Worksheet};
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};
use crate::excel::CellValue;
use crate::search::{ResultSet, SheetMatches};

const COLUMN_WIDTH: u16 = 15;

struct Formats {
    header: Format,
    date: Format,
    datetime: Format,
}

/// Write the matches to a new XLSX file: one worksheet per matching sheet,
/// header row first, cell types preserved.
pub fn export_xlsx<P: AsRef<Path>>(results: &ResultSet, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut workbook = XlsxWorkbook::new();

    let formats = Formats {
        header: Format::new().set_bold(),
        date: Format::new().set_num_format("yyyy-mm-dd"),
        datetime: Format::new().set_num_format("yyyy-mm-dd hh:mm:ss"),
    };

    if results.is_empty() {
        // An XLSX file needs at least one worksheet
        workbook.add_worksheet().set_name("No matches")?;
    }

    for (sheet_name, matches) in results {
        let worksheet = workbook.add_worksheet().set_name(sheet_name)?;
        write_sheet(worksheet, matches, &formats)?;
        debug!(sheet = %sheet_name, rows = matches.len(), "exported sheet");
    }

    workbook.save(path)?;

    Ok(())
}

fn write_sheet(worksheet: &mut Worksheet, matches: &SheetMatches, formats: &Formats) -> Result<()> {
    for (col, name) in matches.columns.iter().enumerate() {
        let col_idx = column_number(col)?;
        worksheet.set_column_width(col_idx, COLUMN_WIDTH)?;
        worksheet.write_string_with_format(0, col_idx, name, &formats.header)?;
    }

    for (row, matched) in matches.rows.iter().enumerate() {
        let row_idx = u32::try_from(row + 1)
            .map_err(|_| Error::Export(format!("Row {} is out of range", row + 1)))?;

        for (col, cell) in matched.cells.iter().enumerate() {
            let col_idx = column_number(col)?;

            match cell {
                CellValue::Empty => {}
                CellValue::Int(i) => {
                    worksheet.write_number(row_idx, col_idx, *i as f64)?;
                }
                CellValue::Float(f) => {
                    worksheet.write_number(row_idx, col_idx, *f)?;
                }
                CellValue::Bool(b) => {
                    worksheet.write_boolean(row_idx, col_idx, *b)?;
                }
                CellValue::DateTime(serial) => {
                    let format = if serial.fract() == 0.0 {
                        &formats.date
                    } else {
                        &formats.datetime
                    };
                    worksheet.write_number_with_format(row_idx, col_idx, *serial, format)?;
                }
                CellValue::String(_)
                | CellValue::DateTimeIso(_)
                | CellValue::DurationIso(_)
                | CellValue::Error(_) => {
                    worksheet.write_string(row_idx, col_idx, cell.as_text())?;
                }
            }
        }
    }

    Ok(())
}

fn column_number(col: usize) -> Result<u16> {
    u16::try_from(col).map_err(|_| Error::Export(format!("Column {} is out of range", col)))
}
