use calamine::Data;
use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use std::fmt;

/// Text used for a missing cell value when a column is coerced to text.
pub const MISSING_TEXT: &str = "nan";

// 9999-12-31, the last date Excel can display
const MAX_EXCEL_SERIAL: f64 = 2_958_466.0;

/// A decoded worksheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Excel serial date (1900 date system).
    DateTime(f64),
    DateTimeIso(String),
    DurationIso(String),
    /// Excel error literal such as `#N/A`.
    Error(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Textual form used for matching. Missing values become `nan`.
    pub fn as_text(&self) -> String {
        self.to_string()
    }

    /// Calendar value of a `DateTime` cell, if it falls on a valid date.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::DateTime(serial) => excel_serial_to_datetime(*serial),
            _ => None,
        }
    }
}

impl From<&Data> for CellValue {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::String(s.clone()),
            Data::Float(f) => CellValue::Float(*f),
            Data::Int(i) => CellValue::Int(*i),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::Error(e) => CellValue::Error(e.to_string()),
            Data::DateTime(dt) => CellValue::DateTime(dt.as_f64()),
            Data::DateTimeIso(s) => CellValue::DateTimeIso(s.clone()),
            Data::DurationIso(s) => CellValue::DurationIso(s.clone()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => f.write_str(MISSING_TEXT),
            CellValue::String(s) => f.write_str(s),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(n) => f.write_str(&format_float(*n)),
            CellValue::Bool(b) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
            CellValue::DateTime(serial) => match excel_serial_to_datetime(*serial) {
                Some(dt) if dt.num_seconds_from_midnight() == 0 => {
                    write!(f, "{}", dt.format("%Y-%m-%d"))
                }
                Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
                None => f.write_str(&format_float(*serial)),
            },
            CellValue::DateTimeIso(s) | CellValue::DurationIso(s) => f.write_str(s),
            CellValue::Error(e) => f.write_str(e),
        }
    }
}

// Whole numbers print without a fractional part
fn format_float(f: f64) -> String {
    if f == (f as i64) as f64 && f.abs() < 1e10 {
        (f as i64).to_string()
    } else {
        f.to_string()
    }
}

/// Convert an Excel serial number to a calendar date and time.
///
/// Serial 1 is 1900-01-01. Serials above 59 are shifted by one day to skip
/// the nonexistent 1900-02-29 that Excel counts.
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !(0.0..MAX_EXCEL_SERIAL).contains(&serial) {
        return None;
    }

    let days = if serial > 59.0 { serial - 1.0 } else { serial };

    let base_date = NaiveDate::from_ymd_opt(1900, 1, 1)?;
    let whole_days = days.trunc() as i64;
    let seconds = (days.fract() * 24.0 * 60.0 * 60.0).round() as i64;

    let midnight = base_date
        .checked_add_signed(Duration::days(whole_days - 1))?
        .and_hms_opt(0, 0, 0)?;

    midnight.checked_add_signed(Duration::seconds(seconds))
}
