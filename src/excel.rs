mod cell;
mod sheet;
mod workbook;

pub use cell::{CellValue, MISSING_TEXT, excel_serial_to_datetime};
pub use sheet::{Row, Sheet};
pub use workbook::Workbook;
