use calamine::{Reader, Xlsx};
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};
use crate::excel::Sheet;

/// A fully decoded, read-only workbook. Sheets keep the order stored in the
/// file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    /// Decode every sheet of an XLSX container. Any decoding failure fails
    /// the whole workbook.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut xlsx = Xlsx::new(reader)?;

        let sheet_names = xlsx.sheet_names();
        let mut sheets = Vec::with_capacity(sheet_names.len());

        for name in &sheet_names {
            let range = xlsx
                .worksheet_range(name)
                .map_err(|e| Error::Format(format!("Unable to read worksheet {}: {}", name, e)))?;

            let sheet = Sheet::from_range(name, &range);
            debug!(
                sheet = %name,
                columns = sheet.columns().len(),
                rows = sheet.row_count(),
                "decoded worksheet"
            );
            sheets.push(sheet);
        }

        Ok(Self { sheets })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "opening workbook");

        Self::from_reader(BufReader::new(file))
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn get_sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|sheet| sheet.name.clone()).collect()
    }

    pub fn get_sheet_by_index(&self, index: usize) -> Option<&Sheet> {
        self.sheets.get(index)
    }

    pub fn get_sheet_by_name(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}
