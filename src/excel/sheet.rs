use calamine::{Data, Range};
use std::collections::HashSet;

use crate::excel::CellValue;

pub type Row = Vec<CellValue>;

/// A worksheet decoded as a table: one header row naming the columns, then
/// data rows aligned with those columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Sheet {
    /// Build a sheet from already-named columns. Rows are padded or truncated
    /// to the column count.
    pub fn new(name: impl Into<String>, columns: Vec<String>, rows: Vec<Row>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();

        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    /// Decode a calamine range. The first non-blank row becomes the header,
    /// blank data rows are dropped.
    pub fn from_range(name: &str, range: &Range<Data>) -> Self {
        // the used range may start right of column A
        let first_col = range.start().map_or(0, |(_, col)| col as usize);

        let mut rows = range
            .rows()
            .filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)))
            .map(|row| row.iter().map(CellValue::from).collect::<Row>());

        let columns = match rows.next() {
            Some(header) => header_names(&header, first_col),
            None => Vec::new(),
        };

        Self::new(name, columns, rows.collect())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Exact, case-sensitive column lookup.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|name| name == column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    /// Every cell of `column` coerced to text, in row order.
    pub fn column_text(&self, column: &str) -> Option<Vec<String>> {
        let col_idx = self.column_index(column)?;

        Some(self.rows.iter().map(|row| row[col_idx].as_text()).collect())
    }
}

// Blank headers become "Unnamed: N" with N counted from column A; repeats
// get ".1", ".2", ... suffixes
fn header_names(header: &[CellValue], first_col: usize) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(header.len());
    let mut names = Vec::with_capacity(header.len());

    for (col_idx, cell) in header.iter().enumerate() {
        let base = if cell.is_empty() {
            format!("Unnamed: {}", first_col + col_idx)
        } else {
            cell.as_text()
        };

        let mut name = base.clone();
        let mut suffix = 0;
        while seen.contains(&name) {
            suffix += 1;
            name = format!("{}.{}", base, suffix);
        }

        seen.insert(name.clone());
        names.push(name);
    }

    names
}
