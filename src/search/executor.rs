use std::io::{Read, Seek};
use std::path::Path;
use tracing::debug;

use crate::error::Result;
use crate::excel::Workbook;
use crate::search::types::{MatchedRow, ResultSet, SearchOptions, SheetMatches};

/// Decode an XLSX workbook from `reader` and search its `Company` columns.
pub fn search<R: Read + Seek>(reader: R, query: &str) -> Result<ResultSet> {
    let workbook = Workbook::from_reader(reader)?;
    Ok(search_workbook(&workbook, query, &SearchOptions::default()))
}

pub fn search_bytes(bytes: &[u8], query: &str) -> Result<ResultSet> {
    let workbook = Workbook::from_bytes(bytes)?;
    Ok(search_workbook(&workbook, query, &SearchOptions::default()))
}

pub fn search_path<P: AsRef<Path>>(path: P, query: &str) -> Result<ResultSet> {
    let workbook = Workbook::open(path)?;
    Ok(search_workbook(&workbook, query, &SearchOptions::default()))
}

/// Select, per sheet, the rows whose searched column contains `query`
/// ignoring case. Sheets without the column or without matches are left out.
pub fn search_workbook(workbook: &Workbook, query: &str, options: &SearchOptions) -> ResultSet {
    let query_lower = query.to_lowercase();
    let mut results = ResultSet::new();

    for sheet in workbook.sheets() {
        let Some(column_text) = sheet.column_text(&options.column) else {
            debug!(sheet = %sheet.name, column = %options.column, "column not found, skipping sheet");
            continue;
        };

        let rows: Vec<MatchedRow> = column_text
            .iter()
            .zip(sheet.rows())
            .enumerate()
            .filter(|(_, (text, _))| case_insensitive_contains(text, &query_lower))
            .map(|(index, (_, row))| MatchedRow {
                index,
                cells: row.clone(),
            })
            .collect();

        debug!(sheet = %sheet.name, matches = rows.len(), "searched sheet");

        results.insert(
            sheet.name.clone(),
            SheetMatches {
                columns: sheet.columns().to_vec(),
                rows,
            },
        );
    }

    results
}

// `needle` must already be lowercase
fn case_insensitive_contains(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    if haystack.is_empty() {
        return false;
    }

    haystack.to_lowercase().contains(needle)
}
