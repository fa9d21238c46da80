use indexmap::IndexMap;
use indexmap::map::Iter;

use crate::excel::Row;

/// Column searched when no other is configured.
pub const DEFAULT_COLUMN: &str = "Company";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Exact, case-sensitive name of the column to search.
    pub column: String,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            column: DEFAULT_COLUMN.to_string(),
        }
    }
}

impl SearchOptions {
    pub fn with_column(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

/// A matching row together with its zero-based position among the sheet's
/// data rows.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedRow {
    pub index: usize,
    pub cells: Row,
}

/// The matching rows of one sheet, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetMatches {
    pub columns: Vec<String>,
    pub rows: Vec<MatchedRow>,
}

impl SheetMatches {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Sheet name to matching rows. Only sheets with at least one match appear,
/// in workbook order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultSet {
    sheets: IndexMap<String, SheetMatches>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, sheet_name: String, matches: SheetMatches) {
        if !matches.is_empty() {
            self.sheets.insert(sheet_name, matches);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Number of sheets with matches.
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Number of matching rows across all sheets.
    pub fn total_matches(&self) -> usize {
        self.sheets.values().map(SheetMatches::len).sum()
    }

    pub fn get(&self, sheet_name: &str) -> Option<&SheetMatches> {
        self.sheets.get(sheet_name)
    }

    pub fn contains_sheet(&self, sheet_name: &str) -> bool {
        self.sheets.contains_key(sheet_name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> Iter<'_, String, SheetMatches> {
        self.sheets.iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = (&'a String, &'a SheetMatches);
    type IntoIter = Iter<'a, String, SheetMatches>;

    fn into_iter(self) -> Self::IntoIter {
        self.sheets.iter()
    }
}
