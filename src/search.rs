mod executor;
mod types;

pub use executor::{search, search_bytes, search_path, search_workbook};
pub use types::{DEFAULT_COLUMN, MatchedRow, ResultSet, SearchOptions, SheetMatches};
