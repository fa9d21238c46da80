//! Search every sheet of an XLSX workbook for rows whose `Company` column
//! contains a piece of text, ignoring case.
//!
//! ```no_run
//! let results = company_search::search_path("clients.xlsx", "acme")?;
//!
//! for (sheet, matches) in &results {
//!     println!("{}: {} row(s)", sheet, matches.len());
//! }
//! # Ok::<(), company_search::Error>(())
//! ```

pub mod error;
pub mod excel;
pub mod export;
pub mod search;

pub use error::{Error, Result};
pub use excel::{CellValue, Sheet, Workbook};
pub use search::{
    MatchedRow, ResultSet, SearchOptions, SheetMatches, search, search_bytes, search_path,
    search_workbook,
};
