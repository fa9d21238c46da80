use std::fmt;
use unicode_width::UnicodeWidthStr;

use crate::excel::CellValue;
use crate::search::{ResultSet, SheetMatches};

const SEPARATOR_WIDTH: usize = 50;

/// Plain-text report of a search: a summary line, then one labeled table per
/// sheet. An empty result renders as "No matches found."
pub fn render_text(results: &ResultSet) -> String {
    Report(results).to_string()
}

struct Report<'a>(&'a ResultSet);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let results = self.0;

        if results.is_empty() {
            return writeln!(f, "No matches found.");
        }

        writeln!(f, "Found {} matching result(s):", results.total_matches())?;

        for (sheet_name, matches) in results {
            writeln!(f)?;
            writeln!(f, "Results in Sheet: {}", sheet_name)?;
            write_table(f, matches)?;
            writeln!(f, "{}", "-".repeat(SEPARATOR_WIDTH))?;
        }

        Ok(())
    }
}

fn write_table(f: &mut fmt::Formatter<'_>, matches: &SheetMatches) -> fmt::Result {
    let mut header = Vec::with_capacity(matches.columns.len() + 1);
    header.push(String::new());
    header.extend(matches.columns.iter().map(|name| single_line(name)));

    let body: Vec<Vec<String>> = matches
        .rows
        .iter()
        .map(|row| {
            let mut line = Vec::with_capacity(row.cells.len() + 1);
            line.push(row.index.to_string());
            line.extend(row.cells.iter().map(display_cell));
            line
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|s| s.width()).collect();
    for line in &body {
        for (col_idx, value) in line.iter().enumerate() {
            widths[col_idx] = widths[col_idx].max(value.width());
        }
    }

    write_line(f, &header, &widths)?;

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(f, "{}", rule.join("-+-"))?;

    for line in &body {
        write_line(f, line, &widths)?;
    }

    Ok(())
}

fn write_line(f: &mut fmt::Formatter<'_>, values: &[String], widths: &[usize]) -> fmt::Result {
    let padded: Vec<String> = values
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(col_idx, (value, width))| {
            let fill = " ".repeat(width.saturating_sub(value.width()));
            // index column is right-aligned
            if col_idx == 0 {
                format!("{}{}", fill, value)
            } else {
                format!("{}{}", value, fill)
            }
        })
        .collect();

    writeln!(f, "{}", padded.join(" | ").trim_end())
}

fn display_cell(cell: &CellValue) -> String {
    if cell.is_empty() {
        String::new()
    } else {
        single_line(&cell.as_text())
    }
}

fn single_line(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}
