use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Value, json};

use crate::error::{Error, Result};
use crate::excel::CellValue;
use crate::search::{ResultSet, SheetMatches};

pub type OrderedSheetData = Vec<IndexMap<String, Value>>;

pub fn serialize_to_json<T: Serialize>(data: &T) -> Result<String> {
    serde_json::to_string_pretty(data)
        .map_err(|e| Error::Export(format!("Failed to serialize data to JSON: {}", e)))
}

// Keep numbers, booleans and dates typed; everything else is its text
pub fn process_cell_value(cell: &CellValue) -> Value {
    match cell {
        CellValue::Empty => Value::Null,
        CellValue::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 9.0e15 {
                json!(f.trunc() as i64)
            } else {
                json!(f)
            }
        }
        CellValue::Int(i) => json!(i),
        CellValue::Bool(b) => json!(b),
        CellValue::DateTime(_) => match cell.as_datetime() {
            Some(dt) => json!(dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
            None => json!(cell.as_text()),
        },
        _ => json!(cell.as_text()),
    }
}

fn sheet_to_json(matches: &SheetMatches) -> OrderedSheetData {
    matches
        .rows
        .iter()
        .map(|row| {
            matches
                .columns
                .iter()
                .zip(&row.cells)
                .map(|(column, cell)| (column.clone(), process_cell_value(cell)))
                .collect()
        })
        .collect()
}

/// Sheet name to an array of row objects keyed by column name, both in
/// source order.
pub fn results_to_json(results: &ResultSet) -> IndexMap<String, OrderedSheetData> {
    results
        .iter()
        .map(|(sheet_name, matches)| (sheet_name.clone(), sheet_to_json(matches)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::excel::{Sheet, Workbook};
    use crate::search::{SearchOptions, search_workbook};

    #[test]
    fn test_cell_values() {
        assert_eq!(process_cell_value(&CellValue::Empty), Value::Null);
        assert_eq!(process_cell_value(&CellValue::Float(12.0)), json!(12));
        assert_eq!(process_cell_value(&CellValue::Float(1.25)), json!(1.25));
        assert_eq!(process_cell_value(&CellValue::Bool(false)), json!(false));
        assert_eq!(
            process_cell_value(&CellValue::DateTime(45292.0)),
            json!("2024-01-01T00:00:00")
        );
        assert_eq!(
            process_cell_value(&CellValue::Error("#REF!".to_string())),
            json!("#REF!")
        );
    }

    #[test]
    fn test_results_shape() {
        let workbook = Workbook::new(vec![Sheet::new(
            "Q1",
            vec!["Company".to_string(), "Employees".to_string()],
            vec![
                vec![CellValue::String("Acme Corp".to_string()), CellValue::Float(120.0)],
                vec![CellValue::String("Globex".to_string()), CellValue::Empty],
            ],
        )]);
        let results = search_workbook(&workbook, "", &SearchOptions::default());

        let value = serde_json::to_value(results_to_json(&results)).unwrap();
        assert_eq!(
            value,
            json!({
                "Q1": [
                    { "Company": "Acme Corp", "Employees": 120 },
                    { "Company": "Globex", "Employees": null }
                ]
            })
        );
    }

    #[test]
    fn test_serialize_keeps_column_order() {
        let workbook = Workbook::new(vec![Sheet::new(
            "Q1",
            vec!["Zeta".to_string(), "Company".to_string()],
            vec![vec![CellValue::Int(1), CellValue::String("Acme".to_string())]],
        )]);
        let results = search_workbook(&workbook, "acme", &SearchOptions::default());

        let output = serialize_to_json(&results_to_json(&results)).unwrap();
        let zeta = output.find("Zeta").unwrap();
        let company = output.find("Company").unwrap();
        assert!(zeta < company);
    }

    #[test]
    fn test_empty_results_serialize_to_empty_object() {
        let output = serialize_to_json(&results_to_json(&ResultSet::new())).unwrap();
        assert_eq!(output, "{}");
    }
}
