#![allow(dead_code)]

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

pub enum Value {
    Text(&'static str),
    Number(f64),
    Date(f64),
    Bool(bool),
    Blank,
}

pub struct FixtureSheet {
    pub name: &'static str,
    pub rows: Vec<Vec<Value>>,
}

pub fn sheet(name: &'static str, rows: Vec<Vec<Value>>) -> FixtureSheet {
    FixtureSheet { name, rows }
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<Value>]) -> Result<(), XlsxError> {
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    for (row, values) in rows.iter().enumerate() {
        for (col, value) in values.iter().enumerate() {
            let (row, col) = (row as u32, col as u16);
            match value {
                Value::Text(s) => {
                    worksheet.write_string(row, col, *s)?;
                }
                Value::Number(n) => {
                    worksheet.write_number(row, col, *n)?;
                }
                Value::Date(serial) => {
                    worksheet.write_number_with_format(row, col, *serial, &date_format)?;
                }
                Value::Bool(b) => {
                    worksheet.write_boolean(row, col, *b)?;
                }
                Value::Blank => {}
            }
        }
    }

    Ok(())
}

/// Serialize the sheets into an in-memory XLSX file.
pub fn build_xlsx(sheets: Vec<FixtureSheet>) -> Vec<u8> {
    let mut workbook = Workbook::new();

    for fixture in &sheets {
        let worksheet = workbook.add_worksheet().set_name(fixture.name).unwrap();
        write_rows(worksheet, &fixture.rows).unwrap();
    }

    workbook.save_to_buffer().unwrap()
}

/// Sheet "Q1" with three companies, "Notes" without a Company column and
/// "Q2" with numbers, a date and a blank company.
pub fn sample_xlsx() -> Vec<u8> {
    use Value::*;

    build_xlsx(vec![
        sheet(
            "Q1",
            vec![
                vec![Text("Company"), Text("City")],
                vec![Text("Acme Corp"), Text("Oslo")],
                vec![Text("Globex"), Text("Rome")],
                vec![Text("acme Industries"), Text("Lima")],
            ],
        ),
        sheet(
            "Notes",
            vec![
                vec![Text("Text")],
                vec![Text("Call Acme about renewal")],
            ],
        ),
        sheet(
            "Q2",
            vec![
                vec![Text("Region"), Text("Company"), Text("Active")],
                vec![Text("North"), Number(3100.0), Bool(true)],
                vec![Text("South"), Blank, Bool(false)],
                vec![Text("East"), Date(45296.0), Bool(true)],
                vec![Text("West"), Text("ACME Labs"), Bool(false)],
            ],
        ),
    ])
}
