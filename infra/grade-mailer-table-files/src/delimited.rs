use std::{io::Read, path::Path};

use csv::ReaderBuilder;
use grade_mailer_app::{
    domain::table::{CellValue, Table},
    ports::table_source::LoadTableError,
};

use crate::read_error;

// Field values read as missing, the same set dataframe loaders treat as NA.
const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub(crate) fn read_csv(path: &Path) -> Result<Table, LoadTableError> {
    let reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| read_error(path, e))?;
    parse_csv(reader, path)
}

fn parse_csv<R: Read>(mut reader: csv::Reader<R>, path: &Path) -> Result<Table, LoadTableError> {
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| read_error(path, e))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| read_error(path, e))?;
        rows.push(record.iter().map(parse_field).collect());
    }

    Table::from_rows(headers, rows).map_err(|source| LoadTableError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_field(field: &str) -> CellValue {
    if NA_VALUES.contains(&field) {
        return CellValue::Missing;
    }
    if let Ok(value) = field.parse::<i64>() {
        return CellValue::Int(value);
    }
    if let Ok(value) = field.parse::<f64>() {
        return CellValue::Float(value);
    }
    match field {
        "true" | "True" | "TRUE" => CellValue::Bool(true),
        "false" | "False" | "FALSE" => CellValue::Bool(false),
        _ => CellValue::Text(field.to_string()),
    }
}
