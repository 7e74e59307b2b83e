use std::{
    fmt::Display,
    fs::File,
    io::{BufReader, Read, Seek},
    path::Path,
};

use calamine::{Data, Range, Reader, Xls, Xlsx, open_workbook};
use grade_mailer_app::{
    domain::table::{CellValue, Table},
    ports::table_source::LoadTableError,
};
use log::warn;

use crate::read_error;

// Largest float that still converts to i64 without losing whole-number precision.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

pub(crate) fn read_xlsx(path: &Path) -> Result<Table, LoadTableError> {
    let mut workbook: Xlsx<BufReader<File>> =
        open_workbook(path).map_err(|e| read_error(path, e))?;
    first_sheet(&mut workbook, path)
}

pub(crate) fn read_xls(path: &Path) -> Result<Table, LoadTableError> {
    let mut workbook: Xls<BufReader<File>> =
        open_workbook(path).map_err(|e| read_error(path, e))?;
    first_sheet(&mut workbook, path)
}

fn first_sheet<RS, R>(workbook: &mut R, path: &Path) -> Result<Table, LoadTableError>
where
    RS: Read + Seek,
    R: Reader<RS>,
    R::Error: Display,
{
    match workbook.worksheet_range_at(0) {
        Some(range) => range_to_table(&range.map_err(|e| read_error(path, e))?, path),
        None => {
            warn!("{} contains no worksheets", path.display());
            Ok(Table::default())
        }
    }
}

fn range_to_table(range: &Range<Data>, path: &Path) -> Result<Table, LoadTableError> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Table::default());
    };

    let headers = header.iter().map(|cell| cell.to_string()).collect();
    let records: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(cell_value).collect())
        .collect();

    Table::from_rows(headers, records).map_err(|source| LoadTableError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Missing,
        Data::String(text) => CellValue::Text(text.clone()),
        Data::Int(value) => CellValue::Int(*value),
        Data::Float(value) => float_value(*value),
        Data::Bool(value) => CellValue::Bool(*value),
        Data::DateTime(value) if value.is_duration() || value.as_f64() < 1.0 => {
            CellValue::Text(time_text(value.as_f64()))
        }
        Data::DateTime(value) => value
            .as_datetime()
            .map(CellValue::DateTime)
            .unwrap_or_else(|| float_value(value.as_f64())),
        Data::DateTimeIso(text) | Data::DurationIso(text) => CellValue::Text(text.clone()),
        Data::Error(error) => CellValue::Text(error.to_string()),
    }
}

// Durations may run past 24 hours, so hours are not wrapped.
fn time_text(serial: f64) -> String {
    let total = (serial.abs() * SECONDS_PER_DAY).round() as i64;
    let sign = if serial < 0.0 { "-" } else { "" };
    format!(
        "{}{:02}:{:02}:{:02}",
        sign,
        total / 3600,
        (total / 60) % 60,
        total % 60
    )
}

// Spreadsheets store every number as a float; whole numbers read as integers.
fn float_value(value: f64) -> CellValue {
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        CellValue::Int(value as i64)
    } else {
        CellValue::Float(value)
    }
}
