use std::fmt;

use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Missing,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Missing => Ok(()),
            CellValue::Text(text) => f.write_str(text),
            CellValue::Int(value) => write!(f, "{}", value),
            CellValue::Float(value) => write!(f, "{:?}", value),
            CellValue::Bool(value) => write!(f, "{}", value),
            CellValue::DateTime(value) => write!(f, "{}", value.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("column '{column}' has {actual} cells, expected {expected}")]
    RaggedColumns {
        column: String,
        expected: usize,
        actual: usize,
    },
    #[error("row {row} has {actual} fields but the header has {expected}")]
    RowTooLong {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }
}

// All columns have the same length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        let row_count = columns.first().map(|c| c.cells.len()).unwrap_or(0);
        if let Some(column) = columns.iter().find(|c| c.cells.len() != row_count) {
            return Err(TableError::RaggedColumns {
                column: column.name.clone(),
                expected: row_count,
                actual: column.cells.len(),
            });
        }
        Ok(Self { columns, row_count })
    }

    // Short records are padded with Missing.
    pub fn from_rows(
        headers: Vec<String>,
        rows: impl IntoIterator<Item = Vec<CellValue>>,
    ) -> Result<Self, TableError> {
        let width = headers.len();
        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|name| Column::new(name, Vec::new()))
            .collect();
        let mut row_count = 0;

        for (index, row) in rows.into_iter().enumerate() {
            if row.len() > width {
                return Err(TableError::RowTooLong {
                    row: index,
                    expected: width,
                    actual: row.len(),
                });
            }
            let mut cells = row.into_iter();
            for column in columns.iter_mut() {
                column.cells.push(cells.next().unwrap_or(CellValue::Missing));
            }
            row_count += 1;
        }

        Ok(Self { columns, row_count })
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        (index < self.row_count).then_some(Row { table: self, index })
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        (0..self.row_count).map(move |index| Row { table: self, index })
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    index: usize,
}

impl<'a> Row<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    // With duplicate headers the first matching column wins.
    pub fn get(&self, column: &str) -> Option<&'a CellValue> {
        let column_index = self.table.column_index(column)?;
        self.table.columns[column_index].cells.get(self.index)
    }
}
