use std::path::Path;

use grade_mailer_app::{
    domain::table::Table,
    ports::table_source::{LoadTableError, TableSourcePort},
};
use log::debug;

mod delimited;
mod spreadsheet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Xlsx,
    Xls,
}

impl TableFormat {
    // Picks the format from the file extension alone, ignoring case. The
    // error carries the extension with its leading dot, or an empty string
    // when there is none.
    pub fn from_path(path: &Path) -> Result<Self, LoadTableError> {
        let extension = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
            .unwrap_or_default();

        match extension.as_str() {
            ".csv" => Ok(TableFormat::Csv),
            ".xlsx" => Ok(TableFormat::Xlsx),
            ".xls" => Ok(TableFormat::Xls),
            _ => Err(LoadTableError::UnsupportedFormat(extension)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FileTableAdapter;

impl TableSourcePort for FileTableAdapter {
    fn load_table(&self, path: &Path) -> Result<Table, LoadTableError> {
        let format = TableFormat::from_path(path)?;
        debug!("Reading {} as {:?}", path.display(), format);
        match format {
            TableFormat::Csv => delimited::read_csv(path),
            TableFormat::Xlsx => spreadsheet::read_xlsx(path),
            TableFormat::Xls => spreadsheet::read_xls(path),
        }
    }
}

pub(crate) fn read_error(path: &Path, error: impl std::fmt::Display) -> LoadTableError {
    LoadTableError::Read {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}
