use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::table::{Table, TableError};

pub trait TableSourcePort {
    fn load_table(&self, path: &Path) -> Result<Table, LoadTableError>;
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadTableError {
    #[error("Format not supported: {0}")]
    UnsupportedFormat(String),
    #[error("failed to read {}: {message}", path.display())]
    Read { path: PathBuf, message: String },
    #[error("malformed table in {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: TableError,
    },
}
