//! CLI error type.

use std::path::PathBuf;

use datatable_lib::error::{ColumnError, SourceError, TableError};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config file is not valid.
    #[error("Invalid config {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid payload: {0}")]
    Source(#[from] SourceError),

    #[error("Invalid columns: {0}")]
    Column(#[from] ColumnError),

    #[error(transparent)]
    Table(#[from] TableError),

    /// A flag value is well-formed but unusable.
    #[error("{0}")]
    InvalidArgument(String),
}

impl CliError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
