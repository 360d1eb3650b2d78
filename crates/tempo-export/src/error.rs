//! Export error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from writing notes, changelogs and spreadsheets.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Reading or writing a file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The xlsx writer rejected a cell, sheet or save.
    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// The CSV writer failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl ExportError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
