//! Spreadsheet export configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// File format written by `tempo export timesheet`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xlsx => f.write_str("xlsx"),
            Self::Csv => f.write_str("csv"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExportConfig {
    /// Default format when `--csv` is not given.
    #[serde(default)]
    pub format: ExportFormat,
}
