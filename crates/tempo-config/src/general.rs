//! General application configuration.

use std::path::PathBuf;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default result limit.
const fn default_limit() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Root folder for task notes, changelogs and spreadsheets. Files land
    /// under `{folder_base}/{customer}/{project}/`. Empty means `~/tempo`.
    #[serde(default)]
    pub folder_base: String,

    /// Path of the local database file. Empty means
    /// `{data_dir}/tempo/tempo.db`.
    #[serde(default)]
    pub database_path: String,

    /// Default result limit for list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Fixed UTC offset, in hours, used to decide which calendar day a
    /// timesheet belongs to. Unset means the system timezone.
    #[serde(default)]
    pub timezone_offset_hours: Option<i32>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            folder_base: String::new(),
            database_path: String::new(),
            default_limit: default_limit(),
            timezone_offset_hours: None,
        }
    }
}

impl GeneralConfig {
    /// Resolved export root.
    #[must_use]
    pub fn folder_base(&self) -> PathBuf {
        if self.folder_base.is_empty() {
            return dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("tempo");
        }
        PathBuf::from(&self.folder_base)
    }

    /// Resolved database file path.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        if self.database_path.is_empty() {
            return dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("tempo")
                .join("tempo.db");
        }
        PathBuf::from(&self.database_path)
    }

    /// The configured fixed offset, if any.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when the offset is outside -23..=23.
    pub fn timezone_offset(&self) -> Result<Option<FixedOffset>, ConfigError> {
        let Some(hours) = self.timezone_offset_hours else {
            return Ok(None);
        };
        hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .filter(|_| hours.abs() < 24)
            .map(Some)
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "general.timezone_offset_hours".into(),
                reason: format!("{hours} is not between -23 and 23"),
            })
    }
}
