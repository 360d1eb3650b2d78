//! # tempo-config
//!
//! Layered configuration loading for tempo using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TEMPO_*` prefix, `__` as separator)
//! 2. Project-level `.tempo/config.toml`
//! 3. User-level `~/.config/tempo/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TEMPO_GITLAB__TOKEN` -> `gitlab.token`,
//! `TEMPO_GENERAL__FOLDER_BASE` -> `general.folder_base`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use tempo_config::TempoConfig;
//!
//! let config = TempoConfig::load().expect("config");
//! if config.gitlab.is_configured() {
//!     println!("GitLab: {}", config.gitlab.api_base());
//! }
//! ```

mod error;
mod export;
mod general;
mod gitlab;

pub use error::ConfigError;
pub use export::{ExportConfig, ExportFormat};
pub use general::GeneralConfig;
pub use gitlab::GitlabConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for all config keys.
pub const ENV_PREFIX: &str = "TEMPO_";

/// Known top-level sections, used to flag mistyped env keys.
pub const SECTIONS: &[&str] = &["gitlab", "general", "export"];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TempoConfig {
    #[serde(default)]
    pub gitlab: GitlabConfig,
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl TempoConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` when a source cannot be parsed or a
    /// value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Build the figment provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = Self::local_config_path();
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tempo").join("config.toml"))
    }

    /// Path to the project-local config file, relative to the working directory.
    #[must_use]
    pub fn local_config_path() -> PathBuf {
        PathBuf::from(".tempo").join("config.toml")
    }

    /// Fail with `NotConfigured` unless GitLab credentials are present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` for the `gitlab` section.
    pub fn require_gitlab(&self) -> Result<&GitlabConfig, ConfigError> {
        if self.gitlab.is_configured() {
            Ok(&self.gitlab)
        } else {
            Err(ConfigError::NotConfigured {
                section: "gitlab".into(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = TempoConfig::default();
        assert!(!config.gitlab.is_configured());
        assert_eq!(config.general.default_limit, 20);
        assert_eq!(config.export.format, ExportFormat::Xlsx);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: TempoConfig = TempoConfig::figment().extract()?;
            assert!(!config.gitlab.is_configured());
            assert_eq!(config.gitlab.url, "https://gitlab.com");
            assert_eq!(config.general.default_limit, 20);
            Ok(())
        });
    }

    #[test]
    fn require_gitlab_reports_section() {
        let err = TempoConfig::default().require_gitlab().unwrap_err();
        assert!(err.to_string().contains("'gitlab'"));
    }
}
