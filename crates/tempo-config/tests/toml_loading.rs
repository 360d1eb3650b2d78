//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use tempo_config::{ExportFormat, TempoConfig};

fn from_file(path: &str) -> Figment {
    Figment::from(Serialized::defaults(TempoConfig::default())).merge(Toml::file(path))
}

#[test]
fn loads_gitlab_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[gitlab]
url = "https://git.example.com"
token = "glpat-toml"
assignee_id = 77
timeout_secs = 5
"#,
        )?;

        let config: TempoConfig = from_file("config.toml").extract()?;

        assert_eq!(config.gitlab.url, "https://git.example.com");
        assert_eq!(config.gitlab.token, "glpat-toml");
        assert_eq!(config.gitlab.assignee_id, Some(77));
        assert_eq!(config.gitlab.timeout_secs, 5);
        assert!(config.gitlab.is_configured());
        Ok(())
    });
}

#[test]
fn loads_full_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[gitlab]
token = "glpat-toml"

[general]
folder_base = "/srv/clients"
database_path = "/srv/clients/tempo.db"
default_limit = 50
timezone_offset_hours = -3

[export]
format = "csv"
"#,
        )?;

        let config: TempoConfig = from_file("config.toml").extract()?;

        assert_eq!(config.gitlab.url, "https://gitlab.com");
        assert_eq!(config.general.folder_base, "/srv/clients");
        assert_eq!(config.general.default_limit, 50);
        assert_eq!(config.general.timezone_offset_hours, Some(-3));
        assert_eq!(config.export.format, ExportFormat::Csv);
        Ok(())
    });
}

#[test]
fn unknown_export_format_is_an_error() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[export]\nformat = \"ods\"\n")?;
        let result: Result<TempoConfig, _> = from_file("config.toml").extract();
        assert!(result.is_err());
        Ok(())
    });
}

#[test]
fn env_var_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.set_env("TEMPO_GITLAB__TOKEN", "glpat-env");
        jail.create_file(
            "config.toml",
            r#"
[gitlab]
url = "https://git.example.com"
token = "glpat-toml"
"#,
        )?;

        let config: TempoConfig = from_file("config.toml")
            .merge(Env::prefixed("TEMPO_").split("__"))
            .extract()?;

        assert_eq!(config.gitlab.token, "glpat-env");
        assert_eq!(config.gitlab.url, "https://git.example.com");
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".tempo")?;
        jail.create_file(
            ".tempo/config.toml",
            r#"
[general]
default_limit = 7
"#,
        )?;

        let config = TempoConfig::load().expect("config loads");
        assert_eq!(config.general.default_limit, 7);
        Ok(())
    });
}

/// Mistyped env keys are silently ignored by figment.
#[test]
fn typo_env_var_silently_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("TEMPO_GITLAB__TOKNE", "glpat-typo");

        let config: TempoConfig = Figment::from(Serialized::defaults(TempoConfig::default()))
            .merge(Env::prefixed("TEMPO_").split("__"))
            .extract()?;

        assert!(config.gitlab.token.is_empty());
        Ok(())
    });
}
