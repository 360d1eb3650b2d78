use std::path::PathBuf;

use anyhow::Context;
use tempo_config::TempoConfig;
use tempo_core::entities::Project;
use tempo_db::service::TempoService;
use tempo_export::ProjectPaths;
use tempo_gitlab::GitlabClient;

use super::Zone;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: TempoService,
    pub config: TempoConfig,
    pub zone: Zone,
}

impl AppContext {
    /// Open the database (`db_override` wins over `general.database_path`).
    pub async fn init(config: TempoConfig, db_override: Option<&str>) -> anyhow::Result<Self> {
        let db_path = db_override.map_or_else(|| config.general.database_path(), PathBuf::from);
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create database folder {}", parent.display())
                })?;
            }
        }

        let zone = Zone::from_config(&config.general)?;
        tracing::debug!(path = %db_path.display(), "opening database");
        let service = TempoService::new_local(&db_path.to_string_lossy())
            .await
            .with_context(|| format!("failed to open database at {}", db_path.display()))?;

        Ok(Self {
            service,
            config,
            zone,
        })
    }

    /// A GitLab client built from the `gitlab` config section.
    pub fn gitlab(&self) -> anyhow::Result<GitlabClient> {
        let gitlab = self
            .config
            .require_gitlab()
            .context("set TEMPO_GITLAB__TOKEN or gitlab.token in config.toml")?;
        GitlabClient::from_config(gitlab).context("failed to build GitLab client")
    }

    /// The project's file locations under `general.folder_base`.
    pub async fn project_paths(&self, project: &Project) -> anyhow::Result<ProjectPaths> {
        let customer = self
            .service
            .get_customer(&project.customer_id)
            .await
            .with_context(|| format!("customer of project '{}'", project.title))?;
        Ok(ProjectPaths::new(
            &self.config.general.folder_base(),
            &customer.name,
            &project.title,
        ))
    }
}
