use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A customer project, optionally mirrored from a GitLab project.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub customer_id: String,
    /// Numeric project ID on GitLab, required for issue creation and sync.
    pub gitlab_project_id: Option<u64>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
