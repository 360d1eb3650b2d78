//! Project labels.

use serde::{Deserialize, Serialize};

use crate::{GitlabClient, error::GitlabError};

/// A project label as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitlabLabel {
    pub id: u64,
    pub name: String,
    /// `#RRGGBB`.
    pub color: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl GitlabClient {
    /// List every label visible in `project_id`, group labels included.
    ///
    /// # Errors
    ///
    /// Returns [`GitlabError`] if any page request fails or cannot be parsed.
    pub async fn list_labels(&self, project_id: u64) -> Result<Vec<GitlabLabel>, GitlabError> {
        let url = self.project_url(project_id, "labels");
        self.get_all(&url, &[("include_ancestor_groups", "true".to_string())])
            .await
    }
}
