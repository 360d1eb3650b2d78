//! Project lookup by numeric ID or `group/project` path.

use serde::{Deserialize, Serialize};

use crate::{GitlabClient, error::GitlabError, http::check_response};

/// The subset of a GitLab project tempo stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitlabProject {
    pub id: u64,
    pub name: String,
    pub path_with_namespace: String,
    pub web_url: String,
}

/// Encode a project reference for the `/projects/:id` route.
///
/// Numeric IDs pass through, paths are percent-encoded (`acme/site` → `acme%2Fsite`).
fn project_ref(key: &str) -> String {
    if key.chars().all(|c| c.is_ascii_digit()) {
        key.to_string()
    } else {
        urlencoding::encode(key.trim_matches('/')).into_owned()
    }
}

impl GitlabClient {
    /// Resolve a project by numeric ID or full path.
    ///
    /// # Errors
    ///
    /// Returns [`GitlabError::Api`] with status 404 when no such project is visible.
    pub async fn get_project(&self, key: &str) -> Result<GitlabProject, GitlabError> {
        let url = format!("{}/projects/{}", self.api_base, project_ref(key));
        let resp = check_response(self.http.get(&url).send().await?).await?;
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| GitlabError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_reference_passes_through() {
        assert_eq!(project_ref("4815162"), "4815162");
    }

    #[test]
    fn path_reference_is_encoded() {
        assert_eq!(project_ref("acme/site"), "acme%2Fsite");
        assert_eq!(project_ref("/acme/sub group/site/"), "acme%2Fsub%20group%2Fsite");
    }

    #[test]
    fn parse_project() {
        let project: GitlabProject = serde_json::from_str(
            r#"{
                "id": 4815162,
                "name": "site",
                "path_with_namespace": "acme/site",
                "web_url": "https://gitlab.com/acme/site",
                "default_branch": "main"
            }"#,
        )
        .unwrap();
        assert_eq!(project.id, 4_815_162);
        assert_eq!(project.path_with_namespace, "acme/site");
    }
}
