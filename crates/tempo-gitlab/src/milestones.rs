//! Project milestones.

use serde::{Deserialize, Serialize};

use crate::{GitlabClient, error::GitlabError};

/// A milestone as returned by the API, standalone or embedded in an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitlabMilestone {
    /// Global ID, the one `milestone_id` expects when creating issues.
    pub id: u64,
    /// Project-scoped number.
    #[serde(default)]
    pub iid: Option<u64>,
    pub title: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
}

impl GitlabClient {
    /// List the milestones of `project_id`, active and closed.
    ///
    /// # Errors
    ///
    /// Returns [`GitlabError`] if any page request fails or cannot be parsed.
    pub async fn list_milestones(
        &self,
        project_id: u64,
    ) -> Result<Vec<GitlabMilestone>, GitlabError> {
        let url = self.project_url(project_id, "milestones");
        self.get_all(&url, &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"[
        {
            "id": 901,
            "iid": 2,
            "project_id": 4815162,
            "title": "v1.2",
            "description": "",
            "state": "active",
            "due_date": "2026-04-30",
            "web_url": "https://gitlab.com/acme/site/-/milestones/2"
        },
        {
            "id": 900,
            "iid": 1,
            "project_id": 4815162,
            "title": "v1.1",
            "state": "closed",
            "due_date": null
        }
    ]"#;

    #[test]
    fn parse_milestone_listing() {
        let milestones: Vec<GitlabMilestone> = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(milestones.len(), 2);
        assert_eq!(milestones[0].id, 901);
        assert_eq!(milestones[0].iid, Some(2));
        assert_eq!(milestones[0].due_date.as_deref(), Some("2026-04-30"));
        assert_eq!(milestones[1].state.as_deref(), Some("closed"));
        assert!(milestones[1].due_date.is_none());
    }
}
