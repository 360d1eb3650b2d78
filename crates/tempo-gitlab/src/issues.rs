//! Project issues: create and list.

use serde::{Deserialize, Serialize};
use tempo_core::enums::Status;

use crate::milestones::GitlabMilestone;
use crate::{GitlabClient, error::GitlabError, http::check_response};

/// GitLab's issue state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Opened,
    Closed,
    /// Any state GitLab adds later (e.g. `locked`).
    #[serde(other)]
    Other,
}

impl IssueState {
    /// Local status mirrored from this state.
    #[must_use]
    pub const fn to_status(self) -> Status {
        match self {
            Self::Closed => Status::Closed,
            Self::Opened | Self::Other => Status::Open,
        }
    }
}

/// Which issues a listing returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IssueScope {
    #[default]
    Opened,
    Closed,
    All,
}

impl IssueScope {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Opened => "opened",
            Self::Closed => "closed",
            Self::All => "all",
        }
    }
}

/// An issue as returned by the API, reduced to the fields tempo mirrors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitlabIssue {
    /// Project-scoped issue number.
    pub iid: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    pub web_url: String,
    pub state: IssueState,
    #[serde(default)]
    pub milestone: Option<GitlabMilestone>,
}

/// Payload for [`GitlabClient::create_issue`].
#[derive(Debug, Clone, Default)]
pub struct NewGitlabIssue {
    pub title: String,
    pub description: Option<String>,
    pub assignee_id: Option<u64>,
    pub labels: Vec<String>,
    /// Global milestone ID (not the project-scoped iid).
    pub milestone_id: Option<u64>,
}

/// Wire form: GitLab takes labels as one comma-separated string.
#[derive(Serialize)]
struct CreateIssueBody<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    assignee_id: Option<u64>,
    #[serde(skip_serializing_if = "String::is_empty")]
    labels: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    milestone_id: Option<u64>,
}

impl<'a> From<&'a NewGitlabIssue> for CreateIssueBody<'a> {
    fn from(new: &'a NewGitlabIssue) -> Self {
        Self {
            title: &new.title,
            description: new.description.as_deref().filter(|d| !d.is_empty()),
            assignee_id: new.assignee_id,
            labels: new.labels.join(","),
            milestone_id: new.milestone_id,
        }
    }
}

impl GitlabClient {
    /// Create an issue in `project_id`.
    ///
    /// # Errors
    ///
    /// Returns [`GitlabError`] if the request fails, GitLab rejects it, or
    /// the response cannot be parsed.
    pub async fn create_issue(
        &self,
        project_id: u64,
        new: &NewGitlabIssue,
    ) -> Result<GitlabIssue, GitlabError> {
        let url = self.project_url(project_id, "issues");
        let resp = self
            .http
            .post(&url)
            .json(&CreateIssueBody::from(new))
            .send()
            .await?;
        let resp = check_response(resp).await?;
        let body = resp.text().await?;
        let issue: GitlabIssue =
            serde_json::from_str(&body).map_err(|e| GitlabError::Parse(e.to_string()))?;
        tracing::info!(project_id, iid = issue.iid, "gitlab issue created");
        Ok(issue)
    }

    /// List the issues of `project_id` in `scope`, across all pages.
    ///
    /// # Errors
    ///
    /// Returns [`GitlabError`] if any page request fails or cannot be parsed.
    pub async fn list_issues(
        &self,
        project_id: u64,
        scope: IssueScope,
    ) -> Result<Vec<GitlabIssue>, GitlabError> {
        let url = self.project_url(project_id, "issues");
        self.get_all(
            &url,
            &[
                ("state", scope.as_str().to_string()),
                ("order_by", "created_at".to_string()),
                ("sort", "asc".to_string()),
            ],
        )
        .await
    }

    /// Fetch a single issue by its project-scoped number.
    ///
    /// # Errors
    ///
    /// Returns [`GitlabError::Api`] with status 404 when the issue does not exist.
    pub async fn get_issue(&self, project_id: u64, iid: u64) -> Result<GitlabIssue, GitlabError> {
        let url = self.project_url(project_id, &format!("issues/{iid}"));
        let resp = check_response(self.http.get(&url).send().await?).await?;
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| GitlabError::Parse(e.to_string()))
    }
}
