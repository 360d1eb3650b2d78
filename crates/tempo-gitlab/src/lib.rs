//! # tempo-gitlab
//!
//! GitLab REST v4 client for tempo.
//!
//! Covers the calls the tracker needs:
//! - create an issue in a project
//! - list a project's issues (all pages)
//! - list a project's labels and milestones
//! - resolve a project by ID or path

pub mod issues;
pub mod labels;
pub mod milestones;
pub mod projects;

mod error;
mod http;

pub use error::GitlabError;
pub use issues::{GitlabIssue, IssueScope, IssueState, NewGitlabIssue};
pub use labels::GitlabLabel;
pub use milestones::GitlabMilestone;
pub use projects::GitlabProject;

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tempo_config::GitlabConfig;

use crate::http::{check_response, next_page};

/// Page size used when walking paginated listings.
pub const DEFAULT_PER_PAGE: u32 = 100;

/// HTTP client for one GitLab instance, authenticated with a personal token.
pub struct GitlabClient {
    http: reqwest::Client,
    api_base: String,
}

impl GitlabClient {
    /// Build a client from the `[gitlab]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`GitlabError::Config`] when the token is missing or cannot be
    /// sent as a header, and [`GitlabError::Http`] if the client fails to build.
    pub fn from_config(config: &GitlabConfig) -> Result<Self, GitlabError> {
        if config.token.is_empty() {
            return Err(GitlabError::Config(
                "gitlab.token is empty (set TEMPO_GITLAB__TOKEN)".to_string(),
            ));
        }
        Self::new(
            &config.api_base(),
            &config.token,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Build a client for an explicit API base such as `https://gitlab.com/api/v4`.
    ///
    /// # Errors
    ///
    /// Returns [`GitlabError::Config`] when the token is not a valid header value.
    pub fn new(api_base: &str, token: &str, timeout: Duration) -> Result<Self, GitlabError> {
        let mut token = HeaderValue::from_str(token)
            .map_err(|e| GitlabError::Config(format!("token: {e}")))?;
        token.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert("PRIVATE-TOKEN", token);

        let http = reqwest::Client::builder()
            .user_agent("tempo/0.1")
            .default_headers(headers)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    /// The REST base every request is built on.
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn project_url(&self, project_id: u64, resource: &str) -> String {
        format!("{}/projects/{project_id}/{resource}", self.api_base)
    }

    /// GET every page of a listing, following `x-next-page`.
    async fn get_all<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, GitlabError> {
        let mut items = Vec::new();
        let mut page = 1_u32;
        loop {
            let page_url = with_query(
                url,
                query
                    .iter()
                    .map(|(k, v)| (*k, v.clone()))
                    .chain([
                        ("per_page", DEFAULT_PER_PAGE.to_string()),
                        ("page", page.to_string()),
                    ]),
            );
            let resp = self.http.get(&page_url).send().await?;
            let resp = check_response(resp).await?;
            let next = next_page(&resp);
            let body = resp.text().await?;
            let batch: Vec<T> =
                serde_json::from_str(&body).map_err(|e| GitlabError::Parse(e.to_string()))?;
            tracing::debug!(url = %page_url, count = batch.len(), "gitlab page fetched");
            items.extend(batch);

            match next {
                Some(n) if n > page => page = n,
                _ => break,
            }
        }
        Ok(items)
    }
}

/// Append `key=value` pairs to `url`, percent-encoding the values.
fn with_query<'a>(url: &str, pairs: impl IntoIterator<Item = (&'a str, String)>) -> String {
    let query: Vec<String> = pairs
        .into_iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(&v)))
        .collect();
    if query.is_empty() {
        url.to_string()
    } else {
        format!("{url}?{}", query.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_requires_token() {
        let result = GitlabClient::from_config(&GitlabConfig::default());
        assert!(matches!(result, Err(GitlabError::Config(_))));
    }

    #[test]
    fn from_config_uses_api_base() {
        let config = GitlabConfig {
            url: "https://git.example.com/".into(),
            token: "glpat-abc".into(),
            ..Default::default()
        };
        let client = GitlabClient::from_config(&config).unwrap();
        assert_eq!(client.api_base(), "https://git.example.com/api/v4");
        assert_eq!(
            client.project_url(12, "issues"),
            "https://git.example.com/api/v4/projects/12/issues"
        );
    }

    #[test]
    fn with_query_encodes_values() {
        let url = with_query(
            "https://gitlab.com/api/v4/projects/1/issues",
            [("state", "all".to_string()), ("search", "a b".to_string())],
        );
        assert_eq!(
            url,
            "https://gitlab.com/api/v4/projects/1/issues?state=all&search=a%20b"
        );
        assert_eq!(with_query("https://x", []), "https://x");
    }

    #[test]
    fn rejects_token_with_newline() {
        let result = GitlabClient::new("https://gitlab.com/api/v4", "bad\ntoken", Duration::from_secs(5));
        assert!(matches!(result, Err(GitlabError::Config(_))));
    }
}
