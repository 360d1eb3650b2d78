//! GitLab API configuration.

use serde::{Deserialize, Serialize};

/// Default GitLab instance.
fn default_url() -> String {
    "https://gitlab.com".to_string()
}

/// Default HTTP timeout in seconds.
const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitlabConfig {
    /// Instance base URL, without the `/api/v4` suffix.
    #[serde(default = "default_url")]
    pub url: String,

    /// Personal access token sent as `PRIVATE-TOKEN`.
    #[serde(default)]
    pub token: String,

    /// User ID assigned to issues created through `tempo issue create`.
    #[serde(default)]
    pub assignee_id: Option<u64>,

    /// Request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GitlabConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            token: String::new(),
            assignee_id: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GitlabConfig {
    /// Check if the API can be called (URL and token present).
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.token.is_empty()
    }

    /// REST v4 base, e.g. `https://gitlab.com/api/v4`.
    #[must_use]
    pub fn api_base(&self) -> String {
        format!("{}/api/v4", self.url.trim_end_matches('/'))
    }
}
