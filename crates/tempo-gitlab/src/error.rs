//! GitLab client error types.

use thiserror::Error;

/// Errors that can occur when talking to the GitLab API.
#[derive(Debug, Error)]
pub enum GitlabError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GitLab returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Failed to parse a GitLab response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The client could not be built from the configuration.
    #[error("invalid GitLab configuration: {0}")]
    Config(String),

    /// GitLab returned 429 Too Many Requests.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },
}
