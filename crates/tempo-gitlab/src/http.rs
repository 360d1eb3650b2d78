//! Shared HTTP response helpers.
//!
//! Status-code checks (429 with `Retry-After`, non-success → [`GitlabError::Api`])
//! and the `x-next-page` pagination header.

use crate::error::GitlabError;

/// Seconds to wait when a 429 carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Check an HTTP response for error statuses.
///
/// Returns the response unchanged on success.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, GitlabError> {
    if resp.status() == 429 {
        return Err(GitlabError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(GitlabError::Api {
            status,
            message: api_message(&body),
        });
    }
    Ok(resp)
}

/// Parse the `Retry-After` header as seconds.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

/// The next page number announced by GitLab, `None` on the last page.
pub fn next_page(resp: &reqwest::Response) -> Option<u32> {
    resp.headers()
        .get("x-next-page")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse().ok())
}

/// Pull `message` (or `error`) out of a GitLab error body, else the raw body.
fn api_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_string();
    };
    match value.get("message").or_else(|| value.get("error")) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16, body: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body.to_string())
                .unwrap(),
        )
    }

    fn mock_response_with_header(status: u16, name: &str, value: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .header(name, value)
                .body(String::new())
                .unwrap(),
        )
    }

    #[test]
    fn parse_retry_after_from_header() {
        let resp = mock_response_with_header(429, "Retry-After", "120");
        assert_eq!(parse_retry_after(&resp), 120);
    }

    #[test]
    fn parse_retry_after_missing_header() {
        let resp = mock_response(429, "");
        assert_eq!(parse_retry_after(&resp), 60);
    }

    #[test]
    fn next_page_present() {
        let resp = mock_response_with_header(200, "x-next-page", "3");
        assert_eq!(next_page(&resp), Some(3));
    }

    #[test]
    fn next_page_empty_on_last_page() {
        let resp = mock_response_with_header(200, "x-next-page", "");
        assert_eq!(next_page(&resp), None);
        assert_eq!(next_page(&mock_response(200, "")), None);
    }

    #[test]
    fn api_message_prefers_json_message() {
        assert_eq!(api_message(r#"{"message":"404 Project Not Found"}"#), "404 Project Not Found");
        assert_eq!(api_message(r#"{"error":"invalid_token"}"#), "invalid_token");
        assert_eq!(
            api_message(r#"{"message":{"title":["can't be blank"]}}"#),
            r#"{"title":["can't be blank"]}"#
        );
        assert_eq!(api_message("Bad Gateway"), "Bad Gateway");
    }

    #[tokio::test]
    async fn check_response_rate_limited() {
        let resp = mock_response_with_header(429, "Retry-After", "30");
        let err = check_response(resp).await.unwrap_err();
        assert!(matches!(
            err,
            GitlabError::RateLimited {
                retry_after_secs: 30
            }
        ));
    }

    #[tokio::test]
    async fn check_response_api_error() {
        let resp = mock_response(401, r#"{"message":"401 Unauthorized"}"#);
        let err = check_response(resp).await.unwrap_err();
        match err {
            GitlabError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "401 Unauthorized");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn check_response_success() {
        assert!(check_response(mock_response(201, "{}")).await.is_ok());
    }
}
