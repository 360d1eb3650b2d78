use serde::de::DeserializeOwned;
use tempo_core::entities::Estimate;
use tempo_gitlab::IssueScope;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Hours with up to two decimals (`"1.5"`, `"2.25"`).
pub fn parse_estimate(raw: &str) -> anyhow::Result<Estimate> {
    raw.parse::<Estimate>()
        .map_err(|error| anyhow::anyhow!("invalid --estimate '{raw}': {error}"))
}

/// `--state` of `issue sync`.
pub fn parse_scope(raw: &str) -> anyhow::Result<IssueScope> {
    match raw {
        "opened" | "open" => Ok(IssueScope::Opened),
        "closed" => Ok(IssueScope::Closed),
        "all" => Ok(IssueScope::All),
        other => anyhow::bail!("invalid state '{other}': expected opened, closed or all"),
    }
}

/// An issue number given as `12` or `#12`.
pub fn parse_issue_number(raw: &str) -> Option<u64> {
    raw.strip_prefix('#').unwrap_or(raw).parse().ok()
}
