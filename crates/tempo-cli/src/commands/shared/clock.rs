use chrono::NaiveTime;
use tempo_core::hours::CLOCK_FORMAT;

/// A planned time of day, `HH:MM`.
pub fn parse_clock(raw: &str, flag: &str) -> anyhow::Result<NaiveTime> {
    NaiveTime::parse_from_str(raw, CLOCK_FORMAT)
        .map_err(|error| anyhow::anyhow!("invalid {flag} '{raw}' (expected HH:MM): {error}"))
}
