//! Hour and date display helpers used by reports, exports and CLI output.

use chrono::Duration;

/// Date format used in reports and spreadsheets (`31/12/26`).
pub const DATE_FORMAT: &str = "%d/%m/%y";

/// Clock format used for timesheet start/end columns (`09:30`).
pub const CLOCK_FORMAT: &str = "%H:%M";

/// Date format used for changelog sections (`2026-12-31`).
pub const CHANGELOG_DATE_FORMAT: &str = "%Y-%m-%d";

/// Whole hours and remaining whole minutes of a duration. Negative durations
/// count as zero; seconds are truncated.
fn hours_minutes(duration: Duration) -> (i64, i64) {
    let secs = duration.num_seconds().max(0);
    (secs / 3600, (secs % 3600) / 60)
}

/// Render a duration as `"1h 30m"`, `"2h"` or `"45m"`.
///
/// Returns `"0"` when the duration is shorter than one minute.
#[must_use]
pub fn hour_display(duration: Duration) -> String {
    let (hours, minutes) = hours_minutes(duration);
    let mut parts = Vec::with_capacity(2);
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if minutes > 0 {
        parts.push(format!("{minutes}m"));
    }
    if parts.is_empty() {
        return String::from("0");
    }
    parts.join(" ")
}

/// Render a duration as `H:MM:SS`. Hours are not wrapped at 24.
#[must_use]
pub fn duration_to_string(duration: Duration) -> String {
    let secs = duration.num_seconds().max(0);
    format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Duration::minutes(90), "1h 30m")]
    #[case(Duration::hours(2), "2h")]
    #[case(Duration::minutes(45), "45m")]
    #[case(Duration::seconds(30), "0")]
    #[case(Duration::zero(), "0")]
    #[case(Duration::hours(26) + Duration::minutes(5), "26h 5m")]
    #[case(Duration::minutes(-10), "0")]
    fn hour_display_cases(#[case] duration: Duration, #[case] expected: &str) {
        assert_eq!(hour_display(duration), expected);
    }

    #[rstest]
    #[case(Duration::minutes(90), "1:30:00")]
    #[case(Duration::seconds(3725), "1:02:05")]
    #[case(Duration::hours(26), "26:00:00")]
    #[case(Duration::zero(), "0:00:00")]
    fn duration_to_string_cases(#[case] duration: Duration, #[case] expected: &str) {
        assert_eq!(duration_to_string(duration), expected);
    }
}
