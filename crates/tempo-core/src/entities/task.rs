use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Status;
use crate::errors::CoreError;

/// An internal work item, optionally linked one-to-one to an issue.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub project_id: String,
    pub issue_id: Option<String>,
    pub status: Status,
    pub annotation: Option<String>,
    pub report: Option<String>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    /// Estimated hours, two decimal places.
    #[schemars(with = "Option<String>")]
    pub estimate: Option<Estimate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Largest estimate that fits `DECIMAL(7, 2)`, in hundredths of an hour.
const MAX_ESTIMATE_HUNDREDTHS: u32 = 9_999_999;

/// An hour estimate with two decimal places, stored as hundredths of an hour.
///
/// Serialized as a decimal string (`"1.50"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Estimate(u32);

impl Estimate {
    /// Build from hundredths of an hour.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when the value exceeds `99999.99`.
    pub fn from_hundredths(hundredths: u32) -> Result<Self, CoreError> {
        if hundredths > MAX_ESTIMATE_HUNDREDTHS {
            return Err(CoreError::Validation(format!(
                "estimate of {hundredths} hundredths exceeds 99999.99 hours"
            )));
        }
        Ok(Self(hundredths))
    }

    #[must_use]
    pub const fn hundredths(self) -> u32 {
        self.0
    }
}

impl FromStr for Estimate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::Validation(format!("invalid estimate '{s}'"));
        let s = s.trim();
        let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let whole: u32 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let frac: u32 = match frac.len() {
            0 => 0,
            1 => frac.parse::<u32>().map_err(|_| invalid())? * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };
        let total = whole
            .checked_mul(100)
            .and_then(|w| w.checked_add(frac))
            .ok_or_else(invalid)?;
        Self::from_hundredths(total).map_err(|_| invalid())
    }
}

impl TryFrom<String> for Estimate {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Estimate> for String {
    fn from(value: Estimate) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::Estimate;

    #[rstest]
    #[case("1.5", 150)]
    #[case("2", 200)]
    #[case("0.25", 25)]
    #[case(".75", 75)]
    #[case("99999.99", 9_999_999)]
    fn parses_decimal_hours(#[case] raw: &str, #[case] hundredths: u32) {
        let estimate: Estimate = raw.parse().unwrap();
        assert_eq!(estimate.hundredths(), hundredths);
    }

    #[rstest]
    #[case("")]
    #[case("1.234")]
    #[case("abc")]
    #[case("-1")]
    #[case("100000")]
    fn rejects_invalid_estimates(#[case] raw: &str) {
        assert!(raw.parse::<Estimate>().is_err());
    }

    #[test]
    fn displays_two_decimals() {
        assert_eq!(Estimate::from_hundredths(150).unwrap().to_string(), "1.50");
        assert_eq!(Estimate::from_hundredths(5).unwrap().to_string(), "0.05");
    }

    #[test]
    fn serializes_as_string() {
        let estimate: Estimate = "3.5".parse().unwrap();
        assert_eq!(serde_json::to_string(&estimate).unwrap(), "\"3.50\"");
        let back: Estimate = serde_json::from_str("\"3.50\"").unwrap();
        assert_eq!(back, estimate);
    }
}
