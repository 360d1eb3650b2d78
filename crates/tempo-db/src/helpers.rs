//! Row-to-entity parsing helpers.
//!
//! Every repo converts `libsql::Row` (column-indexed) into typed entity
//! structs. These helpers isolate the parsing logic and handle the dual
//! datetime format (`SQLite`'s `datetime('now')` vs Rust's `to_rfc3339()`).

use chrono::{DateTime, NaiveTime, Utc};

use tempo_core::entities::Estimate;

use crate::error::DatabaseError;

/// Column format for task start/end clock times.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse an optional TEXT column as `Option<DateTime<Utc>>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string cannot be parsed.
pub fn parse_optional_datetime(s: Option<&str>) -> Result<Option<DateTime<Utc>>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_datetime(s)?)),
        _ => Ok(None),
    }
}

/// Parse an optional `HH:MM:SS` column.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string is not a clock time.
pub fn parse_optional_time(s: Option<&str>) -> Result<Option<NaiveTime>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => NaiveTime::parse_from_str(s, TIME_FORMAT)
            .map(Some)
            .map_err(|e| DatabaseError::Query(format!("Failed to parse time '{s}': {e}"))),
        _ => Ok(None),
    }
}

/// Render a clock time for storage.
#[must_use]
pub fn format_optional_time(time: Option<NaiveTime>) -> Option<String> {
    time.map(|t| t.format(TIME_FORMAT).to_string())
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with all tempo-core enums that use `#[serde(rename_all = "snake_case")]`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any enum variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read a non-negative INTEGER column as `u64`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` for negative values.
pub fn get_u64(row: &libsql::Row, idx: i32) -> Result<u64, DatabaseError> {
    let raw = row.get::<i64>(idx)?;
    u64::try_from(raw)
        .map_err(|_| DatabaseError::Query(format!("column {idx}: expected unsigned, got {raw}")))
}

/// Read a nullable non-negative INTEGER column as `Option<u64>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` for negative values.
pub fn get_opt_u64(row: &libsql::Row, idx: i32) -> Result<Option<u64>, DatabaseError> {
    row.get::<Option<i64>>(idx)?
        .map(|raw| {
            u64::try_from(raw).map_err(|_| {
                DatabaseError::Query(format!("column {idx}: expected unsigned, got {raw}"))
            })
        })
        .transpose()
}

/// Read a nullable sprint number column.
///
/// # Errors
///
/// Returns `DatabaseError::Query` when the value does not fit `u16`.
pub fn get_opt_u16(row: &libsql::Row, idx: i32) -> Result<Option<u16>, DatabaseError> {
    row.get::<Option<i64>>(idx)?
        .map(|raw| {
            u16::try_from(raw)
                .map_err(|_| DatabaseError::Query(format!("column {idx}: {raw} out of range")))
        })
        .transpose()
}

/// Read a nullable estimate column stored as hundredths of an hour.
///
/// # Errors
///
/// Returns `DatabaseError::Query` for out-of-range values.
pub fn get_opt_estimate(row: &libsql::Row, idx: i32) -> Result<Option<Estimate>, DatabaseError> {
    row.get::<Option<i64>>(idx)?
        .map(|raw| {
            u32::try_from(raw)
                .ok()
                .and_then(|h| Estimate::from_hundredths(h).ok())
                .ok_or_else(|| DatabaseError::Query(format!("column {idx}: bad estimate {raw}")))
        })
        .transpose()
}

/// Convert an unsigned ID or number for binding as an SQL INTEGER.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` above `i64::MAX`.
pub fn sql_int(value: u64) -> Result<i64, DatabaseError> {
    i64::try_from(value)
        .map_err(|_| DatabaseError::InvalidState(format!("{value} does not fit an SQL integer")))
}

/// Extract an optional JSON value from a TEXT column.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string contains invalid JSON.
pub fn parse_optional_json(s: Option<&str>) -> Result<Option<serde_json::Value>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => {
            let val = serde_json::from_str(s)
                .map_err(|e| DatabaseError::Query(format!("Invalid JSON in column: {e}")))?;
            Ok(Some(val))
        }
        _ => Ok(None),
    }
}

/// Serialize an audit detail payload.
///
/// # Errors
///
/// Returns `DatabaseError::Other` if serialization fails.
pub fn to_detail<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, DatabaseError> {
    serde_json::to_value(value).map_err(|e| DatabaseError::Other(e.into()))
}
