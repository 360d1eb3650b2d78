//! Daily hour aggregation.
//!
//! `group_by_date` folds a project's timesheets into one row per calendar
//! day. The same rows feed `tempo report hours` and the `total_hours` sheet
//! of the spreadsheet export.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::hours::{DATE_FORMAT, duration_to_string, hour_display};

/// A timesheet joined with its task, issue and sprint, as read for reporting.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TimesheetRecord {
    pub timesheet_id: String,
    pub task_id: String,
    pub task_title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub issue_number: Option<u64>,
    pub issue_title: Option<String>,
    pub sprint_number: Option<u16>,
}

impl TimesheetRecord {
    /// Worked time. `None` while the timer is still running.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.end_time.map(|end| end - self.start_time)
    }
}

/// Hours worked on one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DailyHours {
    pub day: NaiveDate,
    /// `%d/%m/%y`.
    pub date: String,
    pub month: u32,
    /// `H:MM:SS`.
    pub total_hours: String,
    /// `"1h 30m"` form.
    pub total_hours_display: String,
    pub total_seconds: i64,
    /// Distinct issue numbers worked that day, ascending, joined by `", "`.
    pub issues: String,
    /// Sprint of the day's last timesheet.
    pub sprint: Option<u16>,
}

#[derive(Default)]
struct DayAccumulator {
    total: Duration,
    issues: BTreeSet<u64>,
    sprint: Option<u16>,
}

/// Group finished timesheets by the calendar date of their start time in `tz`.
///
/// Running timesheets (no end time) are skipped. Rows come back ordered by
/// date ascending.
#[must_use]
pub fn group_by_date<Tz: TimeZone>(records: &[TimesheetRecord], tz: &Tz) -> Vec<DailyHours> {
    let mut finished: Vec<&TimesheetRecord> =
        records.iter().filter(|r| r.end_time.is_some()).collect();
    finished.sort_by_key(|r| r.start_time);

    let mut days: BTreeMap<NaiveDate, DayAccumulator> = BTreeMap::new();
    for record in finished {
        let Some(duration) = record.duration() else {
            continue;
        };
        let day = record.start_time.with_timezone(tz).date_naive();
        let acc = days.entry(day).or_default();
        acc.total += duration;
        if let Some(number) = record.issue_number {
            acc.issues.insert(number);
        }
        acc.sprint = record.sprint_number;
    }

    days.into_iter()
        .map(|(day, acc)| DailyHours {
            day,
            date: day.format(DATE_FORMAT).to_string(),
            month: day.month(),
            total_hours: duration_to_string(acc.total),
            total_hours_display: hour_display(acc.total),
            total_seconds: acc.total.num_seconds(),
            issues: acc
                .issues
                .iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            sprint: acc.sprint,
        })
        .collect()
}

/// Sum of all finished timesheets.
#[must_use]
pub fn total_duration(records: &[TimesheetRecord]) -> Duration {
    records
        .iter()
        .filter_map(TimesheetRecord::duration)
        .fold(Duration::zero(), |acc, d| acc + d)
}
