//! Sheet rows shared by the xlsx and csv writers.

use std::fmt::Display;

use chrono::TimeZone;
use tempo_core::hours::{CLOCK_FORMAT, DATE_FORMAT, duration_to_string, hour_display};
use tempo_core::report::TimesheetRecord;

pub const TIMESHEET_HEADERS: [&str; 7] = [
    "data",
    "hora_inicial",
    "hora_final",
    "tempo",
    "tempo_display",
    "issue",
    "titulo",
];

pub const TOTAL_HOURS_HEADERS: [&str; 6] = [
    "data",
    "mês",
    "tempo",
    "tempo_display",
    "issues",
    "sprint",
];

/// One line of the `timesheet` sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimesheetRow {
    pub date: String,
    pub start: String,
    pub end: String,
    pub tempo: String,
    pub tempo_display: String,
    pub issue: Option<u64>,
    /// Issue title, or the task title when the task has no issue.
    pub title: String,
}

impl TimesheetRow {
    /// Cell values as text, in header order.
    #[must_use]
    pub fn cells(&self) -> [String; 7] {
        [
            self.date.clone(),
            self.start.clone(),
            self.end.clone(),
            self.tempo.clone(),
            self.tempo_display.clone(),
            self.issue.map(|n| n.to_string()).unwrap_or_default(),
            self.title.clone(),
        ]
    }
}

/// Build sheet rows from finished timesheets, keeping the input order.
///
/// Dates and clocks are rendered in `tz`. Running timesheets are skipped.
#[must_use]
pub fn timesheet_rows<Tz>(records: &[TimesheetRecord], tz: &Tz) -> Vec<TimesheetRow>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    records
        .iter()
        .filter_map(|record| {
            let end = record.end_time?;
            let duration = end - record.start_time;
            let start = record.start_time.with_timezone(tz);
            Some(TimesheetRow {
                date: start.format(DATE_FORMAT).to_string(),
                start: start.format(CLOCK_FORMAT).to_string(),
                end: end.with_timezone(tz).format(CLOCK_FORMAT).to_string(),
                tempo: duration_to_string(duration),
                tempo_display: hour_display(duration),
                issue: record.issue_number,
                title: record
                    .issue_title
                    .clone()
                    .unwrap_or_else(|| record.task_title.clone()),
            })
        })
        .collect()
}
