//! CLI response types returned as JSON by `tempo` commands.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Issue, Task, Timesheet};
use crate::report::DailyHours;

/// Response from `tempo issue get` and `tempo issue create`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct IssueView {
    pub issue: Issue,
    pub labels: Vec<String>,
    pub project: String,
    /// Task created alongside the issue, if any.
    pub task: Option<Task>,
}

/// Response from `tempo task get`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskView {
    pub task: Task,
    pub tags: Vec<String>,
    pub timesheets: Vec<Timesheet>,
    /// Sum of finished timesheets, `"1h 30m"` form.
    pub worked: String,
}

/// Response from `tempo timer start` / `tempo timer stop`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TimerResponse {
    pub timesheet: Timesheet,
    /// Local clock of the start (`%H:%M`).
    pub start: String,
    /// Local clock of the stop (`%H:%M`), when stopped.
    pub end: Option<String>,
    /// Worked time for a stopped timer.
    pub worked: Option<String>,
}

/// Response from `tempo issue sync`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SyncResponse {
    pub created: u32,
    pub updated: u32,
    pub unchanged: u32,
}

/// Response from `tempo report hours`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HoursReport {
    pub project: String,
    pub days: Vec<DailyHours>,
    pub total_hours: String,
    pub total_hours_display: String,
}

/// Response from `tempo export timesheet`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ExportResponse {
    pub files: Vec<String>,
    pub timesheet_rows: u32,
    pub day_rows: u32,
}

/// Response from `tempo issue changelog`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChangelogResponse {
    pub path: String,
    pub date_added: bool,
    pub entry_written: bool,
}
