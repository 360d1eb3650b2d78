use anyhow::Context;
use schemars::schema_for;
use serde_json::Value;
use tempo_core::entities::{
    AuditEntry, Customer, Issue, Label, Milestone, Project, Sprint, Tag, Task, Timesheet,
};
use tempo_core::report::DailyHours;
use tempo_core::responses::{
    ChangelogResponse, ExportResponse, HoursReport, IssueView, SyncResponse, TaskView,
    TimerResponse,
};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Names accepted by `tempo schema`.
pub const SCHEMA_NAMES: &[&str] = &[
    "audit_entry",
    "changelog_response",
    "customer",
    "daily_hours",
    "export_response",
    "hours_report",
    "issue",
    "issue_view",
    "label",
    "milestone",
    "project",
    "sprint",
    "sync_response",
    "tag",
    "task",
    "task_view",
    "timer_response",
    "timesheet",
];

/// Handle `tempo schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schema_value(&args.type_name)?.with_context(|| {
        format!(
            "unknown type '{}'; expected one of: {}",
            args.type_name,
            SCHEMA_NAMES.join(", ")
        )
    })?;
    output(&schema, flags.format)
}

fn schema_value(name: &str) -> anyhow::Result<Option<Value>> {
    let schema = match name.replace('-', "_").as_str() {
        "audit_entry" => schema_for!(AuditEntry),
        "changelog_response" => schema_for!(ChangelogResponse),
        "customer" => schema_for!(Customer),
        "daily_hours" => schema_for!(DailyHours),
        "export_response" => schema_for!(ExportResponse),
        "hours_report" => schema_for!(HoursReport),
        "issue" => schema_for!(Issue),
        "issue_view" => schema_for!(IssueView),
        "label" => schema_for!(Label),
        "milestone" => schema_for!(Milestone),
        "project" => schema_for!(Project),
        "sprint" => schema_for!(Sprint),
        "sync_response" => schema_for!(SyncResponse),
        "tag" => schema_for!(Tag),
        "task" => schema_for!(Task),
        "task_view" => schema_for!(TaskView),
        "timer_response" => schema_for!(TimerResponse),
        "timesheet" => schema_for!(Timesheet),
        _ => return Ok(None),
    };
    Ok(Some(serde_json::to_value(schema)?))
}
