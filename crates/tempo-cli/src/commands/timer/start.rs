use chrono::{DateTime, Utc};
use tempo_core::entities::Timesheet;
use tempo_core::enums::Status;
use tempo_core::responses::TimerResponse;

use crate::cli::GlobalFlags;
use crate::commands::shared::resolve;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    task: &str,
    resume: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let task = resolve::task(ctx, task).await?;
    if task.status != Status::Open {
        tracing::warn!(task = %task.id, status = %task.status, "starting a timer on a task that is not open");
    }

    let now = Utc::now();
    let start = if resume {
        let latest = ctx.service.latest_timesheet(Some(&task.project_id)).await?;
        let (start, found) = continue_from(latest.as_ref(), now);
        if !found {
            tracing::warn!(project = %task.project_id, "no finished timesheet to continue from, starting now");
        }
        start
    } else {
        now
    };

    let timesheet = ctx.service.start_timesheet(&task.id, start).await?;
    output(
        &TimerResponse {
            start: ctx.zone.clock(timesheet.start_time),
            end: None,
            worked: None,
            timesheet,
        },
        flags.format,
    )
}

/// The end of the latest finished timesheet, or `now` when there is none.
/// The flag reports whether a previous timesheet was found.
fn continue_from(latest: Option<&Timesheet>, now: DateTime<Utc>) -> (DateTime<Utc>, bool) {
    match latest.and_then(|ts| ts.end_time) {
        Some(end) if end <= now => (end, true),
        Some(_) | None => (now, latest.is_some()),
    }
}
