use serde::Serialize;
use tempo_core::entities::Timesheet;
use tempo_core::hours::hour_display;
use tempo_db::repos::timesheet::TimesheetFilter;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::resolve;
use crate::context::{AppContext, Zone};
use crate::output::output;

#[derive(Debug, Serialize)]
struct TimesheetLine {
    id: String,
    task_id: String,
    date: String,
    start: String,
    end: Option<String>,
    worked: String,
    running: bool,
}

impl TimesheetLine {
    fn new(timesheet: Timesheet, zone: Zone) -> Self {
        Self {
            date: zone.date(timesheet.start_time),
            start: zone.clock(timesheet.start_time),
            end: timesheet.end_time.map(|end| zone.clock(end)),
            worked: hour_display(timesheet.duration()),
            running: timesheet.is_running(),
            id: timesheet.id,
            task_id: timesheet.task_id,
        }
    }
}

pub async fn run(
    task: Option<&str>,
    running: bool,
    limit: Option<u32>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let task_id = match task {
        Some(id) => Some(resolve::task(ctx, id).await?.id),
        None => None,
    };
    let filter = TimesheetFilter {
        task_id,
        running_only: running,
        limit: Some(effective_limit(
            limit,
            flags.limit,
            ctx.config.general.default_limit,
        )),
    };
    let lines: Vec<TimesheetLine> = ctx
        .service
        .list_timesheets(&filter)
        .await?
        .into_iter()
        .map(|ts| TimesheetLine::new(ts, ctx.zone))
        .collect();
    output(&lines, flags.format)
}
