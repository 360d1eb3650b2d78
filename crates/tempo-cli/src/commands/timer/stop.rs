use chrono::Utc;
use tempo_core::hours::hour_display;
use tempo_core::responses::TimerResponse;

use crate::cli::GlobalFlags;
use crate::commands::shared::resolve;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(task: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let task = resolve::task(ctx, task).await?;
    let timesheet = ctx.service.stop_timesheet(&task.id, Utc::now()).await?;
    tracing::info!(task = %task.id, worked = %hour_display(timesheet.duration()), "timer stopped");
    output(
        &TimerResponse {
            start: ctx.zone.clock(timesheet.start_time),
            end: timesheet.end_time.map(|end| ctx.zone.clock(end)),
            worked: Some(hour_display(timesheet.duration())),
            timesheet,
        },
        flags.format,
    )
}
