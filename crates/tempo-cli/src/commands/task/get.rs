use chrono::Duration;
use tempo_core::hours::hour_display;
use tempo_core::responses::TaskView;

use crate::cli::GlobalFlags;
use crate::commands::shared::resolve;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let task = resolve::task(ctx, id).await?;
    let tags = ctx.service.task_tags(&task.id).await?;
    let timesheets = ctx.service.task_timesheets(&task.id).await?;
    let worked = timesheets
        .iter()
        .map(tempo_core::entities::Timesheet::duration)
        .fold(Duration::zero(), |acc, d| acc + d);
    output(
        &TaskView {
            task,
            tags,
            timesheets,
            worked: hour_display(worked),
        },
        flags.format,
    )
}
