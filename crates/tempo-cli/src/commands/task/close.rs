use chrono::Utc;
use tempo_core::enums::Status;

use crate::cli::GlobalFlags;
use crate::commands::shared::resolve;
use crate::context::AppContext;
use crate::output::output;

/// Close a task, stopping its running timesheet first.
pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let task = resolve::task(ctx, id).await?;
    if let Some(running) = ctx.service.running_timesheet(&task.id).await? {
        let stopped = ctx.service.stop_timesheet(&task.id, Utc::now()).await?;
        tracing::info!(timesheet = %running.id, end = ?stopped.end_time, "timer stopped on close");
    }
    let task = ctx.service.transition_task(&task.id, Status::Closed).await?;
    output(&task, flags.format)
}
