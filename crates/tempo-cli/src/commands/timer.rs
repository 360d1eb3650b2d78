#[path = "timer/list.rs"]
mod list;
#[path = "timer/start.rs"]
mod start;
#[path = "timer/stop.rs"]
mod stop;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TimerCommands;
use crate::context::AppContext;

/// Handle `tempo timer`.
pub async fn handle(
    action: &TimerCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        TimerCommands::Start { task, resume } => start::run(task, *resume, ctx, flags).await,
        TimerCommands::Stop { task } => stop::run(task, ctx, flags).await,
        TimerCommands::List {
            task,
            running,
            limit,
        } => list::run(task.as_deref(), *running, *limit, ctx, flags).await,
    }
}
