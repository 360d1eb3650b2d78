use tempo_core::enums::Status;

use crate::cli::GlobalFlags;
use crate::commands::shared::resolve;
use crate::context::AppContext;
use crate::output::output;

/// Close or reopen an issue. Only the local copy changes.
pub async fn run(
    id: &str,
    project: Option<&str>,
    status: Status,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let issue = resolve::issue(ctx, id, project).await?;
    let issue = ctx.service.transition_issue(&issue.id, status).await?;
    output(&issue, flags.format)
}
