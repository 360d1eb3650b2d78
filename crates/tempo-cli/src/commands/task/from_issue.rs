use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::commands::shared::resolve;
use crate::context::AppContext;
use crate::output::output;

/// Create the task that tracks an issue, titled like the issue.
pub async fn run(
    issue: &str,
    project: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let issue = resolve::issue(ctx, issue, project).await?;
    if let Some(existing) = ctx.service.task_for_issue(&issue.id).await? {
        anyhow::bail!("issue #{} already has task {}", issue.number, existing.id);
    }
    let task = ctx
        .service
        .create_task_for_issue(&issue.id)
        .await
        .with_context(|| format!("failed to create task for issue #{}", issue.number))?;
    output(&task, flags.format)
}
