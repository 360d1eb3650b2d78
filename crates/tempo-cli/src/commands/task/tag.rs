use serde_json::json;

use crate::cli::GlobalFlags;
use crate::commands::shared::resolve;
use crate::context::AppContext;
use crate::output::output;

pub async fn run_tag(
    id: &str,
    tag: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let task = resolve::task(ctx, id).await?;
    ctx.service.tag_task(&task.id, tag).await?;
    let tags = ctx.service.task_tags(&task.id).await?;
    output(&json!({ "task": task.id, "tags": tags }), flags.format)
}

pub async fn run_untag(
    id: &str,
    tag: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let task = resolve::task(ctx, id).await?;
    let removed = ctx.service.untag_task(&task.id, tag).await?;
    if !removed {
        tracing::warn!(task = %task.id, tag, "tag was not on task");
    }
    output(
        &json!({ "task": task.id, "tag": tag, "untagged": removed }),
        flags.format,
    )
}
