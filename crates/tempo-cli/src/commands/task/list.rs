use tempo_core::enums::Status;
use tempo_db::repos::task::TaskFilter;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_enum;
use crate::commands::shared::resolve;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    project: Option<&str>,
    status: Option<&str>,
    limit: Option<u32>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let project_id = match project {
        Some(key) => Some(resolve::project(ctx, key).await?.id),
        None => None,
    };
    let filter = TaskFilter {
        project_id,
        status: status
            .map(|value| parse_enum::<Status>(value, "status"))
            .transpose()?,
        limit: Some(effective_limit(
            limit,
            flags.limit,
            ctx.config.general.default_limit,
        )),
    };
    let tasks = ctx.service.list_tasks(&filter).await?;
    output(&tasks, flags.format)
}
