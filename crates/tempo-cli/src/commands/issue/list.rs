use tempo_core::enums::Status;
use tempo_db::repos::issue::IssueFilter;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_enum;
use crate::commands::shared::resolve;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    project: Option<&str>,
    sprint: Option<&str>,
    status: Option<&str>,
    limit: Option<u32>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let project_id = match project {
        Some(key) => Some(resolve::project(ctx, key).await?.id),
        None => None,
    };
    let filter = IssueFilter {
        project_id,
        sprint_id: sprint.map(str::to_string),
        status: status
            .map(|value| parse_enum::<Status>(value, "status"))
            .transpose()?,
        limit: Some(effective_limit(
            limit,
            flags.limit,
            ctx.config.general.default_limit,
        )),
    };
    let issues = ctx.service.list_issues(&filter).await?;
    output(&issues, flags.format)
}
