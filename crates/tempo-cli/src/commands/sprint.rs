use tempo_db::error::DatabaseError;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SprintCommands;
use crate::commands::shared::resolve;
use crate::context::AppContext;
use crate::output::output;

/// Handle `tempo sprint`.
pub async fn handle(
    action: &SprintCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SprintCommands::Create { project, number } => {
            let project = resolve::project(ctx, project).await?;
            let number = match number {
                Some(number) => Some(*number),
                None => next_number(ctx, &project.id).await?,
            };
            let sprint = ctx.service.create_sprint(&project.id, number).await?;
            output(&sprint, flags.format)
        }
        SprintCommands::List { project } => {
            let project = resolve::project(ctx, project).await?;
            let sprints = ctx.service.list_sprints(&project.id).await?;
            output(&sprints, flags.format)
        }
    }
}

/// One past the last sprint's number; 1 for a project without sprints.
async fn next_number(ctx: &AppContext, project_id: &str) -> anyhow::Result<Option<u16>> {
    match ctx.service.last_sprint(project_id).await {
        Ok(last) => Ok(last.number.map(|n| n.saturating_add(1))),
        Err(DatabaseError::NoResult) => Ok(Some(1)),
        Err(error) => Err(error.into()),
    }
}
