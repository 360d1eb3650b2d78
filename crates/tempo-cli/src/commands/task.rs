#[path = "task/close.rs"]
mod close;
#[path = "task/create.rs"]
mod create;
#[path = "task/from_issue.rs"]
mod from_issue;
#[path = "task/get.rs"]
mod get;
#[path = "task/list.rs"]
mod list;
#[path = "task/tag.rs"]
mod tag;
#[path = "task/update.rs"]
mod update;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaskCommands;
use crate::context::AppContext;

/// Handle `tempo task`.
pub async fn handle(
    action: &TaskCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        TaskCommands::Create {
            project,
            title,
            annotation,
            estimate,
            start,
            end,
        } => {
            create::run(
                create::Params {
                    project: project.clone(),
                    title: title.clone(),
                    annotation: annotation.clone(),
                    estimate: estimate.clone(),
                    start: start.clone(),
                    end: end.clone(),
                },
                ctx,
                flags,
            )
            .await
        }
        TaskCommands::FromIssue { issue, project } => {
            from_issue::run(issue, project.as_deref(), ctx, flags).await
        }
        TaskCommands::List {
            project,
            status,
            limit,
        } => list::run(project.as_deref(), status.as_deref(), *limit, ctx, flags).await,
        TaskCommands::Get { id } => get::run(id, ctx, flags).await,
        TaskCommands::Update {
            id,
            title,
            annotation,
            report,
            estimate,
            start,
            end,
        } => {
            update::run(
                update::Params {
                    id: id.clone(),
                    title: title.clone(),
                    annotation: annotation.clone(),
                    report: report.clone(),
                    estimate: estimate.clone(),
                    start: start.clone(),
                    end: end.clone(),
                },
                ctx,
                flags,
            )
            .await
        }
        TaskCommands::Close { id } => close::run(id, ctx, flags).await,
        TaskCommands::Tag { id, tag } => tag::run_tag(id, tag, ctx, flags).await,
        TaskCommands::Untag { id, tag } => tag::run_untag(id, tag, ctx, flags).await,
    }
}
