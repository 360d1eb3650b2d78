#[path = "issue/changelog.rs"]
mod changelog;
#[path = "issue/create.rs"]
mod create;
#[path = "issue/get.rs"]
mod get;
#[path = "issue/list.rs"]
mod list;
#[path = "issue/status.rs"]
mod status;
#[path = "issue/sync.rs"]
mod sync;
#[path = "issue/update.rs"]
mod update;

use tempo_core::enums::Status;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::IssueCommands;
use crate::context::AppContext;

/// Handle `tempo issue`.
pub async fn handle(
    action: &IssueCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        IssueCommands::Create {
            project,
            title,
            body,
            labels,
            milestone,
            task,
        } => {
            create::run(
                create::Params {
                    project: project.clone(),
                    title: title.clone(),
                    body: body.clone(),
                    labels: labels.clone(),
                    milestone: milestone.clone(),
                    task: *task,
                },
                ctx,
                flags,
            )
            .await
        }
        IssueCommands::Sync { project, state } => sync::run(project, state, ctx, flags).await,
        IssueCommands::List {
            project,
            sprint,
            status,
            limit,
        } => {
            list::run(
                project.as_deref(),
                sprint.as_deref(),
                status.as_deref(),
                *limit,
                ctx,
                flags,
            )
            .await
        }
        IssueCommands::Get { id, project } => get::run(id, project.as_deref(), ctx, flags).await,
        IssueCommands::Update {
            id,
            project,
            title,
            body,
            milestone,
            labels,
        } => {
            update::run(
                update::Params {
                    id: id.clone(),
                    project: project.clone(),
                    title: title.clone(),
                    body: body.clone(),
                    milestone: milestone.clone(),
                    labels: labels.clone(),
                },
                ctx,
                flags,
            )
            .await
        }
        IssueCommands::Close { id, project } => {
            status::run(id, project.as_deref(), Status::Closed, ctx, flags).await
        }
        IssueCommands::Reopen { id, project } => {
            status::run(id, project.as_deref(), Status::Open, ctx, flags).await
        }
        IssueCommands::Changelog { id, project } => {
            changelog::run(id, project.as_deref(), ctx, flags).await
        }
    }
}
