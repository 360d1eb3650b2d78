use serde::Serialize;
use serde_json::json;
use tempo_core::entities::{Project, Sprint};
use tempo_db::updates::project::ProjectUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProjectCommands;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::resolve;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct ProjectDetailResponse {
    project: Project,
    customer: String,
    sprints: Vec<Sprint>,
    tasks: usize,
}

/// Handle `tempo project`.
pub async fn handle(
    action: &ProjectCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ProjectCommands::Create {
            title,
            customer,
            gitlab,
        } => {
            let customer = resolve::customer(ctx, customer).await?;
            let gitlab_id = match gitlab {
                Some(key) => Some(gitlab_project_id(ctx, key).await?),
                None => None,
            };
            let project = ctx
                .service
                .create_project(&customer.id, title, gitlab_id)
                .await?;
            output(&project, flags.format)
        }
        ProjectCommands::List { all, limit } => {
            let limit = effective_limit(*limit, flags.limit, ctx.config.general.default_limit);
            let projects = ctx.service.list_projects(!*all, limit).await?;
            output(&projects, flags.format)
        }
        ProjectCommands::Get { project } => {
            let project = resolve::project(ctx, project).await?;
            let customer = ctx.service.get_customer(&project.customer_id).await?;
            let sprints = ctx.service.list_sprints(&project.id).await?;
            let tasks = ctx.service.project_tasks(&project.id).await?.len();
            output(
                &ProjectDetailResponse {
                    project,
                    customer: customer.name,
                    sprints,
                    tasks,
                },
                flags.format,
            )
        }
        ProjectCommands::Update {
            project,
            title,
            customer,
            gitlab,
            active,
        } => {
            if title.is_none() && customer.is_none() && gitlab.is_none() && active.is_none() {
                anyhow::bail!(
                    "At least one of --title, --customer, --gitlab, or --active must be provided"
                );
            }
            let project = resolve::project(ctx, project).await?;
            let mut builder = ProjectUpdateBuilder::new();
            if let Some(title) = title {
                builder = builder.title(title);
            }
            if let Some(customer) = customer {
                builder = builder.customer_id(resolve::customer(ctx, customer).await?.id);
            }
            if let Some(key) = gitlab {
                builder = builder.gitlab_project_id(Some(gitlab_project_id(ctx, key).await?));
            }
            if let Some(active) = active {
                builder = builder.active(*active);
            }
            let updated = ctx
                .service
                .update_project(&project.id, builder.build())
                .await?;
            output(&updated, flags.format)
        }
        ProjectCommands::Delete { project } => {
            let project = resolve::project(ctx, project).await?;
            ctx.service.delete_project(&project.id).await?;
            output(
                &json!({ "project": project.id, "title": project.title, "deleted": true }),
                flags.format,
            )
        }
    }
}

/// A numeric ID is used as given; a path is looked up on GitLab.
async fn gitlab_project_id(ctx: &AppContext, key: &str) -> anyhow::Result<u64> {
    if let Ok(id) = key.parse::<u64>() {
        return Ok(id);
    }
    let client = ctx.gitlab()?;
    let progress = Progress::spinner(&format!("Resolving GitLab project {key}"));
    match client.get_project(key).await {
        Ok(found) => {
            progress.finish_clear();
            tracing::info!(id = found.id, path = %found.path_with_namespace, "gitlab project resolved");
            Ok(found.id)
        }
        Err(error) => {
            progress.finish_err("GitLab lookup failed");
            Err(anyhow::Error::new(error).context(format!("GitLab project '{key}'")))
        }
    }
}
