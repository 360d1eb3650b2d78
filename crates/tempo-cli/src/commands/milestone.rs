use serde::Serialize;
use tempo_core::audit_detail::SyncedDetail;
use tempo_core::enums::EntityType;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::MilestoneCommands;
use crate::commands::shared::resolve;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Debug, Default, Serialize)]
struct MilestoneSyncResponse {
    created: u32,
    renamed: u32,
    unchanged: u32,
}

/// Handle `tempo milestone`.
pub async fn handle(
    action: &MilestoneCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        MilestoneCommands::Create {
            project,
            title,
            original_id,
        } => {
            let project = resolve::project(ctx, project).await?;
            let milestone = ctx
                .service
                .create_milestone(&project.id, *original_id, title)
                .await?;
            output(&milestone, flags.format)
        }
        MilestoneCommands::List { project } => {
            let project = resolve::project(ctx, project).await?;
            let milestones = ctx.service.list_milestones(&project.id).await?;
            output(&milestones, flags.format)
        }
        MilestoneCommands::Sync { project } => {
            let project = resolve::project(ctx, project).await?;
            let gitlab_id = resolve::gitlab_project_id(&project)?;
            let client = ctx.gitlab()?;

            let progress = Progress::spinner("Fetching GitLab milestones");
            let remote = client.list_milestones(gitlab_id).await;
            progress.finish_clear();
            let remote = remote?;

            let mut response = MilestoneSyncResponse::default();
            for milestone in &remote {
                let before = ctx
                    .service
                    .get_milestone_by_original_id(&project.id, milestone.id)
                    .await?;
                let (_, created) = ctx
                    .service
                    .upsert_milestone(&project.id, milestone.id, &milestone.title)
                    .await?;
                if created {
                    response.created += 1;
                } else if before.is_some_and(|b| b.title != milestone.title) {
                    response.renamed += 1;
                } else {
                    response.unchanged += 1;
                }
            }
            ctx.service
                .record_sync(
                    EntityType::Project,
                    &project.id,
                    &SyncedDetail {
                        source: "gitlab_milestones".into(),
                        created: response.created,
                        updated: response.renamed,
                    },
                )
                .await?;
            tracing::info!(
                project = %project.title,
                created = response.created,
                renamed = response.renamed,
                "milestones synced"
            );
            output(&response, flags.format)
        }
    }
}
