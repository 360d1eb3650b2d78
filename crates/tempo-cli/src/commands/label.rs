use serde::Serialize;
use tempo_core::entities::is_valid_color;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::LabelCommands;
use crate::commands::shared::resolve;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Debug, Default, Serialize)]
struct LabelSyncResponse {
    created: Vec<String>,
    existing: u32,
}

/// Handle `tempo label`.
pub async fn handle(
    action: &LabelCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        LabelCommands::Create { label, color } => {
            let created = ctx.service.create_label(label, color.as_deref()).await?;
            output(&created, flags.format)
        }
        LabelCommands::List => {
            let labels = ctx.service.list_labels().await?;
            output(&labels, flags.format)
        }
        LabelCommands::Sync { project } => {
            let project = resolve::project(ctx, project).await?;
            let gitlab_id = resolve::gitlab_project_id(&project)?;
            let client = ctx.gitlab()?;

            let progress = Progress::spinner("Fetching GitLab labels");
            let remote = client.list_labels(gitlab_id).await;
            progress.finish_clear();

            let mut response = LabelSyncResponse::default();
            for label in remote? {
                // GitLab also allows named colors, which are stored as the default.
                let color = Some(label.color.as_str()).filter(|c| is_valid_color(c));
                let (stored, created) = ctx.service.ensure_label(&label.name, color).await?;
                if created {
                    response.created.push(stored.label);
                } else {
                    response.existing += 1;
                }
            }
            output(&response, flags.format)
        }
    }
}
