use anyhow::Context;
use tempo_core::responses::ChangelogResponse;
use tempo_export::changelog::{append_changelog_entry, ensure_date_section};

use crate::cli::GlobalFlags;
use crate::commands::shared::resolve;
use crate::context::AppContext;
use crate::output::output;

/// Add the issue to today's section of its milestone changelog.
pub async fn run(
    id: &str,
    project: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let issue = resolve::issue(ctx, id, project).await?;
    let milestone_id = issue
        .milestone_id
        .as_deref()
        .with_context(|| format!("issue #{} has no milestone", issue.number))?;
    let milestone = ctx.service.get_milestone(milestone_id).await?;
    let project = ctx.service.issue_project(&issue.id).await?;

    let path = ctx.project_paths(&project).await?.changelog(&milestone.title);
    let date_added = ensure_date_section(&path, &milestone.title, ctx.zone.today())
        .with_context(|| format!("failed to update {}", path.display()))?;
    let entry_written = append_changelog_entry(&path, &issue)
        .with_context(|| format!("failed to update {}", path.display()))?;
    if !entry_written {
        tracing::info!(number = issue.number, "issue already in changelog");
    }

    output(
        &ChangelogResponse {
            path: path.display().to_string(),
            date_added,
            entry_written,
        },
        flags.format,
    )
}
