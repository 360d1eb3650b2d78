use tempo_core::responses::IssueView;

use crate::cli::GlobalFlags;
use crate::commands::shared::resolve;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    id: &str,
    project: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let issue = resolve::issue(ctx, id, project).await?;
    output(&issue_view(ctx, issue).await?, flags.format)
}

/// The issue with its label names, project title and task.
pub async fn issue_view(
    ctx: &AppContext,
    issue: tempo_core::entities::Issue,
) -> anyhow::Result<IssueView> {
    let labels = ctx.service.issue_labels(&issue.id).await?;
    let project = ctx.service.issue_project(&issue.id).await?;
    let task = ctx.service.task_for_issue(&issue.id).await?;
    Ok(IssueView {
        labels: labels.into_iter().map(|l| l.label).collect(),
        project: project.title,
        task,
        issue,
    })
}
