use anyhow::Context;
use tempo_core::entities::{Label, labels_display};
use tempo_core::responses::IssueView;
use tempo_db::error::DatabaseError;
use tempo_db::repos::issue::NewIssue;
use tempo_export::notes::{append_task_note, is_bug};
use tempo_gitlab::NewGitlabIssue;

use crate::cli::GlobalFlags;
use crate::commands::shared::resolve;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

pub struct Params {
    pub project: String,
    pub title: String,
    pub body: Option<String>,
    pub labels: Vec<String>,
    pub milestone: String,
    pub task: bool,
}

/// Create the issue on GitLab, store it in the project's last sprint and
/// append its task note.
pub async fn run(params: Params, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let project = resolve::project(ctx, &params.project).await?;
    let gitlab_id = resolve::gitlab_project_id(&project)?;

    let milestone = ctx
        .service
        .get_milestone_by_title(&project.id, &params.milestone)
        .await?
        .with_context(|| {
            format!(
                "milestone '{}' not found in project '{}' (try: tempo milestone sync --project {})",
                params.milestone, project.title, project.title
            )
        })?;
    let sprint = match ctx.service.last_sprint(&project.id).await {
        Ok(sprint) => sprint,
        Err(DatabaseError::NoResult) => anyhow::bail!(
            "project '{}' has no sprint (create one with: tempo sprint create --project {})",
            project.title,
            project.title
        ),
        Err(error) => return Err(error.into()),
    };

    let known = ctx.service.find_labels(&params.labels).await?;
    let (remote_labels, local_labels) = split_labels(&params.labels, &known);
    for unknown in remote_labels.iter().filter(|l| !local_labels.contains(*l)) {
        tracing::warn!(label = %unknown, "label sent to GitLab but not linked locally (try: tempo label sync)");
    }

    let client = ctx.gitlab()?;
    let new = NewGitlabIssue {
        title: params.title.clone(),
        description: params.body.clone(),
        assignee_id: ctx.config.gitlab.assignee_id,
        labels: remote_labels,
        milestone_id: Some(milestone.original_id),
    };
    let progress = Progress::spinner("Creating GitLab issue");
    let remote = client.create_issue(gitlab_id, &new).await;
    progress.finish_clear();
    let remote = remote.context("GitLab rejected the issue")?;

    let issue = ctx
        .service
        .create_issue(&NewIssue {
            number: remote.iid,
            title: remote.title.clone(),
            description: remote.description.clone().filter(|d| !d.is_empty()),
            milestone_id: Some(milestone.id.clone()),
            sprint_id: sprint.id.clone(),
            url: Some(remote.web_url.clone()),
            status: remote.state.to_status(),
            labels: local_labels,
        })
        .await
        .with_context(|| format!("issue #{} exists on GitLab but was not saved", remote.iid))?;
    let labels = ctx.service.issue_labels(&issue.id).await?;

    let paths = ctx.project_paths(&project).await?;
    let notes = paths.task_notes();
    append_task_note(
        &notes,
        &issue,
        &remote.labels,
        is_bug(&remote.labels),
        ctx.zone.today(),
    )
        .with_context(|| format!("failed to append task note to {}", notes.display()))?;

    let task = if params.task {
        Some(ctx.service.create_task_for_issue(&issue.id).await?)
    } else {
        None
    };

    tracing::info!(
        number = issue.number,
        labels = %labels_display(&labels),
        sprint = ?sprint.number,
        "issue created"
    );
    output(
        &IssueView {
            labels: labels.into_iter().map(|l| l.label).collect(),
            project: project.title,
            task,
            issue,
        },
        flags.format,
    )
}

/// Every requested label goes to GitLab; only the ones known locally are
/// linked to the stored issue.
fn split_labels(requested: &[String], known: &[Label]) -> (Vec<String>, Vec<String>) {
    let local = requested
        .iter()
        .filter(|name| known.iter().any(|l| &l.label == *name))
        .cloned()
        .collect();
    (requested.to_vec(), local)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn label(name: &str) -> Label {
        Label {
            id: format!("lbl-{name}"),
            label: name.into(),
            color: "#FFFFFF".into(),
        }
    }

    #[test]
    fn unknown_labels_still_reach_gitlab() {
        let requested = vec!["bug".to_string(), "backend".to_string()];
        let (remote, local) = split_labels(&requested, &[label("backend")]);
        assert_eq!(remote, vec!["bug", "backend"]);
        assert_eq!(local, vec!["backend"]);
        assert!(is_bug(&remote));
    }

    #[test]
    fn no_local_labels_links_nothing() {
        let requested = vec!["bug".to_string()];
        let (remote, local) = split_labels(&requested, &[]);
        assert_eq!(remote, vec!["bug"]);
        assert!(local.is_empty());
    }
}
