//! Turn command-line references into stored entities.

use anyhow::Context;
use tempo_core::entities::{Customer, Issue, Project, Task};

use crate::commands::shared::parse::parse_issue_number;
use crate::context::AppContext;

pub async fn customer(ctx: &AppContext, key: &str) -> anyhow::Result<Customer> {
    ctx.service
        .find_customer(key)
        .await
        .with_context(|| format!("customer '{key}' not found"))
}

pub async fn project(ctx: &AppContext, key: &str) -> anyhow::Result<Project> {
    ctx.service
        .find_project(key)
        .await
        .with_context(|| format!("project '{key}' not found"))
}

pub async fn task(ctx: &AppContext, id: &str) -> anyhow::Result<Task> {
    ctx.service
        .get_task(id)
        .await
        .with_context(|| format!("task '{id}' not found"))
}

/// An issue by ID, or by number (`#12`) within `project`.
pub async fn issue(ctx: &AppContext, key: &str, project: Option<&str>) -> anyhow::Result<Issue> {
    let Some(number) = parse_issue_number(key) else {
        return ctx
            .service
            .get_issue(key)
            .await
            .with_context(|| format!("issue '{key}' not found"));
    };
    let Some(project_key) = project else {
        anyhow::bail!("issue number {key} needs --project");
    };
    let project = self::project(ctx, project_key).await?;
    ctx.service
        .get_issue_by_number(&project.id, number)
        .await?
        .with_context(|| format!("issue #{number} not found in project '{}'", project.title))
}

/// The project's GitLab ID, required by every GitLab call.
pub fn gitlab_project_id(project: &Project) -> anyhow::Result<u64> {
    project.gitlab_project_id.with_context(|| {
        format!(
            "project '{}' has no GitLab project (set one with: tempo project update {} --gitlab <id>)",
            project.title, project.id
        )
    })
}
