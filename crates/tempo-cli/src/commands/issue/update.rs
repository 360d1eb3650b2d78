use anyhow::Context;
use tempo_db::updates::issue::IssueUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::commands::shared::resolve;
use crate::context::AppContext;
use crate::output::output;

use super::get::issue_view;

pub struct Params {
    pub id: String,
    pub project: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub milestone: Option<String>,
    pub labels: Option<Vec<String>>,
}

pub async fn run(params: Params, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    validate_update_params(&params)?;
    let issue = resolve::issue(ctx, &params.id, params.project.as_deref()).await?;

    let mut builder = IssueUpdateBuilder::new();
    if let Some(title) = params.title.as_deref() {
        builder = builder.title(title);
    }
    if let Some(body) = params.body {
        builder = builder.description(Some(body).filter(|b| !b.is_empty()));
    }
    if let Some(title) = params.milestone.as_deref() {
        let project = ctx.service.issue_project(&issue.id).await?;
        let milestone = ctx
            .service
            .get_milestone_by_title(&project.id, title)
            .await?
            .with_context(|| format!("milestone '{title}' not found in project '{}'", project.title))?;
        builder = builder.milestone_id(Some(milestone.id));
    }

    let issue = ctx.service.update_issue(&issue.id, builder.build()).await?;
    if let Some(labels) = params.labels.as_deref() {
        ctx.service.set_issue_labels(&issue.id, labels).await?;
    }
    output(&issue_view(ctx, issue).await?, flags.format)
}

fn validate_update_params(params: &Params) -> anyhow::Result<()> {
    if params.title.is_none()
        && params.body.is_none()
        && params.milestone.is_none()
        && params.labels.is_none()
    {
        anyhow::bail!("At least one of --title, --body, --milestone, or --label must be provided");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Params, validate_update_params};

    fn params() -> Params {
        Params {
            id: String::from("iss-1"),
            project: None,
            title: None,
            body: None,
            milestone: None,
            labels: None,
        }
    }

    #[test]
    fn rejects_noop_update() {
        assert!(validate_update_params(&params()).is_err());
    }

    #[test]
    fn empty_label_list_counts_as_update() {
        let params = Params {
            labels: Some(Vec::new()),
            ..params()
        };
        assert!(validate_update_params(&params).is_ok());
    }
}
