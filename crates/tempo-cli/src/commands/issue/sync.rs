use tempo_core::audit_detail::SyncedDetail;
use tempo_core::entities::{Issue, Sprint};
use tempo_core::enums::EntityType;
use tempo_core::responses::SyncResponse;
use tempo_db::error::DatabaseError;
use tempo_db::repos::issue::NewIssue;
use tempo_db::updates::issue::{IssueUpdate, IssueUpdateBuilder};
use tempo_gitlab::GitlabIssue;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_scope;
use crate::commands::shared::resolve;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Mirror GitLab issues: unknown numbers are created in the last sprint,
/// known ones are refreshed in place.
pub async fn run(
    project: &str,
    state: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let scope = parse_scope(state)?;
    let project = resolve::project(ctx, project).await?;
    let gitlab_id = resolve::gitlab_project_id(&project)?;
    let client = ctx.gitlab()?;

    let progress = Progress::spinner(&format!("Fetching {} GitLab issues", scope.as_str()));
    let remote = client.list_issues(gitlab_id, scope).await;
    progress.finish_clear();
    let remote = remote?;

    let sprint = match ctx.service.last_sprint(&project.id).await {
        Ok(sprint) => Some(sprint),
        Err(DatabaseError::NoResult) => None,
        Err(error) => return Err(error.into()),
    };

    let progress = Progress::spinner("Saving issues");
    let mut response = SyncResponse::default();
    for issue in &remote {
        progress.set_message(&format!("#{} {}", issue.iid, issue.title));
        let milestone_id = match &issue.milestone {
            Some(milestone) => Some(
                ctx.service
                    .upsert_milestone(&project.id, milestone.id, &milestone.title)
                    .await?
                    .0
                    .id,
            ),
            None => None,
        };

        match ctx
            .service
            .get_issue_by_number(&project.id, issue.iid)
            .await?
        {
            None => {
                let Some(sprint) = sprint.as_ref() else {
                    progress.finish_err("no sprint");
                    anyhow::bail!(
                        "project '{}' has no sprint for new issues (create one with: tempo sprint create --project {})",
                        project.title,
                        project.title
                    );
                };
                create_local(ctx, issue, milestone_id, sprint).await?;
                response.created += 1;
            }
            Some(local) => {
                if refresh_local(ctx, &local, issue, milestone_id).await? {
                    response.updated += 1;
                } else {
                    response.unchanged += 1;
                }
            }
        }
    }
    progress.finish_clear();

    ctx.service
        .record_sync(
            EntityType::Project,
            &project.id,
            &SyncedDetail {
                source: "gitlab_issues".into(),
                created: response.created,
                updated: response.updated,
            },
        )
        .await?;
    tracing::info!(
        project = %project.title,
        created = response.created,
        updated = response.updated,
        unchanged = response.unchanged,
        "issues synced"
    );
    output(&response, flags.format)
}

async fn create_local(
    ctx: &AppContext,
    remote: &GitlabIssue,
    milestone_id: Option<String>,
    sprint: &Sprint,
) -> anyhow::Result<Issue> {
    let issue = ctx
        .service
        .create_issue(&NewIssue {
            number: remote.iid,
            title: remote.title.clone(),
            description: description(remote),
            milestone_id,
            sprint_id: sprint.id.clone(),
            url: Some(remote.web_url.clone()),
            status: remote.state.to_status(),
            labels: remote.labels.clone(),
        })
        .await?;
    Ok(issue)
}

/// Returns whether anything changed.
async fn refresh_local(
    ctx: &AppContext,
    local: &Issue,
    remote: &GitlabIssue,
    milestone_id: Option<String>,
) -> anyhow::Result<bool> {
    let mut changed = false;

    if let Some(update) = field_changes(local, remote, milestone_id) {
        ctx.service.update_issue(&local.id, update).await?;
        changed = true;
    }

    let status = remote.state.to_status();
    if local.status != status {
        ctx.service.sync_issue_status(&local.id, status).await?;
        changed = true;
    }

    let current: Vec<String> = ctx
        .service
        .issue_labels(&local.id)
        .await?
        .into_iter()
        .map(|l| l.label)
        .collect();
    let wanted: Vec<String> = ctx
        .service
        .find_labels(&remote.labels)
        .await?
        .into_iter()
        .map(|l| l.label)
        .collect();
    if current != wanted {
        ctx.service.set_issue_labels(&local.id, &wanted).await?;
        changed = true;
    }

    Ok(changed)
}

fn description(remote: &GitlabIssue) -> Option<String> {
    remote.description.clone().filter(|d| !d.is_empty())
}

/// Title, description, url and milestone updates, if any differ.
///
/// An issue whose milestone was removed on GitLab keeps its local milestone.
fn field_changes(
    local: &Issue,
    remote: &GitlabIssue,
    milestone_id: Option<String>,
) -> Option<IssueUpdate> {
    let mut builder = IssueUpdateBuilder::new();
    if local.title != remote.title {
        builder = builder.title(&remote.title);
    }
    let description = description(remote);
    if local.description != description {
        builder = builder.description(description);
    }
    if local.url.as_deref() != Some(remote.web_url.as_str()) {
        builder = builder.url(Some(remote.web_url.clone()));
    }
    if let Some(milestone_id) = milestone_id {
        if local.milestone_id.as_deref() != Some(milestone_id.as_str()) {
            builder = builder.milestone_id(Some(milestone_id));
        }
    }

    let update = builder.build();
    (!update.is_empty()).then_some(update)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use tempo_core::entities::Issue;
    use tempo_core::enums::Status;
    use tempo_gitlab::{GitlabIssue, IssueState};

    use super::field_changes;

    fn local() -> Issue {
        Issue {
            id: "iss-1".into(),
            number: 12,
            title: "Fix login".into(),
            description: None,
            milestone_id: Some("mst-1".into()),
            sprint_id: "spr-1".into(),
            url: Some("https://gitlab.com/acme/site/-/issues/12".into()),
            status: Status::Open,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn remote() -> GitlabIssue {
        GitlabIssue {
            iid: 12,
            title: "Fix login".into(),
            description: Some(String::new()),
            labels: vec!["bug".into()],
            web_url: "https://gitlab.com/acme/site/-/issues/12".into(),
            state: IssueState::Closed,
            milestone: None,
        }
    }

    #[test]
    fn identical_fields_need_no_update() {
        assert!(field_changes(&local(), &remote(), Some("mst-1".into())).is_none());
    }

    #[test]
    fn missing_remote_milestone_keeps_local_one() {
        assert!(field_changes(&local(), &remote(), None).is_none());
    }

    #[test]
    fn renamed_issue_updates_title_only() {
        let remote = GitlabIssue {
            title: "Fix login redirect".into(),
            ..remote()
        };
        let update = field_changes(&local(), &remote, None).expect("title changed");
        assert_eq!(update.title.as_deref(), Some("Fix login redirect"));
        assert!(update.description.is_none());
        assert!(update.url.is_none());
        assert!(update.milestone_id.is_none());
    }

    #[test]
    fn new_description_and_milestone_are_applied() {
        let remote = GitlabIssue {
            description: Some("Users get logged out".into()),
            ..remote()
        };
        let update = field_changes(&local(), &remote, Some("mst-2".into())).expect("changed");
        assert_eq!(update.description, Some(Some("Users get logged out".into())));
        assert_eq!(update.milestone_id, Some(Some("mst-2".into())));
    }
}
