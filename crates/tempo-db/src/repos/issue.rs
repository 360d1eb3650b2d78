//! Issue repository: CRUD, labels and status transitions.

use chrono::Utc;

use tempo_core::audit_detail::StatusChangedDetail;
use tempo_core::entities::{Issue, Label, Project};
use tempo_core::enums::{AuditAction, EntityType, Status};
use tempo_core::ids::PREFIX_ISSUE;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, get_u64, parse_datetime, parse_enum, sql_int, to_detail};
use crate::repos::label::row_to_label;
use crate::repos::project::row_to_project;
use crate::service::TempoService;
use crate::updates::issue::IssueUpdate;

const SELECT_COLS: &str = "i.id, i.number, i.title, i.description, i.milestone_id, i.sprint_id, \
     i.url, i.status, i.created_at, i.updated_at";

fn row_to_issue(row: &libsql::Row) -> Result<Issue, DatabaseError> {
    Ok(Issue {
        id: row.get(0)?,
        number: get_u64(row, 1)?,
        title: row.get(2)?,
        description: get_opt_string(row, 3)?,
        milestone_id: get_opt_string(row, 4)?,
        sprint_id: row.get(5)?,
        url: get_opt_string(row, 6)?,
        status: parse_enum(&row.get::<String>(7)?)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
        updated_at: parse_datetime(&row.get::<String>(9)?)?,
    })
}

/// Input for [`TempoService::create_issue`].
#[derive(Debug, Clone, Default)]
pub struct NewIssue {
    pub number: u64,
    pub title: String,
    pub description: Option<String>,
    pub milestone_id: Option<String>,
    pub sprint_id: String,
    pub url: Option<String>,
    pub status: Status,
    /// Label names. Only labels that already exist are attached.
    pub labels: Vec<String>,
}

/// Filter criteria for issue listings.
#[derive(Debug, Default)]
pub struct IssueFilter {
    pub project_id: Option<String>,
    pub sprint_id: Option<String>,
    pub status: Option<Status>,
    pub limit: Option<u32>,
}

impl TempoService {
    /// Store an issue in a sprint and attach its existing labels.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Constraint` when the sprint's project already
    /// has an issue with the same number.
    pub async fn create_issue(&self, new: &NewIssue) -> Result<Issue, DatabaseError> {
        let sprint = self.get_sprint(&new.sprint_id).await?;
        if self
            .get_issue_by_number(&sprint.project_id, new.number)
            .await?
            .is_some()
        {
            return Err(DatabaseError::Constraint(format!(
                "issue #{} already exists in project {}",
                new.number, sprint.project_id
            )));
        }

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_ISSUE).await?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO issues (id, number, title, description, milestone_id, sprint_id, url, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                libsql::params![
                    id.as_str(),
                    sql_int(new.number)?,
                    new.title.as_str(),
                    new.description.as_deref(),
                    new.milestone_id.as_deref(),
                    new.sprint_id.as_str(),
                    new.url.as_deref(),
                    new.status.as_str(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await
            .map_err(DatabaseError::from_write)?;

        self.record_audit(
            EntityType::Issue,
            &id,
            AuditAction::Created,
            Some(serde_json::json!({ "number": new.number })),
            now,
        )
        .await?;

        if !new.labels.is_empty() {
            self.set_issue_labels(&id, &new.labels).await?;
        }

        Ok(Issue {
            id,
            number: new.number,
            title: new.title.clone(),
            description: new.description.clone(),
            milestone_id: new.milestone_id.clone(),
            sprint_id: new.sprint_id.clone(),
            url: new.url.clone(),
            status: new.status,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_issue(&self, id: &str) -> Result<Issue, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM issues i WHERE i.id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_issue(&row)
    }

    /// Look an issue up by its tracker number within a project.
    pub async fn get_issue_by_number(
        &self,
        project_id: &str,
        number: u64,
    ) -> Result<Option<Issue>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM issues i JOIN sprints s ON s.id = i.sprint_id
                     WHERE s.project_id = ?1 AND i.number = ?2"
                ),
                libsql::params![project_id, sql_int(number)?],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_issue(&row)?)),
            None => Ok(None),
        }
    }

    /// Issues in creation order, optionally filtered.
    pub async fn list_issues(&self, filter: &IssueFilter) -> Result<Vec<Issue>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref project_id) = filter.project_id {
            params.push(project_id.clone().into());
            conditions.push(format!("s.project_id = ?{}", params.len()));
        }
        if let Some(ref sprint_id) = filter.sprint_id {
            params.push(sprint_id.clone().into());
            conditions.push(format!("i.sprint_id = ?{}", params.len()));
        }
        if let Some(status) = filter.status {
            params.push(status.as_str().into());
            conditions.push(format!("i.status = ?{}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let limit = filter
            .limit
            .map_or_else(String::new, |l| format!("LIMIT {l}"));
        let sql = format!(
            "SELECT {SELECT_COLS} FROM issues i JOIN sprints s ON s.id = i.sprint_id
             {where_clause} ORDER BY i.created_at, i.rowid {limit}"
        );

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut issues = Vec::new();
        while let Some(row) = rows.next().await? {
            issues.push(row_to_issue(&row)?);
        }
        Ok(issues)
    }

    pub async fn update_issue(
        &self,
        issue_id: &str,
        update: IssueUpdate,
    ) -> Result<Issue, DatabaseError> {
        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref title) = update.title {
            params.push(title.clone().into());
            sets.push(format!("title = ?{}", params.len()));
        }
        if let Some(ref description) = update.description {
            params.push(description.clone().map_or(libsql::Value::Null, Into::into));
            sets.push(format!("description = ?{}", params.len()));
        }
        if let Some(ref milestone_id) = update.milestone_id {
            params.push(milestone_id.clone().map_or(libsql::Value::Null, Into::into));
            sets.push(format!("milestone_id = ?{}", params.len()));
        }
        if let Some(ref sprint_id) = update.sprint_id {
            params.push(sprint_id.clone().into());
            sets.push(format!("sprint_id = ?{}", params.len()));
        }
        if let Some(ref url) = update.url {
            params.push(url.clone().map_or(libsql::Value::Null, Into::into));
            sets.push(format!("url = ?{}", params.len()));
        }

        if sets.is_empty() {
            return self.get_issue(issue_id).await;
        }

        let now = Utc::now();
        params.push(now.to_rfc3339().into());
        sets.push(format!("updated_at = ?{}", params.len()));
        params.push(issue_id.into());
        let sql = format!(
            "UPDATE issues SET {} WHERE id = ?{}",
            sets.join(", "),
            params.len()
        );
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await
            .map_err(DatabaseError::from_write)?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }

        self.record_audit(
            EntityType::Issue,
            issue_id,
            AuditAction::Updated,
            Some(to_detail(&update)?),
            now,
        )
        .await?;

        self.get_issue(issue_id).await
    }

    /// Move an issue to `new_status` if the transition is allowed.
    pub async fn transition_issue(
        &self,
        issue_id: &str,
        new_status: Status,
    ) -> Result<Issue, DatabaseError> {
        let current = self.get_issue(issue_id).await?;

        if !current.status.can_transition_to(new_status) {
            return Err(DatabaseError::InvalidState(format!(
                "Cannot transition issue {} from {} to {}",
                issue_id, current.status, new_status
            )));
        }

        self.write_issue_status(current, new_status, None).await
    }

    /// Overwrite the status with the tracker's state. No transition check;
    /// returns the issue unchanged when the status already matches.
    pub async fn sync_issue_status(
        &self,
        issue_id: &str,
        status: Status,
    ) -> Result<Issue, DatabaseError> {
        let current = self.get_issue(issue_id).await?;
        if current.status == status {
            return Ok(current);
        }
        self.write_issue_status(current, status, Some("sync".to_string()))
            .await
    }

    async fn write_issue_status(
        &self,
        current: Issue,
        new_status: Status,
        reason: Option<String>,
    ) -> Result<Issue, DatabaseError> {
        let now = Utc::now();
        self.db()
            .conn()
            .execute(
                "UPDATE issues SET status = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![new_status.as_str(), now.to_rfc3339(), current.id.as_str()],
            )
            .await?;

        let detail = StatusChangedDetail {
            from: current.status.as_str().to_string(),
            to: new_status.as_str().to_string(),
            reason,
        };
        self.record_audit(
            EntityType::Issue,
            &current.id,
            AuditAction::StatusChanged,
            Some(to_detail(&detail)?),
            now,
        )
        .await?;

        Ok(Issue {
            status: new_status,
            updated_at: now,
            ..current
        })
    }

    /// Delete an issue. Its task and the task's timesheets go with it.
    pub async fn delete_issue(&self, issue_id: &str) -> Result<(), DatabaseError> {
        let now = Utc::now();
        let changed = self
            .db()
            .conn()
            .execute("DELETE FROM issues WHERE id = ?1", [issue_id])
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        self.record_audit(EntityType::Issue, issue_id, AuditAction::Deleted, None, now)
            .await
    }

    /// Replace an issue's labels with the existing labels among `names`.
    ///
    /// Returns the labels now attached.
    pub async fn set_issue_labels(
        &self,
        issue_id: &str,
        names: &[String],
    ) -> Result<Vec<Label>, DatabaseError> {
        let labels = self.find_labels(names).await?;
        let now = Utc::now();

        self.db()
            .conn()
            .execute("DELETE FROM issue_labels WHERE issue_id = ?1", [issue_id])
            .await?;
        for label in &labels {
            self.db()
                .conn()
                .execute(
                    "INSERT INTO issue_labels (issue_id, label_id) VALUES (?1, ?2)",
                    libsql::params![issue_id, label.id.as_str()],
                )
                .await
                .map_err(DatabaseError::from_write)?;
        }

        let names: Vec<&str> = labels.iter().map(|l| l.label.as_str()).collect();
        self.record_audit(
            EntityType::Issue,
            issue_id,
            AuditAction::Labeled,
            Some(serde_json::json!({ "labels": names })),
            now,
        )
        .await?;
        Ok(labels)
    }

    /// Labels attached to an issue, ordered by label.
    pub async fn issue_labels(&self, issue_id: &str) -> Result<Vec<Label>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT l.id, l.label, l.color FROM issue_labels il
                 JOIN labels l ON l.id = il.label_id
                 WHERE il.issue_id = ?1 ORDER BY l.label",
                [issue_id],
            )
            .await?;
        let mut labels = Vec::new();
        while let Some(row) = rows.next().await? {
            labels.push(row_to_label(&row)?);
        }
        Ok(labels)
    }

    /// The project an issue belongs to, through its sprint.
    pub async fn issue_project(&self, issue_id: &str) -> Result<Project, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT p.id, p.title, p.customer_id, p.gitlab_project_id, p.active, p.created_at, p.updated_at
                 FROM issues i
                 JOIN sprints s ON s.id = i.sprint_id
                 JOIN projects p ON p.id = s.project_id
                 WHERE i.id = ?1",
                [issue_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_project(&row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::audit::AuditFilter;
    use crate::test_support::helpers::{Seed, seed, test_service};
    use crate::updates::issue::IssueUpdateBuilder;

    fn new_issue(seeded: &Seed, number: u64, title: &str) -> NewIssue {
        NewIssue {
            number,
            title: title.into(),
            sprint_id: seeded.sprint.id.clone(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_issue_roundtrip() {
        let svc = test_service().await;
        let seeded = seed(&svc).await;

        let issue = svc
            .create_issue(&NewIssue {
                description: Some("Login fails".into()),
                url: Some("https://gitlab.com/acme/site/-/issues/12".into()),
                ..new_issue(&seeded, 12, "Fix login bug")
            })
            .await
            .unwrap();

        assert!(issue.id.starts_with("iss-"));
        assert_eq!(issue.status, Status::Open);
        let fetched = svc.get_issue(&issue.id).await.unwrap();
        assert_eq!(fetched, issue);
    }

    #[tokio::test]
    async fn only_existing_labels_are_attached() {
        let svc = test_service().await;
        let seeded = seed(&svc).await;
        svc.create_label("bug", Some("#d9534f")).await.unwrap();

        let issue = svc
            .create_issue(&NewIssue {
                labels: vec!["bug".into(), "unknown".into()],
                ..new_issue(&seeded, 3, "Crash")
            })
            .await
            .unwrap();

        let labels = svc.issue_labels(&issue.id).await.unwrap();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].label, "bug");
    }

    #[tokio::test]
    async fn duplicate_number_in_project_is_rejected() {
        let svc = test_service().await;
        let seeded = seed(&svc).await;
        svc.create_issue(&new_issue(&seeded, 7, "First")).await.unwrap();
        let result = svc.create_issue(&new_issue(&seeded, 7, "Again")).await;
        assert!(matches!(result, Err(DatabaseError::Constraint(_))));
    }

    #[tokio::test]
    async fn get_by_number_is_scoped_to_project() {
        let svc = test_service().await;
        let seeded = seed(&svc).await;
        let issue = svc.create_issue(&new_issue(&seeded, 7, "First")).await.unwrap();

        let found = svc
            .get_issue_by_number(&seeded.project.id, 7)
            .await
            .unwrap();
        assert_eq!(found.map(|i| i.id), Some(issue.id));

        let other = svc
            .create_project(&seeded.customer.id, "other", None)
            .await
            .unwrap();
        assert!(svc.get_issue_by_number(&other.id, 7).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_issues_filters() {
        let svc = test_service().await;
        let seeded = seed(&svc).await;
        let a = svc.create_issue(&new_issue(&seeded, 1, "A")).await.unwrap();
        svc.create_issue(&new_issue(&seeded, 2, "B")).await.unwrap();
        svc.transition_issue(&a.id, Status::Closed).await.unwrap();

        let all = svc
            .list_issues(&IssueFilter {
                project_id: Some(seeded.project.id.clone()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].number, 1);

        let open = svc
            .list_issues(&IssueFilter {
                status: Some(Status::Open),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].title, "B");
    }

    #[tokio::test]
    async fn update_issue_partial() {
        let svc = test_service().await;
        let seeded = seed(&svc).await;
        let issue = svc
            .create_issue(&NewIssue {
                description: Some("old".into()),
                ..new_issue(&seeded, 1, "Original")
            })
            .await
            .unwrap();

        let update = IssueUpdateBuilder::new()
            .title("Updated Title")
            .description(None)
            .build();
        let updated = svc.update_issue(&issue.id, update).await.unwrap();
        assert_eq!(updated.title, "Updated Title");
        assert_eq!(updated.description, None);
        assert_eq!(updated.number, 1);
    }

    #[tokio::test]
    async fn transitions_follow_status_rules() {
        let svc = test_service().await;
        let seeded = seed(&svc).await;
        let issue = svc.create_issue(&new_issue(&seeded, 1, "T")).await.unwrap();

        let closed = svc.transition_issue(&issue.id, Status::Closed).await.unwrap();
        assert_eq!(closed.status, Status::Closed);
        let reopened = svc.transition_issue(&issue.id, Status::Open).await.unwrap();
        assert_eq!(reopened.status, Status::Open);
        svc.transition_issue(&issue.id, Status::Canceled).await.unwrap();

        let result = svc.transition_issue(&issue.id, Status::Open).await;
        assert!(matches!(result, Err(DatabaseError::InvalidState(_))));

        let changes = svc
            .query_audit(&AuditFilter {
                entity_id: Some(issue.id.clone()),
                action: Some(AuditAction::StatusChanged),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(changes.len(), 3);
    }

    #[tokio::test]
    async fn sync_status_skips_transition_rules() {
        let svc = test_service().await;
        let seeded = seed(&svc).await;
        let issue = svc.create_issue(&new_issue(&seeded, 1, "T")).await.unwrap();
        svc.transition_issue(&issue.id, Status::Invalid).await.unwrap();

        let synced = svc.sync_issue_status(&issue.id, Status::Closed).await.unwrap();
        assert_eq!(synced.status, Status::Closed);
        let again = svc.sync_issue_status(&issue.id, Status::Closed).await.unwrap();
        assert_eq!(again.updated_at, synced.updated_at);
    }

    #[tokio::test]
    async fn issue_project_goes_through_sprint() {
        let svc = test_service().await;
        let seeded = seed(&svc).await;
        let issue = svc.create_issue(&new_issue(&seeded, 1, "T")).await.unwrap();
        let project = svc.issue_project(&issue.id).await.unwrap();
        assert_eq!(project.id, seeded.project.id);
    }

    #[tokio::test]
    async fn delete_issue_removes_labels() {
        let svc = test_service().await;
        let seeded = seed(&svc).await;
        svc.create_label("bug", None).await.unwrap();
        let issue = svc
            .create_issue(&NewIssue {
                labels: vec!["bug".into()],
                ..new_issue(&seeded, 1, "T")
            })
            .await
            .unwrap();

        svc.delete_issue(&issue.id).await.unwrap();
        assert!(matches!(
            svc.get_issue(&issue.id).await,
            Err(DatabaseError::NoResult)
        ));
        assert!(svc.issue_labels(&issue.id).await.unwrap().is_empty());
        assert!(matches!(
            svc.delete_issue(&issue.id).await,
            Err(DatabaseError::NoResult)
        ));
    }
}
