//! Task repository: CRUD + status transitions + one-to-one issue link.

use chrono::{NaiveTime, Utc};

use tempo_core::audit_detail::StatusChangedDetail;
use tempo_core::entities::{Estimate, Task};
use tempo_core::enums::{AuditAction, EntityType, Status};
use tempo_core::ids::PREFIX_TASK;

use crate::error::DatabaseError;
use crate::helpers::{
    format_optional_time, get_opt_estimate, get_opt_string, parse_datetime, parse_enum,
    parse_optional_time, to_detail,
};
use crate::service::TempoService;
use crate::updates::task::TaskUpdate;

const SELECT_COLS: &str = "id, title, project_id, issue_id, status, annotation, report, \
     start_time, end_time, estimate, created_at, updated_at";

fn row_to_task(row: &libsql::Row) -> Result<Task, DatabaseError> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        project_id: row.get(2)?,
        issue_id: get_opt_string(row, 3)?,
        status: parse_enum(&row.get::<String>(4)?)?,
        annotation: get_opt_string(row, 5)?,
        report: get_opt_string(row, 6)?,
        start_time: parse_optional_time(get_opt_string(row, 7)?.as_deref())?,
        end_time: parse_optional_time(get_opt_string(row, 8)?.as_deref())?,
        estimate: get_opt_estimate(row, 9)?,
        created_at: parse_datetime(&row.get::<String>(10)?)?,
        updated_at: parse_datetime(&row.get::<String>(11)?)?,
    })
}

fn estimate_value(estimate: Option<Estimate>) -> libsql::Value {
    estimate.map_or(libsql::Value::Null, |e| i64::from(e.hundredths()).into())
}

/// Input for [`TempoService::create_task`].
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub project_id: String,
    pub issue_id: Option<String>,
    pub annotation: Option<String>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub estimate: Option<Estimate>,
}

impl NewTask {
    #[must_use]
    pub fn new(title: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            project_id: project_id.into(),
            ..Default::default()
        }
    }
}

/// Filter criteria for task listings.
#[derive(Debug, Default)]
pub struct TaskFilter {
    pub project_id: Option<String>,
    pub status: Option<Status>,
    pub limit: Option<u32>,
}

impl TempoService {
    /// Create a task.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Constraint` when `issue_id` already has a task
    /// or references a missing row.
    pub async fn create_task(&self, new: &NewTask) -> Result<Task, DatabaseError> {
        if let Some(ref issue_id) = new.issue_id {
            if let Some(existing) = self.task_for_issue(issue_id).await? {
                return Err(DatabaseError::Constraint(format!(
                    "issue {issue_id} already has task {}",
                    existing.id
                )));
            }
        }

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_TASK).await?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO tasks (id, title, project_id, issue_id, status, annotation, report, start_time, end_time, estimate, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, NULL, ?7, ?8, ?9, ?10, ?11)",
                libsql::params![
                    id.as_str(),
                    new.title.as_str(),
                    new.project_id.as_str(),
                    new.issue_id.as_deref(),
                    Status::Open.as_str(),
                    new.annotation.as_deref(),
                    format_optional_time(new.start_time),
                    format_optional_time(new.end_time),
                    estimate_value(new.estimate),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await
            .map_err(DatabaseError::from_write)?;

        self.record_audit(EntityType::Task, &id, AuditAction::Created, None, now)
            .await?;

        Ok(Task {
            id,
            title: new.title.clone(),
            project_id: new.project_id.clone(),
            issue_id: new.issue_id.clone(),
            status: Status::Open,
            annotation: new.annotation.clone(),
            report: None,
            start_time: new.start_time,
            end_time: new.end_time,
            estimate: new.estimate,
            created_at: now,
            updated_at: now,
        })
    }

    /// Create the task that tracks an issue: same title, the issue's project.
    pub async fn create_task_for_issue(&self, issue_id: &str) -> Result<Task, DatabaseError> {
        let issue = self.get_issue(issue_id).await?;
        let project = self.issue_project(issue_id).await?;
        self.create_task(&NewTask {
            issue_id: Some(issue.id),
            ..NewTask::new(issue.title, project.id)
        })
        .await
    }

    pub async fn get_task(&self, id: &str) -> Result<Task, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM tasks WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_task(&row)
    }

    /// The task linked to an issue, if any.
    pub async fn task_for_issue(&self, issue_id: &str) -> Result<Option<Task>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM tasks WHERE issue_id = ?1"),
                [issue_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_task(&row)?)),
            None => Ok(None),
        }
    }

    /// Tasks in creation order, optionally filtered.
    pub async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref project_id) = filter.project_id {
            params.push(project_id.clone().into());
            conditions.push(format!("project_id = ?{}", params.len()));
        }
        if let Some(status) = filter.status {
            params.push(status.as_str().into());
            conditions.push(format!("status = ?{}", params.len()));
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
            "SELECT {SELECT_COLS} FROM tasks {where_clause} ORDER BY created_at, rowid {limit}"
        );

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next().await? {
            tasks.push(row_to_task(&row)?);
        }
        Ok(tasks)
    }

    pub async fn update_task(
        &self,
        task_id: &str,
        update: TaskUpdate,
    ) -> Result<Task, DatabaseError> {
        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref title) = update.title {
            params.push(title.clone().into());
            sets.push(format!("title = ?{}", params.len()));
        }
        if let Some(ref annotation) = update.annotation {
            params.push(annotation.clone().map_or(libsql::Value::Null, Into::into));
            sets.push(format!("annotation = ?{}", params.len()));
        }
        if let Some(ref report) = update.report {
            params.push(report.clone().map_or(libsql::Value::Null, Into::into));
            sets.push(format!("report = ?{}", params.len()));
        }
        if let Some(start_time) = update.start_time {
            params.push(format_optional_time(start_time).map_or(libsql::Value::Null, Into::into));
            sets.push(format!("start_time = ?{}", params.len()));
        }
        if let Some(end_time) = update.end_time {
            params.push(format_optional_time(end_time).map_or(libsql::Value::Null, Into::into));
            sets.push(format!("end_time = ?{}", params.len()));
        }
        if let Some(estimate) = update.estimate {
            params.push(estimate_value(estimate));
            sets.push(format!("estimate = ?{}", params.len()));
        }

        if sets.is_empty() {
            return self.get_task(task_id).await;
        }

        let now = Utc::now();
        params.push(now.to_rfc3339().into());
        sets.push(format!("updated_at = ?{}", params.len()));
        params.push(task_id.into());
        let sql = format!(
            "UPDATE tasks SET {} WHERE id = ?{}",
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
            EntityType::Task,
            task_id,
            AuditAction::Updated,
            Some(to_detail(&update)?),
            now,
        )
        .await?;

        self.get_task(task_id).await
    }

    /// Move a task to `new_status` if the transition is allowed.
    pub async fn transition_task(
        &self,
        task_id: &str,
        new_status: Status,
    ) -> Result<Task, DatabaseError> {
        let current = self.get_task(task_id).await?;

        if !current.status.can_transition_to(new_status) {
            return Err(DatabaseError::InvalidState(format!(
                "Cannot transition task {} from {} to {}",
                task_id, current.status, new_status
            )));
        }

        let now = Utc::now();
        self.db()
            .conn()
            .execute(
                "UPDATE tasks SET status = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![new_status.as_str(), now.to_rfc3339(), task_id],
            )
            .await?;

        let detail = StatusChangedDetail {
            from: current.status.as_str().to_string(),
            to: new_status.as_str().to_string(),
            reason: None,
        };
        self.record_audit(
            EntityType::Task,
            task_id,
            AuditAction::StatusChanged,
            Some(to_detail(&detail)?),
            now,
        )
        .await?;

        Ok(Task {
            status: new_status,
            updated_at: now,
            ..current
        })
    }

    /// Delete a task and its timesheets.
    pub async fn delete_task(&self, task_id: &str) -> Result<(), DatabaseError> {
        let now = Utc::now();
        let changed = self
            .db()
            .conn()
            .execute("DELETE FROM tasks WHERE id = ?1", [task_id])
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        self.record_audit(EntityType::Task, task_id, AuditAction::Deleted, None, now)
            .await
    }
}
