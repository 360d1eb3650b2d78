//! Timesheet repository: start/stop timers and reporting rows.

use chrono::{DateTime, Utc};

use tempo_core::audit_detail::TimerDetail;
use tempo_core::entities::Timesheet;
use tempo_core::enums::{AuditAction, EntityType};
use tempo_core::ids::PREFIX_TIMESHEET;
use tempo_core::report::TimesheetRecord;

use crate::error::DatabaseError;
use crate::helpers::{
    get_opt_string, get_opt_u16, get_opt_u64, parse_datetime, parse_optional_datetime, to_detail,
};
use crate::service::TempoService;

const SELECT_COLS: &str = "ts.id, ts.task_id, ts.start_time, ts.end_time, ts.created_at, ts.updated_at";

fn row_to_timesheet(row: &libsql::Row) -> Result<Timesheet, DatabaseError> {
    Ok(Timesheet {
        id: row.get(0)?,
        task_id: row.get(1)?,
        start_time: parse_datetime(&row.get::<String>(2)?)?,
        end_time: parse_optional_datetime(get_opt_string(row, 3)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
        updated_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

fn row_to_record(row: &libsql::Row) -> Result<TimesheetRecord, DatabaseError> {
    Ok(TimesheetRecord {
        timesheet_id: row.get(0)?,
        task_id: row.get(1)?,
        task_title: row.get(2)?,
        start_time: parse_datetime(&row.get::<String>(3)?)?,
        end_time: parse_optional_datetime(get_opt_string(row, 4)?.as_deref())?,
        issue_number: get_opt_u64(row, 5)?,
        issue_title: get_opt_string(row, 6)?,
        sprint_number: get_opt_u16(row, 7)?,
    })
}

/// Filter criteria for timesheet listings.
#[derive(Debug, Default)]
pub struct TimesheetFilter {
    pub task_id: Option<String>,
    pub running_only: bool,
    pub limit: Option<u32>,
}

impl TempoService {
    /// Open a timesheet on a task at `start_time`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` when the task already has a
    /// running timesheet, `NoResult` when the task does not exist.
    pub async fn start_timesheet(
        &self,
        task_id: &str,
        start_time: DateTime<Utc>,
    ) -> Result<Timesheet, DatabaseError> {
        self.get_task(task_id).await?;
        if let Some(running) = self.running_timesheet(task_id).await? {
            return Err(DatabaseError::InvalidState(format!(
                "task {task_id} already has a running timesheet ({})",
                running.id
            )));
        }

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_TIMESHEET).await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO timesheets (id, task_id, start_time, end_time, created_at, updated_at)
                 VALUES (?1, ?2, ?3, NULL, ?4, ?5)",
                libsql::params![
                    id.as_str(),
                    task_id,
                    start_time.to_rfc3339(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await
            .map_err(DatabaseError::from_write)?;

        let detail = TimerDetail {
            task_id: task_id.to_string(),
            at: start_time.to_rfc3339(),
        };
        self.record_audit(
            EntityType::Timesheet,
            &id,
            AuditAction::TimerStarted,
            Some(to_detail(&detail)?),
            now,
        )
        .await?;

        Ok(Timesheet {
            id,
            task_id: task_id.to_string(),
            start_time,
            end_time: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Close the running timesheet of a task at `end_time`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` when nothing is running or
    /// `end_time` precedes the start.
    pub async fn stop_timesheet(
        &self,
        task_id: &str,
        end_time: DateTime<Utc>,
    ) -> Result<Timesheet, DatabaseError> {
        let running = self.running_timesheet(task_id).await?.ok_or_else(|| {
            DatabaseError::InvalidState(format!("task {task_id} has no running timesheet"))
        })?;
        if end_time < running.start_time {
            return Err(DatabaseError::InvalidState(format!(
                "end {} is before start {}",
                end_time.to_rfc3339(),
                running.start_time.to_rfc3339()
            )));
        }

        let now = Utc::now();
        self.db()
            .conn()
            .execute(
                "UPDATE timesheets SET end_time = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![end_time.to_rfc3339(), now.to_rfc3339(), running.id.as_str()],
            )
            .await?;

        let detail = TimerDetail {
            task_id: task_id.to_string(),
            at: end_time.to_rfc3339(),
        };
        self.record_audit(
            EntityType::Timesheet,
            &running.id,
            AuditAction::TimerStopped,
            Some(to_detail(&detail)?),
            now,
        )
        .await?;

        Ok(Timesheet {
            end_time: Some(end_time),
            updated_at: now,
            ..running
        })
    }

    pub async fn get_timesheet(&self, id: &str) -> Result<Timesheet, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM timesheets ts WHERE ts.id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_timesheet(&row)
    }

    /// The open timesheet of a task, if any.
    pub async fn running_timesheet(&self, task_id: &str) -> Result<Option<Timesheet>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM timesheets ts
                     WHERE ts.task_id = ?1 AND ts.end_time IS NULL
                     ORDER BY ts.start_time DESC LIMIT 1"
                ),
                [task_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_timesheet(&row)?)),
            None => Ok(None),
        }
    }

    /// All open timesheets, newest start first.
    pub async fn running_timesheets(&self) -> Result<Vec<Timesheet>, DatabaseError> {
        self.list_timesheets(&TimesheetFilter {
            running_only: true,
            ..Default::default()
        })
        .await
    }

    /// Timesheets of one task, newest start first.
    pub async fn task_timesheets(&self, task_id: &str) -> Result<Vec<Timesheet>, DatabaseError> {
        self.list_timesheets(&TimesheetFilter {
            task_id: Some(task_id.to_string()),
            ..Default::default()
        })
        .await
    }

    /// Timesheets, newest start first, optionally filtered.
    pub async fn list_timesheets(
        &self,
        filter: &TimesheetFilter,
    ) -> Result<Vec<Timesheet>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref task_id) = filter.task_id {
            params.push(task_id.clone().into());
            conditions.push(format!("ts.task_id = ?{}", params.len()));
        }
        if filter.running_only {
            conditions.push("ts.end_time IS NULL".to_string());
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
            "SELECT {SELECT_COLS} FROM timesheets ts {where_clause}
             ORDER BY ts.start_time DESC, ts.rowid DESC {limit}"
        );

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut timesheets = Vec::new();
        while let Some(row) = rows.next().await? {
            timesheets.push(row_to_timesheet(&row)?);
        }
        Ok(timesheets)
    }

    /// The finished timesheet that ended last, optionally within one project.
    pub async fn latest_timesheet(
        &self,
        project_id: Option<&str>,
    ) -> Result<Option<Timesheet>, DatabaseError> {
        let (join, params): (&str, Vec<libsql::Value>) = match project_id {
            Some(project_id) => (
                "JOIN tasks t ON t.id = ts.task_id WHERE t.project_id = ?1 AND",
                vec![project_id.into()],
            ),
            None => ("WHERE", Vec::new()),
        };
        let sql = format!(
            "SELECT {SELECT_COLS} FROM timesheets ts {join} ts.end_time IS NOT NULL
             ORDER BY ts.end_time DESC, ts.rowid DESC LIMIT 1"
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_timesheet(&row)?)),
            None => Ok(None),
        }
    }

    /// Every timesheet of a project joined with its task, issue and sprint.
    ///
    /// Rows come grouped by task in creation order, each task's timesheets
    /// oldest first.
    pub async fn project_timesheets(
        &self,
        project_id: &str,
    ) -> Result<Vec<TimesheetRecord>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT ts.id, ts.task_id, t.title, ts.start_time, ts.end_time,
                        i.number, i.title, s.number
                 FROM timesheets ts
                 JOIN tasks t ON t.id = ts.task_id
                 LEFT JOIN issues i ON i.id = t.issue_id
                 LEFT JOIN sprints s ON s.id = i.sprint_id
                 WHERE t.project_id = ?1
                 ORDER BY t.created_at, t.rowid, ts.start_time, ts.rowid",
                [project_id],
            )
            .await?;
        let mut records = Vec::new();
        while let Some(row) = rows.next().await? {
            records.push(row_to_record(&row)?);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::repos::audit::AuditFilter;
    use crate::repos::issue::NewIssue;
    use crate::repos::task::NewTask;
    use crate::test_support::helpers::{seed, test_service};

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, hour, minute, 0).unwrap()
    }

    #[tokio::test]
    async fn start_and_stop() {
        let svc = test_service().await;
        let seeded = seed(&svc).await;
        let task = svc
            .create_task(&NewTask::new("T", &seeded.project.id))
            .await
            .unwrap();

        let started = svc.start_timesheet(&task.id, at(2, 9, 0)).await.unwrap();
        assert!(started.id.starts_with("tms-"));
        assert!(started.is_running());
        assert_eq!(svc.running_timesheets().await.unwrap().len(), 1);

        let stopped = svc.stop_timesheet(&task.id, at(2, 10, 30)).await.unwrap();
        assert_eq!(stopped.id, started.id);
        assert_eq!(stopped.duration(), Duration::minutes(90));
        assert!(svc.running_timesheets().await.unwrap().is_empty());

        let fetched = svc.get_timesheet(&started.id).await.unwrap();
        assert_eq!(fetched.end_time, Some(at(2, 10, 30)));

        let audit = svc
            .query_audit(&AuditFilter {
                entity_id: Some(started.id.clone()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(audit.len(), 2);
    }

    #[tokio::test]
    async fn second_running_timer_is_rejected() {
        let svc = test_service().await;
        let seeded = seed(&svc).await;
        let task = svc
            .create_task(&NewTask::new("T", &seeded.project.id))
            .await
            .unwrap();
        svc.start_timesheet(&task.id, at(2, 9, 0)).await.unwrap();
        let result = svc.start_timesheet(&task.id, at(2, 9, 5)).await;
        assert!(matches!(result, Err(DatabaseError::InvalidState(_))));
    }

    #[tokio::test]
    async fn stop_without_running_timer() {
        let svc = test_service().await;
        let seeded = seed(&svc).await;
        let task = svc
            .create_task(&NewTask::new("T", &seeded.project.id))
            .await
            .unwrap();
        let result = svc.stop_timesheet(&task.id, at(2, 9, 0)).await;
        assert!(matches!(result, Err(DatabaseError::InvalidState(_))));
    }

    #[tokio::test]
    async fn stop_before_start_is_rejected() {
        let svc = test_service().await;
        let seeded = seed(&svc).await;
        let task = svc
            .create_task(&NewTask::new("T", &seeded.project.id))
            .await
            .unwrap();
        svc.start_timesheet(&task.id, at(2, 9, 0)).await.unwrap();
        let result = svc.stop_timesheet(&task.id, at(2, 8, 0)).await;
        assert!(matches!(result, Err(DatabaseError::InvalidState(_))));
    }

    #[tokio::test]
    async fn start_on_missing_task() {
        let svc = test_service().await;
        let result = svc.start_timesheet("tsk-missing", at(2, 9, 0)).await;
        assert!(matches!(result, Err(DatabaseError::NoResult)));
    }

    #[tokio::test]
    async fn latest_timesheet_is_scoped_to_project() {
        let svc = test_service().await;
        let seeded = seed(&svc).await;
        let other = svc
            .create_project(&seeded.customer.id, "other", None)
            .await
            .unwrap();
        let mine = svc
            .create_task(&NewTask::new("mine", &seeded.project.id))
            .await
            .unwrap();
        let theirs = svc
            .create_task(&NewTask::new("theirs", &other.id))
            .await
            .unwrap();

        assert!(svc.latest_timesheet(None).await.unwrap().is_none());

        svc.start_timesheet(&mine.id, at(2, 9, 0)).await.unwrap();
        svc.stop_timesheet(&mine.id, at(2, 10, 0)).await.unwrap();
        svc.start_timesheet(&theirs.id, at(2, 10, 0)).await.unwrap();
        svc.stop_timesheet(&theirs.id, at(2, 11, 0)).await.unwrap();
        // Running timers never count as latest.
        svc.start_timesheet(&mine.id, at(2, 12, 0)).await.unwrap();

        let latest = svc
            .latest_timesheet(Some(&seeded.project.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(latest.end_time, Some(at(2, 10, 0)));

        let global = svc.latest_timesheet(None).await.unwrap().unwrap();
        assert_eq!(global.task_id, theirs.id);
    }

    #[tokio::test]
    async fn list_timesheets_newest_first() {
        let svc = test_service().await;
        let seeded = seed(&svc).await;
        let task = svc
            .create_task(&NewTask::new("T", &seeded.project.id))
            .await
            .unwrap();
        for hour in [9, 11, 14] {
            svc.start_timesheet(&task.id, at(2, hour, 0)).await.unwrap();
            svc.stop_timesheet(&task.id, at(2, hour, 30)).await.unwrap();
        }

        let sheets = svc.task_timesheets(&task.id).await.unwrap();
        let starts: Vec<u32> = sheets
            .iter()
            .map(|t| chrono::Timelike::hour(&t.start_time))
            .collect();
        assert_eq!(starts, vec![14, 11, 9]);

        let limited = svc
            .list_timesheets(&TimesheetFilter {
                limit: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[tokio::test]
    async fn project_timesheets_join_issue_and_sprint() {
        let svc = test_service().await;
        let seeded = seed(&svc).await;
        let issue = svc
            .create_issue(&NewIssue {
                number: 42,
                title: "Export".into(),
                sprint_id: seeded.sprint.id.clone(),
                ..Default::default()
            })
            .await
            .unwrap();
        let with_issue = svc.create_task_for_issue(&issue.id).await.unwrap();
        let plain = svc
            .create_task(&NewTask::new("Meeting", &seeded.project.id))
            .await
            .unwrap();

        svc.start_timesheet(&plain.id, at(2, 8, 0)).await.unwrap();
        svc.stop_timesheet(&plain.id, at(2, 8, 30)).await.unwrap();
        svc.start_timesheet(&with_issue.id, at(2, 14, 0)).await.unwrap();
        svc.stop_timesheet(&with_issue.id, at(2, 15, 0)).await.unwrap();
        svc.start_timesheet(&with_issue.id, at(2, 9, 0)).await.unwrap();
        svc.stop_timesheet(&with_issue.id, at(2, 10, 0)).await.unwrap();

        let records = svc.project_timesheets(&seeded.project.id).await.unwrap();
        assert_eq!(records.len(), 3);

        // Task order first, then start time within each task.
        assert_eq!(records[0].task_id, with_issue.id);
        assert_eq!(records[0].start_time, at(2, 9, 0));
        assert_eq!(records[0].issue_number, Some(42));
        assert_eq!(records[0].issue_title.as_deref(), Some("Export"));
        assert_eq!(records[0].sprint_number, Some(1));
        assert_eq!(records[1].start_time, at(2, 14, 0));

        assert_eq!(records[2].task_title, "Meeting");
        assert_eq!(records[2].issue_number, None);
        assert_eq!(records[2].sprint_number, None);
    }
}
