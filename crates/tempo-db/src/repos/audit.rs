//! Audit trail repository.
//!
//! Append-only audit entries recording every mutation, with dynamic filtering.

use chrono::{DateTime, Utc};

use tempo_core::audit_detail::SyncedDetail;
use tempo_core::entities::AuditEntry;
use tempo_core::enums::{AuditAction, EntityType};
use tempo_core::ids::PREFIX_AUDIT;

use crate::error::DatabaseError;
use crate::helpers::{
    get_opt_string, parse_datetime, parse_enum, parse_optional_json, to_detail,
};
use crate::service::TempoService;

/// Filter criteria for audit queries.
#[derive(Debug, Default)]
pub struct AuditFilter {
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<String>,
    pub action: Option<AuditAction>,
    pub limit: Option<u32>,
}

impl TempoService {
    /// Append an audit entry.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn append_audit(&self, entry: &AuditEntry) -> Result<(), DatabaseError> {
        self.db()
            .conn()
            .execute(
                "INSERT INTO audit_trail (id, entity_type, entity_id, action, detail, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    entry.id.as_str(),
                    entry.entity_type.as_str(),
                    entry.entity_id.as_str(),
                    entry.action.as_str(),
                    entry.detail.as_ref().map(ToString::to_string),
                    entry.created_at.to_rfc3339()
                ],
            )
            .await?;
        Ok(())
    }

    /// Build and append an audit entry for a mutation that just happened.
    pub(crate) async fn record_audit(
        &self,
        entity_type: EntityType,
        entity_id: &str,
        action: AuditAction,
        detail: Option<serde_json::Value>,
        at: DateTime<Utc>,
    ) -> Result<(), DatabaseError> {
        let id = self.db().generate_id(PREFIX_AUDIT).await?;
        tracing::debug!(%entity_type, entity_id, %action, "audit");
        self.append_audit(&AuditEntry {
            id,
            entity_type,
            entity_id: entity_id.to_string(),
            action,
            detail,
            created_at: at,
        })
        .await
    }

    /// Record a mirror run against a project.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn record_sync(
        &self,
        entity_type: EntityType,
        entity_id: &str,
        detail: &SyncedDetail,
    ) -> Result<(), DatabaseError> {
        self.record_audit(
            entity_type,
            entity_id,
            AuditAction::Synced,
            Some(to_detail(detail)?),
            Utc::now(),
        )
        .await
    }

    /// Query audit entries with optional filters, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn query_audit(&self, filter: &AuditFilter) -> Result<Vec<AuditEntry>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(et) = filter.entity_type {
            params.push(libsql::Value::Text(et.as_str().to_string()));
            conditions.push(format!("entity_type = ?{}", params.len()));
        }
        if let Some(ref eid) = filter.entity_id {
            params.push(libsql::Value::Text(eid.clone()));
            conditions.push(format!("entity_id = ?{}", params.len()));
        }
        if let Some(action) = filter.action {
            params.push(libsql::Value::Text(action.as_str().to_string()));
            conditions.push(format!("action = ?{}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let limit = filter.limit.unwrap_or(100);
        let sql = format!(
            "SELECT id, entity_type, entity_id, action, detail, created_at
             FROM audit_trail {where_clause}
             ORDER BY created_at DESC, rowid DESC LIMIT {limit}"
        );

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut entries = Vec::new();

        while let Some(row) = rows.next().await? {
            entries.push(AuditEntry {
                id: row.get::<String>(0)?,
                entity_type: parse_enum(&row.get::<String>(1)?)?,
                entity_id: row.get::<String>(2)?,
                action: parse_enum(&row.get::<String>(3)?)?,
                detail: parse_optional_json(get_opt_string(&row, 4)?.as_deref())?,
                created_at: parse_datetime(&row.get::<String>(5)?)?,
            });
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::test_service;

    #[tokio::test]
    async fn append_and_query_roundtrip() {
        let svc = test_service().await;
        let now = Utc::now();
        svc.append_audit(&AuditEntry {
            id: "aud-00000001".into(),
            entity_type: EntityType::Task,
            entity_id: "tsk-00000001".into(),
            action: AuditAction::TimerStarted,
            detail: Some(serde_json::json!({"task_id": "tsk-00000001", "at": "09:00"})),
            created_at: now,
        })
        .await
        .unwrap();

        let entries = svc.query_audit(&AuditFilter::default()).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::TimerStarted);
        assert_eq!(entries[0].detail.as_ref().unwrap()["at"], "09:00");
    }

    #[tokio::test]
    async fn sync_runs_are_recorded() {
        let svc = test_service().await;
        svc.record_sync(
            EntityType::Project,
            "prj-1",
            &SyncedDetail {
                source: "gitlab_issues".into(),
                created: 2,
                updated: 1,
            },
        )
        .await
        .unwrap();

        let entries = svc
            .query_audit(&AuditFilter {
                action: Some(AuditAction::Synced),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entity_id, "prj-1");
        assert_eq!(entries[0].detail.as_ref().unwrap()["created"], 2);
    }

    #[tokio::test]
    async fn filters_combine() {
        let svc = test_service().await;
        let now = Utc::now();
        svc.record_audit(EntityType::Task, "tsk-1", AuditAction::Created, None, now)
            .await
            .unwrap();
        svc.record_audit(EntityType::Task, "tsk-1", AuditAction::Updated, None, now)
            .await
            .unwrap();
        svc.record_audit(EntityType::Issue, "iss-1", AuditAction::Created, None, now)
            .await
            .unwrap();

        let created = svc
            .query_audit(&AuditFilter {
                action: Some(AuditAction::Created),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(created.len(), 2);

        let task_created = svc
            .query_audit(&AuditFilter {
                entity_type: Some(EntityType::Task),
                entity_id: Some("tsk-1".into()),
                action: Some(AuditAction::Created),
                limit: None,
            })
            .await
            .unwrap();
        assert_eq!(task_created.len(), 1);

        let limited = svc
            .query_audit(&AuditFilter {
                limit: Some(1),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].entity_id, "iss-1");
    }
}
