//! Milestone repository: mirrored from the issue tracker.

use chrono::Utc;

use tempo_core::entities::Milestone;
use tempo_core::enums::{AuditAction, EntityType};
use tempo_core::ids::PREFIX_MILESTONE;

use crate::error::DatabaseError;
use crate::helpers::{get_u64, sql_int};
use crate::service::TempoService;

const SELECT_COLS: &str = "id, original_id, title, project_id";

fn row_to_milestone(row: &libsql::Row) -> Result<Milestone, DatabaseError> {
    Ok(Milestone {
        id: row.get(0)?,
        original_id: get_u64(row, 1)?,
        title: row.get(2)?,
        project_id: row.get(3)?,
    })
}

impl TempoService {
    pub async fn create_milestone(
        &self,
        project_id: &str,
        original_id: u64,
        title: &str,
    ) -> Result<Milestone, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_MILESTONE).await?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO milestones (id, original_id, title, project_id) VALUES (?1, ?2, ?3, ?4)",
                libsql::params![id.as_str(), sql_int(original_id)?, title, project_id],
            )
            .await
            .map_err(DatabaseError::from_write)?;

        self.record_audit(EntityType::Milestone, &id, AuditAction::Created, None, now)
            .await?;

        Ok(Milestone {
            id,
            original_id,
            title: title.to_string(),
            project_id: project_id.to_string(),
        })
    }

    pub async fn get_milestone(&self, id: &str) -> Result<Milestone, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM milestones WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_milestone(&row)
    }

    pub async fn get_milestone_by_title(
        &self,
        project_id: &str,
        title: &str,
    ) -> Result<Option<Milestone>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM milestones WHERE project_id = ?1 AND title = ?2"),
                libsql::params![project_id, title],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_milestone(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn get_milestone_by_original_id(
        &self,
        project_id: &str,
        original_id: u64,
    ) -> Result<Option<Milestone>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM milestones WHERE project_id = ?1 AND original_id = ?2"
                ),
                libsql::params![project_id, sql_int(original_id)?],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_milestone(&row)?)),
            None => Ok(None),
        }
    }

    /// Milestones of a project, ordered by title.
    pub async fn list_milestones(&self, project_id: &str) -> Result<Vec<Milestone>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM milestones WHERE project_id = ?1 ORDER BY title"),
                [project_id],
            )
            .await?;
        let mut milestones = Vec::new();
        while let Some(row) = rows.next().await? {
            milestones.push(row_to_milestone(&row)?);
        }
        Ok(milestones)
    }

    /// Insert or rename the milestone with this repository ID.
    ///
    /// Returns the stored milestone and whether it was newly created.
    pub async fn upsert_milestone(
        &self,
        project_id: &str,
        original_id: u64,
        title: &str,
    ) -> Result<(Milestone, bool), DatabaseError> {
        let Some(existing) = self
            .get_milestone_by_original_id(project_id, original_id)
            .await?
        else {
            let created = self.create_milestone(project_id, original_id, title).await?;
            return Ok((created, true));
        };
        if existing.title == title {
            return Ok((existing, false));
        }

        let now = Utc::now();
        self.db()
            .conn()
            .execute(
                "UPDATE milestones SET title = ?1 WHERE id = ?2",
                libsql::params![title, existing.id.as_str()],
            )
            .await
            .map_err(DatabaseError::from_write)?;
        self.record_audit(
            EntityType::Milestone,
            &existing.id,
            AuditAction::Updated,
            Some(serde_json::json!({ "title": title })),
            now,
        )
        .await?;
        Ok((
            Milestone {
                title: title.to_string(),
                ..existing
            },
            false,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{seed, test_service};

    #[tokio::test]
    async fn create_and_lookup() {
        let svc = test_service().await;
        let seeded = seed(&svc).await;
        let milestone = svc
            .create_milestone(&seeded.project.id, 17, "v1.2")
            .await
            .unwrap();

        assert!(milestone.id.starts_with("mst-"));
        assert_eq!(svc.get_milestone(&milestone.id).await.unwrap(), milestone);
        let by_title = svc
            .get_milestone_by_title(&seeded.project.id, "v1.2")
            .await
            .unwrap();
        assert_eq!(by_title, Some(milestone));
    }

    #[tokio::test]
    async fn title_is_unique_across_projects() {
        let svc = test_service().await;
        let seeded = seed(&svc).await;
        svc.create_milestone(&seeded.project.id, 1, "v1").await.unwrap();
        let result = svc.create_milestone(&seeded.project.id, 2, "v1").await;
        assert!(matches!(result, Err(DatabaseError::Constraint(_))));

        let other = svc
            .create_project(&seeded.customer.id, "other", None)
            .await
            .unwrap();
        let result = svc.create_milestone(&other.id, 1, "v1").await;
        assert!(matches!(result, Err(DatabaseError::Constraint(_))));
        svc.create_milestone(&other.id, 1, "v2").await.unwrap();
    }

    #[tokio::test]
    async fn upsert_creates_then_renames() {
        let svc = test_service().await;
        let seeded = seed(&svc).await;

        let (first, created) = svc
            .upsert_milestone(&seeded.project.id, 5, "Sprint goal")
            .await
            .unwrap();
        assert!(created);

        let (same, created) = svc
            .upsert_milestone(&seeded.project.id, 5, "Sprint goal")
            .await
            .unwrap();
        assert!(!created);
        assert_eq!(same, first);

        let (renamed, created) = svc
            .upsert_milestone(&seeded.project.id, 5, "Release 2")
            .await
            .unwrap();
        assert!(!created);
        assert_eq!(renamed.id, first.id);
        assert_eq!(svc.get_milestone(&first.id).await.unwrap().title, "Release 2");
    }

    #[tokio::test]
    async fn list_is_ordered_by_title() {
        let svc = test_service().await;
        let seeded = seed(&svc).await;
        svc.create_milestone(&seeded.project.id, 2, "v2").await.unwrap();
        svc.create_milestone(&seeded.project.id, 1, "v1").await.unwrap();
        let titles: Vec<String> = svc
            .list_milestones(&seeded.project.id)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(titles, vec!["v1", "v2"]);
    }
}
