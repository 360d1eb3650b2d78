//! Sprint repository.

use chrono::Utc;

use tempo_core::entities::Sprint;
use tempo_core::enums::{AuditAction, EntityType};
use tempo_core::ids::PREFIX_SPRINT;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_u16, parse_datetime};
use crate::service::TempoService;

const SELECT_COLS: &str = "id, number, project_id, created_at, updated_at";

fn row_to_sprint(row: &libsql::Row) -> Result<Sprint, DatabaseError> {
    Ok(Sprint {
        id: row.get(0)?,
        number: get_opt_u16(row, 1)?,
        project_id: row.get(2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
        updated_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl TempoService {
    pub async fn create_sprint(
        &self,
        project_id: &str,
        number: Option<u16>,
    ) -> Result<Sprint, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_SPRINT).await?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO sprints (id, number, project_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![
                    id.as_str(),
                    number.map(i64::from),
                    project_id,
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await
            .map_err(DatabaseError::from_write)?;

        self.record_audit(EntityType::Sprint, &id, AuditAction::Created, None, now)
            .await?;

        Ok(Sprint {
            id,
            number,
            project_id: project_id.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_sprint(&self, id: &str) -> Result<Sprint, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM sprints WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_sprint(&row)
    }

    /// Sprints of a project, oldest first.
    pub async fn list_sprints(&self, project_id: &str) -> Result<Vec<Sprint>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM sprints WHERE project_id = ?1 ORDER BY created_at, rowid"
                ),
                [project_id],
            )
            .await?;
        let mut sprints = Vec::new();
        while let Some(row) = rows.next().await? {
            sprints.push(row_to_sprint(&row)?);
        }
        Ok(sprints)
    }

    /// The newest sprint of a project. New issues are filed here.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` when the project has no sprint.
    pub async fn last_sprint(&self, project_id: &str) -> Result<Sprint, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM sprints WHERE project_id = ?1
                     ORDER BY created_at DESC, rowid DESC LIMIT 1"
                ),
                [project_id],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| {
            DatabaseError::InvalidState(format!("project {project_id} has no sprint"))
        })?;
        row_to_sprint(&row)
    }
}
