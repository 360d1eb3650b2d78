//! Tag repository and task tagging.

use chrono::Utc;

use tempo_core::audit_detail::TaggedDetail;
use tempo_core::entities::Tag;
use tempo_core::enums::{AuditAction, EntityType};
use tempo_core::ids::PREFIX_TAG;

use crate::error::DatabaseError;
use crate::helpers::to_detail;
use crate::service::TempoService;

const SELECT_COLS: &str = "id, tag";

fn row_to_tag(row: &libsql::Row) -> Result<Tag, DatabaseError> {
    Ok(Tag {
        id: row.get(0)?,
        tag: row.get(1)?,
    })
}

impl TempoService {
    pub async fn create_tag(&self, tag: &str) -> Result<Tag, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_TAG).await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO tags (id, tag) VALUES (?1, ?2)",
                libsql::params![id.as_str(), tag],
            )
            .await
            .map_err(DatabaseError::from_write)?;

        self.record_audit(EntityType::Tag, &id, AuditAction::Created, None, now)
            .await?;

        Ok(Tag {
            id,
            tag: tag.to_string(),
        })
    }

    pub async fn get_tag_by_name(&self, tag: &str) -> Result<Option<Tag>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM tags WHERE tag = ?1"), [tag])
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_tag(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn list_tags(&self) -> Result<Vec<Tag>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM tags ORDER BY tag"), ())
            .await?;
        let mut tags = Vec::new();
        while let Some(row) = rows.next().await? {
            tags.push(row_to_tag(&row)?);
        }
        Ok(tags)
    }

    /// Return the tag, creating it when missing.
    pub async fn ensure_tag(&self, tag: &str) -> Result<Tag, DatabaseError> {
        if let Some(existing) = self.get_tag_by_name(tag).await? {
            return Ok(existing);
        }
        self.create_tag(tag).await
    }

    /// Attach a tag to a task, creating the tag if needed. Re-tagging is a no-op.
    pub async fn tag_task(&self, task_id: &str, tag: &str) -> Result<(), DatabaseError> {
        let tag = self.ensure_tag(tag).await?;
        let now = Utc::now();
        let inserted = self
            .db()
            .conn()
            .execute(
                "INSERT OR IGNORE INTO task_tags (task_id, tag_id) VALUES (?1, ?2)",
                libsql::params![task_id, tag.id.as_str()],
            )
            .await
            .map_err(DatabaseError::from_write)?;
        if inserted == 0 {
            return Ok(());
        }
        self.record_audit(
            EntityType::Task,
            task_id,
            AuditAction::Tagged,
            Some(to_detail(&TaggedDetail { tag: tag.tag })?),
            now,
        )
        .await
    }

    /// Detach a tag from a task. Returns whether it was attached.
    pub async fn untag_task(&self, task_id: &str, tag: &str) -> Result<bool, DatabaseError> {
        let now = Utc::now();
        let removed = self
            .db()
            .conn()
            .execute(
                "DELETE FROM task_tags WHERE task_id = ?1
                 AND tag_id = (SELECT id FROM tags WHERE tag = ?2)",
                libsql::params![task_id, tag],
            )
            .await?;
        if removed == 0 {
            return Ok(false);
        }
        self.record_audit(
            EntityType::Task,
            task_id,
            AuditAction::Untagged,
            Some(to_detail(&TaggedDetail { tag: tag.to_string() })?),
            now,
        )
        .await?;
        Ok(true)
    }

    /// Tag names of a task, ordered by tag.
    pub async fn task_tags(&self, task_id: &str) -> Result<Vec<String>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT t.tag FROM task_tags tt JOIN tags t ON t.id = tt.tag_id
                 WHERE tt.task_id = ?1 ORDER BY t.tag",
                [task_id],
            )
            .await?;
        let mut tags = Vec::new();
        while let Some(row) = rows.next().await? {
            tags.push(row.get::<String>(0)?);
        }
        Ok(tags)
    }
}
