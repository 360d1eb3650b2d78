//! Label repository.

use chrono::Utc;

use tempo_core::entities::{DEFAULT_LABEL_COLOR, Label, is_valid_color};
use tempo_core::enums::{AuditAction, EntityType};
use tempo_core::ids::PREFIX_LABEL;

use crate::error::DatabaseError;
use crate::service::TempoService;

const SELECT_COLS: &str = "id, label, color";

pub(crate) fn row_to_label(row: &libsql::Row) -> Result<Label, DatabaseError> {
    Ok(Label {
        id: row.get(0)?,
        label: row.get(1)?,
        color: row.get(2)?,
    })
}

impl TempoService {
    /// Create a label. `color` defaults to white and must be `#RRGGBB`.
    pub async fn create_label(
        &self,
        label: &str,
        color: Option<&str>,
    ) -> Result<Label, DatabaseError> {
        let color = color.unwrap_or(DEFAULT_LABEL_COLOR);
        if !is_valid_color(color) {
            return Err(DatabaseError::InvalidState(format!(
                "label color '{color}' is not #RRGGBB"
            )));
        }

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_LABEL).await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO labels (id, label, color) VALUES (?1, ?2, ?3)",
                libsql::params![id.as_str(), label, color],
            )
            .await
            .map_err(DatabaseError::from_write)?;

        self.record_audit(EntityType::Label, &id, AuditAction::Created, None, now)
            .await?;

        Ok(Label {
            id,
            label: label.to_string(),
            color: color.to_string(),
        })
    }

    pub async fn get_label_by_name(&self, label: &str) -> Result<Option<Label>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM labels WHERE label = ?1"),
                [label],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_label(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn list_labels(&self) -> Result<Vec<Label>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM labels ORDER BY label"), ())
            .await?;
        let mut labels = Vec::new();
        while let Some(row) = rows.next().await? {
            labels.push(row_to_label(&row)?);
        }
        Ok(labels)
    }

    /// The existing labels among `names`, ordered by label. Unknown names are ignored.
    pub async fn find_labels(&self, names: &[String]) -> Result<Vec<Label>, DatabaseError> {
        if names.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders: Vec<String> = (1..=names.len()).map(|i| format!("?{i}")).collect();
        let sql = format!(
            "SELECT {SELECT_COLS} FROM labels WHERE label IN ({}) ORDER BY label",
            placeholders.join(", ")
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(names.iter().cloned()))
            .await?;
        let mut labels = Vec::new();
        while let Some(row) = rows.next().await? {
            labels.push(row_to_label(&row)?);
        }
        Ok(labels)
    }

    /// Return the label named `label`, creating it when missing.
    ///
    /// An existing label keeps its color. The flag reports whether it was created.
    pub async fn ensure_label(
        &self,
        label: &str,
        color: Option<&str>,
    ) -> Result<(Label, bool), DatabaseError> {
        if let Some(existing) = self.get_label_by_name(label).await? {
            return Ok((existing, false));
        }
        Ok((self.create_label(label, color).await?, true))
    }
}
