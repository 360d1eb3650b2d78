use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Status;

/// A unit of work mirrored from the issue tracker.
///
/// Labels are a many-to-many relation stored in `issue_labels`; the owning
/// project is reached through the sprint.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Issue {
    pub id: String,
    /// Issue number on the tracker (GitLab `iid`).
    pub number: u64,
    pub title: String,
    pub description: Option<String>,
    pub milestone_id: Option<String>,
    pub sprint_id: String,
    pub url: Option<String>,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Issue {
    /// `"{number} - {title}"`, the form used in notes and listings.
    #[must_use]
    pub fn display_title(&self) -> String {
        format!("{} - {}", self.number, self.title)
    }
}
