use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A repository milestone. Changelogs are written per milestone.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Milestone {
    pub id: String,
    /// Milestone ID on the repository.
    pub original_id: u64,
    pub title: String,
    pub project_id: String,
}
