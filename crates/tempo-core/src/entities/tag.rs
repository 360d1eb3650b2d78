use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A free-form tag attached to tasks.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Tag {
    pub id: String,
    pub tag: String,
}
