//! Typed audit detail payloads.
//!
//! Each audit action can carry a structured `detail` JSON blob. These types
//! describe the most common detail shapes.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Detail for `AuditAction::StatusChanged`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StatusChangedDetail {
    pub from: String,
    pub to: String,
    pub reason: Option<String>,
}

/// Detail for `AuditAction::Tagged`, `AuditAction::Untagged` and `AuditAction::Labeled`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaggedDetail {
    pub tag: String,
}

/// Detail for `AuditAction::TimerStarted` and `AuditAction::TimerStopped`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TimerDetail {
    pub task_id: String,
    pub at: String,
}

/// Detail for `AuditAction::Synced`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SyncedDetail {
    pub source: String,
    pub created: u32,
    pub updated: u32,
}
