//! Cross-cutting error types for tempo.
//!
//! Domain-specific errors (`DatabaseError`, `GitlabError`, `ExportError`) live in
//! their own crates. They converge into `anyhow` inside `tempo-cli`.

use thiserror::Error;

/// Errors that can be raised by any tempo crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A status transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// Data failed validation (format, length, range).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
