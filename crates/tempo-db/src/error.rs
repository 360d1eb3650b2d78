//! Database error types for tempo-db.

use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (bad transition, no running timer, bad input).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A uniqueness or foreign-key rule was violated.
    #[error("Constraint violated: {0}")]
    Constraint(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// Re-classify a libSQL error raised by a UNIQUE / FOREIGN KEY / CHECK
    /// violation as `Constraint`; other errors pass through unchanged.
    #[must_use]
    pub fn from_write(err: libsql::Error) -> Self {
        let message = err.to_string();
        if message.contains("constraint failed") {
            Self::Constraint(message)
        } else {
            Self::LibSql(err)
        }
    }
}
