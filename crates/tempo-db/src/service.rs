//! Service layer orchestrating database mutations with the audit trail.
//!
//! `TempoService` wraps `TempoDb`. All repo methods are implemented as
//! `impl TempoService` blocks under `repos/`.

use crate::TempoDb;
use crate::error::DatabaseError;

/// Orchestrates database mutations with the audit trail.
///
/// Every mutation method executes its SQL and then appends an audit entry.
pub struct TempoService {
    db: TempoDb,
}

impl TempoService {
    /// Create a new service over a local database file, or `":memory:"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = TempoDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Create from an existing `TempoDb`.
    #[must_use]
    pub const fn from_db(db: TempoDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &TempoDb {
        &self.db
    }
}
