//! Persisted schema version.
//!
//! The version table holds one row per applied migration. Its highest
//! `version` is the database's current schema version; a missing or empty
//! table means version 0.

use sw_core::{validate_table_name, CoreResult, DEFAULT_VERSION_TABLE};
use sw_db::{Database, DbError, DbResult};

/// Reads and records applied migration versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionStore {
    table: String,
}

impl Default for VersionStore {
    fn default() -> Self {
        Self {
            table: DEFAULT_VERSION_TABLE.to_string(),
        }
    }
}

impl VersionStore {
    /// Create a store backed by `table`, which must be a plain or
    /// schema-qualified identifier.
    pub fn new(table: impl Into<String>) -> CoreResult<Self> {
        let table = table.into();
        validate_table_name(&table)?;
        Ok(Self { table })
    }

    /// Name of the version table.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Create the version table if it does not exist.
    pub fn ensure_table<D: Database + ?Sized>(&self, db: &D) -> DbResult<()> {
        db.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {} (
                version INTEGER PRIMARY KEY,
                applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            )",
            self.table
        ))
    }

    /// Highest recorded version, creating the table on first use.
    pub fn current_version<D: Database + ?Sized>(&self, db: &D) -> DbResult<u64> {
        match self.query_max(db) {
            Err(DbError::TableNotFound(_)) => {
                log::info!("Creating version table {}", self.table);
                self.ensure_table(db)?;
                Ok(0)
            }
            other => other,
        }
    }

    /// Insert `version` into the version table.
    ///
    /// Callers run this inside the transaction that applied the migration.
    pub fn record_applied<D: Database + ?Sized>(&self, db: &D, version: u64) -> DbResult<()> {
        db.execute(&format!(
            "INSERT INTO {} (version) VALUES ({version})",
            self.table
        ))?;
        Ok(())
    }

    fn query_max<D: Database + ?Sized>(&self, db: &D) -> DbResult<u64> {
        let max = db
            .query_i64(&format!(
                "SELECT COALESCE(MAX(version), 0) FROM {}",
                self.table
            ))?
            .unwrap_or(0);
        u64::try_from(max).map_err(|_| {
            DbError::Internal(format!(
                "version table {} holds negative version {max}",
                self.table
            ))
        })
    }
}

#[cfg(test)]
#[path = "version_store_test.rs"]
mod tests;
