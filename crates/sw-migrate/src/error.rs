//! Error types for sw-migrate

use sw_core::CoreError;
use sw_db::DbError;
use thiserror::Error;

/// Migration engine errors
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Reading or validating the migration source failed
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The database rejected an engine query
    #[error(transparent)]
    Db(#[from] DbError),

    /// M006: The database records a version no migration accounts for
    #[error("[M006] Invalid current version {version}: newest migration is {last_version}")]
    InvalidCurrentVersion { version: u64, last_version: u64 },

    /// M007: A migration failed and was rolled back
    #[error("[M007] Migration {version}_{name} failed: {source}")]
    MigrationFailed {
        version: u64,
        name: String,
        #[source]
        source: DbError,
    },
}

/// Result type alias for MigrateError
pub type MigrateResult<T> = Result<T, MigrateError>;

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
