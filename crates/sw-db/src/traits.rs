//! Database trait definition

use crate::error::DbResult;

/// Database abstraction the migration engine runs against.
///
/// Methods take `&self`; implementations guard their connection internally so
/// a backend can be shared by reference with the host application. Calls are
/// synchronous and may block for the duration of the statement.
pub trait Database {
    /// Execute a single statement, returns affected rows
    fn execute(&self, sql: &str) -> DbResult<usize>;

    /// Execute one or more statements
    fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// First column of the first row as an integer, `None` when there is no
    /// row or the value is NULL
    fn query_i64(&self, sql: &str) -> DbResult<Option<i64>>;

    /// Execute query returning row count
    fn query_count(&self, sql: &str) -> DbResult<usize>;

    /// Check if a table or view exists
    fn relation_exists(&self, name: &str) -> DbResult<bool>;

    /// Start a transaction
    fn begin(&self) -> DbResult<()>;

    /// Commit the open transaction
    fn commit(&self) -> DbResult<()>;

    /// Roll back the open transaction
    fn rollback(&self) -> DbResult<()>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
