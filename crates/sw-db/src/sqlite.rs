//! SQLite database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// SQLite database backend
pub struct SqliteBackend {
    conn: Mutex<Connection>,
}

impl SqliteBackend {
    /// Create a new in-memory SQLite connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self::from_connection(conn))
    }

    /// Open (or create) a SQLite database file
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self::from_connection(conn))
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    /// Wrap a connection the caller has already opened and configured
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Give the connection back to the caller
    pub fn into_inner(self) -> DbResult<Connection> {
        self.conn
            .into_inner()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    /// Run `f` against the underlying connection
    pub fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> DbResult<T>) -> DbResult<T> {
        let conn = self.lock()?;
        f(&conn)
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    fn transaction_control(&self, sql: &str) -> DbResult<()> {
        self.lock()?
            .execute_batch(sql)
            .map_err(|e| DbError::TransactionError(format!("{sql} failed: {e}")))
    }
}

impl Database for SqliteBackend {
    fn execute(&self, sql: &str) -> DbResult<usize> {
        Ok(self.lock()?.execute(sql, [])?)
    }

    fn execute_batch(&self, sql: &str) -> DbResult<()> {
        Ok(self.lock()?.execute_batch(sql)?)
    }

    fn query_i64(&self, sql: &str) -> DbResult<Option<i64>> {
        let value = self
            .lock()?
            .query_row(sql, [], |row| row.get::<_, Option<i64>>(0))
            .optional()?;
        Ok(value.flatten())
    }

    fn query_count(&self, sql: &str) -> DbResult<usize> {
        let count: i64 = self
            .lock()?
            .query_row(&format!("SELECT COUNT(*) FROM ({sql})"), [], |row| {
                row.get(0)
            })?;
        usize::try_from(count).map_err(|e| DbError::Internal(e.to_string()))
    }

    fn relation_exists(&self, name: &str) -> DbResult<bool> {
        // Handle schema-qualified names
        let (schema, table) = match name.rsplit_once('.') {
            Some((schema, table)) => (schema, table),
            None => ("main", name),
        };
        let sql = format!(
            "SELECT COUNT(*) FROM \"{}\".sqlite_master WHERE type IN ('table', 'view') AND name = ?1",
            schema.replace('"', "\"\"")
        );
        let count: i64 = self
            .lock()?
            .query_row(&sql, [table], |row| row.get(0))?;
        Ok(count > 0)
    }

    fn begin(&self) -> DbResult<()> {
        self.transaction_control("BEGIN")
    }

    fn commit(&self) -> DbResult<()> {
        self.transaction_control("COMMIT")
    }

    fn rollback(&self) -> DbResult<()> {
        self.transaction_control("ROLLBACK")
    }

    fn db_type(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
#[path = "sqlite_test.rs"]
mod tests;
