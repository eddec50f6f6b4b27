//! sw-db - Database abstraction layer for Stepwise
//!
//! This crate provides the `Database` trait the migration engine runs
//! against, a transaction helper, and a SQLite implementation.

pub mod error;
pub mod sqlite;
pub mod traits;
pub mod transaction;

pub use error::{DbError, DbResult};
pub use sqlite::SqliteBackend;
pub use traits::Database;
pub use transaction::with_transaction;
