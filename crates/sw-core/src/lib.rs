//! sw-core - Core library for Stepwise
//!
//! This crate provides the migration data model, the migration source
//! abstraction, the source reader and statement splitter, migration set
//! validation, and configuration parsing shared by the other Stepwise crates.

pub mod config;
pub mod error;
pub mod migration;
pub mod reader;
pub mod source;
pub mod splitter;
pub mod validator;

pub use config::{validate_table_name, Config, DatabaseConfig, DbType, Dialect, DEFAULT_VERSION_TABLE};
pub use error::{CoreError, CoreResult};
pub use migration::{Migration, MigrationSet};
pub use reader::{load_migrations, parse_filename};
pub use source::{DirSource, EntryKind, MemorySource, MigrationSource, SourceEntry};
pub use splitter::{split_statements, SplitError};
pub use validator::validate_migrations;
