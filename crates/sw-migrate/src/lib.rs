//! sw-migrate - Migration engine for Stepwise
//!
//! Reads a migration source, validates it, and brings a database up to the
//! newest migration one transaction at a time. Applied versions are recorded
//! in a version table that the engine creates on first use.

pub mod error;
pub mod migrator;
pub mod version_store;

pub use error::{MigrateError, MigrateResult};
pub use migrator::{Migrator, MigratorOptions, MigratorState};
pub use version_store::VersionStore;
