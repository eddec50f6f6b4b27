//! The migration engine.
//!
//! A [`Migrator`] is built from a database handle and a migration source. Each
//! pending migration runs in its own transaction together with the insert
//! into the version table, so a failure rolls back only that migration and
//! leaves earlier ones committed.

use crate::error::{MigrateError, MigrateResult};
use crate::version_store::VersionStore;
use sw_core::{
    load_migrations, validate_migrations, Config, Dialect, Migration, MigrationSet,
    MigrationSource, DEFAULT_VERSION_TABLE,
};
use sw_db::{with_transaction, Database, DbError};

/// Engine settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigratorOptions {
    /// Table that records applied versions
    pub version_table: String,
    /// Dialect used to split migration files into statements
    pub dialect: Dialect,
}

impl Default for MigratorOptions {
    fn default() -> Self {
        Self {
            version_table: DEFAULT_VERSION_TABLE.to_string(),
            dialect: Dialect::default(),
        }
    }
}

impl From<&Config> for MigratorOptions {
    fn from(config: &Config) -> Self {
        Self {
            version_table: config.version_table.clone(),
            dialect: config.dialect,
        }
    }
}

/// Where the engine is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigratorState {
    /// Built, `migrate` not called yet
    Constructed,
    /// Last `migrate` applied everything
    Idle,
    /// Last `migrate` stopped on an error
    Failed,
}

/// Applies versioned migrations to a database.
pub struct Migrator<'a, D: Database + ?Sized> {
    db: &'a D,
    store: VersionStore,
    migrations: MigrationSet,
    current_version: u64,
    state: MigratorState,
}

impl<'a, D: Database + ?Sized> Migrator<'a, D> {
    /// Build an engine with the default version table and dialect.
    ///
    /// Reads and validates every migration in `source`, then reads the
    /// database version, creating the version table if it is missing.
    pub fn new(db: &'a D, source: &dyn MigrationSource) -> MigrateResult<Self> {
        Self::with_options(db, source, MigratorOptions::default())
    }

    /// Build an engine with explicit options.
    ///
    /// Fails with [`MigrateError::InvalidCurrentVersion`] when the database
    /// is ahead of the newest migration in `source`.
    pub fn with_options(
        db: &'a D,
        source: &dyn MigrationSource,
        options: MigratorOptions,
    ) -> MigrateResult<Self> {
        let store = VersionStore::new(options.version_table)?;
        let migrations = validate_migrations(load_migrations(source, options.dialect)?)?;

        let current_version = store.current_version(db)?;
        let last_version = migrations.last_version();
        if current_version > last_version {
            return Err(MigrateError::InvalidCurrentVersion {
                version: current_version,
                last_version,
            });
        }

        log::info!(
            "Loaded {} migration(s) from {}; {} database at version {current_version}",
            migrations.len(),
            source.describe(),
            db.db_type()
        );

        Ok(Self {
            db,
            store,
            migrations,
            current_version,
            state: MigratorState::Constructed,
        })
    }

    /// Apply every pending migration in version order.
    ///
    /// Stops at the first failure. The failing migration is rolled back,
    /// earlier ones stay committed, and calling `migrate` again resumes from
    /// the last committed version.
    pub fn migrate(&mut self) -> MigrateResult<()> {
        let result = self
            .migrations
            .pending(self.current_version)
            .iter()
            .try_for_each(|migration| {
                apply(self.db, &self.store, migration)?;
                self.current_version = migration.version();
                Ok(())
            });

        match &result {
            Ok(()) => {
                self.state = MigratorState::Idle;
                log::info!("Database is at version {}", self.current_version);
            }
            Err(e) => {
                self.state = MigratorState::Failed;
                log::debug!("Stopped at version {}: {e}", self.current_version);
            }
        }
        result
    }

    /// Query the database for its current version.
    pub fn version(&self) -> MigrateResult<u64> {
        Ok(self.store.current_version(self.db)?)
    }

    /// Version of the last migration this engine saw committed.
    pub fn current_version(&self) -> u64 {
        self.current_version
    }

    /// Newest migration version in the source, 0 when it has none.
    pub fn last_version(&self) -> u64 {
        self.migrations.last_version()
    }

    pub fn migrations(&self) -> &MigrationSet {
        &self.migrations
    }

    /// Migrations newer than [`current_version`](Self::current_version).
    pub fn pending(&self) -> &[Migration] {
        self.migrations.pending(self.current_version)
    }

    pub fn state(&self) -> MigratorState {
        self.state
    }

    pub fn version_table(&self) -> &str {
        self.store.table()
    }
}

fn apply<D: Database + ?Sized>(
    db: &D,
    store: &VersionStore,
    migration: &Migration,
) -> MigrateResult<()> {
    log::debug!("Applying migration {}", migration.filename());
    let failed = |source: DbError| MigrateError::MigrationFailed {
        version: migration.version(),
        name: migration.name().to_string(),
        source,
    };

    with_transaction(db, |db| {
        for statement in migration.statements() {
            log::debug!("Executing: {statement}");
            db.execute_batch(statement).map_err(failed)?;
        }
        store
            .record_applied(db, migration.version())
            .map_err(failed)
    })
}

#[cfg(test)]
#[path = "migrator_test.rs"]
mod tests;
