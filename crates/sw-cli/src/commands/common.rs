//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use sw_core::{Config, DirSource};
use sw_db::SqliteBackend;
use sw_migrate::{Migrator, MigratorOptions};

use crate::cli::GlobalArgs;

/// Configuration after applying command-line overrides.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) config: Config,
    pub(crate) migrations_dir: PathBuf,
    pub(crate) database: String,
}

impl Settings {
    /// Load the project config and apply `--migrations` / `--database`.
    ///
    /// A project without a config file runs on defaults; an explicit
    /// `--config` that does not exist is an error.
    pub(crate) fn resolve(global: &GlobalArgs) -> Result<Self> {
        let root = Path::new(&global.project_dir);
        let config = match &global.config {
            Some(path) => Config::load(Path::new(path))
                .with_context(|| format!("Failed to load config {path}"))?,
            None if has_config_file(root) => {
                Config::load_from_dir(root).context("Failed to load project config")?
            }
            None => {
                log::debug!("No stepwise.yml in {}; using defaults", root.display());
                Config::default()
            }
        };

        let migrations_dir = match &global.migrations {
            Some(dir) => PathBuf::from(dir),
            None => config.migrations_path_absolute(root),
        };
        let database = match &global.database {
            Some(path) => path.clone(),
            None => config.database_path_absolute(root),
        };

        Ok(Self {
            config,
            migrations_dir,
            database,
        })
    }

    pub(crate) fn source(&self) -> DirSource {
        DirSource::new(&self.migrations_dir)
    }

    pub(crate) fn options(&self) -> MigratorOptions {
        MigratorOptions::from(&self.config)
    }

    pub(crate) fn open_database(&self) -> Result<SqliteBackend> {
        log::debug!(
            "Opening {} database {}",
            self.config.database.db_type,
            self.database
        );
        SqliteBackend::new(&self.database)
            .with_context(|| format!("Failed to open database {}", self.database))
    }
}

fn has_config_file(root: &Path) -> bool {
    root.join("stepwise.yml").exists() || root.join("stepwise.yaml").exists()
}

/// Build a migrator over the configured migrations directory.
pub(crate) fn build_migrator<'a>(
    settings: &Settings,
    db: &'a SqliteBackend,
) -> Result<Migrator<'a, SqliteBackend>> {
    Migrator::with_options(db, &settings.source(), settings.options()).with_context(|| {
        format!(
            "Failed to load migrations from {}",
            settings.migrations_dir.display()
        )
    })
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
