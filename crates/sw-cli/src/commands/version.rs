//! Version command implementation

use anyhow::{Context, Result};
use sw_migrate::VersionStore;

use crate::cli::GlobalArgs;
use crate::commands::common::Settings;

/// Execute the version command
///
/// Reads the version table only; the migrations directory is not consulted.
pub(crate) fn execute(global: &GlobalArgs) -> Result<()> {
    let settings = Settings::resolve(global)?;
    let db = settings.open_database()?;
    let store = VersionStore::new(settings.config.version_table.as_str())?;

    let version = store
        .current_version(&db)
        .context("Failed to read schema version")?;
    println!("{version}");
    Ok(())
}
