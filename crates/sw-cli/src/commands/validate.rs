//! Validate command implementation

use anyhow::{Context, Result};
use sw_core::{load_migrations, validate_migrations};

use crate::cli::GlobalArgs;
use crate::commands::common::Settings;

/// Execute the validate command
pub(crate) fn execute(global: &GlobalArgs) -> Result<()> {
    let settings = Settings::resolve(global)?;
    let source = settings.source();

    let migrations = load_migrations(&source, settings.config.dialect)
        .and_then(validate_migrations)
        .with_context(|| {
            format!(
                "Invalid migrations in {}",
                settings.migrations_dir.display()
            )
        })?;

    let statements: usize = migrations.iter().map(|m| m.statements().len()).sum();
    println!(
        "{} migration(s), {statements} statement(s); last version {}",
        migrations.len(),
        migrations.last_version()
    );
    Ok(())
}
