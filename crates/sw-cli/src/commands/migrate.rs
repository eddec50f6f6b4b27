//! Migrate command implementation

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, MigrateArgs};
use crate::commands::common::{build_migrator, Settings};

/// Execute the migrate command
pub(crate) fn execute(args: &MigrateArgs, global: &GlobalArgs) -> Result<()> {
    let settings = Settings::resolve(global)?;
    let db = settings.open_database()?;
    let mut migrator = build_migrator(&settings, &db)?;

    if args.dry_run {
        let pending = migrator.pending();
        if pending.is_empty() {
            println!("Nothing to apply; at version {}", migrator.current_version());
        }
        for migration in pending {
            println!("pending  {}", migration.filename());
        }
        return Ok(());
    }

    let start = migrator.current_version();
    let result = migrator.migrate();
    let applied = migrator.current_version() - start;
    if let Err(e) = result {
        if applied > 0 {
            eprintln!(
                "Applied {applied} migration(s) before failing; now at version {}",
                migrator.current_version()
            );
        }
        return Err(e).context("Migration failed");
    }

    println!(
        "Applied {applied} migration(s); now at version {}",
        migrator.current_version()
    );
    Ok(())
}
