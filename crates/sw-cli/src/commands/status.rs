//! Status command implementation

use anyhow::Result;
use serde::Serialize;

use crate::cli::{GlobalArgs, StatusArgs};
use crate::commands::common::{build_migrator, Settings};

#[derive(Serialize)]
struct StatusReport {
    current_version: u64,
    last_version: u64,
    migrations: Vec<MigrationStatus>,
}

#[derive(Serialize)]
struct MigrationStatus {
    version: u64,
    name: String,
    filename: String,
    applied: bool,
}

/// Execute the status command
pub(crate) fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let settings = Settings::resolve(global)?;
    let db = settings.open_database()?;
    let migrator = build_migrator(&settings, &db)?;

    let current_version = migrator.current_version();
    let report = StatusReport {
        current_version,
        last_version: migrator.last_version(),
        migrations: migrator
            .migrations()
            .iter()
            .map(|m| MigrationStatus {
                version: m.version(),
                name: m.name().to_string(),
                filename: m.filename().to_string(),
                applied: m.version() <= current_version,
            })
            .collect(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Version {} of {}",
        report.current_version, report.last_version
    );
    let width = report
        .migrations
        .last()
        .map_or(1, |m| m.version.to_string().len());
    for m in &report.migrations {
        let state = if m.applied { "applied" } else { "pending" };
        println!("  {:>width$}  {state:<7}  {}", m.version, m.name);
    }
    Ok(())
}
