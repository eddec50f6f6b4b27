//! Read migration files out of a [`MigrationSource`].

use crate::config::Dialect;
use crate::error::{CoreError, CoreResult};
use crate::migration::Migration;
use crate::source::MigrationSource;
use crate::splitter::split_statements;
use regex::Regex;
use std::sync::OnceLock;

static FILENAME_RE: OnceLock<Regex> = OnceLock::new();

fn filename_re() -> &'static Regex {
    FILENAME_RE.get_or_init(|| Regex::new(r"^(\d+)_(.*)\.sql$").expect("valid regex"))
}

/// Split a migration filename into its version and name.
///
/// The version must be a positive integer; `0_init.sql` and numbers too large
/// for `u64` are rejected the same way as names that miss the pattern.
pub fn parse_filename(filename: &str) -> CoreResult<(u64, String)> {
    let invalid = || CoreError::InvalidMigrationFilename {
        filename: filename.to_string(),
    };
    let caps = filename_re().captures(filename).ok_or_else(invalid)?;
    let version: u64 = caps[1].parse().map_err(|_| invalid())?;
    if version == 0 {
        return Err(invalid());
    }
    Ok((version, caps[2].to_string()))
}

/// Read every migration file at the root of `source`.
///
/// Directories are skipped. Files are visited in name order so the first
/// reported error does not depend on how the store lists its entries; the
/// returned migrations are otherwise unordered and unchecked as a set.
pub fn load_migrations(source: &dyn MigrationSource, dialect: Dialect) -> CoreResult<Vec<Migration>> {
    let mut entries = source.entries().map_err(|e| CoreError::IoWithPath {
        path: source.describe(),
        source: e,
    })?;
    entries.retain(|entry| !entry.is_dir());
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    let mut migrations = Vec::with_capacity(entries.len());
    for entry in entries {
        migrations.push(read_migration(source, &entry.name, dialect)?);
    }
    log::debug!(
        "Read {} migration file(s) from {}",
        migrations.len(),
        source.describe()
    );
    Ok(migrations)
}

fn read_migration(
    source: &dyn MigrationSource,
    filename: &str,
    dialect: Dialect,
) -> CoreResult<Migration> {
    let (version, name) = parse_filename(filename)?;

    let bytes = source.read(filename).map_err(|e| CoreError::IoWithPath {
        path: format!("{}/{filename}", source.describe()),
        source: e,
    })?;
    let content = String::from_utf8(bytes).map_err(|e| CoreError::InvalidMigrationFile {
        filename: filename.to_string(),
        reason: format!("not valid UTF-8: {e}"),
    })?;

    if content.trim().is_empty() {
        return Err(CoreError::EmptyMigration {
            filename: filename.to_string(),
        });
    }

    let statements =
        split_statements(&content, dialect).map_err(|e| CoreError::InvalidMigrationFile {
            filename: filename.to_string(),
            reason: e.to_string(),
        })?;
    if statements.is_empty() {
        return Err(CoreError::EmptyMigration {
            filename: filename.to_string(),
        });
    }

    Ok(Migration::new(version, name, filename, statements))
}

#[cfg(test)]
#[path = "reader_test.rs"]
mod tests;
