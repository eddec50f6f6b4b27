//! Structural validation of a discovered migration collection.

use crate::error::{CoreError, CoreResult};
use crate::migration::{Migration, MigrationSet};

/// Order `migrations` by version and check the set invariants.
///
/// Versions must be unique and form the contiguous run `1..=max`. Duplicates
/// are checked first, so a collection with both a repeated and a missing
/// version reports the smallest repeated one. An empty collection is valid.
pub fn validate_migrations(mut migrations: Vec<Migration>) -> CoreResult<MigrationSet> {
    migrations.sort_by_key(Migration::version);

    if let Some(pair) = migrations
        .windows(2)
        .find(|pair| pair[0].version() == pair[1].version())
    {
        return Err(CoreError::DuplicateMigrationVersion {
            version: pair[0].version(),
        });
    }

    for (expected, migration) in (1u64..).zip(&migrations) {
        if migration.version() != expected {
            return Err(CoreError::MissingMigrationVersion { version: expected });
        }
    }

    Ok(MigrationSet::from_validated(migrations))
}

#[cfg(test)]
#[path = "validator_test.rs"]
mod tests;
