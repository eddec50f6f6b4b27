//! Migration and migration set types.

/// A single versioned unit of SQL, discovered from one source file.
///
/// Migrations are immutable once read. The statements are kept in file order
/// and are applied together inside one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    version: u64,
    name: String,
    filename: String,
    statements: Vec<String>,
}

impl Migration {
    /// Create a migration from already-split statements.
    pub fn new(
        version: u64,
        name: impl Into<String>,
        filename: impl Into<String>,
        statements: Vec<String>,
    ) -> Self {
        Self {
            version,
            name: name.into(),
            filename: filename.into(),
            statements,
        }
    }

    /// Positive version number taken from the filename prefix.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Descriptive label between the underscore and `.sql`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source entry name this migration was read from.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Statements in file order.
    pub fn statements(&self) -> &[String] {
        &self.statements
    }
}

/// The validated, version-ordered collection of migrations.
///
/// Versions are unique and form the contiguous run `1..=last_version()`, so
/// the migration with version `v` always sits at index `v - 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationSet {
    migrations: Vec<Migration>,
}

impl MigrationSet {
    /// Wrap migrations that have already been sorted and checked.
    pub(crate) fn from_validated(migrations: Vec<Migration>) -> Self {
        Self { migrations }
    }

    /// Highest version in the set, or 0 when the set is empty.
    pub fn last_version(&self) -> u64 {
        self.migrations.last().map_or(0, Migration::version)
    }

    /// Number of migrations.
    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    /// Whether the set has no migrations.
    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }

    /// Iterate migrations in ascending version order.
    pub fn iter(&self) -> std::slice::Iter<'_, Migration> {
        self.migrations.iter()
    }

    /// Look up a migration by version.
    pub fn get(&self, version: u64) -> Option<&Migration> {
        let index = usize::try_from(version.checked_sub(1)?).ok()?;
        self.migrations.get(index)
    }

    /// Migrations with a version strictly greater than `after`.
    pub fn pending(&self, after: u64) -> &[Migration] {
        let start = usize::try_from(after)
            .unwrap_or(usize::MAX)
            .min(self.migrations.len());
        &self.migrations[start..]
    }
}

impl<'a> IntoIterator for &'a MigrationSet {
    type Item = &'a Migration;
    type IntoIter = std::slice::Iter<'a, Migration>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[path = "migration_test.rs"]
mod tests;
