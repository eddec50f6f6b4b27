//! Configuration types and parsing for stepwise.yml

use crate::error::{CoreError, CoreResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Project configuration from stepwise.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory containing `<version>_<name>.sql` files
    #[serde(default = "default_migrations_path")]
    pub migrations_path: String,

    /// Table that records applied migration versions
    #[serde(default = "default_version_table")]
    pub version_table: String,

    /// SQL dialect used to split migration files into statements
    #[serde(default)]
    pub dialect: Dialect,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            migrations_path: default_migrations_path(),
            version_table: default_version_table(),
            dialect: Dialect::default(),
            database: DatabaseConfig::default(),
        }
    }
}

/// Database type selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DbType {
    /// SQLite (default)
    #[default]
    Sqlite,
}

impl std::fmt::Display for DbType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DbType::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database type
    #[serde(rename = "type", default)]
    pub db_type: DbType,

    /// Database file path, or `:memory:`
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            db_type: DbType::default(),
            path: default_db_path(),
        }
    }
}

/// SQL dialect for tokenizing migration files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Permissive ANSI-ish tokenizer (default)
    #[default]
    Generic,
    /// SQLite
    Sqlite,
    /// DuckDB
    DuckDb,
    /// PostgreSQL
    Postgres,
    /// MySQL
    MySql,
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::Generic => write!(f, "generic"),
            Dialect::Sqlite => write!(f, "sqlite"),
            Dialect::DuckDb => write!(f, "duckdb"),
            Dialect::Postgres => write!(f, "postgres"),
            Dialect::MySql => write!(f, "mysql"),
        }
    }
}

const DEFAULT_DB_PATH: &str = ":memory:";

/// Version table name used when none is configured.
pub const DEFAULT_VERSION_TABLE: &str = "schema_migrations";

fn default_migrations_path() -> String {
    "migrations".to_string()
}

fn default_version_table() -> String {
    DEFAULT_VERSION_TABLE.to_string()
}

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

static TABLE_NAME_RE: OnceLock<Regex> = OnceLock::new();

/// Check that `name` is a plain or schema-qualified SQL identifier.
///
/// The version table name is interpolated into SQL text, so only bare
/// identifiers are accepted.
pub fn validate_table_name(name: &str) -> CoreResult<()> {
    let re = TABLE_NAME_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$").expect("valid regex")
    });
    if re.is_match(name) {
        Ok(())
    } else {
        Err(CoreError::ConfigInvalid {
            message: format!(
                "version_table '{name}' must be an identifier like schema_migrations or app.schema_migrations"
            ),
        })
    }
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for stepwise.yml or stepwise.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("stepwise.yml");
        let yaml_path = dir.join("stepwise.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: yml_path.display().to_string(),
            })
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> CoreResult<()> {
        if self.migrations_path.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "migrations_path cannot be empty".to_string(),
            });
        }
        if self.database.path.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "database.path cannot be empty".to_string(),
            });
        }
        validate_table_name(&self.version_table)
    }

    /// Get the migrations directory relative to a project root
    pub fn migrations_path_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.migrations_path)
    }

    /// Get the database path relative to a project root (`:memory:` is kept as-is)
    pub fn database_path_absolute(&self, root: &Path) -> String {
        if self.database.path == DEFAULT_DB_PATH {
            return self.database.path.clone();
        }
        root.join(&self.database.path).display().to_string()
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
