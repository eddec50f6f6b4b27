//! Error types for sw-core

use thiserror::Error;

/// Core error type for Stepwise
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// M001: Source entry does not match `<digits>_<label>.sql`
    #[error("[M001] Invalid migration filename: {filename} (expected <version>_<name>.sql)")]
    InvalidMigrationFilename { filename: String },

    /// M002: Migration file has no executable content
    #[error("[M002] Migration {filename} is empty")]
    EmptyMigration { filename: String },

    /// M003: Migration file content could not be read as SQL text
    #[error("[M003] Invalid migration file {filename}: {reason}")]
    InvalidMigrationFile { filename: String, reason: String },

    /// M004: Two migrations share a version
    #[error("[M004] Duplicate migration version: {version}")]
    DuplicateMigrationVersion { version: u64 },

    /// M005: The version sequence has a gap
    #[error("[M005] Missing migration version: {version}")]
    MissingMigrationVersion { version: u64 },

    /// E010: IO error
    #[error("[E010] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// E011: IO error with file path context
    #[error("[E011] IO error at {path}: {source}")]
    IoWithPath {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<serde_yaml::Error> for CoreError {
    fn from(err: serde_yaml::Error) -> Self {
        CoreError::ConfigParseError {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
