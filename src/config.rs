//! Locating the note database.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Environment variable overriding the database location.
pub const DATABASE_ENV_VAR: &str = "FREDDIEBEAR_DB";

/// Location of the note database relative to the user's home directory.
pub const DEFAULT_DATABASE_PATH: &str = "Library/Group Containers/9K33E3U3T4.net.shinyfrog.bear/Application Data/database.sqlite";

/// Configuration errors. All of these are the user's to fix.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to determine home directory; set FREDDIEBEAR_DB or pass --db")]
    NoHomeDirectory,

    #[error("Note database not found at {}", .0.display())]
    DatabaseNotFound(PathBuf),
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_path: PathBuf,
}

impl Config {
    /// Resolves the database path from, in order: `db_override`, the
    /// `FREDDIEBEAR_DB` environment variable, and the default location under
    /// the home directory.
    pub fn resolve(db_override: Option<PathBuf>) -> Result<Self, ConfigError> {
        let from_env = std::env::var_os(DATABASE_ENV_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let database_path = match db_override.or(from_env) {
            Some(path) => path,
            None => default_database_path()?,
        };

        Ok(Self { database_path })
    }

    /// Fails unless the database file exists.
    pub fn ensure_database_exists(&self) -> Result<&Path, ConfigError> {
        if self.database_path.is_file() {
            Ok(&self.database_path)
        } else {
            Err(ConfigError::DatabaseNotFound(self.database_path.clone()))
        }
    }
}

/// Returns `$HOME/Library/Group Containers/.../database.sqlite`.
pub fn default_database_path() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
    Ok(home.join(DEFAULT_DATABASE_PATH))
}
