//! Runtime settings resolved once at startup. Environment variables win over
//! the defaults under the user's home directory.

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".reading-shelf";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "shelf.sqlite";
const LOG_DIR_NAME: &str = "logs";
const DEFAULT_LOG_LEVEL: &str = "info";

pub const DB_PATH_ENV: &str = "READING_SHELF_DB";
pub const LOG_DIR_ENV: &str = "READING_SHELF_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "READING_SHELF_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl Config {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::resolve(|key| env::var(key).ok())
    }

    /// Resolve settings through `lookup` so tests do not have to touch the real
    /// environment. The home directory is only consulted when a path is not
    /// overridden.
    pub fn resolve<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let db_path = match non_empty(DB_PATH_ENV) {
            Some(path) => PathBuf::from(path),
            None => data_dir()?.join(DB_FILE_NAME),
        };
        let log_dir = match non_empty(LOG_DIR_ENV) {
            Some(path) => PathBuf::from(path),
            None => data_dir()?.join(LOG_DIR_NAME),
        };
        let log_level = non_empty(LOG_LEVEL_ENV)
            .map(|level| level.trim().to_lowercase())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Ok(Self {
            db_path,
            log_dir,
            log_level,
        })
    }
}

/// Resolve the application data directory inside the user's home.
fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_take_precedence() {
        let config = Config::resolve(|key| match key {
            DB_PATH_ENV => Some("/tmp/shelf-test.sqlite".to_string()),
            LOG_DIR_ENV => Some("/tmp/shelf-logs".to_string()),
            LOG_LEVEL_ENV => Some(" DEBUG ".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/tmp/shelf-test.sqlite"));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/shelf-logs"));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn blank_level_falls_back_to_default() {
        let config = Config::resolve(|key| match key {
            DB_PATH_ENV => Some("shelf.sqlite".to_string()),
            LOG_DIR_ENV => Some("logs".to_string()),
            LOG_LEVEL_ENV => Some("   ".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }
}
