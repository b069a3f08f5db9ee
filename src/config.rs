//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/todostore/config.yaml)
//! 3. Environment variables (TODOSTORE_* prefix)
//!
//! Command-line flags are applied last by the binary.

use crate::storage::{FileStorage, KeyValueStorage, SqliteStorage};
use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

const ENV_PREFIX: &str = "TODOSTORE";
const APP_DIR: &str = "todostore";
const SQLITE_FILE: &str = "todostore.db";

/// Which storage backend holds the task slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    File,
    Sqlite,
}

impl FromStr for Backend {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Backend::File),
            "sqlite" => Ok(Backend::Sqlite),
            other => Err(eyre!("Unknown backend: {} (expected file or sqlite)", other)),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::File => write!(f, "file"),
            Backend::Sqlite => write!(f, "sqlite"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the task slot
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default)]
    pub backend: Backend,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            backend: Backend::default(),
        }
    }
}

impl Config {
    /// Load from the default location, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from_path(&Self::config_file_path())?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load from a file; a missing file yields defaults
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = ?path, "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).with_context(|| format!("Failed to read config file {:?}", path))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config =
            serde_yaml::from_str(&content).with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }

    /// Apply `TODOSTORE_DATA_DIR` / `TODOSTORE_BACKEND` via the given lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(&format!("{}_DATA_DIR", ENV_PREFIX)).filter(|s| !s.is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(backend) = lookup(&format!("{}_BACKEND", ENV_PREFIX)).filter(|s| !s.is_empty()) {
            self.backend = backend.parse()?;
        }
        Ok(())
    }

    /// `~/.config/todostore/config.yaml`, or `TODOSTORE_CONFIG` when set
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.yaml")
    }

    /// Open the configured backend
    pub fn open_storage(&self) -> Result<Box<dyn KeyValueStorage>> {
        debug!(backend = %self.backend, data_dir = ?self.data_dir, "Opening storage");
        let storage: Box<dyn KeyValueStorage> = match self.backend {
            Backend::File => Box::new(FileStorage::open(&self.data_dir)?),
            Backend::Sqlite => Box::new(SqliteStorage::open(self.data_dir.join(SQLITE_FILE))?),
        };
        Ok(storage)
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_from_path(&temp.path().join("nope.yaml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.backend, Backend::File);
        assert!(config.data_dir.ends_with("todostore"));
    }

    #[test]
    fn test_load_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "data_dir: /tmp/tasks\nbackend: sqlite\n").unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/tasks"));
        assert_eq!(config.backend, Backend::Sqlite);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "backend: sqlite\n").unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.backend, Backend::Sqlite);
        assert_eq!(config.data_dir, default_data_dir());
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "backend: [nope\n").unwrap();
        assert!(Config::load_from_path(&path).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<String, String> = [
            ("TODOSTORE_DATA_DIR".to_string(), "/var/tasks".to_string()),
            ("TODOSTORE_BACKEND".to_string(), "SQLite".to_string()),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env(|k| env.get(k).cloned()).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/var/tasks"));
        assert_eq!(config.backend, Backend::Sqlite);
    }

    #[test]
    fn test_env_bad_backend() {
        let mut config = Config::default();
        let result = config.apply_env(|k| (k == "TODOSTORE_BACKEND").then(|| "redis".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_open_storage_backends() {
        let temp = TempDir::new().unwrap();

        let mut config = Config {
            data_dir: temp.path().join("data"),
            backend: Backend::File,
        };
        let mut storage = config.open_storage().unwrap();
        storage.set("todo_items_v1", "[]").unwrap();
        assert!(temp.path().join("data/todo_items_v1.json").exists());

        config.backend = Backend::Sqlite;
        let mut storage = config.open_storage().unwrap();
        storage.set("todo_items_v1", "[]").unwrap();
        assert!(temp.path().join("data/todostore.db").exists());
    }
}
