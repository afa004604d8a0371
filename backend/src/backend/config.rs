//! Server configuration.
//!
//! Values come from a YAML file (path in `ATTENDANCE_CONFIG`, default
//! `attendance.yaml`) and are then overridden by `ATTENDANCE_*` environment
//! variables. A missing file yields the defaults.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const CONFIG_PATH_VAR: &str = "ATTENDANCE_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "attendance.yaml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Sqlite,
    Csv,
}

impl std::str::FromStr for StorageKind {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StorageKind::Sqlite),
            "csv" => Ok(StorageKind::Csv),
            other => bail!("Unknown storage backend: {}", other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_address: String,
    pub storage: StorageKind,
    pub database_url: String,
    pub data_directory: PathBuf,
    pub password: String,
    pub cors_origin: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            storage: StorageKind::Sqlite,
            database_url: "sqlite:attendance.db".to_string(),
            data_directory: PathBuf::from("./attendance-data"),
            password: "17120".to_string(),
            cors_origin: "http://localhost:8080".to_string(),
        }
    }
}

impl AppConfig {
    /// Load the file named by `ATTENDANCE_CONFIG` and apply environment overrides
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_file(Path::new(&path))?;
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let yaml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: AppConfig = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Invalid config {}", path.display()))?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Override fields from variables resolved by `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("ATTENDANCE_BIND") {
            self.bind_address = value;
        }
        if let Some(value) = lookup("ATTENDANCE_STORAGE") {
            self.storage = value.parse()?;
        }
        if let Some(value) = lookup("ATTENDANCE_DATABASE_URL") {
            self.database_url = value;
        }
        if let Some(value) = lookup("ATTENDANCE_DATA_DIR") {
            self.data_directory = PathBuf::from(value);
        }
        if let Some(value) = lookup("ATTENDANCE_PASSWORD") {
            self.password = value;
        }
        if let Some(value) = lookup("ATTENDANCE_CORS_ORIGIN") {
            self.cors_origin = value;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::from_file(&temp_dir.path().join("none.yaml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.password, "17120");
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("attendance.yaml");
        fs::write(&path, "storage: csv\ndata_directory: /srv/attendance\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.storage, StorageKind::Csv);
        assert_eq!(config.data_directory, PathBuf::from("/srv/attendance"));
        assert_eq!(config.bind_address, "127.0.0.1:3000");
    }

    #[test]
    fn test_environment_overrides() {
        let vars: HashMap<&str, &str> = [
            ("ATTENDANCE_BIND", "0.0.0.0:8000"),
            ("ATTENDANCE_STORAGE", "CSV"),
            ("ATTENDANCE_PASSWORD", "secret"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config
            .apply_overrides(|name| vars.get(name).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.bind_address, "0.0.0.0:8000");
        assert_eq!(config.storage, StorageKind::Csv);
        assert_eq!(config.password, "secret");
        assert_eq!(config.cors_origin, "http://localhost:8080");
    }

    #[test]
    fn test_unknown_storage_is_an_error() {
        let mut config = AppConfig::default();
        assert!(config.apply_overrides(|_| Some("postgres".to_string())).is_err());
    }
}
