//! Gradebook configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GradebookError, Result};
use crate::storage::{FileStorage, DEFAULT_BACKUP_FILE, DEFAULT_DATA_FILE};

/// Name of the configuration file looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = "gradebook.toml";

/// Top-level gradebook configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradebookConfig {
    /// Primary data file.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Backup file written by `backup` and read by `restore`.
    #[serde(default = "default_backup_file")]
    pub backup_file: PathBuf,
    /// Save unsaved changes when leaving the interactive menu.
    #[serde(default)]
    pub save_on_exit: bool,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}
fn default_backup_file() -> PathBuf {
    PathBuf::from(DEFAULT_BACKUP_FILE)
}
fn default_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl Default for GradebookConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            backup_file: default_backup_file(),
            save_on_exit: false,
            logging: LoggingConfig::default(),
        }
    }
}

impl GradebookConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(content: &str, source_path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| GradebookError::Config {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Storage bound to the configured data and backup files.
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(&self.data_file, &self.backup_file)
    }
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<GradebookConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => {
            return Err(GradebookError::Config {
                path: p.to_path_buf(),
                message: "config file not found".into(),
            })
        }
        None => {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|dir| dir.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content =
                std::fs::read_to_string(&path).map_err(|e| GradebookError::io(&path, e))?;
            GradebookConfig::from_toml_str(&content, &path)
        }
        None => Ok(GradebookConfig::default()),
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradebook"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = GradebookConfig::default();
        assert_eq!(config.data_file, PathBuf::from("students.csv"));
        assert_eq!(config.backup_file, PathBuf::from("students_backup.csv"));
        assert!(!config.save_on_exit);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
data_file = "data/class-a.csv"
backup_file = "data/class-a.bak.csv"
save_on_exit = true

[logging]
level = "debug"
"#;
        let config = GradebookConfig::from_toml_str(toml_str, Path::new("test.toml")).unwrap();
        assert_eq!(config.data_file, PathBuf::from("data/class-a.csv"));
        assert_eq!(config.backup_file, PathBuf::from("data/class-a.bak.csv"));
        assert!(config.save_on_exit);
        assert_eq!(config.logging.level, "debug");

        let storage = config.storage();
        assert_eq!(storage.primary(), Path::new("data/class-a.csv"));
    }

    #[test]
    fn parse_partial_config_uses_defaults() {
        let config =
            GradebookConfig::from_toml_str("save_on_exit = true\n", Path::new("test.toml")).unwrap();
        assert!(config.save_on_exit);
        assert_eq!(config.data_file, PathBuf::from("students.csv"));
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn parse_malformed_config() {
        let err = GradebookConfig::from_toml_str("data_file = [", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, GradebookError::Config { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn explicit_missing_path_is_error() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "data_file = \"x.csv\"\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.data_file, PathBuf::from("x.csv"));
    }
}
