//! Tracker configuration loaded from an optional YAML file

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::is_valid_key;
use crate::store::DEFAULT_STORAGE_KEY;
use crate::view::{is_valid_date_format, ViewSettings};

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML format: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("Invalid field value: {field} - {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Where the snapshot is kept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one file per storage key
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
    /// Entry name of the transaction snapshot
    #[serde(default = "default_storage_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            key: default_storage_key(),
        }
    }
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

/// Currency and date display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// chrono strftime format for list dates
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            date_format: default_date_format(),
        }
    }
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%m/%d/%Y".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TrackerConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                ConfigError::Io {
                    path: path.display().to_string(),
                    source: e,
                }
            }
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: TrackerConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_key(&self.storage.key) {
            return Err(ConfigError::InvalidValue {
                field: "storage.key".to_string(),
                reason: format!(
                    "'{}' must be non-empty, not start with '.', and use only letters, digits, '_', '-' or '.'",
                    self.storage.key
                ),
            });
        }
        if !is_valid_date_format(&self.display.date_format) {
            return Err(ConfigError::InvalidValue {
                field: "display.date_format".to_string(),
                reason: format!("'{}' cannot format a date", self.display.date_format),
            });
        }
        if self.logging.level.parse::<log::LevelFilter>().is_err() {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!("unknown level '{}'", self.logging.level),
            });
        }
        Ok(())
    }

    pub fn view_settings(&self) -> ViewSettings {
        ViewSettings::new(
            self.display.currency_symbol.clone(),
            self.display.date_format.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = TrackerConfig::from_yaml("{}").unwrap();
        assert_eq!(config, TrackerConfig::default());
        assert_eq!(config.storage.key, "expenseTrackerTransactions");
        assert_eq!(config.display.currency_symbol, "$");
    }

    #[test]
    fn test_partial_yaml_overrides_fields() {
        let yaml = "
storage:
  dir: /tmp/ledger
display:
  currency_symbol: \"€\"
  date_format: \"%d.%m.%Y\"
";
        let config = TrackerConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.storage.dir, PathBuf::from("/tmp/ledger"));
        assert_eq!(config.storage.key, "expenseTrackerTransactions");
        assert_eq!(config.display.currency_symbol, "€");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = TrackerConfig::from_yaml("storage:\n  key: \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "storage.key"));
    }

    #[test]
    fn test_path_like_keys_rejected() {
        for key in ["my transactions", "../escape", "a/b", ".hidden"] {
            let yaml = format!("storage:\n  key: \"{}\"\n", key);
            let err = TrackerConfig::from_yaml(&yaml).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "storage.key"),
                "key {:?} should be rejected",
                key
            );
        }
        assert!(TrackerConfig::from_yaml("storage:\n  key: ledger-2024.v1\n").is_ok());
    }

    #[test]
    fn test_time_only_date_format_rejected() {
        let err = TrackerConfig::from_yaml("display:\n  date_format: \"%H:%M\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let err = TrackerConfig::from_yaml("logging:\n  level: loud\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = TrackerConfig::load(Path::new("/nonexistent/tracker.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }
}
