use crate::error::{Result, SueloError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default name of the configuration file
pub const CONFIG_FILE_NAME: &str = "suelo.toml";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Where reports are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per partition under the data directory
    File,
    /// Process-local, discarded on exit
    Memory,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::File => write!(f, "file"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

/// Layered configuration for Suelo
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub data_dir: ConfigValue<PathBuf>,
    pub storage: ConfigValue<StorageBackend>,
    pub user: ConfigValue<Option<String>>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            data_dir: ConfigValue::new(PathBuf::from(".suelo"), ConfigSource::Default),
            storage: ConfigValue::new(StorageBackend::File, ConfigSource::Default),
            user: ConfigValue::new(None, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| SueloError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| SueloError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(data_dir) = file_config.data_dir {
            self.data_dir.update(data_dir, ConfigSource::File);
        }

        if let Some(storage) = file_config.storage {
            self.storage.update(storage, ConfigSource::File);
        }

        if let Some(user) = file_config.user {
            self.user.update(non_empty(user), ConfigSource::File);
        }

        Ok(self)
    }

    /// Load the config file only if it exists
    pub fn load_from_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        if path.as_ref().exists() {
            self.load_from_file(path)
        } else {
            tracing::debug!(path = %path.as_ref().display(), "No config file, using defaults");
            Ok(self)
        }
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // SUELO_DATA_DIR
        if let Ok(dir) = env::var("SUELO_DATA_DIR") {
            if dir.trim().is_empty() {
                tracing::warn!("Ignoring empty SUELO_DATA_DIR");
            } else {
                self.data_dir.update(PathBuf::from(dir), ConfigSource::Environment);
            }
        }

        // SUELO_STORAGE
        if let Ok(storage_str) = env::var("SUELO_STORAGE") {
            match parse_storage_backend(&storage_str) {
                Ok(storage) => self.storage.update(storage, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid SUELO_STORAGE value '{}': expected file or memory",
                    storage_str
                ),
            }
        }

        // SUELO_USER
        if let Ok(user) = env::var("SUELO_USER") {
            self.user.update(non_empty(user), ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(data_dir) = overrides.data_dir {
            self.data_dir.update(data_dir, ConfigSource::Cli);
        }

        if let Some(storage) = overrides.storage {
            self.storage.update(storage, ConfigSource::Cli);
        }

        if let Some(user) = overrides.user {
            self.user.update(non_empty(user), ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "data_dir".to_string(),
            (self.data_dir.value.display().to_string(), self.data_dir.source),
        );

        map.insert("storage".to_string(), (self.storage.value.to_string(), self.storage.source));

        map.insert(
            "user".to_string(),
            (
                self.user.value.clone().unwrap_or_else(|| "(anonymous)".to_string()),
                self.user.source,
            ),
        );

        map
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    data_dir: Option<PathBuf>,
    storage: Option<StorageBackend>,
    user: Option<String>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub storage: Option<StorageBackend>,
    pub user: Option<String>,
}

/// Parse storage backend from string
pub fn parse_storage_backend(s: &str) -> Result<StorageBackend> {
    match s.trim().to_lowercase().as_str() {
        "file" | "fs" => Ok(StorageBackend::File),
        "memory" | "mem" => Ok(StorageBackend::Memory),
        _ => Err(SueloError::ConfigInvalid {
            key: "storage".to_string(),
            reason: format!("Invalid storage backend: {}. Use file or memory", s),
        }),
    }
}
