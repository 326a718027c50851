//! Configuration management with validation and defaults
//!
//! Loaded from an optional TOML file, then overridden from `PREDICTION_*`
//! environment variables.

use crate::errors::{AppResult, ConfigurationError};
use crate::user_record::DEFAULT_RECORD_KEY;
use serde::{Deserialize, Serialize};
use std::{env, path::Path, str::FromStr, time::Duration};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub session: SessionConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Rocksdb,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rocksdb" | "rocks" => Ok(StorageBackend::Rocksdb),
            "memory" | "mem" => Ok(StorageBackend::Memory),
            other => Err(ConfigurationError::InvalidValue {
                field: "storage.backend".to_string(),
                value: other.to_string(),
                reason: "expected rocksdb or memory".to_string(),
            }),
        }
    }
}

/// Where the player record lives
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub data_directory: String,
    /// Name of the persisted player record
    pub record_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Rocksdb,
            data_directory: "./DB/prediction_master".to_string(),
            record_key: DEFAULT_RECORD_KEY.to_string(),
        }
    }
}

/// Play pacing
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Delay between placing a bet and revealing the outcome
    pub reveal_delay_ms: u64,
    /// Energy countdown polling cadence
    pub poll_interval_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            reveal_delay_ms: 300,
            poll_interval_ms: 1000,
        }
    }
}

impl SessionConfig {
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(ConfigurationError::InvalidValue {
                field: "monitoring.log_level".to_string(),
                value: other.to_string(),
                reason: "unknown log level".to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub log_level: LogLevel,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
        }
    }
}

impl AppConfig {
    /// In-memory storage, no reveal delay
    pub fn testing() -> Self {
        Self {
            storage: StorageConfig {
                backend: StorageBackend::Memory,
                ..Default::default()
            },
            session: SessionConfig {
                reveal_delay_ms: 0,
                poll_interval_ms: 10,
            },
            ..Default::default()
        }
    }
}

/// Configuration loader with environment variable support
#[derive(Default)]
pub struct ConfigLoader {
    config_path: Option<String>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self { config_path: None }
    }

    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_string_lossy().to_string());
        self
    }

    /// Load configuration from file and environment variables
    pub fn load(&self) -> AppResult<AppConfig> {
        let mut config = if let Some(ref path) = self.config_path {
            self.load_from_file(path)?
        } else {
            AppConfig::default()
        };

        self.apply_env_overrides(&mut config)?;
        self.validate(&config)?;

        Ok(config)
    }

    fn load_from_file(&self, path: &str) -> AppResult<AppConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigurationError::LoadFailed(format!("Failed to read {}: {}", path, e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigurationError::LoadFailed(format!("Failed to parse TOML: {}", e)).into())
    }

    fn apply_env_overrides(&self, config: &mut AppConfig) -> AppResult<()> {
        if let Ok(dir) = env::var("PREDICTION_DATA_DIR") {
            config.storage.data_directory = dir;
        }
        if let Ok(backend) = env::var("PREDICTION_STORAGE_BACKEND") {
            config.storage.backend = backend.parse()?;
        }
        if let Ok(delay) = env::var("PREDICTION_REVEAL_DELAY_MS") {
            config.session.reveal_delay_ms =
                delay.parse().map_err(|_| ConfigurationError::InvalidValue {
                    field: "PREDICTION_REVEAL_DELAY_MS".to_string(),
                    value: delay,
                    reason: "Invalid millisecond value".to_string(),
                })?;
        }
        if let Ok(level) = env::var("PREDICTION_LOG_LEVEL") {
            config.monitoring.log_level = level.parse()?;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self, config: &AppConfig) -> AppResult<()> {
        if config.storage.backend == StorageBackend::Rocksdb
            && config.storage.data_directory.trim().is_empty()
        {
            return Err(ConfigurationError::MissingRequired("storage.data_directory".to_string()).into());
        }

        if config.storage.record_key.trim().is_empty() {
            return Err(ConfigurationError::MissingRequired("storage.record_key".to_string()).into());
        }

        if config.session.poll_interval_ms == 0 {
            return Err(ConfigurationError::InvalidValue {
                field: "session.poll_interval_ms".to_string(),
                value: "0".to_string(),
                reason: "Poll interval cannot be zero".to_string(),
            }
            .into());
        }

        Ok(())
    }

    pub fn save(&self, config: &AppConfig, path: &str) -> AppResult<()> {
        let toml_string = toml::to_string_pretty(config)
            .map_err(|e| ConfigurationError::SaveFailed(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, toml_string)
            .map_err(|e| ConfigurationError::SaveFailed(format!("Failed to write to {}: {}", path, e)).into())
    }
}

/// Generate a sample configuration file
pub fn generate_sample_config(path: &str) -> AppResult<()> {
    ConfigLoader::new().save(&AppConfig::default(), path)
}
