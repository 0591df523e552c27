//! Configuration loading from TOML files.
//!
//! Every field has a serde default so a missing file or section falls
//! back to sensible values; engine thresholds themselves are fixed in
//! source and deliberately not configurable.

use std::path::Path;

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub scoring: ScoringConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

/// Batch-scoring configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Snapshot history entries passed to the engine per market.
    pub max_snapshots: usize,
    /// How many ranked markets to show.
    pub top: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_snapshots: 30,
            top: 20,
        }
    }
}

impl Config {
    /// Load and validate a config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file if it exists, otherwise fall back to defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.scoring.max_snapshots == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scoring.max_snapshots",
                reason: "must be at least 1".into(),
            }
            .into());
        }
        if self.scoring.top == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scoring.top",
                reason: "must be at least 1".into(),
            }
            .into());
        }
        if self.logging.level.is_empty() {
            return Err(ConfigError::MissingField {
                field: "logging.level",
            }
            .into());
        }
        Ok(())
    }
}
