//! Error types for the crate.
//!
//! The scoring engine itself never fails - insufficient data degrades to
//! neutral values and invalid markets yield `None`. Errors here belong to
//! the crate's edges: configuration files and listing input files.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors reading a market listing file.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("failed to read listings from {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse listings from {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
