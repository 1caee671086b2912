//! Configuration errors.
//!
//! Raised while layering defaults, the configuration file and `IP_RADIX__*`
//! environment overrides, and while validating the merged result.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by [`ConfigLoader`](crate::config::ConfigLoader) and [`Validate`](crate::config::Validate).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The `--config` path does not exist.
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// The file extension is not one of toml, json, yaml or yml.
    #[error("Unsupported configuration format for {0}: expected .toml, .json, .yaml or .yml")]
    UnsupportedFormat(PathBuf),

    /// The file or an environment override could not be parsed or deserialized.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// A section failed a consistency check.
    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    /// A numeric setting is outside its accepted range.
    #[error("Configuration value {key} is out of valid range: {message}")]
    ValueOutOfRange {
        /// Dotted key of the setting, e.g. `id_gen.worker_id`
        key: String,
        /// The accepted range
        message: String,
    },
}
