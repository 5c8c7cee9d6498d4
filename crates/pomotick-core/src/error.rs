//! Core error types for pomotick-core.
//!
//! The engine itself is infallible. These errors come from the boundaries
//! around it: configuration files and user-supplied input.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pomotick-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not name a configuration field
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Could not determine where configuration lives
    #[error("Could not determine configuration directory: {0}")]
    NoDataDir(String),
}

/// Rejections at the input boundary. None of these reach the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("'{0}' is not a whole number of minutes")]
    NotANumber(String),

    #[error("duration must be at least one minute")]
    NonPositive,

    #[error("duration of {minutes} minutes exceeds the maximum of {max}")]
    TooLarge { minutes: u64, max: u64 },

    #[error("invalid choice '{0}'")]
    InvalidChoice(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
