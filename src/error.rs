//! Error types for llm-bridge
//!
//! Client failures never pass through here: the wrapper reports whatever
//! error type its client declares. [`BridgeError`] covers the crate's own
//! surfaces (settings, host availability, CLI).

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`BridgeError`]
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Main error type for llm-bridge
#[derive(Debug, Error)]
pub enum BridgeError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration parse error
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Configuration validation error
    #[error("Invalid configuration: {0}")]
    ConfigValidation(String),

    /// Settings key that does not exist
    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    /// Value that cannot be stored under a settings key
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    /// The host framework interface was not compiled in
    #[error("{0}")]
    HostUnavailable(String),
}
