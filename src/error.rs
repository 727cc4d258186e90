//! Error types for the configuration layer.
//!
//! Gesture handling itself never fails; only loading, validating and
//! watching interaction settings can.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or validating interaction settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A threshold tier is not ordered `fast < medium < slow`
    #[error("Auto-scroll thresholds out of order on edges: {}", .edges.join(", "))]
    InvalidThresholds { edges: Vec<&'static str> },

    /// Speeds are negative or not ordered `fast >= medium >= slow`
    #[error("Auto-scroll speeds must satisfy fast >= medium >= slow >= 0")]
    InvalidSpeed,

    #[error("Auto-scroll tick must be at least 1ms (got {0}ms)")]
    InvalidTick(u64),

    /// Settings file could not be watched
    #[error("Cannot watch {path}: {message}")]
    Watch { path: PathBuf, message: String },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

impl From<String> for ConfigError {
    fn from(s: String) -> Self {
        ConfigError::Other(s)
    }
}

impl From<&str> for ConfigError {
    fn from(s: &str) -> Self {
        ConfigError::Other(s.to_string())
    }
}
