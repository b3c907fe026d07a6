//! Error types for the scroll pipeline's fallible edges.
//!
//! The hot path never surfaces these to the input hook: settings errors
//! fall back to defaults, watcher errors are logged, and injection errors
//! are dropped after a debug trace.

use thiserror::Error;

/// Errors that can occur while loading or saving settings
#[derive(Error, Debug)]
pub enum SettingsError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings parsed but describe something unusable
    #[error("Invalid settings: {0}")]
    Invalid(String),

    /// No platform config directory could be determined
    #[error("No settings path available")]
    NoPath,
}

/// Result type alias for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Errors raised while watching the settings file
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Watch error: {0}")]
    Notify(#[from] notify::Error),

    #[error("Settings path has no parent directory: {0}")]
    NoParent(String),
}

/// Errors reported by a synthetic-input sink
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InjectionError {
    /// The OS refused the synthetic event
    #[error("Injection rejected: {0}")]
    Rejected(String),

    /// No injection primitive is available (e.g. secure desktop)
    #[error("Injection unavailable")]
    Unavailable,
}
