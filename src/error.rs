//! Error handling for ZenSwitch
//!
//! Provides centralized error handling with proper error types using thiserror.
//! All errors in the application should use these types for consistency.

use thiserror::Error;

/// Main error type for ZenSwitch
#[derive(Error, Debug)]
pub enum ZenError {
    /// Running on anything other than macOS
    #[error("ZenSwitch supports macOS only")]
    UnsupportedOs,

    /// Could not enumerate running applications
    #[error("failed to list running apps: {0}")]
    Listing(String),

    /// A target application could not be closed.
    ///
    /// `closed` holds the apps that were closed before the failure, so the
    /// caller can report partial progress.
    #[error("failed to close {app}: {reason}")]
    Quit {
        app: String,
        reason: String,
        closed: Vec<String>,
    },

    /// Configuration errors (loading, parsing, path resolution)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors (rejected option combinations)
    #[error("Validation error: {0}")]
    Validation(String),

    /// IO errors (config file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for ZenSwitch operations
pub type Result<T> = std::result::Result<T, ZenError>;

// Convenient error constructors
impl ZenError {
    /// Create a listing error
    pub fn listing(msg: impl Into<String>) -> Self {
        Self::Listing(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
