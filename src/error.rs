use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for semver-stamp operations
#[derive(Error, Debug)]
pub enum StampError {
    #[error("Version store not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version error: {0}")]
    Version(String),

    #[error("Invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in semver-stamp
pub type Result<T> = std::result::Result<T, StampError>;

impl StampError {
    /// Create a missing-store error for the given path
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        StampError::NotFound { path: path.into() }
    }

    /// Create a parse error with context
    pub fn parse(msg: impl Into<String>) -> Self {
        StampError::Parse(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        StampError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        StampError::Version(msg.into())
    }
}
