//! Error types for tint

use thiserror::Error;

/// Result type alias for tint operations
pub type TintResult<T> = Result<T, TintError>;

/// Main error type for tint
#[derive(Error, Debug)]
pub enum TintError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Tab query error: {0}")]
    Tabs(String),

    #[error("Window query error: {0}")]
    Windows(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TintError {
    /// Create a new storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a new tab query error
    pub fn tabs(msg: impl Into<String>) -> Self {
        Self::Tabs(msg.into())
    }

    /// Create a new window query error
    pub fn windows(msg: impl Into<String>) -> Self {
        Self::Windows(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
