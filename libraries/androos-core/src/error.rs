//! Core error types for Androos Player

use thiserror::Error;

/// Result type alias using `PlayerError`
pub type Result<T> = std::result::Result<T, PlayerError>;

/// Core error type for Androos Player
#[derive(Error, Debug)]
pub enum PlayerError {
    /// Audio effect errors
    #[error("Effects error: {0}")]
    Effects(String),

    /// Audio session errors
    #[error("Audio session error: {0}")]
    Session(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl PlayerError {
    /// Create an effects error
    pub fn effects(msg: impl Into<String>) -> Self {
        Self::Effects(msg.into())
    }

    /// Create an audio session error
    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session(msg.into())
    }
}
