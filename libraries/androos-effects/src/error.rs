//! Effects-specific errors

use androos_core::{AudioSessionId, EffectKind};
use thiserror::Error;

/// Result type alias using `EffectsError`
pub type Result<T> = std::result::Result<T, EffectsError>;

/// Errors reported by effect platforms and engines
///
/// The controller never surfaces these to its caller; they are logged and
/// the affected engine is treated as absent.
#[derive(Error, Debug)]
pub enum EffectsError {
    /// The platform could not bind an engine to the session
    #[error("Failed to acquire {kind} engine for audio session {session}: {reason}")]
    Acquisition {
        kind: EffectKind,
        session: AudioSessionId,
        reason: String,
    },

    /// The device has no implementation of this engine
    #[error("{0} engine not supported on this device")]
    Unsupported(EffectKind),

    /// The audio session is not (or no longer) live
    #[error("Audio session not found: {0}")]
    SessionNotFound(AudioSessionId),

    /// A bound engine rejected a call
    #[error("{kind} engine error: {reason}")]
    Engine { kind: EffectKind, reason: String },

    /// A call reached an engine after it was released
    #[error("{0} engine already released")]
    Released(EffectKind),

    /// Effects configuration could not be parsed
    #[error("Invalid effects configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl EffectsError {
    /// Create an acquisition error
    pub fn acquisition(
        kind: EffectKind,
        session: AudioSessionId,
        reason: impl Into<String>,
    ) -> Self {
        Self::Acquisition {
            kind,
            session,
            reason: reason.into(),
        }
    }

    /// Create an engine error
    pub fn engine(kind: EffectKind, reason: impl Into<String>) -> Self {
        Self::Engine {
            kind,
            reason: reason.into(),
        }
    }
}

impl From<EffectsError> for androos_core::PlayerError {
    fn from(err: EffectsError) -> Self {
        match err {
            EffectsError::Config(e) => Self::Serialization(e),
            EffectsError::SessionNotFound(_) => Self::session(err.to_string()),
            other => Self::effects(other.to_string()),
        }
    }
}
