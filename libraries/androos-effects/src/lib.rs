//! Androos Player - Audio Effects
//!
//! Parameter control for the three effect engines the player attaches to its
//! audio session: loudness enhancer, five-band equalizer and bass booster.
//!
//! This crate provides:
//! - `EffectsController`: clamps, stores and forwards effect parameters for
//!   one audio session, and never fails visibly
//! - `SessionEffects`: the current-session slot that releases the previous
//!   controller whenever the session id changes
//! - Engine traits (`EffectsPlatform`, `LoudnessEngine`, ...) implemented by
//!   the platform bridge
//! - `software`: an in-process platform for hosts without effect services
//!
//! # Architecture
//!
//! ```text
//! session id ──► SessionEffects ──► EffectsController ──► EffectsPlatform
//!                                        │                    │
//!                                   EffectState        Loudness / Equalizer
//!                                   (clamped)          / BassBoost engines
//! ```
//!
//! # Example
//!
//! ```rust
//! use androos_core::AudioSessionId;
//! use androos_effects::software::SoftwarePlatform;
//! use androos_effects::SessionEffects;
//!
//! let platform = SoftwarePlatform::new();
//! let _processor = platform.open_session(AudioSessionId::new(12));
//!
//! let mut effects = SessionEffects::new(platform);
//! effects.on_audio_session_changed(AudioSessionId::new(12));
//!
//! if let Some(controller) = effects.controller_mut() {
//!     controller.set_bass_boost(400);
//!     controller.set_equalizer_band(0, 0.5);
//! }
//!
//! // Session teardown releases every engine
//! effects.end_session();
//! ```

#![deny(unsafe_code)]

pub mod bands;
mod config;
mod controller;
mod engine;
mod error;
mod session;
pub mod software;
pub mod state;

pub use bands::{band_label, EQ_BAND_COUNT, EQ_CENTER_FREQUENCIES_HZ};
pub use config::EffectsConfig;
pub use controller::{EffectsController, EngineCapabilities};
pub use engine::{
    BassBoostEngine, EffectEngine, EffectsPlatform, EngineRequest, EqualizerEngine,
    LoudnessEngine,
};
pub use error::{EffectsError, Result};
pub use session::SessionEffects;
pub use state::EffectState;
