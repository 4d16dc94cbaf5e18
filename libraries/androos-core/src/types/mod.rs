//! Core domain types for Androos Player

mod effect;
mod session;

pub use effect::EffectKind;
pub use session::AudioSessionId;
