//! Effects configuration
//!
//! Controls which engines a controller requests and at what platform
//! priority. Parameter defaults are compiled-in (see [`crate::state`]) and
//! are not part of the configuration.

use crate::error::Result;
use androos_core::EffectKind;
use serde::{Deserialize, Serialize};

/// Engine selection for new effects controllers
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EffectsConfig {
    /// Priority passed to engines that take one
    #[serde(default = "default_priority")]
    pub priority: i32,

    /// Request a loudness enhancer
    #[serde(default = "default_enabled")]
    pub loudness: bool,

    /// Request an equalizer
    #[serde(default = "default_enabled")]
    pub equalizer: bool,

    /// Request a bass booster
    #[serde(default = "default_enabled")]
    pub bass_boost: bool,
}

fn default_priority() -> i32 {
    0
}

fn default_enabled() -> bool {
    true
}

impl EffectsConfig {
    /// Parse a configuration blob supplied by the host application
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether engines of this kind should be requested
    pub fn requests(&self, kind: EffectKind) -> bool {
        match kind {
            EffectKind::Loudness => self.loudness,
            EffectKind::Equalizer => self.equalizer,
            EffectKind::BassBoost => self.bass_boost,
        }
    }
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            priority: default_priority(),
            loudness: default_enabled(),
            equalizer: default_enabled(),
            bass_boost: default_enabled(),
        }
    }
}
