//! Effect engine kinds

use serde::{Deserialize, Serialize};
use std::fmt;

/// The platform effect engines a player binds to an audio session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    /// Loudness enhancer (master gain in millibels)
    Loudness,
    /// Five-band equalizer
    Equalizer,
    /// Bass booster (strength 0-1000)
    BassBoost,
}

impl EffectKind {
    /// All kinds, in binding order
    pub const ALL: [Self; 3] = [Self::Loudness, Self::Equalizer, Self::BassBoost];

    /// Human-readable name (for logs and error messages)
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loudness => "loudness",
            Self::Equalizer => "equalizer",
            Self::BassBoost => "bass boost",
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
