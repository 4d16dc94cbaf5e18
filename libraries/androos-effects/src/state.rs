//! Effect parameter state
//!
//! `EffectState` mirrors the three control values the controller forwards to
//! its engines. Every write goes through a clamping setter, so a stored value
//! is always inside its domain. Deserialized values are clamped the same way.

use crate::bands::EQ_BAND_COUNT;
use serde::{Deserialize, Serialize};

/// Lowest master gain (millibels)
pub const MASTER_GAIN_MIN: i32 = 0;
/// Highest master gain (millibels)
pub const MASTER_GAIN_MAX: i32 = 2000;
/// Master gain after a reset (mid value)
pub const MASTER_GAIN_DEFAULT: i32 = 1000;

/// Lowest normalized equalizer level
pub const EQ_LEVEL_MIN: f32 = -1.0;
/// Highest normalized equalizer level
pub const EQ_LEVEL_MAX: f32 = 1.0;
/// Equalizer level after a reset (flat)
pub const EQ_LEVEL_DEFAULT: f32 = 0.0;

/// Lowest bass boost strength
pub const BASS_BOOST_MIN: i32 = 0;
/// Highest bass boost strength
pub const BASS_BOOST_MAX: i32 = 1000;
/// Bass boost strength after a reset
pub const BASS_BOOST_DEFAULT: i32 = 0;

/// In-memory mirror of the effect parameters for one audio session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawEffectState")]
pub struct EffectState {
    master_gain: i32,
    equalizer_bands: [f32; EQ_BAND_COUNT],
    bass_boost_strength: i32,
}

impl EffectState {
    /// Create state holding the default values
    pub fn new() -> Self {
        Self {
            master_gain: MASTER_GAIN_DEFAULT,
            equalizer_bands: [EQ_LEVEL_DEFAULT; EQ_BAND_COUNT],
            bass_boost_strength: BASS_BOOST_DEFAULT,
        }
    }

    /// Master gain in millibels
    pub fn master_gain(&self) -> i32 {
        self.master_gain
    }

    /// Store a master gain, returning the clamped value
    pub fn set_master_gain(&mut self, gain: i32) -> i32 {
        self.master_gain = gain.clamp(MASTER_GAIN_MIN, MASTER_GAIN_MAX);
        self.master_gain
    }

    /// Level of one band, or the flat level for an out-of-range index
    pub fn equalizer_band(&self, index: usize) -> f32 {
        self.equalizer_bands
            .get(index)
            .copied()
            .unwrap_or(EQ_LEVEL_DEFAULT)
    }

    /// All band levels, lowest frequency first
    pub fn equalizer_bands(&self) -> [f32; EQ_BAND_COUNT] {
        self.equalizer_bands
    }

    /// Store a band level, returning the clamped value
    ///
    /// Returns `None` without touching state when `index` is out of range or
    /// `level` is NaN.
    pub fn set_equalizer_band(&mut self, index: usize, level: f32) -> Option<f32> {
        if level.is_nan() {
            return None;
        }
        let slot = self.equalizer_bands.get_mut(index)?;
        *slot = level.clamp(EQ_LEVEL_MIN, EQ_LEVEL_MAX);
        Some(*slot)
    }

    /// Bass boost strength (0-1000)
    pub fn bass_boost(&self) -> i32 {
        self.bass_boost_strength
    }

    /// Store a bass boost strength, returning the clamped value
    pub fn set_bass_boost(&mut self, strength: i32) -> i32 {
        self.bass_boost_strength = strength.clamp(BASS_BOOST_MIN, BASS_BOOST_MAX);
        self.bass_boost_strength
    }
}

impl Default for EffectState {
    fn default() -> Self {
        Self::new()
    }
}

/// Unvalidated wire form of `EffectState`
#[derive(Deserialize)]
struct RawEffectState {
    #[serde(default = "default_master_gain")]
    master_gain: i32,
    #[serde(default)]
    equalizer_bands: [f32; EQ_BAND_COUNT],
    #[serde(default)]
    bass_boost_strength: i32,
}

fn default_master_gain() -> i32 {
    MASTER_GAIN_DEFAULT
}

impl From<RawEffectState> for EffectState {
    fn from(raw: RawEffectState) -> Self {
        let mut state = Self::new();
        state.set_master_gain(raw.master_gain);
        for (index, level) in raw.equalizer_bands.into_iter().enumerate() {
            state.set_equalizer_band(index, level);
        }
        state.set_bass_boost(raw.bass_boost_strength);
        state
    }
}
