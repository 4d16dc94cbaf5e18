//! Platform effect engine traits
//!
//! These traits are the seam between the controller and whatever actually
//! runs the DSP: the Android audio-effect services behind a native bridge, or
//! the in-process [`software`](crate::software) backend.

use crate::error::Result;
use androos_core::{AudioSessionId, EffectKind};

/// Parameters for binding an engine to an audio session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineRequest {
    /// Session the engine attaches to
    pub session: AudioSessionId,

    /// Platform priority for engines that take one (equalizer, bass boost)
    pub priority: i32,
}

impl EngineRequest {
    /// Request at the default priority (0)
    pub fn new(session: AudioSessionId) -> Self {
        Self {
            session,
            priority: 0,
        }
    }

    /// Set the platform priority
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// Operations every bound engine supports
///
/// Implementations must be `Send` so a controller can move between the
/// thread that creates it and the thread that drives it.
pub trait EffectEngine: Send {
    /// Which engine this is
    fn kind(&self) -> EffectKind;

    /// Enable/disable processing
    fn set_enabled(&mut self, enabled: bool) -> Result<()>;

    /// Release the platform resources behind this binding
    ///
    /// Must be safe to call more than once.
    fn release(&mut self);
}

/// Loudness enhancer binding
pub trait LoudnessEngine: EffectEngine {
    /// Set the target gain in millibels
    fn set_target_gain(&mut self, millibels: i32) -> Result<()>;
}

/// Band equalizer binding
pub trait EqualizerEngine: EffectEngine {
    /// Set the level of one band in millibels
    fn set_band_level(&mut self, band: u16, millibels: i16) -> Result<()>;
}

/// Bass booster binding
pub trait BassBoostEngine: EffectEngine {
    /// Set the boost strength (0-1000)
    fn set_strength(&mut self, strength: u16) -> Result<()>;
}

/// Source of effect engines for audio sessions
///
/// # Errors
/// Each acquisition may fail (unsupported hardware, session already released,
/// effect quota exceeded). Callers treat a failure as "engine absent".
pub trait EffectsPlatform {
    /// Bind a loudness enhancer to the requested session
    fn acquire_loudness(&self, request: &EngineRequest) -> Result<Box<dyn LoudnessEngine>>;

    /// Bind an equalizer to the requested session
    fn acquire_equalizer(&self, request: &EngineRequest) -> Result<Box<dyn EqualizerEngine>>;

    /// Bind a bass booster to the requested session
    fn acquire_bass_boost(&self, request: &EngineRequest) -> Result<Box<dyn BassBoostEngine>>;
}

impl<P: EffectsPlatform + ?Sized> EffectsPlatform for &P {
    fn acquire_loudness(&self, request: &EngineRequest) -> Result<Box<dyn LoudnessEngine>> {
        (**self).acquire_loudness(request)
    }

    fn acquire_equalizer(&self, request: &EngineRequest) -> Result<Box<dyn EqualizerEngine>> {
        (**self).acquire_equalizer(request)
    }

    fn acquire_bass_boost(&self, request: &EngineRequest) -> Result<Box<dyn BassBoostEngine>> {
        (**self).acquire_bass_boost(request)
    }
}

impl<P: EffectsPlatform + ?Sized> EffectsPlatform for std::sync::Arc<P> {
    fn acquire_loudness(&self, request: &EngineRequest) -> Result<Box<dyn LoudnessEngine>> {
        (**self).acquire_loudness(request)
    }

    fn acquire_equalizer(&self, request: &EngineRequest) -> Result<Box<dyn EqualizerEngine>> {
        (**self).acquire_equalizer(request)
    }

    fn acquire_bass_boost(&self, request: &EngineRequest) -> Result<Box<dyn BassBoostEngine>> {
        (**self).acquire_bass_boost(request)
    }
}
