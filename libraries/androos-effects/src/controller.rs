//! Effects parameter controller
//!
//! Binds loudness, equalizer and bass boost engines to one audio session and
//! keeps their parameters in range.
//!
//! Effects are an enhancement, not a requirement for playback, so nothing
//! here fails visibly:
//! - an engine that cannot be acquired or enabled is left out and its
//!   setter only updates the stored value
//! - out-of-range values are clamped, invalid band indices are ignored
//! - engine errors after binding are logged and swallowed
//!
//! After [`EffectsController::release`] every mutating call is a no-op and
//! the getters keep returning the last stored values.

use crate::bands::{level_to_millibels, EQ_BAND_COUNT};
use crate::config::EffectsConfig;
use crate::engine::{
    BassBoostEngine, EffectEngine, EffectsPlatform, EngineRequest, EqualizerEngine,
    LoudnessEngine,
};
use crate::error::Result;
use crate::state::{EffectState, BASS_BOOST_DEFAULT, EQ_LEVEL_DEFAULT, MASTER_GAIN_DEFAULT};
use androos_core::{AudioSessionId, EffectKind};
use tracing::{debug, info, warn};

/// Which engines a controller actually holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineCapabilities {
    /// Loudness enhancer is bound
    pub loudness: bool,
    /// Equalizer is bound
    pub equalizer: bool,
    /// Bass booster is bound
    pub bass_boost: bool,
}

impl EngineCapabilities {
    /// Whether the engine of this kind is bound
    pub fn has(&self, kind: EffectKind) -> bool {
        match kind {
            EffectKind::Loudness => self.loudness,
            EffectKind::Equalizer => self.equalizer,
            EffectKind::BassBoost => self.bass_boost,
        }
    }

    /// Number of bound engines
    pub fn count(&self) -> usize {
        EffectKind::ALL.iter().filter(|&&kind| self.has(kind)).count()
    }
}

/// Audio effects controller for one audio session
///
/// # Example
///
/// ```rust
/// use androos_core::AudioSessionId;
/// use androos_effects::software::SoftwarePlatform;
/// use androos_effects::EffectsController;
///
/// let platform = SoftwarePlatform::new();
/// let session = AudioSessionId::new(7);
/// let _processor = platform.open_session(session);
///
/// let mut effects = EffectsController::new(&platform, session);
/// effects.set_master_gain(2500);
/// assert_eq!(effects.master_gain(), 2000);
///
/// effects.set_equalizer_band(10, 0.9); // ignored
/// assert_eq!(effects.equalizer_band(10), 0.0);
///
/// effects.release();
/// ```
pub struct EffectsController {
    session: AudioSessionId,
    loudness: Option<Box<dyn LoudnessEngine>>,
    equalizer: Option<Box<dyn EqualizerEngine>>,
    bass_boost: Option<Box<dyn BassBoostEngine>>,
    state: EffectState,
    released: bool,
}

impl EffectsController {
    /// Bind every engine to `session` with the default configuration
    pub fn new<P: EffectsPlatform + ?Sized>(platform: &P, session: AudioSessionId) -> Self {
        Self::with_config(platform, session, &EffectsConfig::default())
    }

    /// Bind the engines `config` requests to `session`
    ///
    /// Engines that fail to bind are logged and left out. The stored
    /// parameters are reset to defaults and forwarded to whatever did bind.
    pub fn with_config<P: EffectsPlatform + ?Sized>(
        platform: &P,
        session: AudioSessionId,
        config: &EffectsConfig,
    ) -> Self {
        let request = EngineRequest::new(session).with_priority(config.priority);

        let loudness = config
            .requests(EffectKind::Loudness)
            .then(|| bind(EffectKind::Loudness, session, platform.acquire_loudness(&request)))
            .flatten();
        let equalizer = config
            .requests(EffectKind::Equalizer)
            .then(|| bind(EffectKind::Equalizer, session, platform.acquire_equalizer(&request)))
            .flatten();
        let bass_boost = config
            .requests(EffectKind::BassBoost)
            .then(|| bind(EffectKind::BassBoost, session, platform.acquire_bass_boost(&request)))
            .flatten();

        let mut controller = Self {
            session,
            loudness,
            equalizer,
            bass_boost,
            state: EffectState::new(),
            released: false,
        };

        let capabilities = controller.capabilities();
        info!(
            session = %session,
            loudness = capabilities.loudness,
            equalizer = capabilities.equalizer,
            bass_boost = capabilities.bass_boost,
            "Audio effects bound"
        );

        controller.reset_to_defaults();
        controller
    }

    /// Session the engines are bound to
    pub fn session(&self) -> AudioSessionId {
        self.session
    }

    /// Engines currently held (all absent after release)
    pub fn capabilities(&self) -> EngineCapabilities {
        EngineCapabilities {
            loudness: self.loudness.is_some(),
            equalizer: self.equalizer.is_some(),
            bass_boost: self.bass_boost.is_some(),
        }
    }

    /// Snapshot of the stored parameters
    pub fn state(&self) -> &EffectState {
        &self.state
    }

    /// Whether `release` has been called
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Set master gain in millibels (clamped to 0-2000)
    pub fn set_master_gain(&mut self, gain: i32) {
        if self.ignored_after_release("set_master_gain") {
            return;
        }
        let gain = self.state.set_master_gain(gain);
        if let Some(engine) = self.loudness.as_mut() {
            report(self.session, EffectKind::Loudness, engine.set_target_gain(gain));
        }
    }

    /// Master gain in millibels
    pub fn master_gain(&self) -> i32 {
        self.state.master_gain()
    }

    /// Set one equalizer band (level clamped to -1.0..=1.0)
    ///
    /// An index outside the band table is ignored.
    pub fn set_equalizer_band(&mut self, index: usize, level: f32) {
        if self.ignored_after_release("set_equalizer_band") {
            return;
        }
        let Some(level) = self.state.set_equalizer_band(index, level) else {
            debug!(session = %self.session, index, level, "Ignoring equalizer band update");
            return;
        };
        if let Some(engine) = self.equalizer.as_mut() {
            let result = engine.set_band_level(index as u16, level_to_millibels(level));
            report(self.session, EffectKind::Equalizer, result);
        }
    }

    /// Level of one equalizer band, 0.0 for an out-of-range index
    pub fn equalizer_band(&self, index: usize) -> f32 {
        self.state.equalizer_band(index)
    }

    /// All equalizer band levels, lowest frequency first
    pub fn equalizer_bands(&self) -> [f32; EQ_BAND_COUNT] {
        self.state.equalizer_bands()
    }

    /// Set bass boost strength (clamped to 0-1000)
    pub fn set_bass_boost(&mut self, strength: i32) {
        if self.ignored_after_release("set_bass_boost") {
            return;
        }
        let strength = self.state.set_bass_boost(strength);
        if let Some(engine) = self.bass_boost.as_mut() {
            report(self.session, EffectKind::BassBoost, engine.set_strength(strength as u16));
        }
    }

    /// Bass boost strength
    pub fn bass_boost(&self) -> i32 {
        self.state.bass_boost()
    }

    /// Restore mid master gain, a flat equalizer and no bass boost
    pub fn reset_to_defaults(&mut self) {
        if self.ignored_after_release("reset_to_defaults") {
            return;
        }
        self.set_master_gain(MASTER_GAIN_DEFAULT);
        for index in 0..EQ_BAND_COUNT {
            self.set_equalizer_band(index, EQ_LEVEL_DEFAULT);
        }
        self.set_bass_boost(BASS_BOOST_DEFAULT);
    }

    /// Release every bound engine
    ///
    /// Safe to call more than once; also runs on drop.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        if let Some(mut engine) = self.loudness.take() {
            engine.release();
        }
        if let Some(mut engine) = self.equalizer.take() {
            engine.release();
        }
        if let Some(mut engine) = self.bass_boost.take() {
            engine.release();
        }
        info!(session = %self.session, "Audio effects released");
    }

    fn ignored_after_release(&self, operation: &str) -> bool {
        if self.released {
            debug!(session = %self.session, operation, "Effects controller already released");
        }
        self.released
    }
}

impl Drop for EffectsController {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for EffectsController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectsController")
            .field("session", &self.session)
            .field("capabilities", &self.capabilities())
            .field("state", &self.state)
            .field("released", &self.released)
            .finish()
    }
}

/// Enable a freshly acquired engine, or log why it is missing
fn bind<E>(kind: EffectKind, session: AudioSessionId, acquired: Result<Box<E>>) -> Option<Box<E>>
where
    E: EffectEngine + ?Sized,
{
    let mut engine = match acquired {
        Ok(engine) => engine,
        Err(e) => {
            warn!(session = %session, engine = %kind, error = %e, "Effect engine unavailable");
            return None;
        }
    };

    match engine.set_enabled(true) {
        Ok(()) => {
            debug!(session = %session, engine = %kind, "Effect engine enabled");
            Some(engine)
        }
        Err(e) => {
            warn!(session = %session, engine = %kind, error = %e, "Failed to enable effect engine");
            engine.release();
            None
        }
    }
}

fn report(session: AudioSessionId, kind: EffectKind, result: Result<()>) {
    if let Err(e) = result {
        warn!(session = %session, engine = %kind, error = %e, "Effect engine rejected parameter");
    }
}
