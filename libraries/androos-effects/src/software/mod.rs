//! In-process effects platform
//!
//! `SoftwarePlatform` implements [`EffectsPlatform`] without any device
//! services, so the controller can drive real DSP on a host. Each audio
//! session gets a [`SoftwareSession`] processor; engine handles acquired for
//! that session write their parameters into state the processor reads.
//!
//! Processing order per stereo frame: bass boost (low shelf), equalizer
//! (five peaking bands), loudness gain with a hard ceiling at full scale.
//!
//! ```rust
//! use androos_core::AudioSessionId;
//! use androos_effects::software::SoftwarePlatform;
//! use androos_effects::EffectsController;
//!
//! let platform = SoftwarePlatform::new();
//! let session = AudioSessionId::new(1);
//! let mut processor = platform.open_session(session);
//!
//! let mut effects = EffectsController::new(&platform, session);
//! effects.set_master_gain(0);
//!
//! let mut buffer = vec![0.25_f32; 512];
//! processor.process(&mut buffer, 44_100);
//! assert!(buffer.iter().all(|&s| s == 0.25));
//! ```

mod biquad;

use crate::bands::{EQ_BAND_COUNT, EQ_CENTER_FREQUENCIES_HZ};
use crate::engine::{
    BassBoostEngine, EffectEngine, EffectsPlatform, EngineRequest, EqualizerEngine,
    LoudnessEngine,
};
use crate::error::{EffectsError, Result};
use androos_core::{AudioSessionId, EffectKind};
use biquad::Biquad;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Bass boost shelf corner frequency (Hz)
pub const BASS_BOOST_FREQUENCY_HZ: f32 = 80.0;
/// Shelf gain at full bass boost strength (dB)
pub const BASS_BOOST_MAX_DB: f32 = 15.0;

const BASS_BOOST_Q: f32 = 0.707;
const EQ_BAND_Q: f32 = 1.0;

/// Parameters of one engine stage
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Stage<T> {
    /// An engine handle currently owns this stage
    attached: bool,
    enabled: bool,
    value: T,
}

impl<T: Default> Stage<T> {
    fn is_active(&self) -> bool {
        self.attached && self.enabled
    }

    fn detach(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct SessionParams {
    loudness: Stage<i32>,
    equalizer: Stage<[i16; EQ_BAND_COUNT]>,
    bass_boost: Stage<u16>,
    /// Bumped on every change so processors can skip unchanged state
    revision: u64,
}

impl SessionParams {
    fn stage_attached(&self, kind: EffectKind) -> bool {
        match kind {
            EffectKind::Loudness => self.loudness.attached,
            EffectKind::Equalizer => self.equalizer.attached,
            EffectKind::BassBoost => self.bass_boost.attached,
        }
    }

    fn set_enabled(&mut self, kind: EffectKind, enabled: bool) {
        match kind {
            EffectKind::Loudness => self.loudness.enabled = enabled,
            EffectKind::Equalizer => self.equalizer.enabled = enabled,
            EffectKind::BassBoost => self.bass_boost.enabled = enabled,
        }
    }

    fn attach(&mut self, kind: EffectKind) {
        match kind {
            EffectKind::Loudness => self.loudness.attached = true,
            EffectKind::Equalizer => self.equalizer.attached = true,
            EffectKind::BassBoost => self.bass_boost.attached = true,
        }
        self.revision += 1;
    }

    fn detach(&mut self, kind: EffectKind) {
        match kind {
            EffectKind::Loudness => self.loudness.detach(),
            EffectKind::Equalizer => self.equalizer.detach(),
            EffectKind::BassBoost => self.bass_boost.detach(),
        }
        self.revision += 1;
    }
}

type SharedParams = Arc<Mutex<SessionParams>>;

fn lock(params: &SharedParams) -> MutexGuard<'_, SessionParams> {
    params.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Effects platform backed by in-process DSP
#[derive(Debug, Default)]
pub struct SoftwarePlatform {
    sessions: Mutex<HashMap<AudioSessionId, SharedParams>>,
    unsupported: HashSet<EffectKind>,
}

impl SoftwarePlatform {
    /// Create a platform supporting every engine kind
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an engine kind as unsupported; acquiring it will fail
    #[must_use]
    pub fn without(mut self, kind: EffectKind) -> Self {
        self.unsupported.insert(kind);
        self
    }

    /// Register a live session and return its audio processor
    ///
    /// Opening a session twice returns processors sharing the same engines.
    pub fn open_session(&self, session: AudioSessionId) -> SoftwareSession {
        let params = {
            let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(sessions.entry(session).or_default())
        };
        debug!(session = %session, "Software audio session opened");
        SoftwareSession::new(session, params)
    }

    /// Unregister a session; later acquisitions for it fail
    ///
    /// Engines and processors already handed out keep working.
    pub fn close_session(&self, session: AudioSessionId) -> bool {
        let removed = self
            .sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&session)
            .is_some();
        if removed {
            debug!(session = %session, "Software audio session closed");
        }
        removed
    }

    /// Whether a session is registered
    pub fn has_session(&self, session: AudioSessionId) -> bool {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&session)
    }

    fn attach(&self, kind: EffectKind, request: &EngineRequest) -> Result<EngineHandle> {
        if self.unsupported.contains(&kind) {
            return Err(EffectsError::Unsupported(kind));
        }
        let params = self
            .sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&request.session)
            .cloned()
            .ok_or(EffectsError::SessionNotFound(request.session))?;

        {
            let mut guard = lock(&params);
            if guard.stage_attached(kind) {
                return Err(EffectsError::acquisition(
                    kind,
                    request.session,
                    "engine already attached to this session",
                ));
            }
            guard.attach(kind);
        }

        Ok(EngineHandle {
            kind,
            params,
            released: false,
        })
    }
}

impl EffectsPlatform for SoftwarePlatform {
    fn acquire_loudness(&self, request: &EngineRequest) -> Result<Box<dyn LoudnessEngine>> {
        Ok(Box::new(self.attach(EffectKind::Loudness, request)?))
    }

    fn acquire_equalizer(&self, request: &EngineRequest) -> Result<Box<dyn EqualizerEngine>> {
        Ok(Box::new(self.attach(EffectKind::Equalizer, request)?))
    }

    fn acquire_bass_boost(&self, request: &EngineRequest) -> Result<Box<dyn BassBoostEngine>> {
        Ok(Box::new(self.attach(EffectKind::BassBoost, request)?))
    }
}

/// Engine binding handed to the controller
///
/// One type serves all three kinds; a handle only accepts the forwarding
/// call matching its kind.
#[derive(Debug)]
struct EngineHandle {
    kind: EffectKind,
    params: SharedParams,
    released: bool,
}

impl EngineHandle {
    fn update(&self, apply: impl FnOnce(&mut SessionParams)) -> Result<()> {
        if self.released {
            return Err(EffectsError::Released(self.kind));
        }
        let mut params = lock(&self.params);
        apply(&mut params);
        params.revision += 1;
        Ok(())
    }

    fn expect_kind(&self, kind: EffectKind) -> Result<()> {
        if self.kind == kind {
            Ok(())
        } else {
            Err(EffectsError::engine(
                self.kind,
                format!("{} parameter sent to {} engine", kind, self.kind),
            ))
        }
    }
}

impl EffectEngine for EngineHandle {
    fn kind(&self) -> EffectKind {
        self.kind
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        let kind = self.kind;
        self.update(|params| params.set_enabled(kind, enabled))
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        lock(&self.params).detach(self.kind);
    }
}

impl LoudnessEngine for EngineHandle {
    fn set_target_gain(&mut self, millibels: i32) -> Result<()> {
        self.expect_kind(EffectKind::Loudness)?;
        self.update(|params| params.loudness.value = millibels)
    }
}

impl EqualizerEngine for EngineHandle {
    fn set_band_level(&mut self, band: u16, millibels: i16) -> Result<()> {
        self.expect_kind(EffectKind::Equalizer)?;
        let index = usize::from(band);
        if index >= EQ_BAND_COUNT {
            return Err(EffectsError::engine(
                EffectKind::Equalizer,
                format!("band {} out of range", band),
            ));
        }
        self.update(|params| params.equalizer.value[index] = millibels)
    }
}

impl BassBoostEngine for EngineHandle {
    fn set_strength(&mut self, strength: u16) -> Result<()> {
        self.expect_kind(EffectKind::BassBoost)?;
        self.update(|params| params.bass_boost.value = strength)
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.release();
    }
}

/// Audio processor for one software session
///
/// Processes interleaved stereo `f32` buffers. Parameter changes made through
/// engine handles are picked up at the start of the next `process` call.
pub struct SoftwareSession {
    session: AudioSessionId,
    params: SharedParams,
    snapshot: SessionParams,
    sample_rate: u32,
    bass: Biquad,
    bands: [Biquad; EQ_BAND_COUNT],
    gain: f32,
}

impl SoftwareSession {
    fn new(session: AudioSessionId, params: SharedParams) -> Self {
        Self {
            session,
            params,
            snapshot: SessionParams {
                // force a sync on the first buffer
                revision: u64::MAX,
                ..SessionParams::default()
            },
            sample_rate: 0,
            bass: Biquad::identity(),
            bands: std::array::from_fn(|_| Biquad::identity()),
            gain: 1.0,
        }
    }

    /// Session this processor belongs to
    pub fn session(&self) -> AudioSessionId {
        self.session
    }

    /// Apply the session's active effects in place
    ///
    /// # Arguments
    /// * `buffer` - Interleaved stereo samples (L, R, L, R, ...)
    /// * `sample_rate` - Sample rate in Hz
    ///
    /// A trailing half frame gets only the loudness gain; the filters need
    /// both channels.
    pub fn process(&mut self, buffer: &mut [f32], sample_rate: u32) {
        self.sync(sample_rate);

        let bass = self.snapshot.bass_boost.is_active();
        let equalizer = self.snapshot.equalizer.is_active();
        let loudness = self.snapshot.loudness.is_active();
        if !(bass || equalizer || loudness) {
            return;
        }

        let mut frames = buffer.chunks_exact_mut(2);
        for frame in &mut frames {
            let (mut left, mut right) = (frame[0], frame[1]);

            if bass {
                (left, right) = self.bass.process(left, right);
            }
            if equalizer {
                for band in &mut self.bands {
                    (left, right) = band.process(left, right);
                }
            }
            if loudness {
                left = (left * self.gain).clamp(-1.0, 1.0);
                right = (right * self.gain).clamp(-1.0, 1.0);
            }

            frame[0] = left;
            frame[1] = right;
        }

        if loudness {
            for sample in frames.into_remainder() {
                *sample = (*sample * self.gain).clamp(-1.0, 1.0);
            }
        }
    }

    /// Clear filter history (e.g. after a seek)
    pub fn reset(&mut self) {
        self.bass.reset();
        for band in &mut self.bands {
            band.reset();
        }
    }

    fn sync(&mut self, sample_rate: u32) {
        let params = lock(&self.params).clone();
        if params.revision == self.snapshot.revision && sample_rate == self.sample_rate {
            return;
        }

        let sr = sample_rate as f32;
        let bass_db = f32::from(params.bass_boost.value) / 1000.0 * BASS_BOOST_MAX_DB;
        self.bass
            .set_low_shelf(sr, BASS_BOOST_FREQUENCY_HZ, BASS_BOOST_Q, bass_db);

        for ((band, &hz), &millibels) in self
            .bands
            .iter_mut()
            .zip(EQ_CENTER_FREQUENCIES_HZ.iter())
            .zip(params.equalizer.value.iter())
        {
            band.set_peaking(sr, hz as f32, EQ_BAND_Q, millibels_to_db(i32::from(millibels)));
        }

        self.gain = db_to_linear(millibels_to_db(params.loudness.value));
        self.snapshot = params;
        self.sample_rate = sample_rate;
    }
}

impl std::fmt::Debug for SoftwareSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoftwareSession")
            .field("session", &self.session)
            .field("sample_rate", &self.sample_rate)
            .field("gain", &self.gain)
            .finish_non_exhaustive()
    }
}

/// Millibels to decibels
pub fn millibels_to_db(millibels: i32) -> f32 {
    millibels as f32 / 100.0
}

/// Decibels to linear amplitude
pub fn db_to_linear(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}
