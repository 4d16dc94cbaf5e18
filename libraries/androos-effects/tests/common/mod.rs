//! Shared test helpers: a platform that records every engine call

#![allow(dead_code)]

use androos_core::{AudioSessionId, EffectKind};
use androos_effects::{
    BassBoostEngine, EffectEngine, EffectsError, EffectsPlatform, EngineRequest, EqualizerEngine,
    LoudnessEngine, Result,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// One observed platform or engine call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Call {
    Acquire(EffectKind, AudioSessionId, i32),
    Enable(EffectKind, AudioSessionId, bool),
    TargetGain(AudioSessionId, i32),
    BandLevel(AudioSessionId, u16, i16),
    Strength(AudioSessionId, u16),
    Release(EffectKind, AudioSessionId),
}

#[derive(Default)]
struct Shared {
    calls: Vec<Call>,
    fail_acquire: HashSet<EffectKind>,
    fail_enable: HashSet<EffectKind>,
    fail_forward: HashSet<EffectKind>,
}

/// Platform double; clones share the same call log and failure switches
#[derive(Clone, Default)]
pub struct RecordingPlatform {
    shared: Arc<Mutex<Shared>>,
}

impl RecordingPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_acquire(self, kind: EffectKind) -> Self {
        self.shared.lock().unwrap().fail_acquire.insert(kind);
        self
    }

    pub fn fail_enable(self, kind: EffectKind) -> Self {
        self.shared.lock().unwrap().fail_enable.insert(kind);
        self
    }

    pub fn fail_forward(self, kind: EffectKind) -> Self {
        self.shared.lock().unwrap().fail_forward.insert(kind);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.shared.lock().unwrap().calls.clone()
    }

    /// Return and clear the call log
    pub fn take_calls(&self) -> Vec<Call> {
        std::mem::take(&mut self.shared.lock().unwrap().calls)
    }

    pub fn releases(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Release(..)))
            .collect()
    }

    fn record(&self, call: Call) {
        self.shared.lock().unwrap().calls.push(call);
    }

    fn acquire(&self, kind: EffectKind, request: &EngineRequest) -> Result<RecordingEngine> {
        self.record(Call::Acquire(kind, request.session, request.priority));
        if self.shared.lock().unwrap().fail_acquire.contains(&kind) {
            return Err(EffectsError::acquisition(
                kind,
                request.session,
                "effect quota exceeded",
            ));
        }
        Ok(RecordingEngine {
            kind,
            session: request.session,
            platform: self.clone(),
        })
    }

    fn fails(&self, set: fn(&Shared) -> &HashSet<EffectKind>, kind: EffectKind) -> bool {
        set(&self.shared.lock().unwrap()).contains(&kind)
    }
}

impl EffectsPlatform for RecordingPlatform {
    fn acquire_loudness(&self, request: &EngineRequest) -> Result<Box<dyn LoudnessEngine>> {
        Ok(Box::new(self.acquire(EffectKind::Loudness, request)?))
    }

    fn acquire_equalizer(&self, request: &EngineRequest) -> Result<Box<dyn EqualizerEngine>> {
        Ok(Box::new(self.acquire(EffectKind::Equalizer, request)?))
    }

    fn acquire_bass_boost(&self, request: &EngineRequest) -> Result<Box<dyn BassBoostEngine>> {
        Ok(Box::new(self.acquire(EffectKind::BassBoost, request)?))
    }
}

pub struct RecordingEngine {
    kind: EffectKind,
    session: AudioSessionId,
    platform: RecordingPlatform,
}

impl RecordingEngine {
    fn forward(&self, call: Call) -> Result<()> {
        self.platform.record(call);
        if self.platform.fails(|s| &s.fail_forward, self.kind) {
            return Err(EffectsError::engine(self.kind, "illegal state"));
        }
        Ok(())
    }
}

impl EffectEngine for RecordingEngine {
    fn kind(&self) -> EffectKind {
        self.kind
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        self.platform
            .record(Call::Enable(self.kind, self.session, enabled));
        if self.platform.fails(|s| &s.fail_enable, self.kind) {
            return Err(EffectsError::engine(self.kind, "enable rejected"));
        }
        Ok(())
    }

    fn release(&mut self) {
        self.platform.record(Call::Release(self.kind, self.session));
    }
}

impl LoudnessEngine for RecordingEngine {
    fn set_target_gain(&mut self, millibels: i32) -> Result<()> {
        self.forward(Call::TargetGain(self.session, millibels))
    }
}

impl EqualizerEngine for RecordingEngine {
    fn set_band_level(&mut self, band: u16, millibels: i16) -> Result<()> {
        self.forward(Call::BandLevel(self.session, band, millibels))
    }
}

impl BassBoostEngine for RecordingEngine {
    fn set_strength(&mut self, strength: u16) -> Result<()> {
        self.forward(Call::Strength(self.session, strength))
    }
}

/// Route `tracing` output to the test harness
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("androos_effects=debug")
        .with_test_writer()
        .try_init();
}
