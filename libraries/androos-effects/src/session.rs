//! Current-session effects slot
//!
//! The player reports a new audio session id whenever its output is
//! re-created. `SessionEffects` holds the one controller for the live session
//! and releases it before binding engines to the next session, so engines of
//! an old session are never left attached.

use crate::config::EffectsConfig;
use crate::controller::EffectsController;
use crate::engine::EffectsPlatform;
use androos_core::AudioSessionId;
use tracing::{debug, info};

/// Owner of the effects controller for the current audio session
pub struct SessionEffects<P: EffectsPlatform> {
    platform: P,
    config: EffectsConfig,
    current: Option<EffectsController>,
}

impl<P: EffectsPlatform> SessionEffects<P> {
    /// Create an empty slot using the default configuration
    pub fn new(platform: P) -> Self {
        Self::with_config(platform, EffectsConfig::default())
    }

    /// Create an empty slot
    pub fn with_config(platform: P, config: EffectsConfig) -> Self {
        Self {
            platform,
            config,
            current: None,
        }
    }

    /// Platform engines are acquired from
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Configuration used for every new controller
    pub fn config(&self) -> &EffectsConfig {
        &self.config
    }

    /// Handle an audio session change reported by the player
    ///
    /// `UNSET` and the id already bound are ignored. Any other id releases
    /// the current controller and binds a fresh one with default parameters.
    pub fn on_audio_session_changed(&mut self, session: AudioSessionId) {
        if !session.is_set() {
            debug!("Ignoring unset audio session id");
            return;
        }
        if self.current_session() == Some(session) {
            debug!(session = %session, "Audio session unchanged");
            return;
        }

        if let Some(mut previous) = self.current.take() {
            info!(from = %previous.session(), to = %session, "Audio session changed");
            previous.release();
        }
        self.current = Some(EffectsController::with_config(
            &self.platform,
            session,
            &self.config,
        ));
    }

    /// Release the current controller, if any
    pub fn end_session(&mut self) {
        if let Some(mut controller) = self.current.take() {
            controller.release();
        }
    }

    /// Session the current controller is bound to
    pub fn current_session(&self) -> Option<AudioSessionId> {
        self.current.as_ref().map(EffectsController::session)
    }

    /// Controller for the current session
    pub fn controller(&self) -> Option<&EffectsController> {
        self.current.as_ref()
    }

    /// Mutable controller for the current session
    pub fn controller_mut(&mut self) -> Option<&mut EffectsController> {
        self.current.as_mut()
    }
}

impl<P: EffectsPlatform> Drop for SessionEffects<P> {
    fn drop(&mut self) {
        self.end_session();
    }
}
