//! Audio cue contract and the gesture gate in front of it.
//!
//! Browsers refuse to start audio before a user gesture, so every cue goes
//! through [`AudioGate`]: nothing reaches the service until the first
//! qualifying gesture, and start-up is attempted exactly once.

use crate::api::types::Cue;
use crate::error::AudioError;

/// Fire-and-forget cue playback, implemented by the host.
pub trait AudioCues {
    /// Create or resume the audio context. Called at most once per session.
    fn ensure_started(&mut self) -> Result<(), AudioError>;

    /// Start a cue. Must not block; overlapping cues play concurrently.
    fn play_cue(&mut self, cue: Cue);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioState {
    /// Waiting for the first gesture.
    Locked,
    Running,
    /// Start-up failed; cues stay silent for the rest of the session.
    Failed,
}

#[derive(Debug)]
pub struct AudioGate {
    state: AudioState,
}

impl AudioGate {
    pub fn new() -> Self {
        Self { state: AudioState::Locked }
    }

    pub fn state(&self) -> AudioState {
        self.state
    }

    /// Handle a qualifying gesture. The first call starts the service and fades
    /// in the ambient drone; later calls do nothing.
    pub fn unlock<A: AudioCues + ?Sized>(&mut self, audio: &mut A) {
        if self.state != AudioState::Locked {
            return;
        }
        match audio.ensure_started() {
            Ok(()) => {
                log::info!("audio unlocked");
                self.state = AudioState::Running;
                audio.play_cue(Cue::AmbientFadeIn);
            }
            Err(e) => {
                log::warn!("{e}; continuing without sound");
                self.state = AudioState::Failed;
            }
        }
    }

    /// Forward a cue if audio is running; otherwise drop it.
    pub fn play<A: AudioCues + ?Sized>(&self, audio: &mut A, cue: Cue) {
        if self.state == AudioState::Running {
            audio.play_cue(cue);
        }
    }
}

impl Default for AudioGate {
    fn default() -> Self {
        Self::new()
    }
}
