// extensions/choreographer.rs
//
// Live playhead over an immutable `Timeline`.
// Each seek re-evaluates the pure mapping at the new time; nothing is
// accumulated from deltas, so scrolling back simply lands on the same state.

use super::timeline::{Evaluation, FiredCue, Timeline};

/// Outcome of moving the playhead once.
#[derive(Debug, Clone)]
pub struct Step {
    /// Clamped progress that was fed in.
    pub progress: f32,
    pub evaluation: Evaluation,
    /// Cues crossed on the way from the previous playhead position.
    pub fired: Vec<FiredCue>,
}

/// Maps scroll progress onto the timeline and reports crossed cues.
pub struct Choreographer {
    timeline: Timeline,
    /// Current playhead, in timeline seconds.
    cursor: f32,
}

impl Choreographer {
    pub fn new(timeline: Timeline) -> Self {
        Self { timeline, cursor: 0.0 }
    }

    /// Move the playhead to `progress` (clamped to [0, 1]).
    pub fn seek(&mut self, progress: f32) -> Step {
        let time = self.timeline.time_at(progress);
        let fired = self.timeline.crossed(self.cursor, time);
        for cue in &fired {
            log::debug!("cue {:?} {:?} at {:.2}s", cue.action, cue.direction, cue.time);
        }
        self.cursor = time;
        Step {
            progress: if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) },
            evaluation: self.timeline.evaluate(time),
            fired,
        }
    }

    pub fn cursor(&self) -> f32 {
        self.cursor
    }
}
