// extensions/timeline.rs
//
// Data-driven stage timeline. Stages are authored once through `TimelineBuilder`,
// resolved to absolute times in a single pass, and then evaluated as a pure
// function of time: `evaluate(t)` for property values, `crossed(a, b)` for the
// discrete actions whose trigger lies between two playhead positions.
//
// Usage:
//   let timeline = TimelineBuilder::new(initial)
//       .stage(Stage::new("fade").to(Property::PhotonOpacity, 1.0).duration(1.0))
//       .label("zoom")
//       .stage(Stage::new("dolly").at(Position::label("zoom")).camera_to(target))
//       .build()?;
//   let snapshot = timeline.evaluate(12.5).snapshot;

use std::collections::HashMap;
use glam::Vec3;
use crate::error::{Result, TransitError};
use super::easing::{Easing, ease};
use super::property::{Action, Property, Snapshot, UpdateHook};
use crate::api::types::Direction;

/// Duration of a stage that does not name one, in timeline seconds.
pub const DEFAULT_DURATION: f32 = 0.5;

/// Tolerance when comparing resolved stage times.
const TIME_EPSILON: f32 = 1e-4;

/// Where a stage starts, relative to what was authored before it.
#[derive(Debug, Clone, PartialEq)]
pub enum Position {
    /// Append at the current end of the timeline.
    End,
    /// Absolute timeline time.
    At(f32),
    /// At a previously defined label.
    Label(String),
    /// At a previously defined label plus an offset.
    LabelOffset(String, f32),
    /// Relative to the current end: negative overlaps, positive leaves a hold.
    Offset(f32),
    /// Together with the previous stage.
    WithPrevious,
    /// Right after the previous stage ends (which may be before the timeline end).
    AfterPrevious,
}

impl Position {
    pub fn label(name: impl Into<String>) -> Self {
        Position::Label(name.into())
    }
}

/// Authoring form of a stage.
#[derive(Debug, Clone)]
pub struct Stage {
    name: String,
    position: Position,
    duration: f32,
    easing: Easing,
    bindings: Vec<(Property, Option<f32>, f32)>,
    cues: Vec<(f32, Action)>,
    hook: Option<UpdateHook>,
}

impl Stage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: Position::End,
            duration: DEFAULT_DURATION,
            easing: Easing::default(),
            bindings: Vec::new(),
            cues: Vec::new(),
            hook: None,
        }
    }

    /// Zero-length stage that only fires `action`.
    pub fn call(name: impl Into<String>, action: Action) -> Self {
        Self::new(name).duration(0.0).cue_at(0.0, action)
    }

    /// Stage that animates nothing for `duration`.
    pub fn hold(name: impl Into<String>, duration: f32) -> Self {
        Self::new(name).duration(duration)
    }

    // -- Builder methods --

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Animate `property` from wherever earlier stages left it to `to`.
    pub fn to(mut self, property: Property, to: f32) -> Self {
        self.bindings.push((property, None, to));
        self
    }

    /// Animate `property` between explicit values.
    pub fn from_to(mut self, property: Property, from: f32, to: f32) -> Self {
        self.bindings.push((property, Some(from), to));
        self
    }

    pub fn camera_to(self, target: Vec3) -> Self {
        self.to(Property::CameraX, target.x)
            .to(Property::CameraY, target.y)
            .to(Property::CameraZ, target.z)
    }

    pub fn look_at(self, target: Vec3) -> Self {
        self.to(Property::LookAtX, target.x)
            .to(Property::LookAtY, target.y)
            .to(Property::LookAtZ, target.z)
    }

    /// Fire `action` at `offset` seconds into the stage (clamped into the stage).
    pub fn cue_at(mut self, offset: f32, action: Action) -> Self {
        self.cues.push((offset, action));
        self
    }

    /// Fire `action` when the stage completes.
    pub fn on_end(mut self, action: Action) -> Self {
        self.cues.push((f32::INFINITY, action));
        self
    }

    pub fn on_update(mut self, hook: UpdateHook) -> Self {
        self.hook = Some(hook);
        self
    }
}

/// One property interpolation with both ends resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub property: Property,
    pub from: f32,
    pub to: f32,
}

/// A stage placed on the timeline.
#[derive(Debug, Clone)]
pub struct StageSpan {
    pub name: String,
    pub start: f32,
    pub duration: f32,
    pub easing: Easing,
    pub tracks: Vec<Track>,
    pub hook: Option<UpdateHook>,
}

impl StageSpan {
    pub fn end(&self) -> f32 {
        self.start + self.duration
    }

    /// Raw (un-eased) progress through the stage, or None before it starts.
    /// Exactly 1.0 at and after the end.
    pub fn fraction(&self, time: f32) -> Option<f32> {
        if time < self.start {
            None
        } else if self.duration <= 0.0 || time >= self.end() {
            Some(1.0)
        } else {
            Some(((time - self.start) / self.duration).clamp(0.0, 1.0))
        }
    }
}

/// A discrete action placed at an absolute time.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedCue {
    pub time: f32,
    pub action: Action,
    /// Name of the stage that owns the cue.
    pub stage: String,
}

/// A cue whose trigger time the playhead just crossed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiredCue {
    pub time: f32,
    pub action: Action,
    pub direction: Direction,
}

/// Result of evaluating the timeline at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub time: f32,
    pub snapshot: Snapshot,
    /// Hooks of every stage that has started by `time`.
    pub hooks: Vec<UpdateHook>,
}

/// Builds a `Timeline`. Authoring errors are kept and reported by `build()`.
pub struct TimelineBuilder {
    initial: Snapshot,
    /// Property values after every binding authored so far (for `to` stages).
    current: Snapshot,
    stages: Vec<StageSpan>,
    cues: Vec<TimedCue>,
    labels: HashMap<String, f32>,
    end: f32,
    holds: usize,
    error: Option<TransitError>,
}

impl TimelineBuilder {
    pub fn new(initial: Snapshot) -> Self {
        Self {
            current: initial.clone(),
            initial,
            stages: Vec::new(),
            cues: Vec::new(),
            labels: HashMap::new(),
            end: 0.0,
            holds: 0,
            error: None,
        }
    }

    /// Define a label at the current end of the timeline.
    pub fn label(mut self, name: impl Into<String>) -> Self {
        if self.error.is_some() {
            return self;
        }
        let name = name.into();
        if self.labels.contains_key(&name) {
            self.error = Some(TransitError::DuplicateLabel(name));
        } else {
            log::debug!("timeline label '{}' at {:.2}s", name, self.end);
            self.labels.insert(name, self.end);
        }
        self
    }

    /// Append a stage, resolving its start against what is already defined.
    pub fn stage(mut self, stage: Stage) -> Self {
        if self.error.is_some() {
            return self;
        }
        if let Err(e) = self.push(stage) {
            self.error = Some(e);
        }
        self
    }

    fn resolve_start(&self, stage: &Stage) -> Result<f32> {
        let previous = self.stages.iter().rev().find(|s| !s.name.starts_with(HOLD_PREFIX));
        let start = match &stage.position {
            Position::End => self.end,
            Position::At(t) => *t,
            Position::Label(name) => self.label_time(name)?,
            Position::LabelOffset(name, offset) => self.label_time(name)? + offset,
            Position::Offset(offset) => self.end + offset,
            Position::WithPrevious => previous
                .map(|s| s.start)
                .ok_or_else(|| TransitError::NoPreviousStage(stage.name.clone()))?,
            Position::AfterPrevious => previous
                .map(|s| s.end())
                .ok_or_else(|| TransitError::NoPreviousStage(stage.name.clone()))?,
        };
        Ok(start.max(0.0))
    }

    fn label_time(&self, name: &str) -> Result<f32> {
        self.labels
            .get(name)
            .copied()
            .ok_or_else(|| TransitError::UnknownLabel(name.to_string()))
    }

    fn push(&mut self, stage: Stage) -> Result<()> {
        if !stage.duration.is_finite() || stage.duration < 0.0 {
            return Err(TransitError::InvalidDuration {
                stage: stage.name,
                duration: stage.duration,
            });
        }
        let start = self.resolve_start(&stage)?;

        // Keep the timeline contiguous: a stage placed past the end gets a hold before it.
        if start > self.end + TIME_EPSILON {
            self.holds += 1;
            self.stages.push(StageSpan {
                name: format!("{}{}", HOLD_PREFIX, self.holds),
                start: self.end,
                duration: start - self.end,
                easing: Easing::Linear,
                tracks: Vec::new(),
                hook: None,
            });
        }

        let tracks = stage
            .bindings
            .iter()
            .map(|&(property, from, to)| {
                let from = from.unwrap_or_else(|| property.read(&self.current));
                property.write(&mut self.current, to);
                Track { property, from, to }
            })
            .collect();

        for &(offset, action) in &stage.cues {
            self.cues.push(TimedCue {
                time: start + offset.clamp(0.0, stage.duration),
                action,
                stage: stage.name.clone(),
            });
        }

        let span = StageSpan {
            name: stage.name,
            start,
            duration: stage.duration,
            easing: stage.easing,
            tracks,
            hook: stage.hook,
        };
        self.end = self.end.max(span.end());
        self.stages.push(span);
        Ok(())
    }

    pub fn build(self) -> Result<Timeline> {
        if let Some(e) = self.error {
            return Err(e);
        }
        if self.end <= 0.0 {
            return Err(TransitError::EmptyTimeline);
        }
        let mut cues = self.cues;
        cues.sort_by(|a, b| a.time.total_cmp(&b.time));
        log::info!(
            "timeline built: {} stages, {} cues, {:.2}s",
            self.stages.len(),
            cues.len(),
            self.end
        );
        Ok(Timeline {
            initial: self.initial,
            stages: self.stages,
            cues,
            labels: self.labels,
            total: self.end,
        })
    }
}

/// Name prefix of holds inserted to keep the timeline contiguous.
const HOLD_PREFIX: &str = "~hold";

/// Immutable, fully resolved timeline.
#[derive(Debug, Clone)]
pub struct Timeline {
    initial: Snapshot,
    stages: Vec<StageSpan>,
    /// Sorted by time.
    cues: Vec<TimedCue>,
    labels: HashMap<String, f32>,
    total: f32,
}

impl Timeline {
    /// Total duration in timeline seconds.
    pub fn duration(&self) -> f32 {
        self.total
    }

    pub fn stages(&self) -> &[StageSpan] {
        &self.stages
    }

    pub fn cues(&self) -> &[TimedCue] {
        &self.cues
    }

    pub fn label_time(&self, name: &str) -> Option<f32> {
        self.labels.get(name).copied()
    }

    pub fn initial(&self) -> &Snapshot {
        &self.initial
    }

    /// Scrub mapping: progress 0 is time 0, progress 1 is the full duration.
    pub fn time_at(&self, progress: f32) -> f32 {
        if progress.is_nan() {
            return 0.0;
        }
        let p = progress.clamp(0.0, 1.0);
        if p >= 1.0 {
            self.total
        } else {
            p * self.total
        }
    }

    /// Property values at `time`. Started stages are applied in definition
    /// order, so the later stage wins where two write the same channel.
    pub fn evaluate(&self, time: f32) -> Evaluation {
        let time = time.clamp(0.0, self.total);
        let mut snapshot = self.initial.clone();
        let mut hooks = Vec::new();

        for stage in &self.stages {
            let Some(t) = stage.fraction(time) else {
                continue;
            };
            for track in &stage.tracks {
                track.property.write(&mut snapshot, ease(track.from, track.to, t, stage.easing));
            }
            if let Some(hook) = stage.hook {
                if !hooks.contains(&hook) {
                    hooks.push(hook);
                }
            }
        }

        Evaluation { time, snapshot, hooks }
    }

    /// Cues whose trigger time lies between two playhead positions.
    /// Moving forward fires times in `(from, to]` in ascending order; moving
    /// backward fires times in `(to, from]` in descending order. Standing still fires nothing.
    /// The playhead is clamped at 0, so a range that touches 0 includes it:
    /// leaving 0 and returning to 0 both cross a cue at the start.
    pub fn crossed(&self, from: f32, to: f32) -> Vec<FiredCue> {
        let after = |time: f32, bound: f32| time > bound || (bound <= 0.0 && time <= 0.0);
        if to > from {
            self.cues
                .iter()
                .filter(|c| after(c.time, from) && c.time <= to)
                .map(|c| FiredCue { time: c.time, action: c.action, direction: Direction::Forward })
                .collect()
        } else if to < from {
            self.cues
                .iter()
                .rev()
                .filter(|c| after(c.time, to) && c.time <= from)
                .map(|c| FiredCue { time: c.time, action: c.action, direction: Direction::Backward })
                .collect()
        } else {
            Vec::new()
        }
    }

    /// Intervals of [0, duration] not covered by any stage.
    pub fn coverage_gaps(&self) -> Vec<(f32, f32)> {
        let mut spans: Vec<(f32, f32)> = self.stages.iter().map(|s| (s.start, s.end())).collect();
        spans.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut gaps = Vec::new();
        let mut covered = 0.0_f32;
        for (start, end) in spans {
            if start > covered + TIME_EPSILON {
                gaps.push((covered, start));
            }
            covered = covered.max(end);
        }
        if self.total > covered + TIME_EPSILON {
            gaps.push((covered, self.total));
        }
        gaps
    }
}
