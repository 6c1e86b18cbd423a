// extensions/mod.rs
//
// Scroll choreography: easing curves, the stage timeline, and the playhead
// that maps scroll progress onto it.

pub mod easing;
pub mod property;
pub mod timeline;
pub mod choreographer;

pub use easing::{Easing, lerp, ease};
pub use property::{Action, CameraPose, Property, Snapshot, UpdateHook};
pub use timeline::{Position, Stage, Timeline, TimelineBuilder, Evaluation, FiredCue};
pub use choreographer::{Choreographer, Step};
