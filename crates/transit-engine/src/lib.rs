pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod audio;
pub mod extensions;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::show::{ShowConfig, ShowContext};
pub use api::script::transit_timeline;
pub use api::types::{ObjectId, Cue, OverlayKey, Direction, CURVE_PATH_ID};
pub use audio::{AudioCues, AudioGate, AudioState};
pub use bridge::protocol::{FrameBuffer, FrameLayout, ObjectRecord};
pub use components::stream::{ParticleStream, StreamConfig, StreamShape};
pub use core::orbit::OrbitState;
pub use core::scene::{SceneObject, SceneState};
pub use core::time::FrameClock;
pub use error::{AudioError, RenderError, Result, TransitError};
pub use input::queue::{InputEvent, InputQueue};
pub use input::scroll::ScrollDriver;
pub use input::tilt::DragTilt;
pub use renderer::traits::SceneBackend;
pub use systems::ambient::tick_ambient;
pub use systems::light_curve::{FluxSample, LightCurveParams};
pub use systems::render::sync_scene;

pub use extensions::{
    Easing, lerp, ease,
    Action, CameraPose, Property, Snapshot, UpdateHook,
    Position, Stage, Timeline, TimelineBuilder, Evaluation, FiredCue,
    Choreographer, Step,
};
