//! Contract between the show and whatever draws it.
//!
//! The core never touches a graphics API. It pushes object transforms,
//! material uniforms, camera pose and overlay state through [`SceneBackend`]
//! once per frame, then asks for one redraw.

use glam::{Vec2, Vec3};
use crate::api::types::{ObjectId, OverlayKey};
use crate::error::RenderError;
use crate::extensions::property::CameraPose;

pub trait SceneBackend {
    fn set_position(&mut self, id: ObjectId, position: Vec3);

    /// Euler angles in radians.
    fn set_rotation(&mut self, id: ObjectId, rotation: Vec3);

    fn set_visibility(&mut self, id: ObjectId, visible: bool);

    /// Set a named material uniform (`time`, `opacity`).
    fn set_material_uniform(&mut self, id: ObjectId, name: &str, value: f32);

    fn set_camera(&mut self, pose: &CameraPose);

    /// Rotation of the scene root from pointer drag, (x, y) in radians.
    fn set_scene_tilt(&mut self, tilt: Vec2);

    fn set_overlay_opacity(&mut self, key: OverlayKey, opacity: f32);

    /// Replace the light-curve graph with a new SVG path.
    fn set_curve_path(&mut self, d: &str);

    fn resize(&mut self, width: f32, height: f32);

    /// Render one frame with the state pushed so far.
    fn draw(&mut self) -> Result<(), RenderError>;

    /// Put a message in front of the user after a failure the show cannot recover from.
    fn show_diagnostic(&mut self, message: &str);
}
