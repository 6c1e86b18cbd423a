use glam::Vec2;

/// Pointer-drag rotation of the whole scene.
///
/// Horizontal drag spins about y, vertical drag tips about x.
/// The result is a pair of Euler angles the host applies to the scene root.
#[derive(Debug, Clone)]
pub struct DragTilt {
    /// Radians per pixel of drag.
    sensitivity: f32,
    last: Option<Vec2>,
    tilt: Vec2,
}

impl DragTilt {
    pub fn new(sensitivity: f32) -> Self {
        Self { sensitivity, last: None, tilt: Vec2::ZERO }
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.last = Some(Vec2::new(x, y));
    }

    /// Apply the delta since the last pointer position. Ignored unless dragging.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        let Some(last) = self.last else { return };
        let now = Vec2::new(x, y);
        let delta = now - last;
        self.tilt.x += delta.y * self.sensitivity;
        self.tilt.y += delta.x * self.sensitivity;
        self.last = Some(now);
    }

    pub fn pointer_up(&mut self) {
        self.last = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.last.is_some()
    }

    /// Current (x, y) rotation in radians.
    pub fn tilt(&self) -> Vec2 {
        self.tilt
    }
}
