//! Circular orbit model. Pure math, no engine dependencies.
//!
//! The planet moves in the y = 0 plane. Angles are unbounded: the finale
//! spin accumulates several revolutions and the model must not care.

/// Orbit angle owned by the timeline (radians, unbounded).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrbitState {
    pub angle: f32,
}

/// Planet position on a circular orbit of `radius` at `angle`.
/// Returns (x, z); y is always 0.
pub fn position(angle: f64, radius: f64) -> (f64, f64) {
    (radius * angle.cos(), radius * angle.sin())
}

impl OrbitState {
    /// World-space planet position for this state.
    pub fn planet_position(&self, radius: f32) -> glam::Vec3 {
        let (x, z) = position(self.angle as f64, radius as f64);
        glam::Vec3::new(x as f32, 0.0, z as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn stays_on_circle() {
        let r = 25.0;
        for i in 0..720 {
            let angle = i as f64 * 0.05 - 3.0;
            let (x, z) = position(angle, r);
            let err = (x * x + z * z - r * r).abs();
            assert!(err < 1e-9, "off circle at {angle}: {err}");
        }
    }

    #[test]
    fn zero_angle_is_positive_x() {
        let (x, z) = position(0.0, 25.0);
        assert_eq!(x, 25.0);
        assert_eq!(z, 0.0);
    }

    #[test]
    fn half_turn_is_negative_x() {
        let (x, z) = position(PI, 25.0);
        assert!((x + 25.0).abs() < 1e-12);
        assert!(z.abs() < 1e-12);
    }

    #[test]
    fn many_revolutions_wrap() {
        let (x, z) = position(6.0 * PI + PI / 2.0, 10.0);
        assert!(x.abs() < 1e-9);
        assert!((z - 10.0).abs() < 1e-9);
    }

    #[test]
    fn planet_position_lies_in_plane() {
        let p = OrbitState { angle: 1.2 }.planet_position(25.0);
        assert_eq!(p.y, 0.0);
        assert!((p.length() - 25.0).abs() < 1e-4);
    }
}
