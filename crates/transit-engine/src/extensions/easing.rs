// extensions/easing.rs
//
// Pure easing functions for timeline interpolation.
// No dependencies on the scene, just math.

use std::f32::consts::PI;

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity (no easing).
    Linear,
    /// Slow start.
    QuadIn,
    /// Slow end. Default for stages that name no easing.
    #[default]
    QuadOut,
    /// Slow start and end.
    QuadInOut,
    /// Stronger slow start.
    CubicIn,
    /// Stronger slow end.
    CubicOut,
    /// Stronger slow start and end.
    CubicInOut,
    /// Sine wave easing (smooth).
    SineIn,
    SineOut,
    SineInOut,
}

impl Easing {
    /// Apply the easing function to a normalized time value `t` in [0, 1].
    /// Every variant maps 0 to exactly 0 and 1 to exactly 1.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,

            // Quadratic
            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }

            // Cubic
            Easing::CubicIn => t * t * t,
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }

            // Sine; endpoints pinned because cos/sin are not exact there.
            Easing::SineIn | Easing::SineOut | Easing::SineInOut if t == 0.0 || t == 1.0 => t,
            Easing::SineIn => 1.0 - (t * PI / 2.0).cos(),
            Easing::SineOut => (t * PI / 2.0).sin(),
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
/// Exact at both ends: `lerp(a, b, 0.0) == a` and `lerp(a, b, 1.0) == b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}
