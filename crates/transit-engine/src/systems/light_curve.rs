//! Transit light curve: back-projects the orbit angle over a history window
//! and plots a Gaussian brightness dip wherever the planet crossed the star.
//!
//! Pure and stateless; the whole curve is rebuilt on every call.

use std::f64::consts::TAU;
use std::fmt::Write;
use serde::Deserialize;

/// `dist` assigned to samples that predate the start of the animation.
const NO_TRANSIT: f64 = 99.0;

/// Shape of the plotted curve.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LightCurveParams {
    /// How far back (radians of orbit) the left edge of the plot reaches.
    pub history_window: f64,
    /// Number of intervals; the curve has `sample_count + 1` points.
    /// `ShowConfig` rejects 0; `curve` treats 0 as 1.
    pub sample_count: usize,
    /// Orbit angle at which the planet is in front of the star.
    pub transit_phase: f64,
    /// Angular distance from transit beyond which no dip is drawn.
    pub dip_half_width: f64,
    /// Dip depth at exact transit, in plot units.
    pub peak: f64,
    /// Gaussian spread (radians squared).
    pub spread: f64,
    /// Flat-line y value.
    pub baseline: f64,
    /// Plot width in plot units.
    pub width: f64,
}

impl Default for LightCurveParams {
    fn default() -> Self {
        Self {
            history_window: 20.0,
            sample_count: 200,
            transit_phase: std::f64::consts::FRAC_PI_2,
            dip_half_width: 0.25,
            peak: 100.0,
            spread: 0.015,
            baseline: 50.0,
            width: 800.0,
        }
    }
}

/// One point of the curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluxSample {
    /// Horizontal position, 0 at the left edge and 1 at "now".
    pub position_fraction: f64,
    pub dip_magnitude: f64,
}

/// Angular distance of `phase` from the transit, wrapped to [0, π].
/// Samples before the animation started (`phase < 0`) get the no-transit sentinel.
pub fn transit_distance(phase: f64, transit_phase: f64) -> f64 {
    if phase < 0.0 {
        return NO_TRANSIT;
    }
    let r = (phase - transit_phase).rem_euclid(TAU);
    r.min(TAU - r)
}

/// Dip depth for one angular distance.
pub fn dip(dist: f64, params: &LightCurveParams) -> f64 {
    if dist < params.dip_half_width {
        params.peak * (-(dist * dist) / params.spread).exp()
    } else {
        0.0
    }
}

/// Sample the light curve for the current orbit angle.
pub fn curve(current_angle: f64, params: &LightCurveParams) -> Vec<FluxSample> {
    let n = params.sample_count.max(1);
    (0..=n)
        .map(|i| {
            let t = i as f64 / n as f64;
            let phase = current_angle - (1.0 - t) * params.history_window;
            let dist = transit_distance(phase, params.transit_phase);
            FluxSample {
                position_fraction: t,
                dip_magnitude: dip(dist, params),
            }
        })
        .collect()
}

/// Render samples as an SVG path: `M0,<baseline>` then one `L x,y` per sample.
pub fn svg_path(samples: &[FluxSample], params: &LightCurveParams) -> String {
    let mut d = String::with_capacity(16 + samples.len() * 16);
    // Writing into a String cannot fail.
    let _ = write!(d, "M0,{}", params.baseline);
    for s in samples {
        let _ = write!(
            d,
            " L{},{}",
            s.position_fraction * params.width,
            params.baseline + s.dip_magnitude
        );
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn flat_before_any_transit() {
        let params = LightCurveParams::default();
        let samples = curve(0.5, &params);
        assert_eq!(samples.len(), params.sample_count + 1);
        assert!(samples.iter().all(|s| s.dip_magnitude == 0.0));
    }

    #[test]
    fn negative_history_is_sentinel() {
        assert_eq!(transit_distance(-0.01, FRAC_PI_2), NO_TRANSIT);
        assert_eq!(transit_distance(-20.0 + FRAC_PI_2, FRAC_PI_2), NO_TRANSIT);
    }

    #[test]
    fn peak_at_transit_with_no_history() {
        let params = LightCurveParams { history_window: 0.0, ..Default::default() };
        let samples = curve(params.transit_phase, &params);
        let last = samples.last().unwrap();
        assert_eq!(last.position_fraction, 1.0);
        assert_eq!(last.dip_magnitude, params.peak);
    }

    #[test]
    fn transit_scenario_edges() {
        let params = LightCurveParams {
            history_window: 20.0,
            transit_phase: FRAC_PI_2,
            dip_half_width: 0.25,
            ..Default::default()
        };
        let samples = curve(FRAC_PI_2, &params);
        assert!((samples[params.sample_count].dip_magnitude - 100.0).abs() < 1e-9);
        assert_eq!(samples[0].dip_magnitude, 0.0);
    }

    #[test]
    fn wraps_after_many_revolutions() {
        // Twelve turns past the transit is still a transit.
        let d = transit_distance(FRAC_PI_2 + 12.0 * TAU, FRAC_PI_2);
        assert!(d < 1e-9, "d = {d}");
        // Just short of a transit approaches from the other side.
        let d = transit_distance(FRAC_PI_2 + 6.0 * TAU - 0.1, FRAC_PI_2);
        assert!((d - 0.1).abs() < 1e-9, "d = {d}");
        let d = transit_distance(FRAC_PI_2 + PI, FRAC_PI_2);
        assert!((d - PI).abs() < 1e-9);
    }

    #[test]
    fn adjacent_samples_change_smoothly() {
        let params = LightCurveParams { sample_count: 2000, ..Default::default() };
        // Finale angle: several transits inside the window.
        let samples = curve(6.0 * PI, &params);
        let step = params.history_window / params.sample_count as f64;
        // Max slope of the Gaussian plus the clamp step at the half-width edge.
        let max_slope = params.peak * (2.0 / params.spread).sqrt() * (-0.5_f64).exp();
        let clamp_jump = dip(params.dip_half_width - 1e-12, &params);
        let bound = max_slope * step + clamp_jump + 1e-9;
        for pair in samples.windows(2) {
            let delta = (pair[1].dip_magnitude - pair[0].dip_magnitude).abs();
            assert!(delta <= bound, "jump {delta} > {bound}");
        }
        assert!(samples.iter().any(|s| s.dip_magnitude > 50.0));
    }

    #[test]
    fn path_has_one_line_per_sample() {
        let params = LightCurveParams::default();
        let samples = curve(FRAC_PI_2, &params);
        let d = svg_path(&samples, &params);
        assert!(d.starts_with("M0,50 L0,50"));
        assert_eq!(d.matches(" L").count(), params.sample_count + 1);
        assert!(d.ends_with(" L800,150"), "tail: {}", &d[d.len() - 20..]);
    }
}
