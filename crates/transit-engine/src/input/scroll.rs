/// Distance below which the smoothed value snaps onto the raw value.
const SNAP_EPSILON: f32 = 1e-4;

/// Turns raw document scroll into smoothed [0, 1] progress.
///
/// `sample` records the latest raw position; `tick` moves the smoothed value
/// toward it by an exponential step, so a raw jump (anchor link, scrollbar
/// drag) never reaches the timeline as a jump.
#[derive(Debug, Clone)]
pub struct ScrollDriver {
    /// Seconds for the smoothed value to cover ~95% of a raw change. `<= 0` disables smoothing.
    scrub: f32,
    raw: f32,
    smoothed: f32,
    /// Last sampled offset, document height and viewport height.
    extents: Option<(f32, f32, f32)>,
}

impl ScrollDriver {
    pub fn new(scrub: f32) -> Self {
        Self { scrub, raw: 0.0, smoothed: 0.0, extents: None }
    }

    /// Record the current scroll offset. Pages that cannot scroll read as progress 0.
    pub fn sample(&mut self, offset: f32, document_height: f32, viewport_height: f32) {
        self.extents = Some((offset, document_height, viewport_height));
        self.raw = raw_progress(offset, document_height, viewport_height);
    }

    /// Recompute raw progress against a new viewport height, keeping the last
    /// offset and document height. No-op before the first sample.
    pub fn resize(&mut self, viewport_height: f32) {
        if let Some((offset, document_height, _)) = self.extents {
            self.sample(offset, document_height, viewport_height);
        }
    }

    /// Advance smoothing by `dt` seconds and return the progress to feed the choreographer.
    pub fn tick(&mut self, dt: f32) -> f32 {
        if self.scrub <= 0.0 {
            self.smoothed = self.raw;
            return self.smoothed;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let k = 1.0 - (-3.0 * dt / self.scrub).exp();
        self.smoothed += (self.raw - self.smoothed) * k;
        if (self.raw - self.smoothed).abs() < SNAP_EPSILON {
            self.smoothed = self.raw;
        }
        self.smoothed
    }

    pub fn raw(&self) -> f32 {
        self.raw
    }

    pub fn progress(&self) -> f32 {
        self.smoothed
    }

    pub fn is_settled(&self) -> bool {
        self.raw == self.smoothed
    }
}

/// `offset / (document - viewport)`, clamped to [0, 1].
pub fn raw_progress(offset: f32, document_height: f32, viewport_height: f32) -> f32 {
    let scrollable = document_height - viewport_height;
    if scrollable.is_nan() || scrollable <= 0.0 || !offset.is_finite() {
        return 0.0;
    }
    (offset / scrollable).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    #[test]
    fn raw_progress_is_clamped() {
        assert_eq!(raw_progress(0.0, 5000.0, 1000.0), 0.0);
        assert_eq!(raw_progress(2000.0, 5000.0, 1000.0), 0.5);
        assert_eq!(raw_progress(9000.0, 5000.0, 1000.0), 1.0);
        assert_eq!(raw_progress(-50.0, 5000.0, 1000.0), 0.0);
    }

    #[test]
    fn unscrollable_page_is_zero() {
        assert_eq!(raw_progress(100.0, 800.0, 800.0), 0.0);
        assert_eq!(raw_progress(100.0, 600.0, 800.0), 0.0);
        assert_eq!(raw_progress(f32::NAN, 5000.0, 800.0), 0.0);
    }

    #[test]
    fn raw_jump_is_smoothed() {
        let mut driver = ScrollDriver::new(1.5);
        driver.sample(4000.0, 5000.0, 1000.0);
        assert_eq!(driver.raw(), 1.0);
        let k = 1.0 - (-3.0 * FRAME / 1.5_f32).exp();
        let first = driver.tick(FRAME);
        assert!(first > 0.0 && first <= k + 1e-6, "first = {first}");
    }

    #[test]
    fn fed_progress_never_jumps_more_than_one_step() {
        let mut driver = ScrollDriver::new(1.5);
        let k = 1.0 - (-3.0 * FRAME / 1.5_f32).exp();
        let mut last = driver.progress();
        for frame in 0..600 {
            // Raw scroll bounces between the ends.
            let offset = if (frame / 90) % 2 == 0 { 4000.0 } else { 0.0 };
            driver.sample(offset, 5000.0, 1000.0);
            let p = driver.tick(FRAME);
            assert!((p - last).abs() <= k + SNAP_EPSILON, "frame {frame}: {last} -> {p}");
            assert!((0.0..=1.0).contains(&p));
            last = p;
        }
    }

    #[test]
    fn converges_and_settles() {
        let mut driver = ScrollDriver::new(1.5);
        driver.sample(2000.0, 5000.0, 1000.0);
        for _ in 0..600 {
            driver.tick(FRAME);
        }
        assert_eq!(driver.progress(), 0.5);
        assert!(driver.is_settled());
    }

    #[test]
    fn zero_scrub_is_immediate() {
        let mut driver = ScrollDriver::new(0.0);
        driver.sample(4000.0, 5000.0, 1000.0);
        assert_eq!(driver.tick(FRAME), 1.0);
        driver.sample(0.0, 5000.0, 1000.0);
        assert_eq!(driver.tick(FRAME), 0.0);
    }

    #[test]
    fn resize_recomputes_against_the_new_viewport() {
        let mut driver = ScrollDriver::new(0.0);
        driver.resize(500.0);
        assert_eq!(driver.raw(), 0.0);

        driver.sample(2000.0, 5000.0, 1000.0);
        assert_eq!(driver.raw(), 0.5);
        driver.resize(3000.0);
        assert_eq!(driver.raw(), 1.0);
        driver.resize(1000.0);
        assert_eq!(driver.raw(), 0.5);
    }

    #[test]
    fn bad_dt_does_not_move() {
        let mut driver = ScrollDriver::new(1.5);
        driver.sample(4000.0, 5000.0, 1000.0);
        assert_eq!(driver.tick(f32::NAN), 0.0);
        assert_eq!(driver.tick(-1.0), 0.0);
    }
}
