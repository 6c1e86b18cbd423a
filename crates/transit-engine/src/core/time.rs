/// Monotonic frame clock.
/// Feeds continuous effects (shader time, particle drift, spin) independently of scroll.
pub struct FrameClock {
    /// Largest frame delta accepted, in seconds.
    max_dt: f32,
    /// Seconds since the show started.
    elapsed: f32,
    /// Number of frames advanced.
    frames: u64,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            max_dt: max_dt.max(0.0),
            elapsed: 0.0,
            frames: 0,
        }
    }

    /// Advance by one frame. Returns the delta actually applied.
    /// Negative or non-finite deltas count as zero; long stalls (background tab)
    /// are capped so nothing lurches on resume.
    pub fn advance(&mut self, frame_dt: f32) -> f32 {
        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, self.max_dt)
        } else {
            0.0
        };
        self.elapsed += dt;
        self.frames += 1;
        dt
    }

    /// Seconds since start (the `time` uniform).
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
