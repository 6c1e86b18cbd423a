use transit_engine::{
    AudioCues, AudioGate, Choreographer, InputEvent, InputQueue, SceneBackend,
    ScrollDriver, ShowConfig, ShowContext, Step, sync_scene, tick_ambient,
    transit_timeline,
};

/// Drives one show: owns the context, the choreographer, and the two host
/// collaborators, and runs the per-frame pipeline.
///
/// The crate's `lib.rs` keeps a `thread_local!` ShowRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct ShowRunner<B: SceneBackend, A: AudioCues> {
    ctx: ShowContext,
    choreographer: Choreographer,
    scroll: ScrollDriver,
    input: InputQueue,
    gate: AudioGate,
    backend: B,
    audio: A,
    consecutive_failures: u32,
    halted: bool,
    last_step: Option<Step>,
}

impl<B: SceneBackend, A: AudioCues> ShowRunner<B, A> {
    pub fn new(config: ShowConfig, backend: B, audio: A) -> transit_engine::Result<Self> {
        let choreographer = Choreographer::new(transit_timeline()?);
        Ok(Self {
            scroll: ScrollDriver::new(config.scrub),
            ctx: ShowContext::new(config),
            choreographer,
            input: InputQueue::new(),
            gate: AudioGate::new(),
            backend,
            audio,
            consecutive_failures: 0,
            halted: false,
            last_step: None,
        })
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: input, clock and ambient motion, scroll smoothing,
    /// choreography, then one sync and one draw.
    /// Returns false once the loop has halted; the host should stop scheduling frames.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.halted {
            return false;
        }

        self.ctx.clear_frame_data();
        self.handle_input();

        let dt = tick_ambient(&mut self.ctx, dt);
        let progress = self.scroll.tick(dt);
        let step = self.choreographer.seek(progress);
        self.ctx.apply_step(&step);
        self.last_step = Some(step);

        for &cue in &self.ctx.sounds {
            self.gate.play(&mut self.audio, cue);
        }

        sync_scene(&mut self.ctx, &mut self.backend);

        match self.backend.draw() {
            Ok(()) => {
                self.consecutive_failures = 0;
                true
            }
            Err(e) => {
                self.consecutive_failures += 1;
                let limit = self.ctx.config.max_consecutive_frame_errors;
                if e.is_fatal() || self.consecutive_failures >= limit {
                    log::error!("render loop halted after {} failed frame(s): {e}", self.consecutive_failures);
                    self.backend.show_diagnostic(&format!("Rendering stopped: {e}"));
                    self.halted = true;
                    false
                } else {
                    log::warn!("{e}");
                    true
                }
            }
        }
    }

    fn handle_input(&mut self) {
        for event in self.input.drain() {
            if event.unlocks_audio() {
                self.gate.unlock(&mut self.audio);
            }
            match event {
                InputEvent::Scroll { offset, document_height, viewport_height } => {
                    self.scroll.sample(offset, document_height, viewport_height);
                }
                InputEvent::Resize { width, height } => {
                    self.ctx.viewport = glam::Vec2::new(width, height);
                    self.scroll.resize(height);
                    self.backend.resize(width, height);
                }
                InputEvent::PointerDown { x, y } => self.ctx.tilt.pointer_down(x, y),
                InputEvent::PointerMove { x, y } => self.ctx.tilt.pointer_move(x, y),
                InputEvent::PointerUp { .. } => self.ctx.tilt.pointer_up(),
                InputEvent::Gesture => {}
            }
        }
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn ctx(&self) -> &ShowContext {
        &self.ctx
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn progress(&self) -> f32 {
        self.scroll.progress()
    }

    /// The most recent choreographer step, if a frame has run.
    pub fn last_step(&self) -> Option<&Step> {
        self.last_step.as_ref()
    }

    // ---- Pointer accessors for host reads ----

    pub fn photon_positions_ptr(&self) -> *const f32 {
        self.ctx.photons.positions_flat().as_ptr()
    }

    pub fn photon_positions_len(&self) -> u32 {
        self.ctx.photons.positions_flat().len() as u32
    }

    pub fn beam_positions_ptr(&self) -> *const f32 {
        self.ctx.beam.positions_flat().as_ptr()
    }

    pub fn beam_positions_len(&self) -> u32 {
        self.ctx.beam.positions_flat().len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};
    use std::collections::HashMap;
    use transit_engine::api::script::CLOSING_CAMERA;
    use transit_engine::{AudioError, CameraPose, Cue, ObjectId, OverlayKey, RenderError};

    #[derive(Default)]
    struct FakeBackend {
        visible: HashMap<ObjectId, bool>,
        camera: Option<CameraPose>,
        curve_paths: usize,
        size: Option<Vec2>,
        tilt: Vec2,
        /// Errors returned by upcoming draws, front first.
        failures: Vec<RenderError>,
        draws: u32,
        diagnostics: Vec<String>,
    }

    impl SceneBackend for FakeBackend {
        fn set_position(&mut self, _: ObjectId, _: Vec3) {}
        fn set_rotation(&mut self, _: ObjectId, _: Vec3) {}
        fn set_visibility(&mut self, id: ObjectId, visible: bool) {
            self.visible.insert(id, visible);
        }
        fn set_material_uniform(&mut self, _: ObjectId, _: &str, _: f32) {}
        fn set_camera(&mut self, pose: &CameraPose) {
            self.camera = Some(*pose);
        }
        fn set_scene_tilt(&mut self, tilt: Vec2) {
            self.tilt = tilt;
        }
        fn set_overlay_opacity(&mut self, _: OverlayKey, _: f32) {}
        fn set_curve_path(&mut self, _: &str) {
            self.curve_paths += 1;
        }
        fn resize(&mut self, width: f32, height: f32) {
            self.size = Some(Vec2::new(width, height));
        }
        fn draw(&mut self) -> Result<(), RenderError> {
            self.draws += 1;
            if self.failures.is_empty() {
                Ok(())
            } else {
                Err(self.failures.remove(0))
            }
        }
        fn show_diagnostic(&mut self, message: &str) {
            self.diagnostics.push(message.to_string());
        }
    }

    #[derive(Default)]
    struct FakeAudio {
        starts: u32,
        played: Vec<Cue>,
    }

    impl AudioCues for FakeAudio {
        fn ensure_started(&mut self) -> Result<(), AudioError> {
            self.starts += 1;
            Ok(())
        }
        fn play_cue(&mut self, cue: Cue) {
            self.played.push(cue);
        }
    }

    fn config(scrub: f32) -> ShowConfig {
        let mut config = ShowConfig::default();
        config.scrub = scrub;
        config.photons.count = 32;
        config.beam.count = 8;
        config
    }

    fn runner(scrub: f32) -> ShowRunner<FakeBackend, FakeAudio> {
        ShowRunner::new(config(scrub), FakeBackend::default(), FakeAudio::default()).unwrap()
    }

    fn scroll_to(r: &mut ShowRunner<FakeBackend, FakeAudio>, fraction: f32) {
        r.push_input(InputEvent::Scroll {
            offset: fraction * 4000.0,
            document_height: 5000.0,
            viewport_height: 1000.0,
        });
    }

    #[test]
    fn jump_to_end_in_one_tick() {
        let mut r = runner(0.0);
        scroll_to(&mut r, 1.0);
        assert!(r.tick(1.0 / 60.0));
        assert_eq!(r.progress(), 1.0);
        assert_eq!(r.backend().camera, Some(CLOSING_CAMERA));
        let step = r.last_step().unwrap();
        // Three reveals plus the three audio cues.
        assert_eq!(step.fired.len(), r.ctx().sounds.len() + 3);
        // Scroll unlocked audio: fade-in first, then each crossed cue exactly once.
        assert_eq!(
            r.audio().played,
            vec![Cue::AmbientFadeIn, Cue::ShortBlip, Cue::Sweep, Cue::SuccessChord]
        );
        assert!(r.backend().visible[&ObjectId::Satellite]);
        assert!(r.backend().visible[&ObjectId::RelayBody]);

        // Staying at the end fires nothing more.
        assert!(r.tick(1.0 / 60.0));
        assert_eq!(r.audio().played.len(), 4);
        assert_eq!(r.audio().starts, 1);
    }

    #[test]
    fn audio_stays_silent_without_a_gesture() {
        let mut r = runner(0.0);
        r.push_input(InputEvent::PointerMove { x: 1.0, y: 1.0 });
        r.tick(1.0 / 60.0);
        assert_eq!(r.audio().starts, 0);
        r.push_input(InputEvent::Gesture);
        r.tick(1.0 / 60.0);
        assert_eq!(r.audio().starts, 1);
        assert_eq!(r.audio().played, vec![Cue::AmbientFadeIn]);
    }

    #[test]
    fn smoothed_scroll_approaches_gradually() {
        let mut r = runner(1.5);
        scroll_to(&mut r, 1.0);
        r.tick(1.0 / 60.0);
        assert!(r.progress() > 0.0 && r.progress() < 0.05);
        for _ in 0..600 {
            r.tick(1.0 / 60.0);
        }
        assert_eq!(r.progress(), 1.0);
        assert_eq!(r.backend().camera, Some(CLOSING_CAMERA));
    }

    #[test]
    fn transient_failure_keeps_running() {
        let mut r = runner(0.0);
        r.backend.failures.push(RenderError::Frame("dropped".into()));
        assert!(r.tick(0.016));
        assert!(r.tick(0.016));
        assert!(!r.is_halted());
        assert!(r.backend().diagnostics.is_empty());
    }

    #[test]
    fn repeated_failures_halt_the_loop() {
        let mut r = runner(0.0);
        for _ in 0..3 {
            r.backend.failures.push(RenderError::Frame("dropped".into()));
        }
        assert!(r.tick(0.016));
        assert!(r.tick(0.016));
        assert!(!r.tick(0.016));
        assert!(r.is_halted());
        assert_eq!(r.backend().diagnostics.len(), 1);
        // Halted: no further draws.
        assert!(!r.tick(0.016));
        assert_eq!(r.backend().draws, 3);
    }

    #[test]
    fn lost_context_halts_immediately() {
        let mut r = runner(0.0);
        r.backend.failures.push(RenderError::ContextLost("gpu reset".into()));
        assert!(!r.tick(0.016));
        assert_eq!(r.backend().diagnostics.len(), 1);
    }

    #[test]
    fn failure_count_resets_after_success() {
        let mut r = runner(0.0);
        r.backend.failures = vec![
            RenderError::Frame("a".into()),
            RenderError::Frame("b".into()),
        ];
        r.tick(0.016);
        r.tick(0.016);
        r.tick(0.016);
        r.backend.failures = vec![
            RenderError::Frame("c".into()),
            RenderError::Frame("d".into()),
        ];
        assert!(r.tick(0.016));
        assert!(r.tick(0.016));
        assert!(!r.is_halted());
    }

    #[test]
    fn resize_and_drag_reach_the_backend() {
        let mut r = runner(0.0);
        r.push_input(InputEvent::Resize { width: 1280.0, height: 720.0 });
        r.push_input(InputEvent::PointerDown { x: 0.0, y: 0.0 });
        r.push_input(InputEvent::PointerMove { x: 100.0, y: 0.0 });
        r.push_input(InputEvent::PointerUp { x: 100.0, y: 0.0 });
        r.tick(0.016);
        assert_eq!(r.backend().size, Some(Vec2::new(1280.0, 720.0)));
        assert!((r.backend().tilt.y - 0.2).abs() < 1e-6);
        assert_eq!(r.ctx().viewport, Vec2::new(1280.0, 720.0));
    }

    #[test]
    fn resize_rescales_scroll_progress() {
        let mut r = runner(0.0);
        scroll_to(&mut r, 0.5);
        r.tick(0.016);
        assert_eq!(r.progress(), 0.5);
        // Same offset, taller viewport: less left to scroll.
        r.push_input(InputEvent::Resize { width: 1280.0, height: 3000.0 });
        r.tick(0.016);
        assert_eq!(r.progress(), 1.0);
    }

    #[test]
    fn curve_path_pushed_when_it_changes() {
        let mut r = runner(0.0);
        r.tick(0.016);
        assert_eq!(r.backend().curve_paths, 1);
        r.tick(0.016);
        assert_eq!(r.backend().curve_paths, 1);
        scroll_to(&mut r, 0.95);
        r.tick(0.016);
        assert_eq!(r.backend().curve_paths, 2);
    }

    #[test]
    fn stream_buffers_are_exposed() {
        let r = runner(0.0);
        assert_eq!(r.photon_positions_len(), 32 * 3);
        assert_eq!(r.beam_positions_len(), 8 * 3);
        assert!(!r.photon_positions_ptr().is_null());
    }
}
