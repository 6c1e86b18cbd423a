use glam::{Vec2, Vec3};
use serde::Deserialize;
use crate::api::types::{Cue, Direction, ObjectId, OverlayKey};
use crate::components::stream::{ParticleStream, StreamConfig};
use crate::core::rng::Rng;
use crate::core::scene::{SceneState, RELAY_BODY_HOME, SURFACE_FEATURE_OFFSET};
use crate::core::time::FrameClock;
use crate::error::TransitError;
use crate::extensions::choreographer::Step;
use crate::extensions::property::{Action, CameraPose, UpdateHook};
use crate::input::tilt::DragTilt;
use crate::systems::light_curve::{self, LightCurveParams};

/// Show configuration, usually parsed from JSON handed over by the page.
/// Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShowConfig {
    /// Scroll smoothing time in seconds (0 = follow the scrollbar exactly).
    pub scrub: f32,
    /// Radius of the planet's orbit around the star.
    pub orbit_radius: f32,
    pub light_curve: LightCurveParams,
    pub photons: StreamConfig,
    pub beam: StreamConfig,
    /// Satellite spin about its z axis, rad/s.
    pub satellite_spin: f32,
    /// Earth spin about its y axis, rad/s.
    pub relay_spin: f32,
    /// Scene tilt per pixel of pointer drag, radians.
    pub drag_sensitivity: f32,
    /// Seed for particle placement.
    pub seed: u64,
    /// Largest frame delta the clock accepts, seconds.
    pub max_frame_dt: f32,
    /// Consecutive failed draws after which the frame loop gives up.
    pub max_consecutive_frame_errors: u32,
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self {
            scrub: 1.5,
            orbit_radius: 25.0,
            light_curve: LightCurveParams::default(),
            photons: StreamConfig::photons(),
            beam: StreamConfig::beam(),
            satellite_spin: 0.12,
            relay_spin: 0.06,
            drag_sensitivity: 0.002,
            seed: 42,
            max_frame_dt: 0.1,
            max_consecutive_frame_errors: 3,
        }
    }
}

impl ShowConfig {
    /// Parse a config, filling gaps with defaults, and reject values the show cannot run with.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> crate::error::Result<()> {
        if self.light_curve.sample_count == 0 {
            return Err(TransitError::InvalidConfig("light_curve.sample_count must be at least 1".into()));
        }
        if self.max_consecutive_frame_errors == 0 {
            return Err(TransitError::InvalidConfig("max_consecutive_frame_errors must be at least 1".into()));
        }
        Ok(())
    }
}

/// Mutable show state, owned by the runner and passed by reference to the
/// systems that read or write it.
pub struct ShowContext {
    pub config: ShowConfig,
    pub scene: SceneState,
    pub camera: CameraPose,
    pub overlays: [f32; OverlayKey::COUNT],
    pub photons: ParticleStream,
    pub beam: ParticleStream,
    pub clock: FrameClock,
    pub tilt: DragTilt,
    pub viewport: Vec2,
    /// Audio cues raised this frame.
    pub sounds: Vec<Cue>,
    curve_path: String,
    curve_angle: Option<f32>,
    curve_dirty: bool,
    curve_hook_active: bool,
}

impl ShowContext {
    pub fn new(config: ShowConfig) -> Self {
        let mut rng = Rng::new(config.seed);
        let photons = ParticleStream::scatter(&config.photons, &mut rng);
        let beam = ParticleStream::scatter(&config.beam, &mut rng);
        let flat = light_curve::svg_path(&light_curve::curve(0.0, &config.light_curve), &config.light_curve);
        Self {
            scene: SceneState::new(config.orbit_radius),
            camera: CameraPose::default(),
            overlays: [0.0; OverlayKey::COUNT],
            photons,
            beam,
            clock: FrameClock::new(config.max_frame_dt),
            tilt: DragTilt::new(config.drag_sensitivity),
            viewport: Vec2::ZERO,
            sounds: Vec::new(),
            curve_path: flat,
            curve_angle: None,
            curve_dirty: true,
            curve_hook_active: false,
            config,
        }
    }

    /// Queue an audio cue for this frame.
    pub fn emit_sound(&mut self, cue: Cue) {
        self.sounds.push(cue);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
    }

    /// Write one choreographer step into the scene: property values first, then
    /// the cues crossed on the way there.
    pub fn apply_step(&mut self, step: &Step) {
        let snapshot = &step.evaluation.snapshot;
        self.camera = snapshot.camera;
        self.overlays = snapshot.overlays;

        let planet = snapshot.orbit.planet_position(self.config.orbit_radius);
        self.scene.get_mut(ObjectId::Planet).position = planet;
        self.scene.get_mut(ObjectId::SurfaceFeature).position = planet + SURFACE_FEATURE_OFFSET;

        let satellite = self.scene.get_mut(ObjectId::Satellite);
        satellite.position = snapshot.satellite_position;
        satellite.rotation.x = snapshot.satellite_tilt;

        let beam = self.scene.get_mut(ObjectId::BeamStream);
        beam.position = snapshot.satellite_position;
        beam.rotation = aim_rotation(snapshot.satellite_position, RELAY_BODY_HOME);

        self.scene.get_mut(ObjectId::PhotonStream).uniforms.opacity = snapshot.photon_opacity;

        let hook_active = step.evaluation.hooks.contains(&UpdateHook::LightCurve);
        // Leaving the hooked stage backward still redraws once at the angle it left off.
        if hook_active || self.curve_hook_active {
            self.update_light_curve(snapshot.orbit.angle);
        }
        self.curve_hook_active = hook_active;

        for cue in &step.fired {
            match cue.action {
                Action::Reveal(id) => {
                    self.scene.get_mut(id).visible = cue.direction == Direction::Forward;
                }
                Action::Play(sound) => self.emit_sound(sound),
            }
        }
    }

    fn update_light_curve(&mut self, angle: f32) {
        if self.curve_angle == Some(angle) {
            return;
        }
        let params = &self.config.light_curve;
        let samples = light_curve::curve(angle as f64, params);
        self.curve_path = light_curve::svg_path(&samples, params);
        self.curve_angle = Some(angle);
        self.curve_dirty = true;
    }

    pub fn curve_path(&self) -> &str {
        &self.curve_path
    }

    /// The curve path if it changed since the last call.
    pub fn take_curve_update(&mut self) -> Option<&str> {
        if self.curve_dirty {
            self.curve_dirty = false;
            Some(&self.curve_path)
        } else {
            None
        }
    }
}

/// Euler angles (intrinsic YXZ) that turn local +z to point from `from` toward `to`.
pub fn aim_rotation(from: Vec3, to: Vec3) -> Vec3 {
    let d = to - from;
    let horizontal = (d.x * d.x + d.z * d.z).sqrt();
    Vec3::new((-d.y).atan2(horizontal), d.x.atan2(d.z), 0.0)
}
