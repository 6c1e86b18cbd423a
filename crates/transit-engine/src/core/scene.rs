use glam::Vec3;
use crate::api::types::ObjectId;

/// Material uniforms the show drives. Everything else about a material lives host-side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniforms {
    /// Continuous animation time (noise, displacement).
    pub time: f32,
    /// Overall opacity.
    pub opacity: f32,
}

impl Default for Uniforms {
    fn default() -> Self {
        Self { time: 0.0, opacity: 1.0 }
    }
}

/// State of one scene object as seen by the core.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub id: ObjectId,
    pub position: Vec3,
    /// Euler angles (x, y, z) in radians.
    pub rotation: Vec3,
    pub visible: bool,
    pub uniforms: Uniforms,
}

impl SceneObject {
    pub fn new(id: ObjectId) -> Self {
        Self {
            id,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            visible: true,
            uniforms: Uniforms::default(),
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.uniforms.opacity = opacity;
        self
    }
}

/// Fixed store of the show's scene objects, indexed by `ObjectId`.
/// Every object exists for the whole session; reveals only flip visibility.
pub struct SceneState {
    objects: Vec<SceneObject>,
}

impl SceneState {
    /// Opening layout of the show: star at the origin, planet on its orbit,
    /// satellite and Earth parked far down the +z axis and hidden.
    pub fn new(orbit_radius: f32) -> Self {
        let objects = vec![
            SceneObject::new(ObjectId::Star),
            SceneObject::new(ObjectId::Planet).with_position(Vec3::new(orbit_radius, 0.0, 0.0)),
            SceneObject::new(ObjectId::SurfaceFeature)
                .with_position(Vec3::new(orbit_radius, 0.0, 0.0) + SURFACE_FEATURE_OFFSET),
            SceneObject::new(ObjectId::Satellite)
                .with_position(SATELLITE_HOME)
                .with_rotation(Vec3::new(0.0, std::f32::consts::PI, 0.0))
                .with_visible(false),
            SceneObject::new(ObjectId::RelayBody)
                .with_position(RELAY_BODY_HOME)
                .with_visible(false),
            SceneObject::new(ObjectId::PhotonStream).with_opacity(0.0),
            SceneObject::new(ObjectId::BeamStream)
                .with_position(SATELLITE_HOME)
                .with_opacity(0.8)
                .with_visible(false),
        ];
        Self { objects }
    }

    pub fn get(&self, id: ObjectId) -> &SceneObject {
        &self.objects[id.index()]
    }

    pub fn get_mut(&mut self, id: ObjectId) -> &mut SceneObject {
        &mut self.objects[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SceneObject> {
        self.objects.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Where the surface feature sits relative to the planet center.
pub const SURFACE_FEATURE_OFFSET: Vec3 = Vec3::new(0.0, 0.45, 0.0);
/// Parking spot of the relay satellite.
pub const SATELLITE_HOME: Vec3 = Vec3::new(0.0, 5.0, 200.0);
/// Parking spot of Earth.
pub const RELAY_BODY_HOME: Vec3 = Vec3::new(0.0, -35.0, 260.0);
