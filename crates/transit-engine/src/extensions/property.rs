// extensions/property.rs
//
// The animatable state of the show, and the scalar channels a timeline can drive.
// Vector properties are split per component so a stage can move only `z`
// and leave `x`/`y` wherever earlier stages put them.

use glam::Vec3;
use crate::api::types::{ObjectId, OverlayKey};
use crate::core::orbit::OrbitState;

/// Where the camera is and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

/// Everything the timeline owns, evaluated at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub camera: CameraPose,
    pub orbit: OrbitState,
    pub satellite_position: Vec3,
    /// Antenna tilt of the satellite (rotation about x).
    pub satellite_tilt: f32,
    pub photon_opacity: f32,
    /// Opacity of each narrative overlay, indexed by `OverlayKey`.
    pub overlays: [f32; OverlayKey::COUNT],
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            camera: CameraPose::default(),
            orbit: OrbitState::default(),
            satellite_position: Vec3::ZERO,
            satellite_tilt: 0.0,
            photon_opacity: 0.0,
            overlays: [0.0; OverlayKey::COUNT],
        }
    }
}

impl Snapshot {
    pub fn overlay(&self, key: OverlayKey) -> f32 {
        self.overlays[key.index()]
    }
}

/// A scalar channel a stage can interpolate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    CameraX,
    CameraY,
    CameraZ,
    LookAtX,
    LookAtY,
    LookAtZ,
    OrbitAngle,
    SatelliteX,
    SatelliteY,
    SatelliteZ,
    SatelliteTilt,
    PhotonOpacity,
    Overlay(OverlayKey),
}

impl Property {
    pub fn read(self, s: &Snapshot) -> f32 {
        match self {
            Property::CameraX => s.camera.position.x,
            Property::CameraY => s.camera.position.y,
            Property::CameraZ => s.camera.position.z,
            Property::LookAtX => s.camera.look_at.x,
            Property::LookAtY => s.camera.look_at.y,
            Property::LookAtZ => s.camera.look_at.z,
            Property::OrbitAngle => s.orbit.angle,
            Property::SatelliteX => s.satellite_position.x,
            Property::SatelliteY => s.satellite_position.y,
            Property::SatelliteZ => s.satellite_position.z,
            Property::SatelliteTilt => s.satellite_tilt,
            Property::PhotonOpacity => s.photon_opacity,
            Property::Overlay(key) => s.overlays[key.index()],
        }
    }

    pub fn write(self, s: &mut Snapshot, value: f32) {
        match self {
            Property::CameraX => s.camera.position.x = value,
            Property::CameraY => s.camera.position.y = value,
            Property::CameraZ => s.camera.position.z = value,
            Property::LookAtX => s.camera.look_at.x = value,
            Property::LookAtY => s.camera.look_at.y = value,
            Property::LookAtZ => s.camera.look_at.z = value,
            Property::OrbitAngle => s.orbit.angle = value,
            Property::SatelliteX => s.satellite_position.x = value,
            Property::SatelliteY => s.satellite_position.y = value,
            Property::SatelliteZ => s.satellite_position.z = value,
            Property::SatelliteTilt => s.satellite_tilt = value,
            Property::PhotonOpacity => s.photon_opacity = value,
            Property::Overlay(key) => s.overlays[key.index()] = value,
        }
    }
}

/// Discrete action bound to a point on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Show the object when crossed forward, hide it again when crossed backward.
    Reveal(ObjectId),
    /// Fire an audio cue (in either direction).
    Play(crate::api::types::Cue),
}

/// Per-update work a stage requests while it is running or finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateHook {
    /// Regenerate the light curve from the current orbit angle.
    LightCurve,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_write_round_trip_per_channel() {
        let mut s = Snapshot::default();
        Property::CameraZ.write(&mut s, 35.0);
        Property::Overlay(OverlayKey::Shadow).write(&mut s, 0.5);
        assert_eq!(s.camera.position.z, 35.0);
        assert_eq!(s.camera.position.x, 0.0);
        assert_eq!(s.overlay(OverlayKey::Shadow), 0.5);
        assert_eq!(Property::Overlay(OverlayKey::Shadow).read(&s), 0.5);
    }
}
