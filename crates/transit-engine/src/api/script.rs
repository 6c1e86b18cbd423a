//! The authored show: six narrative beats laid out on one timeline.
//!
//! 1. Scale: the camera descends onto the orbital plane.
//! 2. Transit: the planet swings in front of the star and the camera closes in.
//! 3. Pullback: starlight photons stream out as the camera retreats.
//! 4. Sentinel: the relay satellite appears.
//! 5. Uplink: Earth and the data beam appear, the antenna tilts over.
//! 6. Discovery: the planet spins three revolutions while the light curve fills in.

use std::f32::consts::{FRAC_PI_2, PI};
use glam::Vec3;
use crate::api::types::{Cue, ObjectId, OverlayKey};
use crate::core::scene::SATELLITE_HOME;
use crate::error::Result;
use crate::extensions::easing::Easing;
use crate::extensions::property::{Action, CameraPose, Property, Snapshot, UpdateHook};
use crate::extensions::timeline::{Position, Stage, Timeline, TimelineBuilder};

/// Camera pose before any scrolling: high above the orbital plane.
pub const OPENING_CAMERA: CameraPose = CameraPose {
    position: Vec3::new(0.0, 60.0, 80.0),
    look_at: Vec3::ZERO,
};

/// Camera pose the show ends on: far back, taking in star, satellite and Earth.
pub const CLOSING_CAMERA: CameraPose = CameraPose {
    position: Vec3::new(0.0, 0.0, 320.0),
    look_at: Vec3::ZERO,
};

/// Orbit angle at the end of the discovery spin (three revolutions).
pub const FINAL_ORBIT_ANGLE: f32 = 6.0 * PI;

/// State at progress 0.
pub fn opening_snapshot() -> Snapshot {
    let mut snapshot = Snapshot {
        camera: OPENING_CAMERA,
        satellite_position: SATELLITE_HOME,
        ..Default::default()
    };
    snapshot.overlays[OverlayKey::Scale.index()] = 1.0;
    snapshot
}

fn fade_in(name: &str, key: OverlayKey) -> Stage {
    Stage::new(name).duration(1.0).to(Property::Overlay(key), 1.0)
}

fn fade_out(name: &str, key: OverlayKey) -> Stage {
    Stage::new(name).duration(1.0).to(Property::Overlay(key), 0.0)
}

/// Build the show timeline.
pub fn transit_timeline() -> Result<Timeline> {
    TimelineBuilder::new(opening_snapshot())
        // Scale
        .stage(fade_out("scale-out", OverlayKey::Scale))
        .label("start")
        .stage(
            Stage::new("descend")
                .duration(5.0)
                .easing(Easing::CubicInOut)
                .camera_to(Vec3::new(0.0, 0.0, 80.0))
                .look_at(Vec3::ZERO),
        )
        .stage(fade_in("alignment-in", OverlayKey::Alignment).at(Position::Offset(-1.0)))
        .stage(fade_out("alignment-out", OverlayKey::Alignment).at(Position::Offset(2.0)))
        // Transit
        .label("transit")
        .stage(
            Stage::new("orbit-to-transit")
                .at(Position::label("transit"))
                .duration(4.0)
                .easing(Easing::QuadInOut)
                .to(Property::OrbitAngle, FRAC_PI_2),
        )
        .stage(
            Stage::new("close-in")
                .at(Position::WithPrevious)
                .duration(4.0)
                .easing(Easing::CubicInOut)
                .to(Property::CameraZ, 35.0),
        )
        .stage(Stage::call("transit-blip", Action::Play(Cue::ShortBlip)))
        .stage(fade_in("shadow-in", OverlayKey::Shadow))
        .stage(fade_out("shadow-out", OverlayKey::Shadow).at(Position::Offset(2.0)))
        // Pullback
        .stage(Stage::new("photons-on").duration(1.0).to(Property::PhotonOpacity, 1.0))
        .label("pullback")
        .stage(
            Stage::new("pull-back")
                .duration(5.0)
                .easing(Easing::QuadIn)
                .to(Property::CameraZ, 250.0),
        )
        .stage(fade_in("signal-in", OverlayKey::Signal).at(Position::Offset(-2.0)))
        .stage(fade_out("signal-out", OverlayKey::Signal).at(Position::Offset(1.0)))
        // Sentinel
        .stage(Stage::call("satellite-reveal", Action::Reveal(ObjectId::Satellite)))
        .stage(
            Stage::new("satellite-close-up")
                .duration(3.0)
                .camera_to(Vec3::new(30.0, 5.0, 220.0))
                .look_at(SATELLITE_HOME),
        )
        .stage(fade_in("sentinel-in", OverlayKey::Sentinel))
        .stage(fade_out("sentinel-out", OverlayKey::Sentinel).at(Position::Offset(2.0)))
        // Uplink
        .stage(
            Stage::call("uplink", Action::Reveal(ObjectId::RelayBody))
                .cue_at(0.0, Action::Reveal(ObjectId::BeamStream))
                .cue_at(0.0, Action::Play(Cue::Sweep)),
        )
        .stage(
            Stage::new("wide-shot")
                .duration(3.0)
                .camera_to(CLOSING_CAMERA.position)
                .look_at(CLOSING_CAMERA.look_at),
        )
        .stage(
            Stage::new("antenna-tilt")
                .at(Position::WithPrevious)
                .duration(2.0)
                .to(Property::SatelliteTilt, PI),
        )
        .stage(fade_in("uplink-in", OverlayKey::Uplink).at(Position::Offset(-1.0)))
        .stage(fade_out("uplink-out", OverlayKey::Uplink).at(Position::Offset(2.0)))
        // Discovery
        .stage(fade_in("discovery-in", OverlayKey::Discovery))
        .stage(Stage::call("discovery-chord", Action::Play(Cue::SuccessChord)))
        .stage(
            Stage::new("discovery-spin")
                .at(Position::WithPrevious)
                .duration(10.0)
                .easing(Easing::Linear)
                .to(Property::OrbitAngle, FINAL_ORBIT_ANGLE)
                .on_update(UpdateHook::LightCurve),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Direction;

    #[test]
    fn script_builds_and_is_contiguous() {
        let tl = transit_timeline().unwrap();
        assert_eq!(tl.duration(), 49.0);
        assert!(tl.coverage_gaps().is_empty());
        assert_eq!(tl.label_time("start"), Some(1.0));
        assert_eq!(tl.label_time("transit"), Some(9.0));
        assert_eq!(tl.label_time("pullback"), Some(18.0));
    }

    #[test]
    fn opening_and_closing_poses() {
        let tl = transit_timeline().unwrap();
        let start = tl.evaluate(0.0).snapshot;
        assert_eq!(start.camera, OPENING_CAMERA);
        assert_eq!(start.overlay(OverlayKey::Scale), 1.0);
        let end = tl.evaluate(tl.duration()).snapshot;
        assert_eq!(end.camera, CLOSING_CAMERA);
        assert_eq!(end.orbit.angle, FINAL_ORBIT_ANGLE);
        assert_eq!(end.satellite_tilt, PI);
        assert_eq!(end.photon_opacity, 1.0);
        assert_eq!(end.overlay(OverlayKey::Discovery), 1.0);
        for key in &OverlayKey::ALL[..OverlayKey::COUNT - 1] {
            assert_eq!(end.overlay(*key), 0.0, "{key:?}");
        }
    }

    #[test]
    fn planet_is_in_transit_at_the_blip() {
        let tl = transit_timeline().unwrap();
        let s = tl.evaluate(13.0).snapshot;
        assert_eq!(s.orbit.angle, FRAC_PI_2);
        assert_eq!(s.camera.position.z, 35.0);
    }

    #[test]
    fn cues_in_show_order() {
        let tl = transit_timeline().unwrap();
        let fired = tl.crossed(0.0, tl.duration());
        let actions: Vec<Action> = fired.iter().map(|c| c.action).collect();
        assert_eq!(
            actions,
            vec![
                Action::Play(Cue::ShortBlip),
                Action::Reveal(ObjectId::Satellite),
                Action::Reveal(ObjectId::RelayBody),
                Action::Reveal(ObjectId::BeamStream),
                Action::Play(Cue::Sweep),
                Action::Play(Cue::SuccessChord),
            ]
        );
        assert!(fired.iter().all(|c| c.direction == Direction::Forward));
        assert_eq!(fired[0].time, 13.0);
        assert_eq!(fired[5].time, 39.0);
    }

    #[test]
    fn light_curve_hook_only_during_discovery() {
        let tl = transit_timeline().unwrap();
        assert!(tl.evaluate(38.9).hooks.is_empty());
        assert_eq!(tl.evaluate(39.0).hooks, vec![UpdateHook::LightCurve]);
        assert_eq!(tl.evaluate(49.0).hooks, vec![UpdateHook::LightCurve]);
    }

    #[test]
    fn overlays_fade_in_and_out() {
        let tl = transit_timeline().unwrap();
        assert_eq!(tl.evaluate(6.0).snapshot.overlay(OverlayKey::Alignment), 1.0);
        assert_eq!(tl.evaluate(7.0).snapshot.overlay(OverlayKey::Alignment), 1.0);
        assert_eq!(tl.evaluate(9.0).snapshot.overlay(OverlayKey::Alignment), 0.0);
        assert_eq!(tl.evaluate(14.5).snapshot.overlay(OverlayKey::Shadow), 1.0);
        assert_eq!(tl.evaluate(30.0).snapshot.overlay(OverlayKey::Sentinel), 1.0);
        assert_eq!(tl.evaluate(36.0).snapshot.overlay(OverlayKey::Uplink), 1.0);
    }

    #[test]
    fn camera_cuts_without_an_ease_use_the_default() {
        let tl = transit_timeline().unwrap();
        for name in ["satellite-close-up", "wide-shot"] {
            let stage = tl.stages().iter().find(|s| s.name == name).unwrap();
            assert_eq!(stage.easing, Easing::default(), "{name}");
        }
    }
}
