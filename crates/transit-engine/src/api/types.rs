/// Identifies one of the scene objects the host renderer owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ObjectId {
    Star = 0,
    Planet = 1,
    /// Energy creature riding on the planet surface.
    SurfaceFeature = 2,
    Satellite = 3,
    /// Earth, the body the satellite relays to.
    RelayBody = 4,
    /// Starlight photons streaming toward the viewer.
    PhotonStream = 5,
    /// Data beam from the satellite down to Earth.
    BeamStream = 6,
}

impl ObjectId {
    pub const COUNT: usize = 7;

    pub const ALL: [ObjectId; Self::COUNT] = [
        ObjectId::Star,
        ObjectId::Planet,
        ObjectId::SurfaceFeature,
        ObjectId::Satellite,
        ObjectId::RelayBody,
        ObjectId::PhotonStream,
        ObjectId::BeamStream,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            ObjectId::Star => "star",
            ObjectId::Planet => "planet",
            ObjectId::SurfaceFeature => "surface-feature",
            ObjectId::Satellite => "satellite",
            ObjectId::RelayBody => "relay-body",
            ObjectId::PhotonStream => "photon-stream",
            ObjectId::BeamStream => "beam-stream",
        }
    }
}

/// Audio cue fired by the timeline or by the audio unlock.
/// The numeric value is what the host sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Cue {
    AmbientFadeIn = 0,
    ShortBlip = 1,
    Sweep = 2,
    SuccessChord = 3,
}

/// Narrative overlay blocks on the page, addressed by element id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OverlayKey {
    Scale = 0,
    Alignment = 1,
    Shadow = 2,
    Signal = 3,
    Sentinel = 4,
    Uplink = 5,
    Discovery = 6,
}

impl OverlayKey {
    pub const COUNT: usize = 7;

    pub const ALL: [OverlayKey; Self::COUNT] = [
        OverlayKey::Scale,
        OverlayKey::Alignment,
        OverlayKey::Shadow,
        OverlayKey::Signal,
        OverlayKey::Sentinel,
        OverlayKey::Uplink,
        OverlayKey::Discovery,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// DOM element id of the overlay.
    pub fn element_id(self) -> &'static str {
        match self {
            OverlayKey::Scale => "step-scale",
            OverlayKey::Alignment => "step-alignment",
            OverlayKey::Shadow => "step-shadow",
            OverlayKey::Signal => "step-signal",
            OverlayKey::Sentinel => "step-sentinel",
            OverlayKey::Uplink => "step-uplink",
            OverlayKey::Discovery => "step-discovery",
        }
    }
}

/// DOM element id of the light-curve path.
pub const CURVE_PATH_ID: &str = "curve-path";

/// Which way the playhead moved across a trigger time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}
