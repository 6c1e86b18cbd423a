/// Flat frame buffer read by the host renderer once per frame.
/// Must stay in sync with the host-side reader.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 8 floats]
/// [Camera: 6 floats]  position xyz, look-at xyz
/// [Objects: object_count × 12 floats]  one `ObjectRecord` per ObjectId, in id order
/// ```
///
/// Particle positions are not in this buffer; the host reads them straight
/// from the stream storage (pointer + length).

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use crate::api::types::ObjectId;
use crate::extensions::property::CameraPose;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 8;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_OBJECT_COUNT: usize = 2;
pub const HEADER_CLOCK: usize = 3;
pub const HEADER_TILT_X: usize = 4;
pub const HEADER_TILT_Y: usize = 5;
pub const HEADER_VIEWPORT_WIDTH: usize = 6;
pub const HEADER_VIEWPORT_HEIGHT: usize = 7;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats in the camera section.
pub const CAMERA_FLOATS: usize = 6;

/// Per-object transform and material data.
/// Must match the host reader: 12 floats = 48 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ObjectRecord {
    pub position: [f32; 3],
    /// Euler angles in radians.
    pub rotation: [f32; 3],
    /// 1.0 = visible, 0.0 = hidden.
    pub visible: f32,
    pub opacity: f32,
    /// Shader `time` uniform.
    pub time: f32,
    pub _pad: [f32; 3],
}

impl ObjectRecord {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Section offsets for a given object count.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameLayout {
    pub object_count: usize,
    /// Offset (in floats) where the camera section begins.
    pub camera_offset: usize,
    /// Offset (in floats) where object records begin.
    pub object_offset: usize,
    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl FrameLayout {
    pub fn new(object_count: usize) -> Self {
        let camera_offset = HEADER_FLOATS;
        let object_offset = camera_offset + CAMERA_FLOATS;
        let buffer_total_floats = object_offset + object_count * ObjectRecord::FLOATS;
        Self {
            object_count,
            camera_offset,
            object_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }
}

/// The frame buffer itself. Writers address objects by id; the host reads the raw floats.
pub struct FrameBuffer {
    layout: FrameLayout,
    data: Vec<f32>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        let layout = FrameLayout::new(ObjectId::COUNT);
        let mut data = vec![0.0; layout.buffer_total_floats];
        data[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        data[HEADER_OBJECT_COUNT] = layout.object_count as f32;
        Self { layout, data }
    }

    pub fn layout(&self) -> &FrameLayout {
        &self.layout
    }

    fn records_mut(&mut self) -> &mut [ObjectRecord] {
        let start = self.layout.object_offset;
        bytemuck::cast_slice_mut(&mut self.data[start..])
    }

    pub fn records(&self) -> &[ObjectRecord] {
        bytemuck::cast_slice(&self.data[self.layout.object_offset..])
    }

    pub fn record(&self, id: ObjectId) -> &ObjectRecord {
        &self.records()[id.index()]
    }

    pub fn record_mut(&mut self, id: ObjectId) -> &mut ObjectRecord {
        &mut self.records_mut()[id.index()]
    }

    pub fn set_camera(&mut self, pose: &CameraPose) {
        let at = self.layout.camera_offset;
        self.data[at..at + 3].copy_from_slice(&pose.position.to_array());
        self.data[at + 3..at + 6].copy_from_slice(&pose.look_at.to_array());
    }

    pub fn camera(&self) -> CameraPose {
        let at = self.layout.camera_offset;
        CameraPose {
            position: Vec3::from_slice(&self.data[at..at + 3]),
            look_at: Vec3::from_slice(&self.data[at + 3..at + 6]),
        }
    }

    pub fn set_clock(&mut self, seconds: f32) {
        self.data[HEADER_CLOCK] = seconds;
    }

    pub fn set_tilt(&mut self, tilt: Vec2) {
        self.data[HEADER_TILT_X] = tilt.x;
        self.data[HEADER_TILT_Y] = tilt.y;
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.data[HEADER_VIEWPORT_WIDTH] = width;
        self.data[HEADER_VIEWPORT_HEIGHT] = height;
    }

    /// Mark a frame as complete.
    pub fn commit(&mut self) {
        self.data[HEADER_FRAME_COUNTER] += 1.0;
    }

    pub fn frame_counter(&self) -> f32 {
        self.data[HEADER_FRAME_COUNTER]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn ptr(&self) -> *const f32 {
        self.data.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
