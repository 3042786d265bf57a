//! Flat frame buffer layout read by the host renderer.
//! Must stay in sync with the host-side reader.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 12 floats]
//! [Drawables: max_drawables × 10 floats]
//! ```
//!
//! Capacity is written into the header every frame so the host can
//! compute offsets without hardcoding them.

use glam::Vec2;

use crate::components::layer::DrawLayer;
use crate::renderer::instance::{DrawInstance, DrawList};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 12;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_DRAWABLE_COUNT: usize = 1;
pub const HEADER_MAX_DRAWABLES: usize = 2;
pub const HEADER_CANVAS_WIDTH: usize = 3;
pub const HEADER_CANVAS_HEIGHT: usize = 4;
pub const HEADER_PROTOCOL_VERSION: usize = 5;
/// First of `DrawLayer::COUNT` layer start indices.
pub const HEADER_LAYER_STARTS: usize = 6;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per drawable (wire format, never changes).
pub const DRAWABLE_FLOATS: usize = DrawInstance::FLOATS;

/// Default drawable capacity: 60 fog ovals, a full smoke plume, squad
/// effects, track marks and actors, with headroom.
pub const DEFAULT_MAX_DRAWABLES: usize = 512;

#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum drawables per frame. Extra drawables are dropped from the
    /// front-most layers.
    pub max_drawables: usize,
    /// Size of the drawable section in floats.
    pub drawable_data_floats: usize,
    /// Offset (in floats) where drawable data begins.
    pub drawable_data_offset: usize,
    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_drawables: usize) -> Self {
        let drawable_data_floats = max_drawables * DRAWABLE_FLOATS;
        let drawable_data_offset = HEADER_FLOATS;
        let buffer_total_floats = drawable_data_offset + drawable_data_floats;
        Self {
            max_drawables,
            drawable_data_floats,
            drawable_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// A zeroed buffer sized for this layout.
    pub fn allocate(&self) -> Vec<f32> {
        vec![0.0; self.buffer_total_floats]
    }

    /// Write one frame into `buffer`. Returns the number of drawables
    /// written, which is capped by both `max_drawables` and the buffer.
    pub fn write_frame(
        &self,
        buffer: &mut [f32],
        frame: u64,
        canvas: Vec2,
        list: &DrawList,
    ) -> usize {
        if buffer.len() < HEADER_FLOATS {
            return 0;
        }
        let room = (buffer.len() - self.drawable_data_offset) / DRAWABLE_FLOATS;
        let count = (list.instance_count() as usize).min(self.max_drawables).min(room);

        buffer[HEADER_FRAME_COUNTER] = frame as f32;
        buffer[HEADER_DRAWABLE_COUNT] = count as f32;
        buffer[HEADER_MAX_DRAWABLES] = self.max_drawables as f32;
        buffer[HEADER_CANVAS_WIDTH] = canvas.x;
        buffer[HEADER_CANVAS_HEIGHT] = canvas.y;
        buffer[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        for value in 0..DrawLayer::COUNT as u8 {
            if let Some(layer) = DrawLayer::from_u8(value) {
                let start = (list.layer_start(layer) as usize).min(count);
                buffer[HEADER_LAYER_STARTS + value as usize] = start as f32;
            }
        }

        let floats = count * DRAWABLE_FLOATS;
        let start = self.drawable_data_offset;
        buffer[start..start + floats].copy_from_slice(&list.as_floats()[..floats]);
        count
    }
}

impl Default for ProtocolLayout {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DRAWABLES)
    }
}
