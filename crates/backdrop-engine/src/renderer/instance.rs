use bytemuck::{Pod, Zeroable};

use super::drawable::Drawable;
use crate::components::layer::DrawLayer;

/// Packed drawable read by the host straight out of linear memory.
/// Must match the host protocol: 10 floats = 40 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DrawInstance {
    /// `DrawableKind::code()`.
    pub kind: f32,
    /// Center X in canvas pixels.
    pub x: f32,
    /// Center Y in canvas pixels.
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Rotation in radians.
    pub rotation: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
}

impl DrawInstance {
    pub const FLOATS: usize = 10;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

impl From<&Drawable> for DrawInstance {
    fn from(d: &Drawable) -> Self {
        Self {
            kind: d.kind.code() as f32,
            x: d.origin.x,
            y: d.origin.y,
            width: d.size.x,
            height: d.size.y,
            rotation: d.rotation,
            r: d.color.r,
            g: d.color.g,
            b: d.color.b,
            opacity: d.opacity,
        }
    }
}

/// Reusable packed buffer of one frame's drawables, in paint order.
///
/// `layer_starts[l]` is the index of the first instance on layer `l`, so
/// hosts can batch per layer without re-reading every kind.
pub struct DrawList {
    pub instances: Vec<DrawInstance>,
    layer_starts: [u32; DrawLayer::COUNT],
}

impl DrawList {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            layer_starts: [0; DrawLayer::COUNT],
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.layer_starts = [0; DrawLayer::COUNT];
    }

    /// Append in paint order. Layers must arrive back to front.
    pub fn push(&mut self, drawable: &Drawable) {
        let layer = drawable.layer.as_u8() as usize;
        let index = self.instances.len() as u32;
        // Later layers start no earlier than this one ends.
        for start in self.layer_starts.iter_mut().skip(layer + 1) {
            *start = index + 1;
        }
        self.instances.push(DrawInstance::from(drawable));
    }

    pub fn extend<'a>(&mut self, drawables: impl IntoIterator<Item = &'a Drawable>) {
        for d in drawables {
            self.push(d);
        }
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Index of the first instance on `layer`.
    pub fn layer_start(&self, layer: DrawLayer) -> u32 {
        self.layer_starts[layer.as_u8() as usize]
    }

    /// Raw pointer to instance data for host reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(self.instances.as_slice())
    }
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}
