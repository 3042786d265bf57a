use glam::Vec2;

use crate::components::color::Color;
use crate::components::layer::DrawLayer;

/// Vector path presets the host knows how to stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathShape {
    /// Four-pointed sparkle used for collectibles.
    Star,
    /// A single footprint decal.
    Footprint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawableKind {
    Circle,
    Oval,
    /// Rounded rectangle, used for actor bodies.
    Capsule,
    Path(PathShape),
}

impl DrawableKind {
    /// Numeric code for the packed wire format.
    pub fn code(self) -> u8 {
        match self {
            Self::Circle => 0,
            Self::Oval => 1,
            Self::Capsule => 2,
            Self::Path(PathShape::Star) => 3,
            Self::Path(PathShape::Footprint) => 4,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Circle),
            1 => Some(Self::Oval),
            2 => Some(Self::Capsule),
            3 => Some(Self::Path(PathShape::Star)),
            4 => Some(Self::Path(PathShape::Footprint)),
            _ => None,
        }
    }
}

/// One primitive for the external renderer.
///
/// `origin` is the shape center in canvas pixels and `size` its full
/// width/height. Every value leaving the exporter has passed through
/// [`Drawable::sanitized`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drawable {
    pub kind: DrawableKind,
    pub layer: DrawLayer,
    pub origin: Vec2,
    pub size: Vec2,
    pub rotation: f32,
    pub color: Color,
    pub opacity: f32,
}

impl Drawable {
    pub fn new(kind: DrawableKind, layer: DrawLayer, origin: Vec2, size: Vec2) -> Self {
        Self {
            kind,
            layer,
            origin,
            size,
            rotation: 0.0,
            color: Color::WHITE,
            opacity: 1.0,
        }
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Clamp opacity into `[0, 1]` and sizes into `[0, inf)`.
    /// NaN becomes 0 everywhere.
    pub fn sanitized(mut self) -> Self {
        self.opacity = if self.opacity.is_nan() { 0.0 } else { self.opacity.clamp(0.0, 1.0) };
        self.size = Vec2::new(non_negative(self.size.x), non_negative(self.size.y));
        if !self.rotation.is_finite() {
            self.rotation = 0.0;
        }
        if !self.origin.is_finite() {
            self.origin = Vec2::ZERO;
            self.opacity = 0.0;
        }
        self
    }
}

fn non_negative(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.max(0.0) }
}
