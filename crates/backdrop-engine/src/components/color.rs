use serde::{Deserialize, Serialize};

/// RGB color (0.0 - 1.0). Opacity travels separately on each drawable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from RGB u8 values (0-255).
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Linear blend toward `other` by `t` in [0, 1].
    pub fn mix(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const MIST: Self = Self::new(0.86, 0.89, 0.93);
    pub const ASH: Self = Self::new(0.62, 0.62, 0.66);
    pub const SAND: Self = Self::new(0.78, 0.69, 0.52);
    pub const GOLD: Self = Self::new(1.0, 0.82, 0.25);
    pub const SLATE: Self = Self::new(0.29, 0.33, 0.41);
    pub const STEEL: Self = Self::new(0.45, 0.52, 0.62);
    pub const CLAY: Self = Self::new(0.72, 0.45, 0.33);
    pub const UMBER: Self = Self::new(0.35, 0.27, 0.2);
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Default color per drawable role. Hosts that theme the background
/// override this through the simulation config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub fog: Color,
    pub smoke: Color,
    pub dust: Color,
    pub collectible: Color,
    pub leader: Color,
    pub follower: Color,
    pub wanderer: Color,
    pub track: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            fog: Color::MIST,
            smoke: Color::ASH,
            dust: Color::SAND,
            collectible: Color::GOLD,
            leader: Color::SLATE,
            follower: Color::STEEL,
            wanderer: Color::CLAY,
            track: Color::UMBER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb8_scales_to_unit_range() {
        let c = Color::rgb8(255, 0, 51);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert!((c.b - 0.2).abs() < 1e-6);
    }

    #[test]
    fn mix_endpoints() {
        assert_eq!(Color::BLACK.mix(Color::WHITE, 0.0), Color::BLACK);
        assert_eq!(Color::BLACK.mix(Color::WHITE, 1.0), Color::WHITE);
        assert_eq!(Color::BLACK.mix(Color::WHITE, 5.0), Color::WHITE);
    }

    #[test]
    fn palette_partial_json_keeps_defaults() {
        let p: Palette = serde_json::from_str(r#"{ "fog": { "r": 0.0, "g": 0.0, "b": 0.0 } }"#)
            .unwrap();
        assert_eq!(p.fog, Color::BLACK);
        assert_eq!(p.smoke, Palette::default().smoke);
    }
}
