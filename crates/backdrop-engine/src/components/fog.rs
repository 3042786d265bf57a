use crate::core::random::{self, SimRng};

/// One blob of a fog layer, in layer-relative units (fractions of the canvas).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FogBlob {
    pub relative_x: f32,
    pub relative_y: f32,
    pub relative_size: f32,
}

/// A horizontally scrolling band of fog blobs.
///
/// Blobs are drawn once at `x + offset` and again at `x + offset - 1`,
/// so as the offset wraps from just below 1 back to 0 the band has no seam.
#[derive(Debug, Clone, PartialEq)]
pub struct FogLayer {
    /// Always within `[0, 1)`.
    scroll_offset: f32,
    pub scroll_speed: f32,
    pub density: f32,
    blobs: Vec<FogBlob>,
}

impl FogLayer {
    pub const DEFAULT_BLOBS: usize = 10;
    /// Opacity of a full-density layer.
    pub const BASE_OPACITY: f32 = 0.1;

    /// Generate a layer with `blob_count` blobs from independent uniform draws.
    /// The blobs are fixed for the lifetime of the layer.
    pub fn new(scroll_speed: f32, density: f32, blob_count: usize, rng: &mut SimRng) -> Self {
        let blobs = (0..blob_count)
            .map(|_| FogBlob {
                relative_x: random::range(rng, 0.0, 1.0),
                relative_y: random::range(rng, 0.1, 0.9),
                relative_size: random::range(rng, 0.15, 0.4),
            })
            .collect();
        Self {
            scroll_offset: 0.0,
            scroll_speed: if scroll_speed.is_finite() { scroll_speed } else { 0.0 },
            density: density.clamp(0.0, 1.0),
            blobs,
        }
    }

    pub fn update(&mut self, dt: f32) {
        if !(dt > 0.0) {
            return;
        }
        let next = (self.scroll_offset + self.scroll_speed * dt).rem_euclid(1.0);
        // rem_euclid can round up to exactly 1.0 for tiny negative inputs
        self.scroll_offset = if next >= 1.0 { 0.0 } else { next };
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn blobs(&self) -> &[FogBlob] {
        &self.blobs
    }

    pub fn opacity(&self) -> f32 {
        Self::BASE_OPACITY * self.density
    }

    /// Both relative x positions at which `blob` is drawn this frame.
    pub fn wrapped_positions(&self, blob: &FogBlob) -> [f32; 2] {
        let x = blob.relative_x + self.scroll_offset;
        [x, x - 1.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::seeded;
    use approx::assert_abs_diff_eq;

    #[test]
    fn generates_fixed_blob_table() {
        let mut rng = seeded(3);
        let layer = FogLayer::new(0.05, 1.0, FogLayer::DEFAULT_BLOBS, &mut rng);
        assert_eq!(layer.blobs().len(), 10);
        let before = layer.blobs().to_vec();
        let mut layer = layer;
        layer.update(0.5);
        assert_eq!(layer.blobs(), &before[..], "blobs are not regenerated");
    }

    #[test]
    fn same_seed_same_layer() {
        let a = FogLayer::new(0.05, 1.0, 10, &mut seeded(11));
        let b = FogLayer::new(0.05, 1.0, 10, &mut seeded(11));
        assert_eq!(a, b);
    }

    #[test]
    fn offset_wraps_into_unit_interval() {
        let mut layer = FogLayer::new(0.4, 1.0, 0, &mut seeded(1));
        for _ in 0..100 {
            layer.update(0.1);
            let o = layer.scroll_offset();
            assert!((0.0..1.0).contains(&o), "offset was {}", o);
        }
    }

    #[test]
    fn negative_speed_still_wraps() {
        let mut layer = FogLayer::new(-0.3, 1.0, 0, &mut seeded(1));
        layer.update(0.1);
        assert_abs_diff_eq!(layer.scroll_offset(), 0.97, epsilon = 1e-5);
    }

    #[test]
    fn full_period_returns_to_start() {
        let speed = 0.05;
        let mut layer = FogLayer::new(speed, 1.0, 0, &mut seeded(1));
        let start = layer.scroll_offset();
        let steps = 400; // 400 * 0.05s = 20s = 1 / speed
        for _ in 0..steps {
            layer.update(0.05);
        }
        let end = layer.scroll_offset();
        let diff = (end - start).abs();
        assert!(diff < 1e-3 || (1.0 - diff) < 1e-3, "offset drifted to {}", end);
    }

    #[test]
    fn each_blob_drawn_twice_one_width_apart() {
        let mut layer = FogLayer::new(0.25, 0.5, 1, &mut seeded(5));
        layer.update(1.0);
        let blob = layer.blobs()[0];
        let [a, b] = layer.wrapped_positions(&blob);
        assert_abs_diff_eq!(a - b, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(layer.opacity(), 0.05, epsilon = 1e-6);
    }
}
