//! Seedable random source shared by every subsystem.
//!
//! Each subsystem owns its own `SimRng`, derived from the configured seed
//! with a per-subsystem offset, so the same seed replays the same scene.

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use std::f32::consts::TAU;

pub type SimRng = StdRng;

/// Seed offsets keep subsystem streams independent for a single config seed.
pub const FOG_STREAM: u64 = 7919;
pub const PARTICLE_STREAM: u64 = 104_729;
pub const SQUAD_STREAM: u64 = 1_299_709;
pub const WANDERER_STREAM: u64 = 15_485_863;

pub fn seeded(seed: u64) -> SimRng {
    StdRng::seed_from_u64(seed)
}

/// Derive a subsystem stream from a base seed.
pub fn stream(seed: u64, offset: u64) -> SimRng {
    seeded(seed.wrapping_add(offset))
}

/// Uniform sample in `[lo, hi)`. An empty or inverted range returns `lo`.
pub fn range(rng: &mut SimRng, lo: f32, hi: f32) -> f32 {
    if !(hi > lo) || !lo.is_finite() || !hi.is_finite() {
        return lo;
    }
    if (hi - lo).is_finite() {
        return rng.gen_range(lo..hi);
    }
    // Span overflows f32: interpolate so no intermediate leaves the range.
    let t: f32 = rng.gen();
    let v = lo * (1.0 - t) + hi * t;
    if v < hi { v } else { lo }
}

/// Bernoulli trial with probability `p`, clamped into `[0, 1]`.
pub fn chance(rng: &mut SimRng, p: f32) -> bool {
    let p = if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 };
    rng.gen_bool(p as f64)
}

/// Uniform angle in `[0, 2π)`.
pub fn unit_angle(rng: &mut SimRng) -> f32 {
    range(rng, 0.0, TAU)
}

/// Uniform index in `[0, len)`; `len == 0` returns 0.
pub fn index(rng: &mut SimRng, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        rng.gen_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = seeded(42);
        let mut b = seeded(42);
        for _ in 0..10 {
            assert_eq!(range(&mut a, 0.0, 100.0), range(&mut b, 0.0, 100.0));
        }
    }

    #[test]
    fn streams_differ() {
        let mut a = stream(42, FOG_STREAM);
        let mut b = stream(42, SQUAD_STREAM);
        let xs: Vec<f32> = (0..4).map(|_| range(&mut a, 0.0, 1.0)).collect();
        let ys: Vec<f32> = (0..4).map(|_| range(&mut b, 0.0, 1.0)).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn empty_range_returns_lower_bound() {
        let mut rng = seeded(1);
        assert_eq!(range(&mut rng, 5.0, 5.0), 5.0);
        assert_eq!(range(&mut rng, 5.0, 1.0), 5.0);
        assert_eq!(range(&mut rng, 0.0, f32::NAN), 0.0);
    }

    #[test]
    fn full_float_span_stays_in_bounds() {
        let mut rng = seeded(3);
        for _ in 0..100 {
            let v = range(&mut rng, -f32::MAX, f32::MAX);
            assert!(v.is_finite());
            assert!(v < f32::MAX);
        }
    }

    #[test]
    fn chance_extremes() {
        let mut rng = seeded(7);
        assert!(!chance(&mut rng, 0.0));
        assert!(chance(&mut rng, 1.0));
        assert!(chance(&mut rng, 3.0));
        assert!(!chance(&mut rng, -1.0));
        assert!(!chance(&mut rng, f32::NAN));
    }

    #[test]
    fn unit_angle_in_bounds() {
        let mut rng = seeded(9);
        for _ in 0..200 {
            let a = unit_angle(&mut rng);
            assert!((0.0..TAU).contains(&a), "angle was {}", a);
        }
    }
}
