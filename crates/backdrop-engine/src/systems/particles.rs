use glam::Vec2;

use crate::api::config::SmokeConfig;
use crate::components::emitter::SpawnTimer;
use crate::components::particle::{Particle, ParticleKind};
use crate::core::random::{self, SimRng};

/// Owns every live runtime particle: the smoke plume plus the dust and
/// collectibles dropped by the squad.
///
/// Steady-state population is bounded by spawn rate × lifetime, so there is
/// no explicit cap.
pub struct ParticleSystem {
    particles: Vec<Particle>,
    canvas: Vec2,
    smoke: SmokeConfig,
    smoke_timer: SpawnTimer,
    rng: SimRng,
}

impl ParticleSystem {
    const DUST_DRIFT: f32 = 8.0;
    const SPIN_RANGE: (f32, f32) = (1.5, 3.0);
    const MAX_RESERVE: usize = 1024;

    pub fn new(smoke: SmokeConfig, seed: u64) -> Self {
        Self::with_rng(smoke, random::stream(seed, random::PARTICLE_STREAM))
    }

    /// Build with an injected random source.
    pub fn with_rng(smoke: SmokeConfig, rng: SimRng) -> Self {
        // spawn rate × lifetime, plus headroom for squad effects
        let steady = smoke.max_life * 1000.0 / smoke.spawn_interval_ms.max(1.0);
        let reserve = if steady.is_finite() { steady as usize } else { 0 };
        Self {
            particles: Vec::with_capacity(reserve.saturating_add(32).min(Self::MAX_RESERVE)),
            canvas: Vec2::ZERO,
            smoke_timer: SpawnTimer::from_millis(smoke.spawn_interval_ms),
            smoke,
            rng,
        }
    }

    /// Canvas size for this frame. Set before spawning every tick.
    pub fn set_canvas(&mut self, canvas: Vec2) {
        self.canvas = canvas;
    }

    fn has_canvas(&self) -> bool {
        self.canvas.x > 0.0 && self.canvas.y > 0.0
    }

    /// Spawn one particle of `kind` near `origin_hint` with randomized
    /// attributes. Smoke hints are normalized; dust and collectible hints
    /// are in canvas pixels.
    ///
    /// Dropped (returns false) when the canvas has no area yet, and for
    /// `Fog`, which is generated per layer rather than spawned.
    pub fn spawn(&mut self, kind: ParticleKind, origin_hint: Vec2) -> bool {
        if !self.has_canvas() || !origin_hint.is_finite() {
            return false;
        }
        let particle = match kind {
            ParticleKind::Fog => return false,
            ParticleKind::Smoke => {
                let jitter = random::range(&mut self.rng, -self.smoke.jitter, self.smoke.jitter);
                Particle::smoke(
                    origin_hint + Vec2::new(jitter, 0.0),
                    random::unit_angle(&mut self.rng),
                    self.smoke.max_life,
                    self.smoke.rise_speed,
                    self.smoke.spiral_speed,
                    self.smoke.radius_growth,
                )
            }
            ParticleKind::Dust => {
                let drift = Vec2::new(
                    random::range(&mut self.rng, -Self::DUST_DRIFT, Self::DUST_DRIFT),
                    random::range(&mut self.rng, -Self::DUST_DRIFT, Self::DUST_DRIFT),
                );
                Particle::dust(origin_hint, drift)
            }
            ParticleKind::Collectible => {
                let spin = random::range(&mut self.rng, Self::SPIN_RANGE.0, Self::SPIN_RANGE.1);
                let spin = if random::chance(&mut self.rng, 0.5) { spin } else { -spin };
                Particle::collectible(origin_hint, spin)
            }
        };
        self.particles.push(particle);
        true
    }

    /// Run spawn timers for `dt`. Returns the number of particles spawned.
    pub fn tick_spawners(&mut self, dt: f32) -> usize {
        let due = self.smoke_timer.tick(dt);
        let origin = self.smoke.origin;
        (0..due).filter(|_| self.spawn(ParticleKind::Smoke, origin)).count()
    }

    /// Advance every particle, then reap the expired ones.
    /// Returns how many were reaped.
    pub fn update(&mut self, dt: f32) -> usize {
        if !(dt > 0.0) {
            return 0;
        }
        for p in &mut self.particles {
            p.update(dt);
        }
        self.reap()
    }

    /// Stable compaction: survivors keep their relative order.
    pub fn reap(&mut self) -> usize {
        let before = self.particles.len();
        self.particles.retain(|p| !p.is_expired());
        before - self.particles.len()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn count_of(&self, kind: ParticleKind) -> usize {
        self.particles.iter().filter(|p| p.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
