//! Short-lived point entities.
//!
//! Smoke lives in normalized canvas space (0..1 on both axes) so a plume
//! keeps its shape across viewport resizes. Dust and collectibles are
//! dropped by squad actors and live in canvas pixels.

use glam::Vec2;

/// What a particle is, which decides how it moves and how it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    /// Fog blobs are pre-generated per layer and never spawned at runtime.
    Fog,
    Smoke,
    Dust,
    Collectible,
}

impl ParticleKind {
    /// Whether positions and sizes are normalized to the canvas.
    pub fn is_normalized(self) -> bool {
        matches!(self, Self::Fog | Self::Smoke)
    }
}

/// A single particle with kinematic and rendering state.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub kind: ParticleKind,
    pub position: Vec2,
    /// Linear drift (dust).
    pub velocity: Vec2,
    /// Spiral phase in radians (smoke).
    pub spiral_angle: f32,
    /// Spiral radius (smoke).
    pub spiral_radius: f32,
    /// Rotation in radians (collectibles spin).
    pub rotation: f32,
    pub spin: f32,
    /// Current visual size.
    pub size: f32,
    base_size: f32,
    size_growth: f32,
    rise_speed: f32,
    spiral_speed: f32,
    radius_growth: f32,
    remaining_life: f32,
    max_life: f32,
}

impl Particle {
    pub const SMOKE_OPACITY: f32 = 0.6;
    pub const SMOKE_BASE_SIZE: f32 = 0.03;
    pub const SMOKE_SIZE_GROWTH: f32 = 0.02;
    pub const DUST_OPACITY: f32 = 0.5;
    pub const DUST_LIFE: f32 = 1.2;
    pub const DUST_SIZE: f32 = 6.0;
    pub const DUST_SIZE_GROWTH: f32 = 4.0;
    pub const COLLECTIBLE_LIFE: f32 = 4.0;
    pub const COLLECTIBLE_SIZE: f32 = 14.0;
    /// Collectibles fade out over their last half second.
    pub const COLLECTIBLE_FADE: f32 = 0.5;

    fn base(kind: ParticleKind, position: Vec2, size: f32, max_life: f32) -> Self {
        let max_life = if max_life.is_finite() { max_life.max(0.0) } else { 0.0 };
        Self {
            kind,
            position,
            velocity: Vec2::ZERO,
            spiral_angle: 0.0,
            spiral_radius: 0.0,
            rotation: 0.0,
            spin: 0.0,
            size,
            base_size: size,
            size_growth: 0.0,
            rise_speed: 0.0,
            spiral_speed: 0.0,
            radius_growth: 0.0,
            remaining_life: max_life,
            max_life,
        }
    }

    /// A smoke puff rising from `position` along a widening spiral.
    pub fn smoke(
        position: Vec2,
        spiral_angle: f32,
        max_life: f32,
        rise_speed: f32,
        spiral_speed: f32,
        radius_growth: f32,
    ) -> Self {
        Self {
            spiral_angle,
            size_growth: Self::SMOKE_SIZE_GROWTH,
            rise_speed,
            spiral_speed,
            radius_growth,
            ..Self::base(ParticleKind::Smoke, position, Self::SMOKE_BASE_SIZE, max_life)
        }
    }

    /// A dust puff kicked up behind a moving actor.
    pub fn dust(position: Vec2, velocity: Vec2) -> Self {
        Self {
            velocity,
            size_growth: Self::DUST_SIZE_GROWTH,
            ..Self::base(ParticleKind::Dust, position, Self::DUST_SIZE, Self::DUST_LIFE)
        }
    }

    /// A spinning collectible left by the squad leader.
    pub fn collectible(position: Vec2, spin: f32) -> Self {
        Self {
            spin,
            ..Self::base(
                ParticleKind::Collectible,
                position,
                Self::COLLECTIBLE_SIZE,
                Self::COLLECTIBLE_LIFE,
            )
        }
    }

    /// Advance this particle only; never reads other particles.
    pub fn update(&mut self, dt: f32) {
        if !(dt > 0.0) {
            return;
        }
        self.remaining_life = (self.remaining_life - dt).max(0.0);
        let elapsed = self.max_life - self.remaining_life;
        self.size = self.base_size + self.size_growth * elapsed;

        match self.kind {
            ParticleKind::Fog => {}
            ParticleKind::Smoke => {
                self.position.y -= self.rise_speed * dt;
                self.spiral_angle += self.spiral_speed * dt;
                self.spiral_radius += self.radius_growth * dt;
                self.position.x += self.spiral_angle.cos() * self.spiral_radius * dt;
            }
            ParticleKind::Dust => {
                self.position += self.velocity * dt;
            }
            ParticleKind::Collectible => {
                self.rotation += self.spin * dt;
            }
        }
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_life <= 0.0
    }

    pub fn remaining_life(&self) -> f32 {
        self.remaining_life
    }

    pub fn max_life(&self) -> f32 {
        self.max_life
    }

    /// Remaining life as a fraction in [0, 1].
    pub fn life_fraction(&self) -> f32 {
        if self.max_life > 0.0 {
            (self.remaining_life / self.max_life).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Rendered opacity, derived from remaining life.
    pub fn opacity(&self) -> f32 {
        match self.kind {
            // Runtime fog is drawn per layer; this arm only sees a retagged particle.
            ParticleKind::Fog => self.life_fraction() * 0.1,
            ParticleKind::Smoke => self.life_fraction() * Self::SMOKE_OPACITY,
            ParticleKind::Dust => self.life_fraction() * Self::DUST_OPACITY,
            ParticleKind::Collectible => {
                (self.remaining_life / Self::COLLECTIBLE_FADE).clamp(0.0, 1.0)
            }
        }
    }
}
