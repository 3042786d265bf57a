use glam::Vec2;

use crate::core::vector::{clamp_length, heading_of, normalize_or_zero};

/// A moving point with a speed cap and a facing.
///
/// Steering never teleports: callers compute a desired velocity, nudge the
/// current velocity toward it, clamp, then integrate.
#[derive(Debug, Clone, PartialEq)]
pub struct SteeringActor {
    pub position: Vec2,
    pub velocity: Vec2,
    max_speed: f32,
    /// Facing in radians, `-atan2(vx, vy)`; held while stationary.
    pub heading: f32,
}

impl SteeringActor {
    pub fn new(position: Vec2, max_speed: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            max_speed: Self::clamp_speed(max_speed),
            heading: 0.0,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.set_velocity(velocity);
        self
    }

    /// Replace the velocity (clamped) and face along it.
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = clamp_length(velocity, self.max_speed);
        self.refresh_heading();
    }

    fn clamp_speed(speed: f32) -> f32 {
        if speed.is_finite() { speed.max(0.0) } else { 0.0 }
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// Takes effect on the next clamp; nothing caches the old value.
    pub fn set_max_speed(&mut self, max_speed: f32) {
        self.max_speed = Self::clamp_speed(max_speed);
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Full-speed velocity toward `target`.
    pub fn seek(&self, target: Vec2) -> Vec2 {
        normalize_or_zero(target - self.position) * self.max_speed
    }

    /// Like `seek`, but slows linearly inside `slowing_radius`.
    pub fn arrive(&self, target: Vec2, slowing_radius: f32) -> Vec2 {
        let to_target = target - self.position;
        let dist = to_target.length();
        let speed = if slowing_radius > 0.0 {
            self.max_speed * (dist / slowing_radius).clamp(0.0, 1.0)
        } else {
            self.max_speed
        };
        normalize_or_zero(to_target) * speed
    }

    /// Steering force pulling the current velocity toward `desired`.
    pub fn steering_force(&self, desired: Vec2, gain: f32) -> Vec2 {
        (desired - self.velocity) * gain
    }

    /// `velocity += force * dt`, then clamp.
    pub fn apply_force(&mut self, force: Vec2, dt: f32) {
        if force.is_finite() {
            self.velocity += force * dt;
        }
        self.clamp_velocity();
    }

    /// Enforce `|velocity| <= max_speed`.
    pub fn clamp_velocity(&mut self) {
        self.clamp_velocity_to(self.max_speed);
    }

    /// Enforce `|velocity| <= limit`, for actors capped relative to another.
    pub fn clamp_velocity_to(&mut self, limit: f32) {
        self.velocity = clamp_length(self.velocity, limit);
    }

    /// Negate velocity components that carry the actor further outside
    /// `[0, bounds]`. The position itself is not clamped.
    pub fn reflect_in_bounds(&mut self, bounds: Vec2) {
        if (self.position.x < 0.0 && self.velocity.x < 0.0)
            || (self.position.x > bounds.x && self.velocity.x > 0.0)
        {
            self.velocity.x = -self.velocity.x;
        }
        if (self.position.y < 0.0 && self.velocity.y < 0.0)
            || (self.position.y > bounds.y && self.velocity.y > 0.0)
        {
            self.velocity.y = -self.velocity.y;
        }
    }

    /// `position += velocity * dt` and refresh the heading.
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
        self.refresh_heading();
    }

    fn refresh_heading(&mut self) {
        if let Some(h) = heading_of(self.velocity) {
            self.heading = h;
        }
    }
}
