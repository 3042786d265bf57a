use glam::Vec2;

use crate::api::config::SquadConfig;
use crate::components::actor::SteeringActor;
use crate::components::particle::ParticleKind;
use crate::core::random::{self, SimRng};
use crate::core::vector::{distance, rotate};
use crate::systems::particles::ParticleSystem;

/// One wandering leader and its followers held in formation.
///
/// The offset table is the only formation state. Every frame each slot is
/// rotated by the leader's current heading and the follower is sprung
/// toward it, so the whole formation turns with the leader.
pub struct FormationSquad {
    leader: SteeringActor,
    followers: Vec<SteeringActor>,
    offsets: Vec<Vec2>,
    target: Vec2,
    target_elapsed: f32,
    config: SquadConfig,
    rng: SimRng,
    placed: bool,
}

impl FormationSquad {
    pub fn new(config: SquadConfig, seed: u64) -> Self {
        Self::with_rng(config, random::stream(seed, random::SQUAD_STREAM))
    }

    /// Build with an injected random source.
    pub fn with_rng(config: SquadConfig, rng: SimRng) -> Self {
        let offsets = Self::slot_offsets(&config);
        let follower_max = config.leader_max_speed * config.follower_speed_factor;
        let followers = offsets
            .iter()
            .map(|_| SteeringActor::new(Vec2::ZERO, follower_max))
            .collect();
        Self {
            leader: SteeringActor::new(Vec2::ZERO, config.leader_max_speed),
            followers,
            offsets,
            target: Vec2::ZERO,
            target_elapsed: 0.0,
            config,
            rng,
            placed: false,
        }
    }

    /// One offset per follower. Slots beyond the table repeat it, pushed
    /// one table-depth further back each time round.
    fn slot_offsets(config: &SquadConfig) -> Vec<Vec2> {
        let follower_count = config.size.saturating_sub(1);
        let table = &config.formation_offsets;
        if table.is_empty() {
            if follower_count > 0 {
                log::warn!("squad: empty formation table, {} followers dropped", follower_count);
            }
            return Vec::new();
        }
        (0..follower_count)
            .map(|i| table[i % table.len()] * (1 + i / table.len()) as f32)
            .collect()
    }

    /// Advance leader, then followers, then roll for trail effects.
    /// No-op until the canvas has an area.
    pub fn update(&mut self, dt: f32, canvas: Vec2, particles: &mut ParticleSystem) {
        if !(dt > 0.0) || !(canvas.x > 0.0 && canvas.y > 0.0) {
            return;
        }
        if !self.placed {
            self.place(canvas);
        }
        self.update_leader(dt, canvas);
        self.update_followers(dt);
        self.emit_effects(particles);
    }

    fn place(&mut self, canvas: Vec2) {
        self.leader.position = canvas * 0.5;
        let angle = random::unit_angle(&mut self.rng);
        let speed = self.leader.max_speed() * 0.5;
        self.leader.set_velocity(Vec2::from_angle(angle) * speed);
        let heading = self.leader.heading;
        for (follower, offset) in self.followers.iter_mut().zip(&self.offsets) {
            follower.position = self.leader.position + rotate(*offset, heading);
            follower.velocity = Vec2::ZERO;
        }
        self.retarget(canvas);
        self.placed = true;
        log::info!(
            "squad: placed {} actors on {}x{} canvas",
            self.actor_count(),
            canvas.x,
            canvas.y
        );
    }

    fn retarget(&mut self, canvas: Vec2) {
        self.target = Vec2::new(
            random::range(&mut self.rng, 0.0, canvas.x),
            random::range(&mut self.rng, 0.0, canvas.y),
        );
        self.target_elapsed = 0.0;
        log::debug!("squad: leader retargeted to ({:.1}, {:.1})", self.target.x, self.target.y);
    }

    fn target_stale(&self, canvas: Vec2) -> bool {
        let outside = self.target.x < 0.0
            || self.target.y < 0.0
            || self.target.x > canvas.x
            || self.target.y > canvas.y;
        outside
            || distance(self.leader.position, self.target) < self.config.arrival_distance
            || self.target_elapsed > self.config.retarget_interval
    }

    fn update_leader(&mut self, dt: f32, canvas: Vec2) {
        self.target_elapsed += dt;
        if self.target_stale(canvas) {
            self.retarget(canvas);
        }

        let desired = self.leader.seek(self.target);
        let force = self.leader.steering_force(desired, self.config.steering_gain);
        self.leader.apply_force(force, dt);
        self.leader.reflect_in_bounds(canvas);
        self.leader.integrate(dt);

        // Crossing the arrival radius during this step retargets now,
        // not next frame.
        if distance(self.leader.position, self.target) < self.config.arrival_distance {
            self.retarget(canvas);
        }
    }

    fn update_followers(&mut self, dt: f32) {
        let limit = self.leader.max_speed() * self.config.follower_speed_factor;
        let heading = self.leader.heading;
        let anchor = self.leader.position;
        let spring = self.config.spring_constant;
        for (follower, offset) in self.followers.iter_mut().zip(&self.offsets) {
            let slot = anchor + rotate(*offset, heading);
            follower.set_max_speed(limit);
            follower.velocity = (slot - follower.position) * spring;
            follower.clamp_velocity();
            follower.integrate(dt);
        }
    }

    fn emit_effects(&mut self, particles: &mut ParticleSystem) {
        let dust = self.config.dust_chance;
        if random::chance(&mut self.rng, dust) {
            particles.spawn(ParticleKind::Dust, self.leader.position);
        }
        for follower in &self.followers {
            if random::chance(&mut self.rng, dust) {
                particles.spawn(ParticleKind::Dust, follower.position);
            }
        }
        if random::chance(&mut self.rng, self.config.collectible_chance) {
            particles.spawn(ParticleKind::Collectible, self.leader.position);
        }
    }

    /// World position of follower slot `index` for the leader's current pose.
    pub fn slot_target(&self, index: usize) -> Option<Vec2> {
        self.offsets
            .get(index)
            .map(|o| self.leader.position + rotate(*o, self.leader.heading))
    }

    /// Reconfigure the leader's speed cap; followers follow on the next update.
    pub fn set_max_speed(&mut self, max_speed: f32) {
        self.leader.set_max_speed(max_speed);
        self.config.leader_max_speed = self.leader.max_speed();
    }

    /// Override the wander target; it stays until reached or stale.
    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
        self.target_elapsed = 0.0;
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn target_elapsed(&self) -> f32 {
        self.target_elapsed
    }

    pub fn leader(&self) -> &SteeringActor {
        &self.leader
    }

    pub fn followers(&self) -> &[SteeringActor] {
        &self.followers
    }

    /// Leader first, then followers in slot order.
    pub fn actors(&self) -> impl Iterator<Item = &SteeringActor> {
        std::iter::once(&self.leader).chain(self.followers.iter())
    }

    pub fn offsets(&self) -> &[Vec2] {
        &self.offsets
    }

    pub fn is_placed(&self) -> bool {
        self.placed
    }

    /// Actor count including the leader.
    pub fn actor_count(&self) -> usize {
        1 + self.followers.len()
    }
}
