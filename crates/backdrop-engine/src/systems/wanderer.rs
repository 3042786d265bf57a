//! A single ground-walking actor driven by a four-state machine.
//!
//! Every state runs on a countdown sampled fresh on entry. When it hits
//! zero the transition table in [`next_state`] picks what comes next.
//! Walking into an edge margin is the only other way out of a state: it
//! turns the actor around and forces a short fixed `Idle` pause.

use glam::Vec2;

use crate::api::config::WandererConfig;
use crate::components::actor::SteeringActor;
use crate::components::trail::{TrackMark, TrackTrail};
use crate::core::random::{self, SimRng};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WandererState {
    Moving,
    Idle,
    Looking,
    Greeting,
}

impl WandererState {
    pub const ALL: [WandererState; 4] = [Self::Moving, Self::Idle, Self::Looking, Self::Greeting];
    /// States reachable when the table does not pick `Moving`.
    pub const RESTING: [WandererState; 3] = [Self::Idle, Self::Looking, Self::Greeting];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionCause {
    TimerExpired,
    EdgeBounce,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: WandererState,
    pub to: WandererState,
    pub cause: TransitionCause,
}

/// Head/gesture offsets for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HeadPose {
    /// Radians, positive tilts toward the facing direction.
    pub tilt: f32,
    /// Vertical offset in pixels, negative is up.
    pub bob: f32,
}

const WALK_BOB_FREQ: f32 = 10.0;
const WALK_BOB_AMPLITUDE: f32 = 2.0;
const LOOK_FREQ: f32 = 2.5;
const LOOK_AMPLITUDE: f32 = 0.5;
const GREETING_TILT: f32 = 0.35;

/// Head pose as a pure function of state and time spent in it.
pub fn head_pose(state: WandererState, animation_time: f32) -> HeadPose {
    match state {
        WandererState::Moving => HeadPose {
            tilt: 0.0,
            bob: -(animation_time * WALK_BOB_FREQ).sin().abs() * WALK_BOB_AMPLITUDE,
        },
        WandererState::Idle => HeadPose::default(),
        WandererState::Looking => HeadPose {
            tilt: (animation_time * LOOK_FREQ).sin() * LOOK_AMPLITUDE,
            bob: 0.0,
        },
        WandererState::Greeting => HeadPose { tilt: GREETING_TILT, bob: 0.0 },
    }
}

/// Transition table for an expired countdown: `Moving` with probability
/// `moving_weight`, otherwise one of the resting states uniformly.
/// Any state may follow any other, including itself.
pub fn next_state(rng: &mut SimRng, moving_weight: f32) -> WandererState {
    if random::chance(rng, moving_weight) {
        WandererState::Moving
    } else {
        WandererState::RESTING[random::index(rng, WandererState::RESTING.len())]
    }
}

pub struct StatefulWanderer {
    actor: SteeringActor,
    state: WandererState,
    /// Never negative.
    state_timer: f32,
    /// Seconds since the current state was entered.
    state_elapsed: f32,
    /// +1 walking right, -1 walking left.
    direction: f32,
    trail: TrackTrail,
    since_mark: f32,
    elapsed: f32,
    config: WandererConfig,
    rng: SimRng,
    placed: bool,
}

impl StatefulWanderer {
    pub fn new(config: WandererConfig, seed: u64) -> Self {
        Self::with_rng(config, random::stream(seed, random::WANDERER_STREAM))
    }

    /// Build with an injected random source. Starts `Moving`.
    pub fn with_rng(config: WandererConfig, mut rng: SimRng) -> Self {
        let state_timer = random::range(&mut rng, config.min_state_secs, config.max_state_secs);
        Self {
            actor: SteeringActor::new(Vec2::ZERO, config.speed),
            state: WandererState::Moving,
            state_timer,
            state_elapsed: 0.0,
            direction: 1.0,
            trail: TrackTrail::new(config.mark_interval, config.mark_lifetime),
            since_mark: 0.0,
            elapsed: 0.0,
            config,
            rng,
            placed: false,
        }
    }

    /// Advance one frame. Returns the transition taken, if any.
    /// No-op until the canvas has an area.
    pub fn update(&mut self, dt: f32, canvas: Vec2) -> Option<Transition> {
        if !(dt > 0.0) || !(canvas.x > 0.0 && canvas.y > 0.0) {
            return None;
        }
        if !self.placed {
            self.place(canvas);
        }
        self.elapsed += dt;
        self.state_elapsed += dt;

        // Bounds are re-derived every frame so resizes take effect at once.
        self.actor.position.y = canvas.y * self.config.ground_ratio;
        self.actor.position.x = self.actor.position.x.clamp(0.0, canvas.x);

        let mut transition = None;
        if self.state == WandererState::Moving {
            self.actor.set_max_speed(self.config.speed);
            self.actor.set_velocity(Vec2::new(self.direction * self.config.speed, 0.0));
            self.actor.integrate(dt);
            self.record_marks(dt);

            let x = self.actor.position.x;
            let margin = self.config.edge_margin;
            let at_edge = (x < margin && self.direction < 0.0)
                || (x > canvas.x - margin && self.direction > 0.0);
            if at_edge {
                self.direction = -self.direction;
                let pause = self.config.turn_pause_secs;
                transition =
                    Some(self.enter(WandererState::Idle, pause, TransitionCause::EdgeBounce));
            }
        } else {
            self.actor.velocity = Vec2::ZERO;
        }

        if transition.is_none() {
            self.state_timer = (self.state_timer - dt).max(0.0);
            if self.state_timer <= 0.0 {
                let next = next_state(&mut self.rng, self.config.moving_weight);
                let (lo, hi) = (self.config.min_state_secs, self.config.max_state_secs);
                let duration = random::range(&mut self.rng, lo, hi);
                transition = Some(self.enter(next, duration, TransitionCause::TimerExpired));
            }
        }

        self.trail.evict(self.elapsed);
        transition
    }

    fn place(&mut self, canvas: Vec2) {
        self.actor.position = Vec2::new(canvas.x * 0.5, canvas.y * self.config.ground_ratio);
        self.direction = if random::chance(&mut self.rng, 0.5) { 1.0 } else { -1.0 };
        self.placed = true;
        log::info!("wanderer: placed at x={:.1}", self.actor.position.x);
    }

    fn record_marks(&mut self, dt: f32) {
        self.since_mark += dt;
        if self.since_mark >= self.config.mark_interval {
            self.since_mark %= self.config.mark_interval;
            self.trail.push(TrackMark {
                position: self.actor.position,
                timestamp: self.elapsed,
            });
        }
    }

    fn enter(&mut self, to: WandererState, duration: f32, cause: TransitionCause) -> Transition {
        let from = self.state;
        self.state = to;
        self.state_timer = duration.max(0.0);
        self.state_elapsed = 0.0;
        if to != WandererState::Moving {
            self.actor.velocity = Vec2::ZERO;
        }
        log::debug!("wanderer: {:?} -> {:?} ({:?}, {:.2}s)", from, to, cause, self.state_timer);
        Transition { from, to, cause }
    }

    pub fn state(&self) -> WandererState {
        self.state
    }

    pub fn state_timer(&self) -> f32 {
        self.state_timer
    }

    pub fn head_pose(&self) -> HeadPose {
        head_pose(self.state, self.state_elapsed)
    }

    pub fn actor(&self) -> &SteeringActor {
        &self.actor
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    pub fn trail(&self) -> &TrackTrail {
        &self.trail
    }

    /// Wanderer-local simulation time, used to age track marks.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_placed(&self) -> bool {
        self.placed
    }
}
