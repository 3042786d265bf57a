use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::color::Palette;
use crate::core::time::SimulationClock;

/// Fog layer tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FogConfig {
    /// Number of parallax layers, back to front.
    pub layer_count: usize,
    /// Scroll speed of the backmost layer, in canvas widths per second.
    /// Each nearer layer scrolls one `base_speed` faster.
    pub base_speed: f32,
    /// Blobs generated per layer.
    pub blob_count: usize,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            layer_count: 3,
            base_speed: 0.02,
            blob_count: 10,
        }
    }
}

/// Spiraling smoke plume tunables. Distances are in normalized canvas units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmokeConfig {
    pub spawn_interval_ms: f32,
    pub max_life: f32,
    pub rise_speed: f32,
    /// Spiral angular speed in rad/s.
    pub spiral_speed: f32,
    /// Spiral radius growth per second.
    pub radius_growth: f32,
    /// Emitter origin (normalized); particles spawn around it.
    pub origin: Vec2,
    /// Horizontal spawn jitter either side of the origin.
    pub jitter: f32,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            spawn_interval_ms: 100.0,
            max_life: 5.0,
            rise_speed: 0.1,
            spiral_speed: 2.0,
            radius_growth: 0.02,
            origin: Vec2::new(0.5, 0.95),
            jitter: 0.03,
        }
    }
}

/// Formation squad tunables. Distances are in canvas pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SquadConfig {
    /// Total actors including the leader.
    pub size: usize,
    pub leader_max_speed: f32,
    pub steering_gain: f32,
    pub spring_constant: f32,
    /// Follower speed cap as a multiple of the leader's max speed.
    pub follower_speed_factor: f32,
    /// The leader retargets when closer than this to its wander target.
    pub arrival_distance: f32,
    /// The leader retargets after this many seconds regardless.
    pub retarget_interval: f32,
    /// Per actor, per frame.
    pub dust_chance: f32,
    /// Leader only, per frame.
    pub collectible_chance: f32,
    /// Follower slots in the leader's frame (+Y = direction of travel).
    pub formation_offsets: Vec<Vec2>,
}

impl Default for SquadConfig {
    fn default() -> Self {
        Self {
            size: 5,
            leader_max_speed: 120.0,
            steering_gain: 2.0,
            spring_constant: 3.0,
            follower_speed_factor: 1.1,
            arrival_distance: 100.0,
            retarget_interval: 3.0,
            dust_chance: 0.05,
            collectible_chance: 0.005,
            formation_offsets: vec![
                Vec2::new(-40.0, -40.0),
                Vec2::new(40.0, -40.0),
                Vec2::new(-80.0, -80.0),
                Vec2::new(80.0, -80.0),
            ],
        }
    }
}

/// Stateful wanderer tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WandererConfig {
    /// Horizontal walking speed in pixels per second.
    pub speed: f32,
    /// Turn around when this close to a horizontal edge.
    pub edge_margin: f32,
    /// Probability that an expired state is followed by `Moving`.
    pub moving_weight: f32,
    pub min_state_secs: f32,
    pub max_state_secs: f32,
    /// Fixed `Idle` duration after an edge turn-around.
    pub turn_pause_secs: f32,
    /// Seconds of walking between track marks.
    pub mark_interval: f32,
    /// Track marks older than this are evicted.
    pub mark_lifetime: f32,
    /// Ground line as a fraction of canvas height.
    pub ground_ratio: f32,
}

impl Default for WandererConfig {
    fn default() -> Self {
        Self {
            speed: 60.0,
            edge_margin: 100.0,
            moving_weight: 0.5,
            min_state_secs: 2.0,
            max_state_secs: 5.0,
            turn_pause_secs: 1.0,
            mark_interval: 0.1,
            mark_lifetime: 2.0,
            ground_ratio: 0.85,
        }
    }
}

/// Constructor-time configuration for a whole background simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Base seed; every subsystem derives its own stream from it.
    pub seed: u64,
    /// Longest frame the clock will integrate in one tick.
    pub max_dt: f32,
    pub fog: FogConfig,
    pub smoke: SmokeConfig,
    pub squad: SquadConfig,
    pub wanderer: WandererConfig,
    pub palette: Palette,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_dt: SimulationClock::DEFAULT_MAX_DT,
            fog: FogConfig::default(),
            smoke: SmokeConfig::default(),
            squad: SquadConfig::default(),
            wanderer: WandererConfig::default(),
            palette: Palette::default(),
        }
    }
}

/// Upper bounds applied by [`SimulationConfig::sanitized`]. Large values are
/// clamped rather than reset, so a host asking for "a lot" still gets a lot.
pub const MAX_FOG_LAYERS: usize = 16;
pub const MAX_FOG_BLOBS: usize = 64;
pub const MAX_SQUAD_SIZE: usize = 64;
/// Seconds. Also bounds smoke and track mark populations.
pub const MAX_LIFETIME: f32 = 60.0;
/// Normalized canvas units.
pub const MAX_SMOKE_JITTER: f32 = 0.5;

/// Replace `value` with `fallback` unless it is finite and `>= min`.
fn at_least(name: &str, value: f32, min: f32, fallback: f32) -> f32 {
    if value.is_finite() && value >= min {
        value
    } else {
        log::warn!("config: {} = {} is out of range, using {}", name, value, fallback);
        fallback
    }
}

/// Like [`at_least`], then clamp down to `max`.
fn within(name: &str, value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    let value = at_least(name, value, min, fallback);
    if value > max {
        log::warn!("config: {} = {} is too large, using {}", name, value, max);
        max
    } else {
        value
    }
}

fn count_at_most(name: &str, value: usize, max: usize) -> usize {
    if value > max {
        log::warn!("config: {} = {} is too large, using {}", name, value, max);
        max
    } else {
        value
    }
}

fn probability(name: &str, value: f32, fallback: f32) -> f32 {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        value
    } else {
        log::warn!("config: {} = {} is not a probability, using {}", name, value, fallback);
        fallback
    }
}

impl SimulationConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Replace degenerate tunables with their defaults and clamp the ones
    /// that size allocations or random ranges.
    pub fn sanitized(mut self) -> Self {
        let d = Self::default();

        if !(self.max_dt.is_finite() && self.max_dt > 0.0) {
            log::warn!("config: max_dt = {} is not positive, using {}", self.max_dt, d.max_dt);
            self.max_dt = d.max_dt;
        }

        let f = &mut self.fog;
        f.layer_count = count_at_most("fog.layer_count", f.layer_count, MAX_FOG_LAYERS);
        f.blob_count = count_at_most("fog.blob_count", f.blob_count, MAX_FOG_BLOBS);
        f.base_speed = at_least("fog.base_speed", f.base_speed, 0.0, d.fog.base_speed);

        let s = &mut self.smoke;
        let ds = &d.smoke;
        s.spawn_interval_ms =
            at_least("smoke.spawn_interval_ms", s.spawn_interval_ms, 1.0, ds.spawn_interval_ms);
        s.max_life = within("smoke.max_life", s.max_life, 0.0, MAX_LIFETIME, ds.max_life);
        s.rise_speed = at_least("smoke.rise_speed", s.rise_speed, 0.0, ds.rise_speed);
        s.radius_growth = at_least("smoke.radius_growth", s.radius_growth, 0.0, ds.radius_growth);
        s.jitter = within("smoke.jitter", s.jitter, 0.0, MAX_SMOKE_JITTER, ds.jitter);
        if !s.spiral_speed.is_finite() {
            s.spiral_speed = ds.spiral_speed;
        }
        if !s.origin.is_finite() {
            s.origin = ds.origin;
        }

        let q = &mut self.squad;
        let dq = &d.squad;
        q.size = count_at_most("squad.size", q.size, MAX_SQUAD_SIZE);
        q.leader_max_speed =
            at_least("squad.leader_max_speed", q.leader_max_speed, 0.0, dq.leader_max_speed);
        q.steering_gain = at_least("squad.steering_gain", q.steering_gain, 0.0, dq.steering_gain);
        q.spring_constant =
            at_least("squad.spring_constant", q.spring_constant, 0.0, dq.spring_constant);
        q.follower_speed_factor = at_least(
            "squad.follower_speed_factor",
            q.follower_speed_factor,
            0.0,
            dq.follower_speed_factor,
        );
        q.arrival_distance =
            at_least("squad.arrival_distance", q.arrival_distance, 0.0, dq.arrival_distance);
        q.retarget_interval =
            at_least("squad.retarget_interval", q.retarget_interval, 0.0, dq.retarget_interval);
        q.dust_chance = probability("squad.dust_chance", q.dust_chance, dq.dust_chance);
        q.collectible_chance =
            probability("squad.collectible_chance", q.collectible_chance, dq.collectible_chance);
        q.formation_offsets.retain(|o| o.is_finite());

        let w = &mut self.wanderer;
        let dw = &d.wanderer;
        w.speed = at_least("wanderer.speed", w.speed, 0.0, dw.speed);
        w.edge_margin = at_least("wanderer.edge_margin", w.edge_margin, 0.0, dw.edge_margin);
        w.moving_weight = probability("wanderer.moving_weight", w.moving_weight, dw.moving_weight);
        w.min_state_secs =
            at_least("wanderer.min_state_secs", w.min_state_secs, 0.0, dw.min_state_secs);
        if !(w.max_state_secs.is_finite() && w.max_state_secs >= w.min_state_secs) {
            log::warn!(
                "config: wanderer.max_state_secs = {} is below min_state_secs",
                w.max_state_secs
            );
            w.max_state_secs = w.min_state_secs.max(dw.max_state_secs);
        }
        w.turn_pause_secs =
            at_least("wanderer.turn_pause_secs", w.turn_pause_secs, 0.0, dw.turn_pause_secs);
        w.mark_interval =
            at_least("wanderer.mark_interval", w.mark_interval, 0.001, dw.mark_interval);
        w.mark_lifetime =
            within("wanderer.mark_lifetime", w.mark_lifetime, 0.0, MAX_LIFETIME, dw.mark_lifetime);
        if !(w.ground_ratio.is_finite() && (0.0..=1.0).contains(&w.ground_ratio)) {
            w.ground_ratio = dw.ground_ratio;
        }

        self
    }
}
