use glam::Vec2;

use crate::api::config::SimulationConfig;
use crate::components::fog::FogLayer;
use crate::core::random::{self, FOG_STREAM};
use crate::core::time::{FrameTick, SimulationClock};
use crate::renderer::drawable::Drawable;
use crate::renderer::instance::DrawList;
use crate::systems::particles::ParticleSystem;
use crate::systems::render::{self, SceneView};
use crate::systems::squad::FormationSquad;
use crate::systems::wanderer::{StatefulWanderer, Transition};

/// Density lost per fog layer, back to front.
const FOG_DENSITY_STEP: f32 = 0.25;
const FOG_MIN_DENSITY: f32 = 0.25;

/// One decorative background: the single writer of every entity.
///
/// The host calls [`Simulation::tick`] once per presented frame and then
/// reads the result through [`Simulation::export_drawables`] or
/// [`Simulation::export_into`]. Nothing runs between ticks.
pub struct Simulation {
    config: SimulationConfig,
    clock: SimulationClock,
    fog_layers: Vec<FogLayer>,
    particles: ParticleSystem,
    squad: FormationSquad,
    wanderer: StatefulWanderer,
    last_transition: Option<Transition>,
    canvas_ready: bool,
    scratch: Vec<Drawable>,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Self {
        let config = config.sanitized();
        let seed = config.seed;

        let mut fog_rng = random::stream(seed, FOG_STREAM);
        let fog_layers = (0..config.fog.layer_count)
            .map(|i| {
                let speed = config.fog.base_speed * (i + 1) as f32;
                let density = (1.0 - FOG_DENSITY_STEP * i as f32).max(FOG_MIN_DENSITY);
                FogLayer::new(speed, density, config.fog.blob_count, &mut fog_rng)
            })
            .collect();

        log::info!(
            "simulation: seed={} fog_layers={} squad={} smoke_interval={}ms",
            seed,
            config.fog.layer_count,
            config.squad.size,
            config.smoke.spawn_interval_ms,
        );

        Self {
            clock: SimulationClock::new(config.max_dt),
            fog_layers,
            particles: ParticleSystem::new(config.smoke.clone(), seed),
            squad: FormationSquad::new(config.squad.clone(), seed),
            wanderer: StatefulWanderer::new(config.wanderer.clone(), seed),
            last_transition: None,
            canvas_ready: false,
            scratch: Vec::new(),
            config,
        }
    }

    /// Advance one frame. Order is fixed: spawn timers, particle
    /// update and reap, squad, wanderer. A canvas without area or a
    /// non-positive `dt` advances only the clock.
    pub fn tick(&mut self, canvas_width: f32, canvas_height: f32, dt: f32) -> FrameTick {
        let tick = self.clock.advance(canvas_width, canvas_height, dt);
        self.last_transition = None;
        if !tick.has_canvas() {
            return tick;
        }
        if !self.canvas_ready {
            self.canvas_ready = true;
            log::info!("simulation: canvas {}x{}", tick.canvas.x, tick.canvas.y);
        }
        if !tick.has_time() {
            return tick;
        }

        self.particles.set_canvas(tick.canvas);
        self.particles.tick_spawners(tick.dt);
        for layer in &mut self.fog_layers {
            layer.update(tick.dt);
        }
        self.particles.update(tick.dt);
        self.squad.update(tick.dt, tick.canvas, &mut self.particles);
        self.last_transition = self.wanderer.update(tick.dt, tick.canvas);
        tick
    }

    fn view(&self) -> SceneView<'_> {
        SceneView {
            canvas: self.clock.canvas(),
            fog_layers: &self.fog_layers,
            particles: &self.particles,
            squad: &self.squad,
            wanderer: &self.wanderer,
            palette: &self.config.palette,
        }
    }

    /// Fresh list of this frame's drawables in paint order.
    pub fn export_drawables(&self) -> Vec<Drawable> {
        let mut out = Vec::new();
        render::export_drawables(&self.view(), &mut out);
        out
    }

    /// Pack this frame's drawables into `list`, reusing internal scratch.
    pub fn export_into(&mut self, list: &mut DrawList) {
        let mut scratch = std::mem::take(&mut self.scratch);
        render::build_draw_list(&self.view(), &mut scratch, list);
        self.scratch = scratch;
    }

    /// Reconfigure the squad leader's speed cap. Followers scale from it.
    pub fn set_squad_max_speed(&mut self, max_speed: f32) {
        if !(max_speed.is_finite() && max_speed >= 0.0) {
            log::warn!("simulation: ignoring squad max speed {}", max_speed);
            return;
        }
        self.squad.set_max_speed(max_speed);
        self.config.squad.leader_max_speed = max_speed;
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn canvas(&self) -> Vec2 {
        self.clock.canvas()
    }

    pub fn fog_layers(&self) -> &[FogLayer] {
        &self.fog_layers
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn squad(&self) -> &FormationSquad {
        &self.squad
    }

    pub fn wanderer(&self) -> &StatefulWanderer {
        &self.wanderer
    }

    /// Wanderer transition taken during the last tick, if any.
    pub fn last_transition(&self) -> Option<Transition> {
        self.last_transition
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}
