use backdrop_engine::bridge::protocol::ProtocolLayout;
use backdrop_engine::{DrawInstance, DrawList, Simulation, SimulationConfig};

/// Wires one [`Simulation`] to the host frame loop.
///
/// The host keeps a single runner in `thread_local!` storage and drives it
/// through the free functions in the crate root, because wasm-bindgen
/// exports functions more cheaply than it exports stateful structs.
pub struct BackdropRunner {
    sim: Simulation,
    draw_list: DrawList,
    layout: ProtocolLayout,
    /// Header + packed drawables, rewritten every tick.
    frame_buffer: Vec<f32>,
}

impl BackdropRunner {
    pub fn new(config: SimulationConfig) -> Self {
        let layout = ProtocolLayout::default();
        Self {
            sim: Simulation::new(config),
            draw_list: DrawList::with_capacity(layout.max_drawables),
            frame_buffer: layout.allocate(),
            layout,
        }
    }

    /// Build from a JSON config. An empty string means defaults; malformed
    /// JSON is logged and also falls back to defaults.
    pub fn from_json(json: &str) -> Self {
        let config = if json.trim().is_empty() {
            SimulationConfig::default()
        } else {
            SimulationConfig::from_json(json).unwrap_or_else(|err| {
                log::warn!("backdrop: bad config ({}), using defaults", err);
                SimulationConfig::default()
            })
        };
        Self::new(config)
    }

    /// Run one frame and repack the output buffers.
    pub fn tick(&mut self, canvas_width: f32, canvas_height: f32, dt: f32) {
        self.sim.tick(canvas_width, canvas_height, dt);
        self.sim.export_into(&mut self.draw_list);
        let clock = self.sim.clock();
        self.layout
            .write_frame(&mut self.frame_buffer, clock.frame(), clock.canvas(), &self.draw_list);
    }

    pub fn set_max_speed(&mut self, max_speed: f32) {
        self.sim.set_squad_max_speed(max_speed);
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    // ---- Pointer accessors for host reads ----

    pub fn drawables_ptr(&self) -> *const f32 {
        self.draw_list.instances_ptr()
    }

    pub fn drawable_count(&self) -> u32 {
        self.draw_list.instance_count()
    }

    pub fn drawable_floats(&self) -> u32 {
        DrawInstance::FLOATS as u32
    }

    pub fn frame_buffer_ptr(&self) -> *const f32 {
        self.frame_buffer.as_ptr()
    }

    pub fn frame_buffer(&self) -> &[f32] {
        &self.frame_buffer
    }

    // ---- Capacity accessors ----

    pub fn max_drawables(&self) -> u32 {
        self.layout.max_drawables as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backdrop_engine::bridge::protocol::{HEADER_DRAWABLE_COUNT, HEADER_FRAME_COUNTER};

    #[test]
    fn zero_canvas_produces_no_drawables() {
        let mut runner = BackdropRunner::from_json("");
        runner.tick(0.0, 0.0, 0.016);
        assert_eq!(runner.drawable_count(), 0);
        assert_eq!(runner.frame_buffer()[HEADER_DRAWABLE_COUNT], 0.0);
        assert_eq!(runner.frame_buffer()[HEADER_FRAME_COUNTER], 1.0);
    }

    #[test]
    fn frame_buffer_tracks_draw_list() {
        let mut runner = BackdropRunner::new(SimulationConfig::default());
        for _ in 0..10 {
            runner.tick(800.0, 600.0, 1.0 / 60.0);
        }
        let count = runner.drawable_count();
        assert!(count > 0);
        assert_eq!(runner.frame_buffer()[HEADER_DRAWABLE_COUNT], count as f32);
        assert_eq!(runner.frame_buffer().len() as u32, runner.buffer_total_floats());
    }

    #[test]
    fn malformed_json_falls_back_to_defaults() {
        let runner = BackdropRunner::from_json("{ not json");
        assert_eq!(runner.simulation().config(), &SimulationConfig::default());
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let runner = BackdropRunner::from_json(r#"{ "seed": 7, "squad": { "size": 3 } }"#);
        let config = runner.simulation().config();
        assert_eq!(config.seed, 7);
        assert_eq!(config.squad.size, 3);
        assert_eq!(config.fog.layer_count, 3);
    }
}
