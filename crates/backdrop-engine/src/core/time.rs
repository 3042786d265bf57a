use glam::Vec2;

/// One sanitized frame handed to every subsystem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Frame delta in seconds, within `[0, max_dt]`.
    pub dt: f32,
    /// Canvas size for this frame; components are never negative.
    pub canvas: Vec2,
}

impl FrameTick {
    /// Whether the canvas has a usable area this frame.
    pub fn has_canvas(&self) -> bool {
        self.canvas.x > 0.0 && self.canvas.y > 0.0
    }

    /// Whether any time passes this frame.
    pub fn has_time(&self) -> bool {
        self.dt > 0.0
    }
}

/// Variable-rate frame clock.
/// The host drives it once per presented frame; there is no internal
/// timer. A stalled frame is clamped to `max_dt` so a single long pause
/// cannot destabilize the steering integrators.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    max_dt: f32,
    elapsed: f32,
    frame: u64,
    canvas: Vec2,
}

impl SimulationClock {
    pub const DEFAULT_MAX_DT: f32 = 0.1;

    pub fn new(max_dt: f32) -> Self {
        let max_dt = if max_dt.is_finite() && max_dt > 0.0 {
            max_dt
        } else {
            Self::DEFAULT_MAX_DT
        };
        Self {
            max_dt,
            elapsed: 0.0,
            frame: 0,
            canvas: Vec2::ZERO,
        }
    }

    /// Sanitize the host's frame input and advance the clock.
    pub fn advance(&mut self, canvas_width: f32, canvas_height: f32, dt: f32) -> FrameTick {
        let dt = Self::clamp_dt(dt, self.max_dt);
        self.canvas =
            Vec2::new(Self::clamp_extent(canvas_width), Self::clamp_extent(canvas_height));
        self.elapsed += dt;
        self.frame += 1;
        FrameTick { dt, canvas: self.canvas }
    }

    /// NaN and non-positive deltas become zero; long frames are capped.
    pub fn clamp_dt(dt: f32, max_dt: f32) -> f32 {
        if dt.is_finite() && dt > 0.0 {
            dt.min(max_dt)
        } else {
            0.0
        }
    }

    fn clamp_extent(v: f32) -> f32 {
        if v.is_finite() && v > 0.0 { v } else { 0.0 }
    }

    /// Total simulated seconds.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Number of frames advanced so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Canvas size from the most recent frame.
    pub fn canvas(&self) -> Vec2 {
        self.canvas
    }

    pub fn max_dt(&self) -> f32 {
        self.max_dt
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_DT)
    }
}
