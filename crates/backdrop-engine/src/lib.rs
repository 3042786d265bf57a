pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;

// Re-export key types at crate root for convenience
pub use api::config::{FogConfig, SimulationConfig, SmokeConfig, SquadConfig, WandererConfig};
pub use api::simulation::Simulation;
pub use bridge::protocol::ProtocolLayout;
pub use components::actor::SteeringActor;
pub use components::color::{Color, Palette};
pub use components::emitter::SpawnTimer;
pub use components::fog::{FogBlob, FogLayer};
pub use components::layer::DrawLayer;
pub use components::particle::{Particle, ParticleKind};
pub use components::trail::{TrackMark, TrackTrail};
pub use core::random::SimRng;
pub use core::time::{FrameTick, SimulationClock};
pub use renderer::{DrawInstance, DrawList, Drawable, DrawableKind, PathShape};
pub use systems::particles::ParticleSystem;
pub use systems::render::{export_drawables, SceneView};
pub use systems::squad::FormationSquad;
pub use systems::wanderer::{
    head_pose, HeadPose, StatefulWanderer, Transition, TransitionCause, WandererState,
};
