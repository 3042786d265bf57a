pub mod actor;
pub mod color;
pub mod emitter;
pub mod fog;
pub mod layer;
pub mod particle;
pub mod trail;
