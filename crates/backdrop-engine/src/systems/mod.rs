pub mod particles;
pub mod render;
pub mod squad;
pub mod wanderer;
