pub mod drawable;
pub mod instance;

pub use drawable::{Drawable, DrawableKind, PathShape};
pub use instance::{DrawInstance, DrawList};
