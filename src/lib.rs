pub mod boid;
pub mod config;
pub mod flock;
pub mod render;
pub mod rules;
pub mod vector;

pub use boid::{Boid, RenderState};
pub use config::{ConfigError, WorldConfig};
pub use flock::{Flock, TickOrder};
pub use render::{FrameRenderer, RenderError};
