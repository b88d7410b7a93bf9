pub mod components;
pub mod config;
pub mod constants;
pub mod level;
pub mod messages;
pub mod resources;
pub mod systems;

pub use config::{LevelConfig, init_tracing};
pub use level::{GhostView, Level};
pub use messages::{Handoff, Outcome};
