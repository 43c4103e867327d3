pub mod components;
pub mod config;
pub mod enums;
pub mod plugins;

pub use components::*;
pub use config::{GameConfig, PlayerConfig};
pub use enums::*;
