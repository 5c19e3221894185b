//! Player module - player entity, movement, and shooting.

mod attack;
mod components;
mod movement;
mod plugin;

pub use attack::nearest_target;
pub use components::*;
pub use movement::{movement_input, spawn_player};
pub use plugin::PlayerPlugin;
