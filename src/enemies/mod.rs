//! Enemies - damageable targets and their spawner.

mod components;
mod plugin;
mod spawning;

pub use components::*;
pub use plugin::EnemyPlugin;
pub use spawning::{random_spawn_position, spawn_enemy};
