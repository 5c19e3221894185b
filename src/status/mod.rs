//! Status effects applied by projectiles.

mod burn;
mod plugin;

pub use burn::*;
pub use plugin::StatusPlugin;
