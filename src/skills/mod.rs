//! Skills - toggleable upgrades that reconfigure how the weapon fires.

mod book;
mod data;
mod events;
mod plugin;
mod systems;

pub use book::{SkillBook, SkillChanges};
pub use data::*;
pub use events::*;
pub use plugin::SkillPlugin;
