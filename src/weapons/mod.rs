//! Weapons - firing strategies and the weapon controller.

mod components;
mod error;
mod plugin;
mod strategy;
mod systems;

pub use components::*;
pub use error::FireError;
pub use plugin::WeaponPlugin;
pub use strategy::{FiringStrategy, StrategyKind};
