//! Archery Arena - a top-down arena shooter combat core in Bevy.
//!
//! The player stands in an arena full of enemies and shoots them with a bow
//! whose behaviour is reshaped at runtime by toggled skills.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, cross-module events, pause
//! - **Config**: Combat tuning loaded from RON
//! - **Combat**: Health, damage application, deaths
//! - **Status**: Burn stacks and damage over time
//! - **Projectiles**: Flight, collision, bounce chains, hit effects
//! - **Weapons**: Cooldowns, attack rate, firing strategies
//! - **Skills**: Skill toggles, exclusivity, rage mode
//! - **Enemies**: Spawning and respawning targets
//! - **Player**: Top-down movement, auto-attack, skill hotkeys

pub mod combat;
pub mod config;
pub mod core;
pub mod enemies;
pub mod player;
pub mod projectiles;
pub mod skills;
pub mod status;
pub mod weapons;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct ArenaPlugin;

impl Plugin for ArenaPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Combat systems (configures the system sets everyone else uses)
            .add_plugins(combat::CombatPlugin)
            .add_plugins(status::StatusPlugin)
            .add_plugins(projectiles::ProjectilePlugin)
            .add_plugins(weapons::WeaponPlugin)
            .add_plugins(skills::SkillPlugin)

            // Actors
            .add_plugins(enemies::EnemyPlugin)
            .add_plugins(player::PlayerPlugin);
    }
}
