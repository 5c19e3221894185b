//! Archery Arena - Entry Point
//!
//! A top-down arena shooter where skills reshape how the bow fires.
//!
//! Controls:
//! - WASD: Move (the bow fires automatically while standing still)
//! - 1-5: Toggle Arrow Multiplication, Bounce, Burn, Attack Speed, Rage
//! - 9: Activate all skills
//! - 0: Deactivate all skills
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Archery Arena".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())

        // Our game plugin
        .add_plugins(archery_arena::ArenaPlugin)

        .run();
}
