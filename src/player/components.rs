//! Player-related components.

use bevy::prelude::*;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Tracks whether the player moved this frame.
///
/// The player only shoots while standing still.
#[derive(Component, Default)]
pub struct MovementState {
    pub is_moving: bool,
}

/// Top-down camera that trails the player.
#[derive(Component, Debug, Clone)]
pub struct ArenaCamera {
    /// Camera position relative to the player
    pub offset: Vec3,
    /// Higher values catch up faster
    pub smooth_speed: f32,
}

impl Default for ArenaCamera {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 18.0, 8.0),
            smooth_speed: 5.0,
        }
    }
}
