//! Player plugin - spawning, movement, auto-attack, skill hotkeys, and the follow camera.

use bevy::prelude::*;

use super::attack;
use super::movement;
use crate::combat::CombatSet;
use crate::core::GameState;

/// Player plugin - handles player spawning, movement, and shooting.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnExit(GameState::Loading), movement::spawn_player)
            .add_systems(
                Update,
                (
                    attack::skill_hotkeys,
                    (movement::player_movement, attack::auto_attack).chain(),
                )
                    .in_set(CombatSet::Input),
            )
            .add_systems(Update, movement::follow_player.in_set(CombatSet::Feedback));
    }
}
