//! Enemy plugin - spawning and keeping the arena populated.

use bevy::prelude::*;

use super::components::EnemySpawner;
use super::spawning::*;
use crate::combat::CombatSet;
use crate::core::GameState;

/// Enemy plugin - handles enemy spawning and respawning.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EnemySpawner>()
            // Populate the arena once the combat data is loaded
            .add_systems(OnExit(GameState::Loading), spawn_initial_enemies)
            // Deaths have been resolved by now, so the living count is final
            .add_systems(
                Update,
                (schedule_respawns, respawn_enemies)
                    .chain()
                    .in_set(CombatSet::Feedback),
            );
    }
}
