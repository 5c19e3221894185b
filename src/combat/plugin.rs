//! Combat plugin - damage and death handling.

use bevy::prelude::*;

use super::systems;

/// Combat plugin - owns the `CombatSet` ordering every gameplay module plugs into.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        systems::setup_combat_systems(app);
    }
}
