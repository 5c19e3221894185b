//! Weapon plugin - cooldowns and firing.

use bevy::prelude::*;

use super::components::FireRequest;
use super::systems::*;
use crate::combat::CombatSet;

/// Weapon plugin - turns `FireRequest`s into projectiles.
pub struct WeaponPlugin;

impl Plugin for WeaponPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<FireRequest>().add_systems(
            Update,
            (tick_weapons, fire_weapons)
                .chain()
                .in_set(CombatSet::Action),
        );
    }
}
