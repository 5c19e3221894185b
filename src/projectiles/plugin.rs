//! Projectile plugin - flight, impacts, bounces, and hit effects.

use bevy::prelude::*;

use super::components::ProjectileHitEvent;
use super::systems::*;
use crate::combat::CombatSet;

/// Projectile plugin - simulates every projectile entity.
pub struct ProjectilePlugin;

impl Plugin for ProjectilePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ProjectileHitEvent>()
            // Retargets first so a re-launched projectile flies this frame
            .add_systems(
                Update,
                (update_bounces, advance_projectiles)
                    .chain()
                    .in_set(CombatSet::Projectiles),
            )
            .add_systems(Update, expire_hit_effects.in_set(CombatSet::Feedback));
    }
}
