//! Weapon systems - cooldowns and turning fire requests into projectiles.

use bevy::prelude::*;

use super::components::{FireRequest, Weapon};
use super::error::FireError;
use crate::projectiles::spawn_projectile;

/// Count weapon cooldowns down.
pub(crate) fn tick_weapons(time: Res<Time>, mut weapons: Query<&mut Weapon>) {
    for mut weapon in weapons.iter_mut() {
        if weapon.tick(time.delta_secs()) {
            debug!("{} ready to fire", weapon.name);
        }
    }
}

/// Fire every weapon that was asked to and is able to.
pub(crate) fn fire_weapons(
    mut commands: Commands,
    mut requests: EventReader<FireRequest>,
    mut shooters: Query<(&mut Weapon, &Transform)>,
) {
    for request in requests.read() {
        let Ok((mut weapon, transform)) = shooters.get_mut(request.shooter) else {
            continue;
        };

        let facing = transform.forward().as_vec3();
        let spawns = match weapon.try_fire(transform.translation, facing, request.aim_point) {
            Ok(spawns) => spawns,
            Err(FireError::CoolingDown { .. }) => continue,
            Err(error) => {
                warn_once!("Cannot fire: {}", error);
                continue;
            }
        };

        let Some(template) = weapon.template.as_ref() else {
            continue;
        };
        for spawn in &spawns {
            spawn_projectile(&mut commands, template, spawn);
        }
        debug!(
            "{} fired {} projectile(s) with {:?}",
            weapon.name,
            spawns.len(),
            weapon.strategy().kind()
        );
    }
}
