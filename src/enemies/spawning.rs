//! Enemy spawning and respawning.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use rand::Rng;

use super::components::*;
use crate::combat::{Dead, Health};
use crate::config::{CombatConfig, EnemyConfig};
use crate::projectiles::Layer;

/// Height of an enemy's center above the floor.
const ENEMY_CENTER_HEIGHT: f32 = 1.0;

/// Random point inside the spawn rectangle centered on the origin.
pub fn random_spawn_position(rng: &mut impl Rng, width: f32, height: f32) -> Vec3 {
    let half_width = (width / 2.0).abs();
    let half_height = (height / 2.0).abs();
    let x = if half_width > 0.0 { rng.gen_range(-half_width..half_width) } else { 0.0 };
    let z = if half_height > 0.0 { rng.gen_range(-half_height..half_height) } else { 0.0 };
    Vec3::new(x, ENEMY_CENTER_HEIGHT, z)
}

/// Spawn one enemy at `position`.
pub fn spawn_enemy(commands: &mut Commands, config: &EnemyConfig, position: Vec3) -> Entity {
    commands
        .spawn((
            Name::new("Enemy"),
            Enemy,
            Health::new(config.max_health),
            Transform::from_translation(position),
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(0.5, config.collider_radius),
            Layer::Enemy.collision_groups(),
        ))
        .id()
}

/// Fill the arena up to the minimum enemy count.
pub(crate) fn spawn_initial_enemies(mut commands: Commands, config: Res<CombatConfig>) {
    let enemies = &config.enemies;
    let mut rng = rand::thread_rng();

    for _ in 0..enemies.min_count {
        let position =
            random_spawn_position(&mut rng, enemies.spawn_area_width, enemies.spawn_area_height);
        spawn_enemy(&mut commands, enemies, position);
    }
    info!("Spawned {} enemies", enemies.min_count);
}

/// Schedule a respawn for every enemy missing from the minimum count.
pub(crate) fn schedule_respawns(
    config: Res<CombatConfig>,
    mut spawner: ResMut<EnemySpawner>,
    alive: Query<(), (With<Enemy>, With<Health>, Without<Dead>)>,
) {
    let enemies = &config.enemies;
    let scheduled =
        spawner.schedule_shortfall(alive.iter().count(), enemies.min_count, enemies.respawn_delay);
    if scheduled > 0 {
        debug!("Scheduled {} enemy respawn(s)", scheduled);
    }
}

/// Spawn enemies whose respawn delay has passed.
pub(crate) fn respawn_enemies(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<CombatConfig>,
    mut spawner: ResMut<EnemySpawner>,
) {
    let due = spawner.tick(time.delta());
    if due == 0 {
        return;
    }

    let enemies = &config.enemies;
    let mut rng = rand::thread_rng();
    for _ in 0..due {
        let position =
            random_spawn_position(&mut rng, enemies.spawn_area_width, enemies.spawn_area_height);
        spawn_enemy(&mut commands, enemies, position);
    }
    info!("Respawned {} enemy(s)", due);
}
