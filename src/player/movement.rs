//! Top-down player movement and spawning.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use crate::config::CombatConfig;
use crate::projectiles::Layer;
use crate::weapons::Weapon;

/// Height the player is pinned to.
const GROUND_HEIGHT: f32 = 0.0;

/// Read WASD into a unit direction on the XZ plane (W is -Z).
pub fn movement_input(keyboard: &ButtonInput<KeyCode>) -> Vec3 {
    let mut direction = Vec3::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        direction.z -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        direction.z += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        direction.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        direction.x += 1.0;
    }

    // Normalize to prevent faster diagonal movement
    direction.normalize_or_zero()
}

/// Move the player on the ground plane and turn toward the movement direction.
pub(crate) fn player_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    config: Res<CombatConfig>,
    mut player_query: Query<(&mut Transform, &mut MovementState), With<Player>>,
) {
    let Ok((mut transform, mut movement_state)) = player_query.get_single_mut() else {
        return;
    };

    let direction = movement_input(&keyboard);
    movement_state.is_moving = direction != Vec3::ZERO;
    if !movement_state.is_moving {
        return;
    }

    let dt = time.delta_secs();
    let tuning = &config.player;
    transform.translation += direction * tuning.move_speed * dt;
    transform.translation.y = GROUND_HEIGHT;

    let target = Transform::default().looking_to(direction, Vec3::Y).rotation;
    let blend = (tuning.rotation_speed * dt).clamp(0.0, 1.0);
    transform.rotation = transform.rotation.slerp(target, blend);
}

/// Spawn the player with the configured weapon, plus the arena camera.
pub fn spawn_player(mut commands: Commands, config: Res<CombatConfig>) {
    let weapon = Weapon::from_config(&config.weapon);
    info!("Spawning player with {}", weapon.name);

    commands.spawn((
        Name::new("Player"),
        Player,
        MovementState::default(),
        weapon,
        Transform::from_xyz(0.0, GROUND_HEIGHT, 0.0),
        RigidBody::KinematicPositionBased,
        Collider::capsule_y(0.5, 0.3),
        Layer::Player.collision_groups(),
    ));

    let camera = ArenaCamera::default();
    let player_position = Vec3::new(0.0, GROUND_HEIGHT, 0.0);
    commands.spawn((
        Name::new("Arena Camera"),
        Camera3d::default(),
        Transform::from_translation(player_position + camera.offset)
            .looking_at(player_position, Vec3::Y),
        camera,
    ));
}

/// Ease the camera toward its offset above the player and keep it aimed at them.
pub(crate) fn follow_player(
    time: Res<Time>,
    player_query: Query<&Transform, (With<Player>, Without<ArenaCamera>)>,
    mut camera_query: Query<(&mut Transform, &ArenaCamera)>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };

    let dt = time.delta_secs();
    for (mut transform, camera) in camera_query.iter_mut() {
        let target = player.translation + camera.offset;
        let blend = (camera.smooth_speed * dt).clamp(0.0, 1.0);
        transform.translation = transform.translation.lerp(target, blend);
        transform.look_at(player.translation, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use std::time::Duration;

    #[test]
    fn test_diagonal_input_is_normalized() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::KeyW);
        keyboard.press(KeyCode::KeyD);

        let direction = movement_input(&keyboard);
        assert!((direction.length() - 1.0).abs() < 1e-6);
        assert!(direction.x > 0.0 && direction.z < 0.0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::KeyA);
        keyboard.press(KeyCode::KeyD);
        assert_eq!(movement_input(&keyboard), Vec3::ZERO);
    }

    #[test]
    fn test_player_moves_on_ground_plane() {
        let mut app = App::new();
        app.add_plugins(bevy::time::TimePlugin::default());
        app.init_resource::<CombatConfig>();

        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::KeyD);
        app.insert_resource(keyboard);

        let player = app
            .world_mut()
            .spawn((Player, MovementState::default(), Transform::from_xyz(0.0, 2.0, 0.0)))
            .id();

        {
            let mut time = app.world_mut().resource_mut::<Time>();
            time.advance_by(Duration::from_secs_f32(0.5));
        }
        let _ = app.world_mut().run_system_once(player_movement);

        let transform = app.world().get::<Transform>(player).unwrap();
        assert!((transform.translation.x - 2.5).abs() < 1e-5);
        assert_eq!(transform.translation.y, GROUND_HEIGHT);
        assert!(app.world().get::<MovementState>(player).unwrap().is_moving);
    }

    #[test]
    fn test_camera_trails_player() {
        let mut app = App::new();
        app.add_plugins(bevy::time::TimePlugin::default());

        app.world_mut()
            .spawn((Player, Transform::from_xyz(10.0, 0.0, 0.0)));
        let camera = ArenaCamera {
            offset: Vec3::new(0.0, 10.0, 5.0),
            smooth_speed: 5.0,
        };
        let camera = app
            .world_mut()
            .spawn((camera, Transform::from_xyz(0.0, 10.0, 5.0)))
            .id();

        {
            let mut time = app.world_mut().resource_mut::<Time>();
            time.advance_by(Duration::from_secs_f32(0.1));
        }
        let _ = app.world_mut().run_system_once(follow_player);

        // Half way there after one step at 5/s
        let transform = app.world().get::<Transform>(camera).unwrap();
        assert!((transform.translation - Vec3::new(5.0, 10.0, 5.0)).length() < 1e-4);

        {
            let mut time = app.world_mut().resource_mut::<Time>();
            time.advance_by(Duration::from_secs_f32(1.0));
        }
        let _ = app.world_mut().run_system_once(follow_player);

        let transform = app.world().get::<Transform>(camera).unwrap();
        assert!((transform.translation - Vec3::new(10.0, 10.0, 5.0)).length() < 1e-4);
        let to_player = (Vec3::new(10.0, 0.0, 0.0) - transform.translation).normalize();
        assert!(transform.forward().as_vec3().dot(to_player) > 0.999);
    }
}
