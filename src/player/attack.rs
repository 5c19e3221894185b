//! Auto-attack and skill hotkeys.

use bevy::prelude::*;

use super::components::*;
use crate::combat::Dead;
use crate::config::CombatConfig;
use crate::enemies::Enemy;
use crate::skills::{SkillKind, SkillToggleRequest};
use crate::weapons::FireRequest;

/// Closest position to `origin` within `range`, if any.
pub fn nearest_target(origin: Vec3, positions: impl IntoIterator<Item = Vec3>, range: f32) -> Option<Vec3> {
    let range_sq = range * range;
    let mut best: Option<(Vec3, f32)> = None;

    for position in positions {
        let distance_sq = origin.distance_squared(position);
        if distance_sq > range_sq {
            continue;
        }
        if best.map_or(true, |(_, closest)| distance_sq < closest) {
            best = Some((position, distance_sq));
        }
    }

    best.map(|(position, _)| position)
}

/// Shoot while standing still, at the nearest enemy or straight ahead.
pub(crate) fn auto_attack(
    config: Res<CombatConfig>,
    player_query: Query<(Entity, &Transform, &MovementState), With<Player>>,
    enemies: Query<&GlobalTransform, (With<Enemy>, Without<Dead>)>,
    mut fire_requests: EventWriter<FireRequest>,
) {
    let Ok((player, transform, movement_state)) = player_query.get_single() else {
        return;
    };
    if movement_state.is_moving {
        return;
    }

    let range = config.player.attack_range;
    let aim_point = nearest_target(
        transform.translation,
        enemies.iter().map(GlobalTransform::translation),
        range,
    )
    .unwrap_or_else(|| transform.translation + transform.forward().as_vec3() * range);

    fire_requests.send(FireRequest {
        shooter: player,
        aim_point,
    });
}

/// Number keys toggle skills: 1-5 one skill each, 9 everything on, 0 everything off.
pub(crate) fn skill_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut requests: EventWriter<SkillToggleRequest>,
) {
    const SKILL_KEYS: [KeyCode; 5] = [
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
        KeyCode::Digit5,
    ];

    for (key, kind) in SKILL_KEYS.into_iter().zip(SkillKind::ALL) {
        if keyboard.just_pressed(key) {
            requests.send(SkillToggleRequest::Toggle(kind));
        }
    }
    if keyboard.just_pressed(KeyCode::Digit9) {
        requests.send(SkillToggleRequest::ActivateAll);
    }
    if keyboard.just_pressed(KeyCode::Digit0) {
        requests.send(SkillToggleRequest::DeactivateAll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn test_nearest_target_in_range() {
        let positions = [
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 3.0),
            Vec3::new(50.0, 0.0, 0.0),
        ];
        assert_eq!(nearest_target(Vec3::ZERO, positions, 20.0), Some(Vec3::new(0.0, 0.0, 3.0)));
        assert_eq!(nearest_target(Vec3::ZERO, [Vec3::new(50.0, 0.0, 0.0)], 20.0), None);
    }

    fn setup_test_app() -> App {
        let mut app = App::new();
        app.init_resource::<CombatConfig>()
            .add_event::<FireRequest>()
            .add_event::<SkillToggleRequest>();
        app
    }

    #[test]
    fn test_still_player_fires_ahead_without_enemies() {
        let mut app = setup_test_app();
        app.world_mut()
            .spawn((Player, MovementState::default(), Transform::default()));

        let _ = app.world_mut().run_system_once(auto_attack);

        let events = app.world().resource::<Events<FireRequest>>();
        let requests: Vec<_> = events.iter_current_update_events().collect();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].aim_point, Vec3::new(0.0, 0.0, -20.0));
    }

    #[test]
    fn test_moving_player_holds_fire() {
        let mut app = setup_test_app();
        app.world_mut().spawn((
            Player,
            MovementState { is_moving: true },
            Transform::default(),
        ));

        let _ = app.world_mut().run_system_once(auto_attack);
        assert!(app.world().resource::<Events<FireRequest>>().is_empty());
    }

    #[test]
    fn test_hotkey_toggles_matching_skill() {
        let mut app = setup_test_app();
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::Digit2);
        app.insert_resource(keyboard);

        let _ = app.world_mut().run_system_once(skill_hotkeys);

        let events = app.world().resource::<Events<SkillToggleRequest>>();
        let requests: Vec<_> = events.iter_current_update_events().copied().collect();
        assert_eq!(requests, vec![SkillToggleRequest::Toggle(SkillKind::BounceDamage)]);
    }
}
