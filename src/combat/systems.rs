//! Combat systems - damage application and death handling.

use std::collections::HashSet;

use bevy::prelude::*;

use super::components::*;
use crate::core::GameState;

/// System set ordering for combat.
///
/// Every gameplay module places its systems in one of these sets so a
/// frame always reads input, fires, moves projectiles, then resolves damage.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CombatSet {
    Input,
    Action,
    Projectiles,
    Damage,
    Feedback,
}

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app
        // System ordering
        .configure_sets(
            Update,
            (
                CombatSet::Input,
                CombatSet::Action,
                CombatSet::Projectiles,
                CombatSet::Damage,
                CombatSet::Feedback,
            )
                .chain()
                .run_if(in_state(GameState::InGame)),
        )

        // Damage systems
        .add_systems(
            Update,
            (apply_damage, check_deaths)
                .chain()
                .in_set(CombatSet::Damage),
        );
}

/// Apply damage to entities.
fn apply_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageEvent>,
    mut health_query: Query<(&mut Health, Option<&Dead>)>,
    mut death_events: EventWriter<DeathEvent>,
) {
    // Track entities that died this frame to avoid duplicate death events
    let mut died_this_frame = HashSet::new();

    for event in damage_events.read() {
        if died_this_frame.contains(&event.target) {
            continue;
        }

        let Ok((mut health, dead)) = health_query.get_mut(event.target) else {
            continue;
        };

        // Skip if already dead (from previous frames)
        if dead.is_some() {
            continue;
        }

        let dealt = health.take_damage(event.amount);
        debug!(
            "{:?} took {:.1} {:?} damage ({:.1}/{:.1})",
            event.target, dealt, event.element, health.current, health.maximum
        );

        if health.is_dead() {
            // Mark as dead to prevent multiple death events
            died_this_frame.insert(event.target);
            commands.entity(event.target).insert(Dead);
            death_events.send(DeathEvent {
                entity: event.target,
                killed_by: event.source,
            });
        }
    }
}

/// Despawn entities that died this frame.
fn check_deaths(mut commands: Commands, mut death_events: EventReader<DeathEvent>) {
    for event in death_events.read() {
        info!("{:?} died", event.entity);
        commands.entity(event.entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    fn setup_test_app() -> App {
        let mut app = App::new();
        app.add_event::<DamageEvent>().add_event::<DeathEvent>();
        app
    }

    fn hit(target: Entity, amount: f32) -> DamageEvent {
        DamageEvent {
            target,
            source: None,
            amount,
            element: Element::Physical,
        }
    }

    #[test]
    fn test_apply_damage_reduces_health() {
        let mut app = setup_test_app();
        let target = app.world_mut().spawn(Health::new(100.0)).id();

        app.world_mut().send_event(hit(target, 25.0));
        let _ = app.world_mut().run_system_once(apply_damage);

        assert_eq!(app.world().get::<Health>(target).unwrap().current, 75.0);
        assert!(app.world().get::<Dead>(target).is_none());
    }

    #[test]
    fn test_lethal_damage_sends_one_death_event() {
        let mut app = setup_test_app();
        let target = app.world_mut().spawn(Health::new(20.0)).id();

        app.world_mut().send_event(hit(target, 15.0));
        app.world_mut().send_event(hit(target, 15.0));
        app.world_mut().send_event(hit(target, 15.0));
        let _ = app.world_mut().run_system_once(apply_damage);

        assert!(app.world().get::<Dead>(target).is_some());
        let deaths = app.world().resource::<Events<DeathEvent>>();
        assert_eq!(deaths.len(), 1);
    }

    #[test]
    fn test_targets_without_health_are_ignored() {
        let mut app = setup_test_app();
        let wall = app.world_mut().spawn(Transform::default()).id();

        app.world_mut().send_event(hit(wall, 50.0));
        let _ = app.world_mut().run_system_once(apply_damage);

        assert!(app.world().get::<Dead>(wall).is_none());
        assert!(app.world().resource::<Events<DeathEvent>>().is_empty());
    }
}
