//! Status effect plugin - applies and ticks burn stacks.

use std::collections::HashMap;

use bevy::prelude::*;

use super::burn::*;
use crate::combat::{CombatSet, DamageEvent, Dead, Element, Health};

/// Status plugin - burn application and damage over time.
pub struct StatusPlugin;

impl Plugin for StatusPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<BurnEvent>()
            .add_systems(Update, tick_burn_effects.in_set(CombatSet::Action))
            .add_systems(Update, apply_burn_events.in_set(CombatSet::Damage));
    }
}

/// Add burn stacks for every burn request this frame.
pub(crate) fn apply_burn_events(
    mut commands: Commands,
    mut events: EventReader<BurnEvent>,
    mut targets: Query<Option<&mut BurnEffect>, (With<Health>, Without<Dead>)>,
) {
    // Targets catching fire this frame, inserted once all events are read
    let mut ignited: HashMap<Entity, BurnEffect> = HashMap::new();

    for event in events.read() {
        let Ok(existing) = targets.get_mut(event.target) else {
            continue;
        };

        let effect = match existing {
            Some(effect) => effect.into_inner(),
            None => ignited
                .entry(event.target)
                .or_insert_with(|| BurnEffect::new(event.config.max_stacks)),
        };

        effect.set_max_stacks(event.config.max_stacks);
        effect.add_stack(event.config.duration, event.config.damage_per_second);
    }

    for (target, mut effect) in ignited {
        let visual = commands
            .spawn((BurnVisual, Transform::from_xyz(0.0, 1.0, 0.0)))
            .set_parent(target)
            .id();
        effect.visual = Some(visual);
        commands.entity(target).try_insert(effect);
        debug!("{:?} caught fire", target);
    }
}

/// Tick burn stacks, dealing fire damage and cleaning up spent effects.
pub(crate) fn tick_burn_effects(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut BurnEffect), Without<Dead>>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let dt = time.delta_secs();

    for (entity, mut effect) in query.iter_mut() {
        let damage = effect.tick(dt);
        if damage > 0.0 {
            damage_events.send(DamageEvent {
                target: entity,
                source: None,
                amount: damage,
                element: Element::Fire,
            });
        }

        if effect.is_empty() {
            if let Some(visual) = effect.visual.take() {
                commands.entity(visual).despawn_recursive();
            }
            commands.entity(entity).remove::<BurnEffect>();
        }
    }
}
