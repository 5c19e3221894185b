//! Projectile systems - spawning, flight, impacts, and bounce retargeting.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::bounce::BounceState;
use super::collision::{handle_collision, CollisionReport};
use super::components::*;
use super::physics::{cast_segment, BodyItem, RapierSpatialQuery, RayHit, SpatialQuery};
use crate::combat::{DamageEvent, Element, Health};
use crate::config::CombatConfig;
use crate::status::BurnEvent;

/// Spawn a projectile entity from a template and a strategy's spawn request.
pub fn spawn_projectile(
    commands: &mut Commands,
    template: &ProjectileTemplate,
    spawn: &ProjectileSpawn,
) -> Entity {
    let mut projectile = Projectile::from_template(template);
    projectile.initialize(spawn.direction, spawn.speed, spawn.damage);

    let mut transform = Transform::from_translation(spawn.origin);
    if let Some(facing) = projectile.facing() {
        transform.look_to(facing, Vec3::Y);
    }

    // Only attach the bounce controller when there is something to bounce
    let bounce = spawn
        .bounce
        .filter(|config| config.bounce_count > 0)
        .map(|config| {
            let mut state = BounceState::from_template(template);
            let base_damage = projectile.damage;
            state.initialize(config.bounce_count, config.falloff, base_damage, &mut projectile);
            state
        });

    let mut entity = commands.spawn((Name::new("Projectile"), projectile, transform));
    if let Some(state) = bounce {
        entity.insert(state);
    }
    if let Some(burn) = spawn.burn {
        entity.insert(BurnPayload(burn));
    }
    entity.id()
}

/// A collision resolved during flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    pub hit: RayHit,
    pub report: CollisionReport,
}

/// Result of flying one projectile for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlightOutcome {
    pub impact: Option<Impact>,
    pub despawn: bool,
}

/// Move a projectile for one frame and resolve whatever it runs into.
#[allow(clippy::too_many_arguments)]
pub fn fly(
    spatial: &impl SpatialQuery,
    dt: f32,
    gravity: Vec3,
    transform: &mut Transform,
    projectile: &mut Projectile,
    mut bounce: Option<&mut BounceState>,
    burn: Option<&BurnPayload>,
    is_damageable: impl Fn(Entity) -> bool,
) -> FlightOutcome {
    let (from, to) = match projectile.advance(dt, transform.translation, gravity) {
        ProjectileStep::Paused => return FlightOutcome::default(),
        ProjectileStep::Expired => {
            return FlightOutcome {
                impact: None,
                despawn: true,
            }
        }
        ProjectileStep::Moved { from, to } => (from, to),
    };

    // Targets a bouncing projectile already hit are invisible to it
    let exclude = bounce
        .as_deref()
        .map(|state| state.hit_targets().to_vec())
        .unwrap_or_default();

    let hit = cast_segment(spatial, from, to, projectile.collision_mask, &exclude)
        .filter(|hit| bounce.as_deref().map_or(true, |state| state.accepts(hit.entity)));

    let Some(hit) = hit else {
        transform.translation = to;
        face_velocity(transform, projectile);
        return FlightOutcome::default();
    };

    let report = handle_collision(
        projectile,
        bounce.as_deref_mut(),
        burn,
        &hit,
        is_damageable(hit.entity),
    );

    // A paused projectile waits at the impact point for its retarget
    transform.translation = if projectile.paused { hit.point } else { to };
    face_velocity(transform, projectile);

    FlightOutcome {
        impact: Some(Impact { hit, report }),
        despawn: report.destroy,
    }
}

/// Tick a bounce and, once its debounce is over, aim at the next target.
///
/// Returns true when the projectile was re-launched at a new target.
pub fn resolve_bounce(
    spatial: &impl SpatialQuery,
    dt: f32,
    transform: &mut Transform,
    projectile: &mut Projectile,
    bounce: &mut BounceState,
) -> bool {
    let Some(origin) = bounce.tick(dt) else {
        return false;
    };

    let candidates = spatial.overlap_sphere(origin, bounce.range, bounce.target_mask);
    match bounce.choose_target(origin, &candidates) {
        Some(target) => {
            transform.translation = bounce.retarget(projectile, origin, target);
            face_velocity(transform, projectile);
            true
        }
        None => {
            bounce.resume_heading(projectile);
            false
        }
    }
}

fn face_velocity(transform: &mut Transform, projectile: &Projectile) {
    if let Some(facing) = projectile.facing() {
        transform.look_to(facing, Vec3::Y);
    }
}

/// Run pending bounce retargets.
pub(crate) fn update_bounces(
    time: Res<Time>,
    rapier_context: Query<&RapierContext>,
    bodies: Query<BodyItem>,
    mut projectiles: Query<(&mut Transform, &mut Projectile, &mut BounceState)>,
) {
    let Ok(context) = rapier_context.get_single() else {
        return;
    };
    let spatial = RapierSpatialQuery::new(context, &bodies);
    let dt = time.delta_secs();

    for (mut transform, mut projectile, mut bounce) in projectiles.iter_mut() {
        if resolve_bounce(&spatial, dt, &mut transform, &mut projectile, &mut bounce) {
            debug!(
                "Projectile bounced ({} left, {:.1} damage)",
                bounce.remaining, projectile.damage
            );
        }
    }
}

/// Fly every projectile and turn impacts into damage, burn, and hit events.
#[allow(clippy::too_many_arguments)]
pub(crate) fn advance_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<CombatConfig>,
    rapier_context: Query<&RapierContext>,
    bodies: Query<BodyItem>,
    damageable: Query<(), With<Health>>,
    mut projectiles: Query<(
        Entity,
        &mut Transform,
        &mut Projectile,
        Option<&mut BounceState>,
        Option<&BurnPayload>,
    )>,
    mut damage_events: EventWriter<DamageEvent>,
    mut burn_events: EventWriter<BurnEvent>,
    mut hit_events: EventWriter<ProjectileHitEvent>,
) {
    let Ok(context) = rapier_context.get_single() else {
        return;
    };
    let spatial = RapierSpatialQuery::new(context, &bodies);
    let dt = time.delta_secs();
    let gravity = config.physics.gravity();

    for (entity, mut transform, mut projectile, bounce, burn) in projectiles.iter_mut() {
        let outcome = fly(
            &spatial,
            dt,
            gravity,
            &mut transform,
            &mut projectile,
            bounce.map(Mut::into_inner),
            burn,
            |target| damageable.contains(target),
        );

        if let Some(Impact { hit, report }) = outcome.impact {
            if let Some(amount) = report.damage {
                damage_events.send(DamageEvent {
                    target: hit.entity,
                    source: Some(entity),
                    amount,
                    element: Element::Physical,
                });
            }
            if let Some(config) = report.burn {
                burn_events.send(BurnEvent {
                    target: hit.entity,
                    config,
                });
            }
            hit_events.send(ProjectileHitEvent {
                projectile: entity,
                target: hit.entity,
                point: hit.point,
                normal: hit.normal,
            });

            commands.spawn((
                Name::new("Hit Effect"),
                HitEffect::new(projectile.hit_effect_lifetime),
                Transform::from_translation(hit.point),
            ));
        }

        if outcome.despawn {
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Despawn hit effects whose lifetime ran out.
pub(crate) fn expire_hit_effects(
    mut commands: Commands,
    time: Res<Time>,
    mut effects: Query<(Entity, &mut HitEffect)>,
) {
    for (entity, mut effect) in effects.iter_mut() {
        if effect.timer.tick(time.delta()).finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projectiles::{BounceConfig, Candidate, Layer};
    use crate::status::BurnConfig;
    use bevy::ecs::system::RunSystemOnce;
    use bevy_rapier3d::prelude::Group;
    use std::time::Duration;

    /// A single wall across the +Z axis at `z`.
    struct Wall {
        entity: Entity,
        z: f32,
    }

    impl SpatialQuery for Wall {
        fn raycast(
            &self,
            origin: Vec3,
            direction: Vec3,
            max_distance: f32,
            _mask: Group,
            exclude: &[Entity],
        ) -> Option<RayHit> {
            if exclude.contains(&self.entity) || direction.z <= 0.0 {
                return None;
            }
            let distance = (self.z - origin.z) / direction.z;
            (0.0..=max_distance).contains(&distance).then(|| RayHit {
                entity: self.entity,
                point: origin + direction * distance,
                normal: Vec3::NEG_Z,
                layers: Layer::World.group(),
            })
        }

        fn overlap_sphere(&self, _center: Vec3, _radius: f32, _mask: Group) -> Vec<Candidate> {
            Vec::new()
        }
    }

    fn straight_template() -> ProjectileTemplate {
        ProjectileTemplate {
            use_gravity: false,
            drag_coefficient: 0.0,
            ..default()
        }
    }

    fn straight_projectile() -> Projectile {
        let mut projectile = Projectile::from_template(&straight_template());
        projectile.initialize(Vec3::Z, 10.0, 10.0);
        projectile
    }

    #[test]
    fn test_fly_moves_without_hits() {
        let wall = Wall { entity: Entity::from_raw(1), z: 100.0 };
        let mut transform = Transform::default();
        let mut projectile = straight_projectile();

        let outcome = fly(&wall, 0.5, Vec3::ZERO, &mut transform, &mut projectile, None, None, |_| false);

        assert_eq!(outcome, FlightOutcome::default());
        assert_eq!(transform.translation, Vec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn test_fly_hits_wall_and_despawns() {
        let wall = Wall { entity: Entity::from_raw(1), z: 2.0 };
        let mut transform = Transform::default();
        let mut projectile = straight_projectile();

        let outcome = fly(&wall, 0.5, Vec3::ZERO, &mut transform, &mut projectile, None, None, |_| false);

        let impact = outcome.impact.unwrap();
        assert_eq!(impact.hit.entity, Entity::from_raw(1));
        assert_eq!(impact.report.damage, None);
        assert!(outcome.despawn);
    }

    #[test]
    fn test_fly_expires() {
        let wall = Wall { entity: Entity::from_raw(1), z: 100.0 };
        let mut transform = Transform::default();
        let mut projectile = straight_projectile();
        projectile.max_lifetime = 0.1;

        let outcome = fly(&wall, 0.5, Vec3::ZERO, &mut transform, &mut projectile, None, None, |_| false);

        assert!(outcome.despawn);
        assert!(outcome.impact.is_none());
    }

    #[test]
    fn test_spawn_attaches_payloads() {
        let mut app = App::new();
        let template = straight_template();
        let spawn = ProjectileSpawn::new(Vec3::ZERO, Vec3::X, 20.0, 10.0)
            .with_bounce(BounceConfig::new(2, 0.25))
            .with_burn(BurnConfig::new(5.0, 3.0, 3));

        let entity = app
            .world_mut()
            .run_system_once(move |mut commands: Commands| {
                spawn_projectile(&mut commands, &template, &spawn)
            })
            .unwrap();

        let world = app.world();
        let projectile = world.get::<Projectile>(entity).unwrap();
        assert!(!projectile.destroy_on_collision);
        assert_eq!(projectile.velocity, Vec3::new(20.0, 0.0, 0.0));
        assert_eq!(world.get::<BounceState>(entity).unwrap().remaining, 2);
        assert!(world.get::<BurnPayload>(entity).is_some());
    }

    #[test]
    fn test_zero_bounce_count_spawns_plain_projectile() {
        let mut app = App::new();
        let template = straight_template();
        let spawn = ProjectileSpawn::new(Vec3::ZERO, Vec3::X, 20.0, 10.0)
            .with_bounce(BounceConfig::new(0, 0.25));

        let entity = app
            .world_mut()
            .run_system_once(move |mut commands: Commands| {
                spawn_projectile(&mut commands, &template, &spawn)
            })
            .unwrap();

        assert!(app.world().get::<BounceState>(entity).is_none());
        assert!(app.world().get::<Projectile>(entity).unwrap().destroy_on_collision);
    }

    #[test]
    fn test_hit_effects_expire() {
        let mut app = App::new();
        app.add_plugins(bevy::time::TimePlugin::default());
        let effect = app.world_mut().spawn(HitEffect::new(2.0)).id();

        {
            let mut time = app.world_mut().resource_mut::<Time>();
            time.advance_by(Duration::from_secs_f32(1.0));
        }
        let _ = app.world_mut().run_system_once(expire_hit_effects);
        assert!(app.world().entities().contains(effect));

        {
            let mut time = app.world_mut().resource_mut::<Time>();
            time.advance_by(Duration::from_secs_f32(1.5));
        }
        let _ = app.world_mut().run_system_once(expire_hit_effects);
        assert!(!app.world().entities().contains(effect));
    }
}
