//! Projectile impact rules, kept free of ECS access.

use super::bounce::{BounceOutcome, BounceState};
use super::components::{BurnPayload, Projectile};
use super::physics::{Layer, RayHit};
use crate::status::BurnConfig;

/// What a single impact asks the world to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionReport {
    /// Damage to send to the hit entity
    pub damage: Option<f32>,
    /// Burn to apply to the hit entity
    pub burn: Option<BurnConfig>,
    pub bounce: Option<BounceOutcome>,
    /// Despawn the projectile after this impact
    pub destroy: bool,
}

/// Resolve one projectile impact.
///
/// Destruction follows the flag as it was when the collision began, so the
/// hit that exhausts a bouncing projectile does not also destroy it. World
/// geometry stops every projectile, bouncing or not.
pub fn handle_collision(
    projectile: &mut Projectile,
    bounce: Option<&mut BounceState>,
    burn: Option<&BurnPayload>,
    hit: &RayHit,
    target_is_damageable: bool,
) -> CollisionReport {
    let destroy =
        projectile.destroy_on_collision || hit.layers.intersects(Layer::World.group());
    let damage = projectile.damage.max(0.0);

    let outcome = bounce.map(|state| state.register_hit(projectile, hit));

    if outcome == Some(BounceOutcome::AlreadyHit) {
        return CollisionReport {
            damage: None,
            burn: None,
            bounce: outcome,
            destroy,
        };
    }

    let burn = burn
        .filter(|_| target_is_damageable && hit.layers.intersects(Layer::Enemy.group()))
        .map(|payload| payload.0);

    CollisionReport {
        damage: target_is_damageable.then_some(damage),
        burn,
        bounce: outcome,
        destroy,
    }
}
