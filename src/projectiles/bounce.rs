//! Bounce controller - lets a projectile chain between targets.
//!
//! Instead of dying on impact, a bouncing projectile pauses, waits a short
//! debounce so the physics world settles, then looks for the closest
//! target it has not hit yet within its bounce range and re-launches
//! toward it with reduced damage.

use bevy::prelude::*;
use bevy_rapier3d::prelude::Group;

use super::components::{Projectile, ProjectileTemplate};
use super::physics::{Candidate, RayHit};

/// Distance the projectile is moved toward its new target before relaunch.
const RETARGET_NUDGE: f32 = 0.1;

/// Bounce parameters chosen by a firing strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BounceConfig {
    pub bounce_count: u32,
    /// Fraction of the original damage lost per target hit, in [0, 1]
    pub falloff: f32,
}

impl BounceConfig {
    pub fn new(bounce_count: i32, falloff: f32) -> Self {
        Self {
            bounce_count: bounce_count.max(0) as u32,
            falloff: falloff.clamp(0.0, 1.0),
        }
    }
}

/// Where a bouncing projectile is in its hop cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BouncePhase {
    /// Initial flight
    Flying,
    /// Paused after a hit, waiting for the retarget query
    AwaitingRetarget { delay: f32, origin: Vec3 },
    /// Re-launched toward a new target
    BouncedFlying,
    /// No bounces left; the next collision destroys the projectile
    Exhausted,
}

/// How a hit affected the bounce state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BounceOutcome {
    /// Hit collider is not a valid bounce target
    Ignored,
    /// Target was already hit by this projectile
    AlreadyHit,
    /// A bounce was consumed; a retarget is scheduled
    Retargeting,
    /// Bounces are used up
    Exhausted,
}

/// Bounce bookkeeping attached to a projectile.
#[derive(Component, Debug, Clone)]
pub struct BounceState {
    pub remaining: u32,
    pub falloff: f32,
    pub original_damage: f32,
    hit_targets: Vec<Entity>,
    pub range: f32,
    pub target_mask: Group,
    pub phase: BouncePhase,
    pub retarget_delay: f32,
    pub ignore_window: f32,
    ignore_timer: f32,
    /// Collider the projectile last bounced off
    bounced_from: Option<Entity>,
}

impl BounceState {
    pub fn from_template(template: &ProjectileTemplate) -> Self {
        Self {
            remaining: 0,
            falloff: 0.0,
            original_damage: 0.0,
            hit_targets: Vec::new(),
            range: template.bounce_range,
            target_mask: template.bounce_mask,
            phase: BouncePhase::Flying,
            retarget_delay: template.retarget_delay,
            ignore_window: template.ignore_window,
            ignore_timer: 0.0,
            bounced_from: None,
        }
    }

    /// Configure the bounce and take over the projectile's destruction.
    pub fn initialize(
        &mut self,
        bounce_count: u32,
        falloff: f32,
        base_damage: f32,
        projectile: &mut Projectile,
    ) {
        self.remaining = bounce_count;
        self.falloff = falloff.clamp(0.0, 1.0);
        self.original_damage = base_damage;
        self.hit_targets.clear();
        self.phase = BouncePhase::Flying;
        self.ignore_timer = 0.0;
        self.bounced_from = None;
        projectile.destroy_on_collision = false;
    }

    /// Targets hit so far, in hit order.
    pub fn hit_targets(&self) -> &[Entity] {
        &self.hit_targets
    }

    /// Damage for the next hop: `original * (1 - falloff * hits)`.
    ///
    /// This is the raw formula and goes negative once enough targets have
    /// been hit; use [`Self::deliverable_damage`] when dealing damage.
    pub fn decayed_damage(&self) -> f32 {
        self.original_damage * (1.0 - self.falloff * self.hit_targets.len() as f32)
    }

    /// Decayed damage floored at zero so a bounce never heals.
    pub fn deliverable_damage(&self) -> f32 {
        self.decayed_damage().max(0.0)
    }

    /// Whether a collision with `entity` should count right now.
    ///
    /// Right after a retarget the collider the projectile just left is
    /// ignored. Everything else, walls included, still collides.
    pub fn accepts(&self, entity: Entity) -> bool {
        self.ignore_timer <= 0.0 || self.bounced_from != Some(entity)
    }

    /// React to the owning projectile hitting something.
    pub fn register_hit(&mut self, projectile: &mut Projectile, hit: &RayHit) -> BounceOutcome {
        if !self.target_mask.intersects(hit.layers) {
            return BounceOutcome::Ignored;
        }
        if self.hit_targets.contains(&hit.entity) {
            return BounceOutcome::AlreadyHit;
        }

        self.hit_targets.push(hit.entity);

        if self.remaining > 0 {
            self.remaining -= 1;
            projectile.pause();
            self.phase = BouncePhase::AwaitingRetarget {
                delay: self.retarget_delay,
                origin: hit.point,
            };
            BounceOutcome::Retargeting
        } else {
            projectile.destroy_on_collision = true;
            self.phase = BouncePhase::Exhausted;
            BounceOutcome::Exhausted
        }
    }

    /// Advance timers. Returns the search origin once a pending retarget is due.
    pub fn tick(&mut self, dt: f32) -> Option<Vec3> {
        self.ignore_timer = (self.ignore_timer - dt).max(0.0);

        let BouncePhase::AwaitingRetarget { delay, origin } = &mut self.phase else {
            return None;
        };
        *delay -= dt;
        (*delay <= 0.0).then_some(*origin)
    }

    /// Closest candidate not hit yet. Ties keep the first one enumerated.
    pub fn choose_target(&self, origin: Vec3, candidates: &[Candidate]) -> Option<Candidate> {
        let mut best: Option<(Candidate, f32)> = None;

        for candidate in candidates {
            if self.hit_targets.contains(&candidate.entity) {
                continue;
            }
            let distance_sq = origin.distance_squared(candidate.position);
            if best.map_or(true, |(_, closest)| distance_sq < closest) {
                best = Some((*candidate, distance_sq));
            }
        }

        best.map(|(candidate, _)| candidate)
    }

    /// Re-launch the projectile toward `target`. Returns the new position.
    pub fn retarget(&mut self, projectile: &mut Projectile, origin: Vec3, target: Candidate) -> Vec3 {
        let mut direction = (target.position - origin).normalize_or_zero();
        if direction == Vec3::ZERO {
            direction = projectile.direction;
        }

        let speed = projectile.speed;
        projectile.set_gravity(false);
        projectile.initialize(direction, speed, self.deliverable_damage());
        projectile.resume();

        self.bounced_from = self.hit_targets.last().copied();
        self.ignore_timer = self.ignore_window;
        self.phase = BouncePhase::BouncedFlying;

        origin + direction * RETARGET_NUDGE
    }

    /// Nothing to bounce to: continue on the original heading.
    pub fn resume_heading(&mut self, projectile: &mut Projectile) {
        projectile.resume();
        self.phase = BouncePhase::Flying;
    }
}
