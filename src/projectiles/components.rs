//! Projectile components and flight integration.

use bevy::prelude::*;
use bevy_rapier3d::prelude::Group;

use super::bounce::BounceConfig;
use super::physics::Layer;
use crate::config::ProjectileConfig;
use crate::status::BurnConfig;

/// Squared speed below which a projectile keeps its previous facing.
const MIN_FACING_SPEED_SQ: f32 = 1e-3;

/// Everything needed to spawn a projectile entity.
///
/// A weapon without a template cannot fire.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileTemplate {
    pub max_lifetime: f32,
    pub use_gravity: bool,
    pub gravity_scale: f32,
    pub drag_coefficient: f32,
    /// Launch pitch in degrees, only used with gravity
    pub launch_angle: f32,
    pub collision_mask: Group,
    pub bounce_range: f32,
    pub bounce_mask: Group,
    pub retarget_delay: f32,
    pub ignore_window: f32,
    pub hit_effect_lifetime: f32,
}

impl From<&ProjectileConfig> for ProjectileTemplate {
    fn from(config: &ProjectileConfig) -> Self {
        Self {
            max_lifetime: config.max_lifetime,
            use_gravity: config.use_gravity,
            gravity_scale: config.gravity_scale,
            drag_coefficient: config.drag_coefficient.max(0.0),
            launch_angle: config.launch_angle,
            collision_mask: Layer::mask(&config.collision_layers),
            bounce_range: config.bounce_range.max(0.0),
            bounce_mask: Layer::mask(&config.bounce_layers),
            retarget_delay: config.retarget_delay.max(0.0),
            ignore_window: config.ignore_window.max(0.0),
            hit_effect_lifetime: config.hit_effect_lifetime.max(0.0),
        }
    }
}

impl Default for ProjectileTemplate {
    fn default() -> Self {
        Self::from(&ProjectileConfig::default())
    }
}

/// One projectile a firing strategy wants spawned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpawn {
    pub origin: Vec3,
    pub direction: Vec3,
    pub speed: f32,
    pub damage: f32,
    pub bounce: Option<BounceConfig>,
    pub burn: Option<BurnConfig>,
}

impl ProjectileSpawn {
    pub fn new(origin: Vec3, direction: Vec3, speed: f32, damage: f32) -> Self {
        Self {
            origin,
            direction,
            speed,
            damage,
            bounce: None,
            burn: None,
        }
    }

    pub fn with_bounce(mut self, bounce: BounceConfig) -> Self {
        self.bounce = Some(bounce);
        self
    }

    pub fn with_burn(mut self, burn: BurnConfig) -> Self {
        self.burn = Some(burn);
        self
    }
}

/// A projectile in flight.
///
/// Position and orientation live on the entity's `Transform`; this
/// component owns the velocity, damage and lifetime bookkeeping.
#[derive(Component, Debug, Clone)]
pub struct Projectile {
    /// Unit launch direction
    pub direction: Vec3,
    pub velocity: Vec3,
    /// Launch speed, reused when a bounce re-aims the projectile
    pub speed: f32,
    pub damage: f32,
    /// Seconds since launch (paused time does not count)
    pub lifetime: f32,
    pub max_lifetime: f32,
    pub use_gravity: bool,
    pub gravity_scale: f32,
    pub drag_coefficient: f32,
    pub launch_angle: f32,
    pub collision_mask: Group,
    pub paused: bool,
    pub destroy_on_collision: bool,
    pub hit_effect_lifetime: f32,
}

/// Outcome of one integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectileStep {
    /// Movement is suspended (waiting on a bounce retarget)
    Paused,
    /// Lifetime exceeded; the projectile must be destroyed without a hit
    Expired,
    /// The projectile travelled from `from` to `to`
    Moved { from: Vec3, to: Vec3 },
}

impl Projectile {
    pub fn from_template(template: &ProjectileTemplate) -> Self {
        Self {
            direction: Vec3::Z,
            velocity: Vec3::ZERO,
            speed: 0.0,
            damage: 0.0,
            lifetime: 0.0,
            max_lifetime: template.max_lifetime,
            use_gravity: template.use_gravity,
            gravity_scale: template.gravity_scale,
            drag_coefficient: template.drag_coefficient,
            launch_angle: template.launch_angle,
            collision_mask: template.collision_mask,
            paused: false,
            destroy_on_collision: true,
            hit_effect_lifetime: template.hit_effect_lifetime,
        }
    }

    /// Aim the projectile and reset its lifetime.
    ///
    /// With gravity enabled the direction is pitched up by the launch
    /// angle so the projectile flies a ballistic arc.
    pub fn initialize(&mut self, direction: Vec3, speed: f32, damage: f32) {
        let mut direction = direction.normalize_or_zero();

        if self.use_gravity && self.launch_angle != 0.0 {
            let axis = direction.cross(Vec3::Y).normalize_or_zero();
            if axis != Vec3::ZERO {
                direction = Quat::from_axis_angle(axis, self.launch_angle.to_radians()) * direction;
            }
        }

        self.direction = direction;
        self.speed = speed.max(0.0);
        self.damage = damage.max(0.0);
        self.lifetime = 0.0;
        self.velocity = direction * self.speed;
    }

    /// Integrate one frame starting at `position`.
    pub fn advance(&mut self, dt: f32, position: Vec3, gravity: Vec3) -> ProjectileStep {
        if self.paused {
            return ProjectileStep::Paused;
        }

        self.lifetime += dt;
        if self.lifetime > self.max_lifetime {
            return ProjectileStep::Expired;
        }

        let mut acceleration = Vec3::ZERO;

        if self.use_gravity {
            acceleration += gravity * self.gravity_scale;
        }

        // Quadratic air resistance
        let speed_sq = self.velocity.length_squared();
        if self.drag_coefficient > 0.0 && speed_sq > 0.0 {
            acceleration += -self.velocity.normalize() * self.drag_coefficient * speed_sq;
        }

        self.velocity += acceleration * dt;

        ProjectileStep::Moved {
            from: position,
            to: position + self.velocity * dt,
        }
    }

    /// Direction the projectile should face, if it is moving fast enough.
    pub fn facing(&self) -> Option<Vec3> {
        (self.velocity.length_squared() > MIN_FACING_SPEED_SQ).then(|| self.velocity.normalize())
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn set_gravity(&mut self, use_gravity: bool) {
        self.use_gravity = use_gravity;
    }
}

/// Burn applied to whatever this projectile hits.
#[derive(Component, Debug, Clone, Copy)]
pub struct BurnPayload(pub BurnConfig);

/// Transient impact marker, despawned when its timer runs out.
#[derive(Component)]
pub struct HitEffect {
    pub timer: Timer,
}

impl HitEffect {
    pub fn new(lifetime: f32) -> Self {
        Self {
            timer: Timer::from_seconds(lifetime, TimerMode::Once),
        }
    }
}

/// Raised for every projectile collision (the projectile's `OnHit`).
#[derive(Event, Debug, Clone)]
pub struct ProjectileHitEvent {
    pub projectile: Entity,
    pub target: Entity,
    pub point: Vec3,
    pub normal: Vec3,
}
