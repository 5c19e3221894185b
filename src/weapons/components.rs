//! Weapon component - cooldown, attack rate, and the active firing strategy.

use bevy::prelude::*;

use super::error::FireError;
use super::strategy::FiringStrategy;
use crate::config::WeaponConfig;
use crate::projectiles::{ProjectileSpawn, ProjectileTemplate};

/// Slowest attack rate a weapon can be slowed to, in attacks per second.
pub const MIN_ATTACK_RATE: f32 = 0.1;

/// Strategy and rate multiplier installed together by the skill system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Loadout {
    pub strategy: FiringStrategy,
    pub rate_multiplier: f32,
}

impl Default for Loadout {
    fn default() -> Self {
        Self {
            strategy: FiringStrategy::Standard,
            rate_multiplier: 1.0,
        }
    }
}

/// A ranged weapon.
///
/// The weapon is either ready or cooling down. Firing resets the cooldown
/// to one attack period at the current effective rate.
#[derive(Component, Debug, Clone)]
pub struct Weapon {
    pub name: String,
    pub base_damage: f32,
    /// Attacks per second before skill multipliers
    pub base_attack_rate: f32,
    rate_multiplier: f32,
    pub projectile_speed: f32,
    /// Fire point relative to the owner's position
    pub fire_offset: Vec3,
    cooldown: f32,
    ready: bool,
    strategy: FiringStrategy,
    /// Projectile this weapon spawns; without one the weapon cannot fire
    pub template: Option<ProjectileTemplate>,
}

impl Weapon {
    pub fn from_config(config: &WeaponConfig) -> Self {
        Self {
            name: config.name.clone(),
            base_damage: config.base_damage * config.damage_multiplier,
            base_attack_rate: config.base_attack_rate,
            rate_multiplier: 1.0,
            projectile_speed: config.projectile_speed,
            fire_offset: Vec3::Y * config.fire_height,
            cooldown: 0.0,
            ready: true,
            strategy: FiringStrategy::Standard,
            template: config.projectile.as_ref().map(ProjectileTemplate::from),
        }
    }

    /// Attacks per second after skill multipliers.
    pub fn effective_rate(&self) -> f32 {
        (self.base_attack_rate * self.rate_multiplier).max(MIN_ATTACK_RATE)
    }

    /// Seconds between shots at the current rate.
    pub fn attack_period(&self) -> f32 {
        1.0 / self.effective_rate()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    pub fn rate_multiplier(&self) -> f32 {
        self.rate_multiplier
    }

    pub fn strategy(&self) -> FiringStrategy {
        self.strategy
    }

    pub fn set_strategy(&mut self, strategy: FiringStrategy) {
        self.strategy = strategy;
    }

    /// Change the attack rate multiplier.
    ///
    /// A weapon that is cooling down keeps the same fraction of its cooldown
    /// left, measured against the new attack period.
    pub fn set_rate_multiplier(&mut self, multiplier: f32) {
        let old_period = self.attack_period();
        self.rate_multiplier = multiplier.max(MIN_ATTACK_RATE);

        if !self.ready && self.cooldown > 0.0 {
            let remaining_fraction = self.cooldown / old_period;
            self.cooldown = self.attack_period() * remaining_fraction;
        }
    }

    pub fn apply_loadout(&mut self, loadout: Loadout) {
        self.set_strategy(loadout.strategy);
        self.set_rate_multiplier(loadout.rate_multiplier);
    }

    /// Fire at `aim_point` from a weapon owner standing at `origin`.
    ///
    /// Projectiles fly level with the ground. When the aim point sits
    /// straight above or below the fire point, the flattened `facing` is
    /// used instead, and -Z when that is degenerate too.
    pub fn try_fire(
        &mut self,
        origin: Vec3,
        facing: Vec3,
        aim_point: Vec3,
    ) -> Result<Vec<ProjectileSpawn>, FireError> {
        if !self.ready {
            return Err(FireError::CoolingDown {
                remaining: self.cooldown,
            });
        }
        if self.template.is_none() {
            return Err(FireError::MissingTemplate(self.name.clone()));
        }

        let fire_point = origin + self.fire_offset;
        let direction = [aim_point - fire_point, facing]
            .into_iter()
            .map(|direction| Vec3::new(direction.x, 0.0, direction.z).normalize_or_zero())
            .find(|direction| *direction != Vec3::ZERO)
            .unwrap_or(Vec3::NEG_Z);

        if let Some(multiplier) = self.strategy.rate_multiplier() {
            self.set_rate_multiplier(multiplier);
        }

        let spawns = self
            .strategy
            .fire(fire_point, direction, self.projectile_speed, self.base_damage);

        self.ready = false;
        self.cooldown = self.attack_period();

        Ok(spawns)
    }

    /// Count the cooldown down. Returns true on the frame the weapon becomes ready.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.ready {
            return false;
        }

        self.cooldown -= dt;
        if self.cooldown <= 0.0 {
            self.cooldown = 0.0;
            self.ready = true;
            return true;
        }
        false
    }
}

impl Default for Weapon {
    fn default() -> Self {
        Self::from_config(&WeaponConfig::default())
    }
}

/// Ask a weapon owner to fire at a point.
#[derive(Event, Debug, Clone)]
pub struct FireRequest {
    pub shooter: Entity,
    pub aim_point: Vec3,
}
