//! Firing strategies - how one trigger pull turns into projectiles.

use bevy::prelude::*;

use crate::projectiles::{BounceConfig, ProjectileSpawn};
use crate::status::BurnConfig;

/// Strategy variant without its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Standard,
    MultiShot,
    Bouncing,
    Burning,
    AttackSpeed,
}

/// The weapon's current way of firing.
///
/// Swapping strategies only affects future shots; projectiles already in
/// flight keep whatever configuration they were spawned with.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FiringStrategy {
    /// One projectile along the aim direction
    #[default]
    Standard,
    /// A symmetric fan of projectiles around the aim direction
    MultiShot { count: u32, spread_degrees: f32 },
    /// One projectile that chains between targets
    Bouncing(BounceConfig),
    /// One projectile that sets its target on fire
    Burning(BurnConfig),
    /// Raises the weapon's attack rate, then fires like `Standard`
    AttackSpeed { multiplier: f32 },
}

impl FiringStrategy {
    pub fn multi_shot(count: i32, spread_degrees: f32) -> Self {
        Self::MultiShot {
            count: count.max(2) as u32,
            spread_degrees,
        }
    }

    pub fn bouncing(bounce_count: i32, falloff: f32) -> Self {
        Self::Bouncing(BounceConfig::new(bounce_count, falloff))
    }

    pub fn burning(damage_per_second: f32, duration: f32, max_stacks: i32) -> Self {
        Self::Burning(BurnConfig::new(damage_per_second, duration, max_stacks))
    }

    pub fn attack_speed(multiplier: f32) -> Self {
        Self::AttackSpeed {
            multiplier: multiplier.max(1.0),
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::Standard => StrategyKind::Standard,
            Self::MultiShot { .. } => StrategyKind::MultiShot,
            Self::Bouncing(_) => StrategyKind::Bouncing,
            Self::Burning(_) => StrategyKind::Burning,
            Self::AttackSpeed { .. } => StrategyKind::AttackSpeed,
        }
    }

    /// Attack rate multiplier this strategy forces on its weapon, if any.
    pub fn rate_multiplier(&self) -> Option<f32> {
        match self {
            Self::AttackSpeed { multiplier } => Some(*multiplier),
            _ => None,
        }
    }

    /// Describe the projectiles one shot produces.
    pub fn fire(&self, origin: Vec3, direction: Vec3, speed: f32, damage: f32) -> Vec<ProjectileSpawn> {
        let single = ProjectileSpawn::new(origin, direction, speed, damage);

        match *self {
            Self::Standard | Self::AttackSpeed { .. } => vec![single],
            Self::MultiShot {
                count,
                spread_degrees,
            } => {
                let count = count.max(2);
                let start = -spread_degrees * (count - 1) as f32 / 2.0;

                (0..count)
                    .map(|index| {
                        let angle = start + spread_degrees * index as f32;
                        let rotated = Quat::from_rotation_y(angle.to_radians()) * direction;
                        ProjectileSpawn::new(origin, rotated, speed, damage)
                    })
                    .collect()
            }
            Self::Bouncing(config) if config.bounce_count > 0 => vec![single.with_bounce(config)],
            Self::Bouncing(_) => vec![single],
            Self::Burning(config) => vec![single.with_burn(config)],
        }
    }
}
