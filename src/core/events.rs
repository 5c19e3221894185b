//! Global events used for cross-system communication.
//!
//! Events allow decoupled systems to communicate. Projectiles and burn
//! stacks send `DamageEvent`s, and the damage system receives them to
//! apply the health reduction. Nothing reaches into another module's
//! components directly.

use bevy::prelude::*;

/// Damage element, used to tell direct hits from damage over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Element {
    #[default]
    Physical,
    Fire,
}

/// Sent when an entity takes damage.
///
/// The damage system listens for these events and applies the actual
/// health reduction. Targets without `Health` are ignored.
#[derive(Event, Debug, Clone)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that caused the damage (projectile, or none for burn ticks)
    pub source: Option<Entity>,
    /// Damage amount; negative values are treated as zero
    pub amount: f32,
    /// Element of the hit
    pub element: Element,
}

/// Sent when an entity dies (health reaches 0).
///
/// Systems can listen for this to despawn enemies, schedule respawns, etc.
#[derive(Event, Debug, Clone)]
pub struct DeathEvent {
    /// Entity that died
    pub entity: Entity,
    /// Entity that killed them (if any)
    pub killed_by: Option<Entity>,
}
