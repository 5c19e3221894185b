//! Projectiles - flight simulation, collision handling, and bouncing.

mod bounce;
mod collision;
mod components;
mod physics;
mod plugin;
mod systems;

pub use bounce::{BounceConfig, BounceOutcome, BouncePhase, BounceState};
pub use collision::{handle_collision, CollisionReport};
pub use components::*;
pub use physics::{cast_segment, Candidate, Layer, RapierSpatialQuery, RayHit, SpatialQuery};
pub use plugin::ProjectilePlugin;
pub use systems::{fly, resolve_bounce, spawn_projectile, FlightOutcome, Impact};
