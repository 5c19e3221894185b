//! Error types for firing weapons.

use thiserror::Error;

/// Why a weapon did not fire.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FireError {
    #[error("weapon is cooling down ({remaining:.2}s left)")]
    CoolingDown { remaining: f32 },

    #[error("weapon '{0}' has no projectile configured")]
    MissingTemplate(String),
}
