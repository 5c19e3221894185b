//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. Combat only
//! runs in `InGame`; `Paused` freezes it while keeping the world intact.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` while combat data files are read
/// - Enter `InGame` once configuration is available
/// - `Paused` freezes gameplay but keeps every entity alive
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading combat configuration
    #[default]
    Loading,
    /// Active gameplay
    InGame,
    /// Game is paused
    Paused,
}
