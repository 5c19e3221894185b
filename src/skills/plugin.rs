//! Skill plugin - the skill book and its requests.

use bevy::prelude::*;

use super::book::SkillBook;
use super::events::*;
use super::systems::*;
use crate::combat::CombatSet;
use crate::core::GameState;
use crate::player::spawn_player;

/// Skill plugin - keeps the player's firing strategy in line with active skills.
pub struct SkillPlugin;

impl Plugin for SkillPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SkillBook>()
            .add_event::<SkillToggleRequest>()
            .add_event::<SkillActivated>()
            .add_event::<SkillDeactivated>()
            .add_systems(
                OnExit(GameState::Loading),
                reset_skill_book.after(spawn_player),
            )
            .add_systems(Update, handle_skill_requests.in_set(CombatSet::Input));
    }
}
