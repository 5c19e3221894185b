//! Skill requests in, skill notifications out.

use bevy::prelude::*;

use super::data::SkillKind;

/// Player or UI asking for a skill change.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillToggleRequest {
    Toggle(SkillKind),
    ActivateAll,
    DeactivateAll,
}

/// Sent when a skill turns on.
#[derive(Event, Debug, Clone)]
pub struct SkillActivated {
    pub kind: SkillKind,
    pub name: String,
}

/// Sent when a skill turns off.
#[derive(Event, Debug, Clone)]
pub struct SkillDeactivated {
    pub kind: SkillKind,
    pub name: String,
}
