//! The skill book - which skills are on and what that means for the weapon.

use bevy::prelude::*;

use super::data::{SkillKind, SkillMagnitude, SkillRecord};
use crate::config::SkillsConfig;
use crate::weapons::{FiringStrategy, Loadout};

/// What a skill state change did.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SkillChanges {
    pub activated: Vec<SkillKind>,
    pub deactivated: Vec<SkillKind>,
    /// Strategy and rate multiplier the weapon should use from now on
    pub loadout: Loadout,
}

impl SkillChanges {
    pub fn is_empty(&self) -> bool {
        self.activated.is_empty() && self.deactivated.is_empty()
    }
}

/// All skill records, indexed by [`SkillKind`].
///
/// At most one primary skill is active at a time. Rage mode toggles on its
/// own and boosts every other skill while it is on.
#[derive(Resource, Debug, Clone)]
pub struct SkillBook {
    records: [SkillRecord; 5],
}

impl SkillBook {
    pub fn new(config: &SkillsConfig) -> Self {
        Self {
            records: SkillKind::ALL.map(|kind| SkillRecord::new(kind, config)),
        }
    }

    pub fn record(&self, kind: SkillKind) -> &SkillRecord {
        &self.records[kind.index()]
    }

    pub fn records(&self) -> impl Iterator<Item = &SkillRecord> {
        self.records.iter()
    }

    pub fn is_active(&self, kind: SkillKind) -> bool {
        self.record(kind).active
    }

    pub fn magnitude(&self, kind: SkillKind) -> SkillMagnitude {
        self.record(kind).magnitude()
    }

    /// The primary skill currently driving the weapon, if any.
    pub fn active_primary(&self) -> Option<SkillKind> {
        SkillKind::PRIMARY
            .into_iter()
            .find(|kind| self.is_active(*kind))
    }

    /// Strategy and attack rate multiplier for the current skill state.
    pub fn loadout(&self) -> Loadout {
        let strategy = self
            .active_primary()
            .and_then(|kind| self.record(kind).strategy())
            .unwrap_or(FiringStrategy::Standard);

        let rate_multiplier = match self.magnitude(SkillKind::AttackSpeedIncrease) {
            SkillMagnitude::AttackSpeed(multiplier)
                if self.is_active(SkillKind::AttackSpeedIncrease) =>
            {
                multiplier
            }
            _ => 1.0,
        };

        Loadout {
            strategy,
            rate_multiplier,
        }
    }

    pub fn activate(&mut self, kind: SkillKind) -> SkillChanges {
        let mut changes = SkillChanges::default();

        if kind.is_primary() {
            for other in SkillKind::PRIMARY {
                if other != kind && self.set_active(other, false) {
                    changes.deactivated.push(other);
                }
            }
        }
        if self.set_active(kind, true) {
            changes.activated.push(kind);
        }
        if kind == SkillKind::RageMode {
            self.set_rage(true);
        }

        changes.loadout = self.loadout();
        changes
    }

    pub fn deactivate(&mut self, kind: SkillKind) -> SkillChanges {
        let mut changes = SkillChanges::default();

        if self.set_active(kind, false) {
            changes.deactivated.push(kind);
        }
        if kind == SkillKind::RageMode {
            self.set_rage(false);
        }

        changes.loadout = self.loadout();
        changes
    }

    pub fn toggle(&mut self, kind: SkillKind) -> SkillChanges {
        if self.is_active(kind) {
            self.deactivate(kind)
        } else {
            self.activate(kind)
        }
    }

    /// Activate every skill in turn. Exclusivity still holds, so only the
    /// last primary stays on, alongside rage mode.
    pub fn activate_all(&mut self) -> SkillChanges {
        self.apply_all(Self::activate)
    }

    pub fn deactivate_all(&mut self) -> SkillChanges {
        self.apply_all(Self::deactivate)
    }

    /// Turn everything off and drop any rage boost.
    pub fn reset(&mut self) -> SkillChanges {
        let changes = self.deactivate_all();
        self.set_rage(false);
        SkillChanges {
            loadout: self.loadout(),
            ..changes
        }
    }

    fn apply_all(&mut self, mut apply: impl FnMut(&mut Self, SkillKind) -> SkillChanges) -> SkillChanges {
        let mut merged = SkillChanges::default();

        for kind in SkillKind::ALL {
            let changes = apply(self, kind);
            for kind in changes.deactivated {
                // Switched on and off again within the batch: no net change
                match merged.activated.iter().position(|activated| *activated == kind) {
                    Some(index) => {
                        merged.activated.remove(index);
                    }
                    None => merged.deactivated.push(kind),
                }
            }
            merged.activated.extend(changes.activated);
        }

        merged.loadout = self.loadout();
        merged
    }

    /// Returns true if the flag changed.
    fn set_active(&mut self, kind: SkillKind, active: bool) -> bool {
        let record = &mut self.records[kind.index()];
        let changed = record.active != active;
        record.active = active;
        changed
    }

    fn set_rage(&mut self, boosted: bool) {
        for record in &mut self.records {
            if record.kind != SkillKind::RageMode {
                record.rage_boosted = boosted;
            }
        }
    }
}

impl Default for SkillBook {
    fn default() -> Self {
        Self::new(&SkillsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_primaries(book: &SkillBook) -> usize {
        SkillKind::PRIMARY
            .iter()
            .filter(|kind| book.is_active(**kind))
            .count()
    }

    #[test]
    fn test_starts_inactive_with_standard_loadout() {
        let book = SkillBook::default();
        assert!(book.records().all(|record| !record.active && !record.rage_boosted));
        assert_eq!(book.loadout(), Loadout::default());
    }

    #[test]
    fn test_primary_skills_are_exclusive() {
        let mut book = SkillBook::default();
        book.activate(SkillKind::ArrowMultiplication);
        let changes = book.activate(SkillKind::BounceDamage);

        assert_eq!(changes.activated, vec![SkillKind::BounceDamage]);
        assert_eq!(changes.deactivated, vec![SkillKind::ArrowMultiplication]);
        assert_eq!(active_primaries(&book), 1);
        assert_eq!(changes.loadout.strategy, FiringStrategy::bouncing(1, 0.25));
    }

    #[test]
    fn test_rage_stacks_with_primary() {
        let mut book = SkillBook::default();
        book.activate(SkillKind::ArrowMultiplication);
        let changes = book.activate(SkillKind::RageMode);

        assert!(changes.deactivated.is_empty());
        assert!(book.is_active(SkillKind::ArrowMultiplication));
        assert_eq!(changes.loadout.strategy, FiringStrategy::multi_shot(4, 15.0));
    }

    #[test]
    fn test_rage_is_idempotent() {
        let mut book = SkillBook::default();
        book.activate(SkillKind::RageMode);
        let before = book.clone();

        let changes = book.activate(SkillKind::RageMode);
        assert!(changes.is_empty());
        assert_eq!(book.records().collect::<Vec<_>>(), before.records().collect::<Vec<_>>());

        book.deactivate(SkillKind::RageMode);
        book.deactivate(SkillKind::RageMode);
        assert!(book.records().all(|record| !record.rage_boosted));
    }

    #[test]
    fn test_rage_boost_applies_to_inactive_skills() {
        let mut book = SkillBook::default();
        book.activate(SkillKind::RageMode);
        assert_eq!(book.magnitude(SkillKind::BounceDamage), SkillMagnitude::BounceCount(3));

        book.activate(SkillKind::BounceDamage);
        assert_eq!(book.loadout().strategy, FiringStrategy::bouncing(3, 0.25));
    }

    #[test]
    fn test_attack_speed_sets_rate_multiplier() {
        let mut book = SkillBook::default();
        let changes = book.activate(SkillKind::AttackSpeedIncrease);
        assert_eq!(changes.loadout.rate_multiplier, 2.0);

        let changes = book.activate(SkillKind::RageMode);
        assert_eq!(changes.loadout.rate_multiplier, 4.0);

        let changes = book.deactivate(SkillKind::AttackSpeedIncrease);
        assert_eq!(changes.loadout, Loadout::default());
    }

    #[test]
    fn test_toggle_flips_state() {
        let mut book = SkillBook::default();
        book.toggle(SkillKind::BurnDamage);
        assert!(book.is_active(SkillKind::BurnDamage));
        let changes = book.toggle(SkillKind::BurnDamage);
        assert_eq!(changes.deactivated, vec![SkillKind::BurnDamage]);
        assert!(!book.is_active(SkillKind::BurnDamage));
    }

    #[test]
    fn test_activate_all_keeps_last_primary_and_rage() {
        let mut book = SkillBook::default();
        let changes = book.activate_all();

        assert_eq!(active_primaries(&book), 1);
        assert!(book.is_active(SkillKind::AttackSpeedIncrease));
        assert!(book.is_active(SkillKind::RageMode));
        assert_eq!(
            changes.activated,
            vec![SkillKind::AttackSpeedIncrease, SkillKind::RageMode]
        );

        let changes = book.deactivate_all();
        assert!(book.records().all(|record| !record.active));
        assert_eq!(changes.loadout, Loadout::default());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut book = SkillBook::default();
        book.activate(SkillKind::BurnDamage);
        book.activate(SkillKind::RageMode);

        let changes = book.reset();
        assert_eq!(changes.loadout, Loadout::default());
        assert!(book.records().all(|record| !record.active && !record.rage_boosted));
    }
}
