//! Skill definitions - kinds, tuning, and per-skill records.

use crate::config::SkillsConfig;
use crate::weapons::FiringStrategy;

/// Every skill the player can toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkillKind {
    ArrowMultiplication,
    BounceDamage,
    BurnDamage,
    AttackSpeedIncrease,
    RageMode,
}

impl SkillKind {
    pub const ALL: [SkillKind; 5] = [
        SkillKind::ArrowMultiplication,
        SkillKind::BounceDamage,
        SkillKind::BurnDamage,
        SkillKind::AttackSpeedIncrease,
        SkillKind::RageMode,
    ];

    /// Skills that exclude each other; rage mode stacks on top of them.
    pub const PRIMARY: [SkillKind; 4] = [
        SkillKind::ArrowMultiplication,
        SkillKind::BounceDamage,
        SkillKind::BurnDamage,
        SkillKind::AttackSpeedIncrease,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_primary(self) -> bool {
        self != SkillKind::RageMode
    }
}

/// Base and rage values for one skill.
#[derive(Debug, Clone, PartialEq)]
pub enum SkillTuning {
    ArrowMultiplication {
        arrow_count: i32,
        rage_arrow_count: i32,
        spread_degrees: f32,
    },
    BounceDamage {
        bounce_count: i32,
        rage_bounce_count: i32,
        falloff: f32,
    },
    BurnDamage {
        damage_per_second: f32,
        duration: f32,
        rage_duration: f32,
        max_stacks: i32,
    },
    AttackSpeed {
        multiplier: f32,
        rage_multiplier: f32,
    },
    RageMode,
}

/// Current strength of a skill, with rage applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkillMagnitude {
    ArrowCount(i32),
    BounceCount(i32),
    Burn {
        damage_per_second: f32,
        duration: f32,
        max_stacks: i32,
    },
    AttackSpeed(f32),
    Rage,
}

/// State of one skill.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillRecord {
    pub kind: SkillKind,
    pub name: String,
    pub active: bool,
    /// Set while rage mode is on; switches magnitudes to their rage values
    pub rage_boosted: bool,
    pub tuning: SkillTuning,
}

impl SkillRecord {
    pub fn new(kind: SkillKind, config: &SkillsConfig) -> Self {
        let (name, tuning) = match kind {
            SkillKind::ArrowMultiplication => {
                let c = &config.arrow_multiplication;
                (
                    c.name.clone(),
                    SkillTuning::ArrowMultiplication {
                        arrow_count: c.arrow_count,
                        rage_arrow_count: c.rage_arrow_count,
                        spread_degrees: c.spread_angle,
                    },
                )
            }
            SkillKind::BounceDamage => {
                let c = &config.bounce_damage;
                (
                    c.name.clone(),
                    SkillTuning::BounceDamage {
                        bounce_count: c.bounce_count,
                        rage_bounce_count: c.rage_bounce_count,
                        falloff: c.falloff,
                    },
                )
            }
            SkillKind::BurnDamage => {
                let c = &config.burn_damage;
                (
                    c.name.clone(),
                    SkillTuning::BurnDamage {
                        damage_per_second: c.damage_per_second,
                        duration: c.duration,
                        rage_duration: c.rage_duration,
                        max_stacks: c.max_stacks,
                    },
                )
            }
            SkillKind::AttackSpeedIncrease => {
                let c = &config.attack_speed;
                (
                    c.name.clone(),
                    SkillTuning::AttackSpeed {
                        multiplier: c.multiplier,
                        rage_multiplier: c.rage_multiplier,
                    },
                )
            }
            SkillKind::RageMode => (config.rage_mode.name.clone(), SkillTuning::RageMode),
        };

        Self {
            kind,
            name,
            active: false,
            rage_boosted: false,
            tuning,
        }
    }

    pub fn magnitude(&self) -> SkillMagnitude {
        let rage = self.rage_boosted;
        match self.tuning {
            SkillTuning::ArrowMultiplication {
                arrow_count,
                rage_arrow_count,
                ..
            } => SkillMagnitude::ArrowCount(if rage { rage_arrow_count } else { arrow_count }),
            SkillTuning::BounceDamage {
                bounce_count,
                rage_bounce_count,
                ..
            } => SkillMagnitude::BounceCount(if rage { rage_bounce_count } else { bounce_count }),
            SkillTuning::BurnDamage {
                damage_per_second,
                duration,
                rage_duration,
                max_stacks,
            } => SkillMagnitude::Burn {
                damage_per_second,
                duration: if rage { rage_duration } else { duration },
                max_stacks,
            },
            SkillTuning::AttackSpeed {
                multiplier,
                rage_multiplier,
            } => SkillMagnitude::AttackSpeed(if rage { rage_multiplier } else { multiplier }),
            SkillTuning::RageMode => SkillMagnitude::Rage,
        }
    }

    /// Firing strategy this skill installs while it is the active primary.
    pub fn strategy(&self) -> Option<FiringStrategy> {
        match (&self.tuning, self.magnitude()) {
            (SkillTuning::ArrowMultiplication { spread_degrees, .. }, SkillMagnitude::ArrowCount(count)) => {
                Some(FiringStrategy::multi_shot(count, *spread_degrees))
            }
            (SkillTuning::BounceDamage { falloff, .. }, SkillMagnitude::BounceCount(count)) => {
                Some(FiringStrategy::bouncing(count, *falloff))
            }
            (
                SkillTuning::BurnDamage { .. },
                SkillMagnitude::Burn {
                    damage_per_second,
                    duration,
                    max_stacks,
                },
            ) => Some(FiringStrategy::burning(damage_per_second, duration, max_stacks)),
            (SkillTuning::AttackSpeed { .. }, SkillMagnitude::AttackSpeed(multiplier)) => {
                Some(FiringStrategy::attack_speed(multiplier))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: SkillKind) -> SkillRecord {
        SkillRecord::new(kind, &SkillsConfig::default())
    }

    #[test]
    fn test_indices_follow_declaration_order() {
        for (index, kind) in SkillKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), index);
        }
        assert!(!SkillKind::RageMode.is_primary());
        assert!(SkillKind::PRIMARY.iter().all(|kind| kind.is_primary()));
    }

    #[test]
    fn test_rage_switches_magnitudes() {
        let mut arrows = record(SkillKind::ArrowMultiplication);
        assert_eq!(arrows.magnitude(), SkillMagnitude::ArrowCount(2));
        arrows.rage_boosted = true;
        assert_eq!(arrows.magnitude(), SkillMagnitude::ArrowCount(4));

        let mut bounce = record(SkillKind::BounceDamage);
        bounce.rage_boosted = true;
        assert_eq!(bounce.magnitude(), SkillMagnitude::BounceCount(3));

        let mut burn = record(SkillKind::BurnDamage);
        assert!(matches!(burn.magnitude(), SkillMagnitude::Burn { duration, .. } if duration == 3.0));
        burn.rage_boosted = true;
        assert!(matches!(burn.magnitude(), SkillMagnitude::Burn { duration, .. } if duration == 6.0));

        let mut speed = record(SkillKind::AttackSpeedIncrease);
        speed.rage_boosted = true;
        assert_eq!(speed.magnitude(), SkillMagnitude::AttackSpeed(4.0));
    }

    #[test]
    fn test_strategies_per_kind() {
        assert_eq!(
            record(SkillKind::ArrowMultiplication).strategy(),
            Some(FiringStrategy::multi_shot(2, 15.0))
        );
        assert_eq!(
            record(SkillKind::BounceDamage).strategy(),
            Some(FiringStrategy::bouncing(1, 0.25))
        );
        assert_eq!(
            record(SkillKind::BurnDamage).strategy(),
            Some(FiringStrategy::burning(5.0, 3.0, 3))
        );
        assert_eq!(
            record(SkillKind::AttackSpeedIncrease).strategy(),
            Some(FiringStrategy::attack_speed(2.0))
        );
        assert_eq!(record(SkillKind::RageMode).strategy(), None);
    }
}
