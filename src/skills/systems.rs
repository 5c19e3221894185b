//! Skill systems - apply requests and keep the player's weapon in sync.

use bevy::prelude::*;

use super::book::SkillBook;
use super::events::*;
use crate::config::CombatConfig;
use crate::player::Player;
use crate::weapons::Weapon;

/// Start every session with all skills off and the player's weapon on its
/// standard loadout.
pub(crate) fn reset_skill_book(
    config: Res<CombatConfig>,
    mut book: ResMut<SkillBook>,
    mut weapons: Query<&mut Weapon, With<Player>>,
    mut deactivated_events: EventWriter<SkillDeactivated>,
) {
    let changes = book.reset();
    for kind in &changes.deactivated {
        let name = book.record(*kind).name.clone();
        deactivated_events.send(SkillDeactivated { kind: *kind, name });
    }

    // Pick up tuning from the freshly loaded config
    *book = SkillBook::new(&config.skills);

    for mut weapon in weapons.iter_mut() {
        weapon.apply_loadout(changes.loadout);
    }
    info!("Skills reset");
}

/// Apply skill requests, install the new loadout, and notify listeners.
pub(crate) fn handle_skill_requests(
    mut requests: EventReader<SkillToggleRequest>,
    mut book: ResMut<SkillBook>,
    mut weapons: Query<&mut Weapon, With<Player>>,
    mut activated_events: EventWriter<SkillActivated>,
    mut deactivated_events: EventWriter<SkillDeactivated>,
) {
    for request in requests.read() {
        let changes = match *request {
            SkillToggleRequest::Toggle(kind) => book.toggle(kind),
            SkillToggleRequest::ActivateAll => book.activate_all(),
            SkillToggleRequest::DeactivateAll => book.deactivate_all(),
        };

        for kind in &changes.deactivated {
            let name = book.record(*kind).name.clone();
            info!("Skill deactivated: {}", name);
            deactivated_events.send(SkillDeactivated { kind: *kind, name });
        }
        for kind in &changes.activated {
            let name = book.record(*kind).name.clone();
            info!("Skill activated: {}", name);
            activated_events.send(SkillActivated { kind: *kind, name });
        }

        for mut weapon in weapons.iter_mut() {
            weapon.apply_loadout(changes.loadout);
        }
        debug!(
            "Loadout: {:?} at x{:.1} attack rate",
            changes.loadout.strategy.kind(),
            changes.loadout.rate_multiplier
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::SkillKind;
    use crate::weapons::{FiringStrategy, Loadout, StrategyKind};
    use bevy::ecs::system::RunSystemOnce;

    fn setup_test_app() -> App {
        let mut app = App::new();
        app.init_resource::<SkillBook>()
            .add_event::<SkillToggleRequest>()
            .add_event::<SkillActivated>()
            .add_event::<SkillDeactivated>();
        app
    }

    #[test]
    fn test_toggle_installs_strategy_on_player_weapon() {
        let mut app = setup_test_app();
        let player = app.world_mut().spawn((Player, Weapon::default())).id();
        let bystander = app.world_mut().spawn(Weapon::default()).id();

        app.world_mut()
            .send_event(SkillToggleRequest::Toggle(SkillKind::ArrowMultiplication));
        let _ = app.world_mut().run_system_once(handle_skill_requests);

        let weapon = app.world().get::<Weapon>(player).unwrap();
        assert_eq!(weapon.strategy(), FiringStrategy::multi_shot(2, 15.0));
        let other = app.world().get::<Weapon>(bystander).unwrap();
        assert_eq!(other.strategy().kind(), StrategyKind::Standard);

        let activated = app.world().resource::<Events<SkillActivated>>();
        assert_eq!(activated.len(), 1);
    }

    #[test]
    fn test_switching_primary_notifies_both_ways() {
        let mut app = setup_test_app();
        app.world_mut().spawn((Player, Weapon::default()));

        app.world_mut()
            .send_event(SkillToggleRequest::Toggle(SkillKind::BurnDamage));
        app.world_mut()
            .send_event(SkillToggleRequest::Toggle(SkillKind::AttackSpeedIncrease));
        let _ = app.world_mut().run_system_once(handle_skill_requests);

        let book = app.world().resource::<SkillBook>();
        assert!(!book.is_active(SkillKind::BurnDamage));
        assert!(book.is_active(SkillKind::AttackSpeedIncrease));
        assert_eq!(app.world().resource::<Events<SkillActivated>>().len(), 2);
        assert_eq!(app.world().resource::<Events<SkillDeactivated>>().len(), 1);
    }

    #[test]
    fn test_deactivate_all_restores_standard() {
        let mut app = setup_test_app();
        let player = app.world_mut().spawn((Player, Weapon::default())).id();

        app.world_mut().send_event(SkillToggleRequest::ActivateAll);
        app.world_mut().send_event(SkillToggleRequest::DeactivateAll);
        let _ = app.world_mut().run_system_once(handle_skill_requests);

        let weapon = app.world().get::<Weapon>(player).unwrap();
        assert_eq!(weapon.strategy(), FiringStrategy::Standard);
        assert_eq!(weapon.rate_multiplier(), 1.0);
    }

    #[test]
    fn test_reset_restores_standard_loadout() {
        let mut app = setup_test_app();
        app.init_resource::<CombatConfig>();

        let mut book = SkillBook::default();
        book.activate(SkillKind::AttackSpeedIncrease);
        let loadout = book.activate(SkillKind::RageMode).loadout;
        app.insert_resource(book);

        let mut weapon = Weapon::default();
        weapon.apply_loadout(loadout);
        assert_eq!(weapon.rate_multiplier(), 4.0);
        let player = app.world_mut().spawn((Player, weapon)).id();

        let _ = app.world_mut().run_system_once(reset_skill_book);

        let weapon = app.world().get::<Weapon>(player).unwrap();
        assert_eq!(weapon.strategy(), FiringStrategy::Standard);
        assert_eq!(weapon.rate_multiplier(), 1.0);

        let book = app.world().resource::<SkillBook>();
        assert!(book.records().all(|record| !record.active && !record.rage_boosted));
        assert_eq!(book.loadout(), Loadout::default());
        assert_eq!(app.world().resource::<Events<SkillDeactivated>>().len(), 2);
    }
}
