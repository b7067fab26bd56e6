//! Property tests: board and counter invariants hold throughout every round.

use std::collections::{BTreeMap, HashSet};

use proptest::prelude::*;

use crate::battlefield::Battlefield;
use crate::entity::TierFlags;
use crate::event::BattleEvent;

use super::helpers::crowded_battle;

/// First broken board rule, if any.
fn board_violation(battle: &Battlefield) -> Option<String> {
    let mut cells = HashSet::new();
    for robot in battle.arena().alive() {
        if !battle.arena().is_inside(robot.position()) {
            return Some(format!("{} left the grid at {:?}", robot.name(), robot.position()));
        }
        if !cells.insert(robot.position()) {
            return Some(format!("two robots share {:?}", robot.position()));
        }
    }

    let queued = battle.graveyard();
    let unique: HashSet<_> = queued.iter().collect();
    if unique.len() != queued.len() {
        return Some("graveyard holds a robot twice".to_owned());
    }
    queued
        .into_iter()
        .find(|id| battle.arena().get(*id).map_or(true, |r| r.is_alive()))
        .map(|id| format!("{id:?} is queued but alive or missing"))
}

/// Plays one round, checking the board after every phase and every turn.
fn play_checked_round(battle: &mut Battlefield) -> Result<(), TestCaseError> {
    let mut violation = None;
    battle.play_round_observed(|phase, battle| {
        if violation.is_none() {
            violation = board_violation(battle).map(|why| format!("after {phase:?}: {why}"));
        }
    });
    match violation {
        Some(why) => Err(TestCaseError::fail(why)),
        None => Ok(()),
    }
}

fn check_counters(battle: &Battlefield) -> Result<(), TestCaseError> {
    let defaults = &battle.config().robot;
    let shell_cap = defaults.shells.max(defaults.extended_shells);
    for robot in battle.arena().robots_sorted() {
        let state = robot.state();
        prop_assert!(state.arsenal.shells <= shell_cap);
        prop_assert!(state.charges.hides <= defaults.hides);
        prop_assert!(state.charges.jumps <= defaults.jumps);
        prop_assert!(state.charges.scans <= defaults.scans);
        prop_assert!(state.charges.trackers <= defaults.trackers);
        prop_assert!(state.tracked.len() <= defaults.trackers as usize);
    }
    Ok(())
}

fn tiers_by_name(battle: &Battlefield) -> BTreeMap<String, TierFlags> {
    battle
        .arena()
        .robots_sorted()
        .map(|r| (r.name().to_owned(), r.state().progress.tiers))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn board_stays_consistent_after_every_phase(
        seed in any::<u64>(),
        size in 3i32..8,
        count in 2usize..10,
    ) {
        let count = count.min((size * size) as usize);
        let mut battle = crowded_battle(size, count, seed);
        prop_assert_eq!(board_violation(&battle), None);
        while battle.conclude().is_none() {
            play_checked_round(&mut battle)?;
        }
    }

    #[test]
    fn counters_never_exceed_their_budgets(seed in any::<u64>(), count in 2usize..12) {
        let mut battle = crowded_battle(6, count, seed);
        while battle.step().is_none() {
            check_counters(&battle)?;
        }
        check_counters(&battle)?;
    }

    #[test]
    fn tiers_only_accumulate_between_revivals(seed in any::<u64>(), count in 2usize..10) {
        let mut battle = crowded_battle(5, count, seed);
        let mut previous = tiers_by_name(&battle);
        battle.take_events();
        while battle.step().is_none() {
            let reborn: HashSet<String> = battle
                .take_events()
                .into_iter()
                .filter_map(|event| match event {
                    BattleEvent::Revived { name, .. } => Some(name),
                    _ => None,
                })
                .collect();
            let current = tiers_by_name(&battle);
            for (name, tiers) in &current {
                if reborn.contains(name) {
                    continue;
                }
                if let Some(before) = previous.get(name) {
                    prop_assert!(tiers.contains(*before), "{} lost a tier", name);
                }
            }
            previous = current;
        }
    }

    #[test]
    fn battle_respects_round_budget(seed in any::<u64>(), count in 2usize..10) {
        let mut battle = crowded_battle(6, count, seed);
        let mut rounds = 0;
        while battle.step().is_none() {
            rounds += 1;
            prop_assert!(rounds <= battle.config().max_rounds);
        }
        prop_assert!(battle.current_round() <= battle.config().max_rounds);
        prop_assert!(battle.is_finished());
    }
}
