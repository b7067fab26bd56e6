//! Test fixtures for driving behaviours and battles.
//!
//! [`Scene`] bundles the pieces a [`TurnContext`] borrows so unit tests can
//! place robots by hand and run one action at a time.

use glam::IVec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::arena::Arena;
use crate::battlefield::Battlefield;
use crate::capability::Loadout;
use crate::config::BattleConfig;
use crate::entity::{RobotId, RobotState};
use crate::event::{BattleEvent, EventLog};
use crate::grid::Grid;
use crate::resolver::TurnContext;

/// Seed used when a test does not care which one.
pub const DEFAULT_SEED: u64 = 42;

// =============================================================================
// Scene
// =============================================================================

/// A hand-built arena plus everything a turn needs.
pub struct Scene {
    /// Robots under test.
    pub arena: Arena,
    /// Random source handed to behaviours.
    pub rng: ChaCha8Rng,
    /// Collected events.
    pub events: EventLog,
    /// Counters and odds; tests may tweak these before acting.
    pub config: BattleConfig,
}

impl Scene {
    /// Creates an empty `cols`×`rows` scene with the default seed.
    pub fn new(cols: i32, rows: i32) -> Self {
        Self::with_seed(cols, rows, DEFAULT_SEED)
    }

    /// Creates an empty scene with an explicit seed.
    pub fn with_seed(cols: i32, rows: i32, seed: u64) -> Self {
        let grid = Grid::new(cols, rows).unwrap();
        Self {
            arena: Arena::new(grid),
            rng: ChaCha8Rng::seed_from_u64(seed),
            events: EventLog::new(),
            config: BattleConfig::default(),
        }
    }

    /// Places a generic robot at `(x, y)`.
    pub fn spawn(&mut self, name: &str, x: i32, y: i32) -> RobotId {
        let state = RobotState::generic(name, IVec2::new(x, y), &self.config.robot);
        self.arena.spawn(state)
    }

    /// Places a robot with `loadout`, its shells set for that loadout.
    pub fn spawn_with(&mut self, name: &str, x: i32, y: i32, loadout: Loadout) -> RobotId {
        let mut state = RobotState::generic(name, IVec2::new(x, y), &self.config.robot);
        state.loadout = loadout;
        state.arsenal.shells = loadout.firing.starting_shells(&self.config.robot);
        self.arena.spawn(state)
    }

    /// Borrows the scene as `actor`'s turn context.
    pub fn ctx(&mut self, actor: RobotId) -> TurnContext<'_> {
        TurnContext::new(
            &mut self.arena,
            &mut self.rng,
            &mut self.events,
            &self.config,
            actor,
        )
    }

    /// State of robot `id`.
    pub fn state(&self, id: RobotId) -> &RobotState {
        self.arena.get(id).unwrap().state()
    }

    /// Mutable state of robot `id`.
    pub fn state_mut(&mut self, id: RobotId) -> &mut RobotState {
        self.arena.get_mut(id).unwrap().state_mut()
    }

    /// Drains the recorded events.
    pub fn take_events(&mut self) -> Vec<BattleEvent> {
        self.events.take_events()
    }

    /// Drains the recorded events as log lines.
    pub fn take_lines(&mut self) -> Vec<String> {
        self.take_events().iter().map(ToString::to_string).collect()
    }
}

// =============================================================================
// Battle Fixtures
// =============================================================================

/// A battlefield with generic robots at the given cells.
pub fn battle_with(cols: i32, rows: i32, seed: u64, robots: &[(&str, i32, i32)]) -> Battlefield {
    let grid = Grid::new(cols, rows).unwrap();
    let mut battle = Battlefield::new(grid, BattleConfig::default(), seed);
    for &(name, x, y) in robots {
        battle.enlist(name, IVec2::new(x, y)).unwrap();
    }
    battle
}

/// A crowded battlefield: `count` robots on a `size`×`size` grid at random
/// cells.
pub fn crowded_battle(size: i32, count: usize, seed: u64) -> Battlefield {
    let grid = Grid::new(size, size).unwrap();
    let mut battle = Battlefield::new(grid, BattleConfig::default(), seed);
    for i in 0..count {
        battle.enlist_random(format!("R{i:02}")).unwrap();
    }
    battle
}

/// Renders a stream of events as log lines.
pub fn lines(events: &[BattleEvent]) -> Vec<String> {
    events.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_with_sets_shells_for_loadout() {
        let mut scene = Scene::new(4, 4);
        let loadout = Loadout {
            firing: crate::capability::Firing::Thirtyshot,
            ..Loadout::default()
        };
        let id = scene.spawn_with("Tri", 1, 1, loadout);
        assert_eq!(scene.state(id).arsenal.shells, 30);
        assert_eq!(scene.state(id).loadout, loadout);
    }

    #[test]
    fn battle_with_places_robots_in_order() {
        let battle = battle_with(5, 5, 1, &[("Ace", 0, 0), ("Bob", 4, 4)]);
        let names: Vec<_> = battle.arena().robots_sorted().map(|r| r.name().to_owned()).collect();
        assert_eq!(names, vec!["Ace", "Bob"]);
    }

    #[test]
    fn crowded_battle_fills_distinct_cells() {
        let battle = crowded_battle(4, 10, 3);
        assert_eq!(battle.arena().alive_count(), 10);
    }
}
