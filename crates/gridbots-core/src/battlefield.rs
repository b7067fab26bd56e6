//! The lifecycle manager and its round loop.
//!
//! A [`Battlefield`] owns every robot, the graveyard queue and the battle's
//! random source. Each round runs these phases in a fixed order:
//!
//! 1. **Revive**: the head of the graveyard is revived or retired
//! 2. **Act**: every alive robot takes its turn, in master-list order
//! 3. **Triage**: newly dead robots join the graveyard queue
//! 4. **Promote**: robots with upgrade points move up one tier
//!
//! followed by the report (see [`Battlefield::run`]) and the termination
//! check.
//!
//! # Determinism
//!
//! The only random source is a `ChaCha8Rng` seeded from the battle seed.
//! Robots are iterated in id order and ids grow monotonically, so a given
//! seed and roster always produce the same event stream.
//!
//! # Example
//!
//! ```
//! use glam::IVec2;
//! use gridbots_core::battlefield::Battlefield;
//! use gridbots_core::config::BattleConfig;
//! use gridbots_core::grid::Grid;
//!
//! let grid = Grid::new(5, 5)?;
//! let mut battle = Battlefield::new(grid, BattleConfig::default().with_max_rounds(10), 7);
//! battle.enlist("Ace", IVec2::new(0, 0))?;
//! battle.enlist("Bob", IVec2::new(4, 4))?;
//!
//! while battle.step().is_none() {}
//! assert!(battle.current_round() <= 10);
//! # Ok::<(), gridbots_core::error::SetupError>(())
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::arena::Arena;
use crate::capability;
use crate::config::BattleConfig;
use crate::display::Board;
use crate::entity::{Robot, RobotId, RobotState};
use crate::error::{BattleError, SetupError};
use crate::event::{BattleEvent, EventLog, Outcome};
use crate::grid::{Grid, Position};
use crate::resolver::TurnContext;
use crate::sink::LogSink;
use crate::upgrade::{next_tier, Upgrade};

// =============================================================================
// Summary
// =============================================================================

/// Final state of a finished battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSummary {
    /// Seed the battle ran with.
    pub seed: u64,
    /// Rounds played.
    pub rounds: u32,
    /// Why the battle stopped.
    pub outcome: Outcome,
    /// Alive robots at the end, in master-list order.
    pub survivors: Vec<String>,
    /// Robots still queued in the graveyard.
    pub graveyard: Vec<String>,
}

/// Checkpoints inside one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Revive,
    Turn,
    Triage,
    Promote,
}

// =============================================================================
// Battlefield
// =============================================================================

/// Owns all robots and runs the battle.
#[derive(Debug)]
pub struct Battlefield {
    arena: Arena,
    graveyard: VecDeque<RobotId>,
    rng: ChaCha8Rng,
    seed: u64,
    config: BattleConfig,
    events: EventLog,
    outcome: Option<Outcome>,
}

impl Battlefield {
    /// Creates an empty battlefield.
    #[must_use]
    pub fn new(grid: Grid, config: BattleConfig, seed: u64) -> Self {
        Self {
            arena: Arena::new(grid),
            graveyard: VecDeque::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            config,
            events: EventLog::new(),
            outcome: None,
        }
    }

    // -------------------------------------------------------------------------
    // Setup
    // -------------------------------------------------------------------------

    /// Adds a generic robot at a fixed cell.
    ///
    /// # Errors
    ///
    /// Fails if the name is taken, or the cell is off the grid or occupied.
    pub fn enlist(&mut self, name: impl Into<String>, pos: Position) -> Result<RobotId, SetupError> {
        let name = name.into();
        if !self.arena.is_inside(pos) {
            return Err(SetupError::OutOfBounds {
                name,
                position: pos,
            });
        }
        if self.arena.is_occupied(pos) {
            return Err(SetupError::Occupied {
                name,
                position: pos,
            });
        }
        self.admit(name, pos)
    }

    /// Adds a generic robot at a random free cell.
    ///
    /// # Errors
    ///
    /// Fails if the name is taken or the grid is full.
    pub fn enlist_random(&mut self, name: impl Into<String>) -> Result<RobotId, SetupError> {
        let pos = self
            .arena
            .random_free_cell(&mut self.rng)
            .ok_or_else(|| self.overcrowded())?;
        self.admit(name.into(), pos)
    }

    /// Adds a generic robot, re-randomising its cell until it is valid.
    ///
    /// A `None` coordinate is drawn at random. Every rejected candidate cell
    /// is logged before a fresh random cell is drawn.
    ///
    /// # Errors
    ///
    /// Fails if the name is taken or the grid is full.
    pub fn deploy(
        &mut self,
        name: impl Into<String>,
        x: Option<i32>,
        y: Option<i32>,
    ) -> Result<RobotId, SetupError> {
        let name = name.into();
        self.ensure_unique(&name)?;
        if !self.arena.has_free_cell() {
            return Err(self.overcrowded());
        }

        let grid = *self.arena.grid();
        let x = match x {
            Some(x) => x,
            None => self.rng.gen_range(0..grid.cols()),
        };
        let y = match y {
            Some(y) => y,
            None => self.rng.gen_range(0..grid.rows()),
        };
        let mut pos = Position::new(x, y);
        while !self.arena.is_inside(pos) || self.arena.is_occupied(pos) {
            self.events
                .record(BattleEvent::PlacementRerolled { name: name.clone() });
            pos = grid.random_cell(&mut self.rng);
        }
        self.admit(name, pos)
    }

    fn overcrowded(&self) -> SetupError {
        SetupError::Overcrowded {
            robots: self.arena.alive_count() + 1,
            cells: self.arena.grid().cell_count(),
        }
    }

    fn ensure_unique(&self, name: &str) -> Result<(), SetupError> {
        if self.arena.robots_sorted().any(|robot| robot.name() == name) {
            return Err(SetupError::DuplicateName(name.to_owned()));
        }
        Ok(())
    }

    fn admit(&mut self, name: String, pos: Position) -> Result<RobotId, SetupError> {
        self.ensure_unique(&name)?;
        let id = self
            .arena
            .spawn(RobotState::generic(name.clone(), pos, &self.config.robot));
        self.events.record(BattleEvent::Loaded { name, at: pos });
        Ok(id)
    }

    // -------------------------------------------------------------------------
    // Round Loop
    // -------------------------------------------------------------------------

    /// Plays one round if the battle is still running.
    ///
    /// Returns the outcome once the battle has ended.
    pub fn step(&mut self) -> Option<Outcome> {
        if let Some(outcome) = self.conclude() {
            return Some(outcome);
        }
        self.play_round();
        self.conclude()
    }

    /// Runs phases 1 to 4 of one round, without the termination check.
    pub fn play_round(&mut self) {
        self.play_round_observed(|_, _| {});
    }

    /// [`Self::play_round`], calling `observe` after revival, after every
    /// robot's turn, after triage and after promotion.
    pub(crate) fn play_round_observed(&mut self, mut observe: impl FnMut(Phase, &Self)) {
        let round = self.arena.advance_round();
        self.events.record(BattleEvent::RoundStarted { round });

        self.revive_one();
        observe(Phase::Revive, &*self);
        self.act(&mut observe);
        self.triage();
        observe(Phase::Triage, &*self);
        self.promote();
        observe(Phase::Promote, &*self);

        tracing::debug!(
            round,
            alive = self.arena.alive_count(),
            graveyard = self.graveyard.len(),
            "round complete"
        );
    }

    /// Checks whether the battle is over, recording the outcome once.
    ///
    /// The battle ends when at most one robot is alive or when the step
    /// budget is spent.
    pub fn conclude(&mut self) -> Option<Outcome> {
        if self.outcome.is_some() {
            return self.outcome;
        }
        let outcome = match self.arena.alive_count() {
            0 => Outcome::Annihilated,
            1 => Outcome::SoleSurvivor,
            _ if self.arena.current_round() >= self.config.max_rounds => Outcome::BudgetExhausted,
            _ => return None,
        };
        tracing::info!(
            seed = self.seed,
            rounds = self.arena.current_round(),
            %outcome,
            "battle finished"
        );
        self.events.record(BattleEvent::BattleEnded { outcome });
        self.outcome = Some(outcome);
        self.outcome
    }

    /// Runs the battle to the end, streaming everything to `sink`.
    ///
    /// Setup events and the starting board are written first. Each round
    /// then writes its events followed by the board and graveyard.
    ///
    /// # Errors
    ///
    /// Fails only if the sink does.
    pub fn run(&mut self, sink: &mut dyn LogSink) -> Result<BattleSummary, BattleError> {
        self.drain_into(sink)?;
        sink.render(&self.board(), &self.graveyard_names())?;

        while self.conclude().is_none() {
            self.play_round();
            self.drain_into(sink)?;
            sink.render(&self.board(), &self.graveyard_names())?;
        }
        self.drain_into(sink)?;
        sink.flush()?;
        Ok(self.summary())
    }

    fn drain_into(&mut self, sink: &mut dyn LogSink) -> Result<(), BattleError> {
        for event in self.events.take_events() {
            sink.record(&event)?;
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Phases
    // -------------------------------------------------------------------------

    fn revive_one(&mut self) {
        let Some(&id) = self.graveyard.front() else {
            return;
        };
        let Some(dead) = self.arena.get(id) else {
            self.graveyard.pop_front();
            return;
        };
        let name = dead.name().to_owned();

        if dead.state().vitals.revivals == 0 {
            self.graveyard.pop_front();
            self.arena.despawn(id);
            self.events.record(BattleEvent::Ascended { name });
            return;
        }

        let Some(cell) = self.arena.random_free_cell(&mut self.rng) else {
            self.events.record(BattleEvent::RevivalDeferred { name });
            return;
        };
        self.graveyard.pop_front();
        let Some(mut old) = self.arena.despawn(id) else {
            return;
        };
        old.state_mut().vitals.revivals -= 1;
        let state = old.state().revived(cell, &self.config.robot);
        let remaining = state.vitals.revivals;
        self.arena.spawn(state);
        self.events.record(BattleEvent::Revived {
            name,
            at: cell,
            remaining,
        });
    }

    fn act(&mut self, observe: &mut impl FnMut(Phase, &Self)) {
        for id in self.arena.alive_ids() {
            // Robots killed earlier this round have lost their turn.
            if !self.arena.get(id).is_some_and(Robot::is_alive) {
                continue;
            }
            let mut ctx = TurnContext::new(
                &mut self.arena,
                &mut self.rng,
                &mut self.events,
                &self.config,
                id,
            );
            capability::take_turn(&mut ctx);
            observe(Phase::Turn, &*self);
        }
    }

    fn triage(&mut self) {
        let fallen: Vec<_> = self
            .arena
            .robots_sorted()
            .filter(|robot| !robot.is_alive() && !self.graveyard.contains(&robot.id()))
            .map(|robot| (robot.id(), robot.name().to_owned()))
            .collect();
        for (id, name) in fallen {
            self.graveyard.push_back(id);
            self.events.record(BattleEvent::Buried { name });
        }
    }

    fn promote(&mut self) {
        let candidates: Vec<_> = self
            .arena
            .alive()
            .filter(|robot| robot.state().progress.points > 0)
            .filter_map(|robot| next_tier(robot.state().progress.tiers).map(|tier| (robot.id(), tier)))
            .collect();

        for (id, tier) in candidates {
            let Some(upgrade) = Upgrade::choose(tier, &mut self.rng) else {
                continue;
            };
            let Some(old) = self.arena.despawn(id) else {
                continue;
            };
            let loadout = upgrade.apply(old.state().loadout);
            let state = old.state().promoted(loadout, tier, &self.config.robot);
            let name = state.name.clone();
            let kind = loadout.kind_label();
            tracing::debug!(robot = %name, %kind, "promoted");
            self.arena.spawn(state);
            self.events.record(BattleEvent::Promoted { name, kind });
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// All robots, alive or dead.
    #[must_use]
    pub const fn arena(&self) -> &Arena {
        &self.arena
    }

    /// All robots, mutably.
    ///
    /// Intended for setting up scenarios; relocating a robot onto an
    /// occupied cell breaks the occupancy invariant.
    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    /// Seed the battle was created with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Configuration in force.
    #[must_use]
    pub const fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Rounds played so far.
    #[must_use]
    pub const fn current_round(&self) -> u32 {
        self.arena.current_round()
    }

    /// Outcome, once the battle has ended.
    #[must_use]
    pub const fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Returns `true` once the battle has ended.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Graveyard queue, head first.
    #[must_use]
    pub fn graveyard(&self) -> Vec<RobotId> {
        self.graveyard.iter().copied().collect()
    }

    /// Names in the graveyard queue, head first.
    #[must_use]
    pub fn graveyard_names(&self) -> Vec<String> {
        self.graveyard
            .iter()
            .filter_map(|id| self.arena.get(*id))
            .map(|robot| robot.name().to_owned())
            .collect()
    }

    /// Snapshot of the board.
    #[must_use]
    pub fn board(&self) -> Board {
        Board::from_arena(&self.arena)
    }

    /// Appends an event to the battle log.
    pub(crate) fn record(&mut self, event: BattleEvent) {
        self.events.record(event);
    }

    /// Drains the events recorded since the last drain.
    pub fn take_events(&mut self) -> Vec<BattleEvent> {
        self.events.take_events()
    }

    /// Current summary. `outcome` falls back to the budget rule while the
    /// battle is still running.
    #[must_use]
    pub fn summary(&self) -> BattleSummary {
        BattleSummary {
            seed: self.seed,
            rounds: self.arena.current_round(),
            outcome: self.outcome.unwrap_or(Outcome::BudgetExhausted),
            survivors: self
                .arena
                .alive()
                .map(|robot| robot.name().to_owned())
                .collect(),
            graveyard: self.graveyard_names(),
        }
    }
}
