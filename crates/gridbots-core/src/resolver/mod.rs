//! Shared combat and vision rules.
//!
//! Capability behaviours decide *what* a robot attempts; resolvers apply the
//! rules every behaviour shares: who stands on a cell, how damage is taken,
//! who can be seen from where.
//!
//! Behaviours and resolvers receive a [`TurnContext`] rather than holding a
//! reference to the battlefield. The context borrows the arena, the random
//! source and the event log for the duration of one robot's turn.
//!
//! # Available Resolvers
//!
//! - [`CombatResolver`]: target lookup, damage interception, upgrade points
//! - [`VisionResolver`]: neighbourhood, whole-board and tracker sightings

mod combat;
mod vision;

pub use combat::CombatResolver;
pub use vision::{Sighting, VisionResolver};

use glam::IVec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::arena::Arena;
use crate::config::BattleConfig;
use crate::entity::{Robot, RobotId, RobotState};
use crate::event::{BattleEvent, EventLog};
use crate::grid::Position;

/// Everything a behaviour may read or mutate during one robot's turn.
pub struct TurnContext<'a> {
    /// All robots on the battlefield.
    pub arena: &'a mut Arena,
    /// The battle's only random source.
    pub rng: &'a mut ChaCha8Rng,
    /// Destination for every event this turn produces.
    pub events: &'a mut EventLog,
    /// Counters and odds.
    pub config: &'a BattleConfig,
    /// The robot taking its turn.
    pub actor: RobotId,
}

impl<'a> TurnContext<'a> {
    /// Creates a context for `actor`'s turn.
    pub fn new(
        arena: &'a mut Arena,
        rng: &'a mut ChaCha8Rng,
        events: &'a mut EventLog,
        config: &'a BattleConfig,
        actor: RobotId,
    ) -> Self {
        Self {
            arena,
            rng,
            events,
            config,
            actor,
        }
    }

    /// The acting robot.
    #[must_use]
    pub fn actor(&self) -> Option<&Robot> {
        self.arena.get(self.actor)
    }

    /// The acting robot's state, mutably.
    pub fn actor_state_mut(&mut self) -> Option<&mut RobotState> {
        self.arena.get_mut(self.actor).map(Robot::state_mut)
    }

    /// Returns `true` while the acting robot is alive.
    #[must_use]
    pub fn actor_alive(&self) -> bool {
        self.actor().is_some_and(Robot::is_alive)
    }

    /// Name and position of the acting robot.
    #[must_use]
    pub fn snapshot(&self) -> Option<(String, Position)> {
        self.actor()
            .map(|robot| (robot.name().to_owned(), robot.position()))
    }

    /// Appends an event to the battle log.
    pub fn record(&mut self, event: BattleEvent) {
        self.events.record(event);
    }

    /// Credits the acting robot with one upgrade point.
    pub fn award_point(&mut self) {
        if let Some(state) = self.actor_state_mut() {
            state.progress.points += 1;
        }
    }

    /// Draws an offset from the uniform 3×3 block centred on zero.
    ///
    /// The column offset is drawn before the row offset.
    pub fn random_offset(&mut self) -> Position {
        let dx = self.rng.gen_range(-1..=1);
        let dy = self.rng.gen_range(-1..=1);
        IVec2::new(dx, dy)
    }

    /// Returns `true` with probability `chance`.
    ///
    /// Values at or below zero never succeed; values at or above one always
    /// do.
    pub fn roll(&mut self, chance: f64) -> bool {
        self.rng.gen::<f64>() < chance
    }
}
