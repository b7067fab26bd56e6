//! Arena module: exclusive owner of every robot in a battle.
//!
//! Robots are stored in a `BTreeMap` keyed by [`RobotId`]. Ids are assigned
//! monotonically, so iterating the map visits robots in spawn order. That
//! order is the battle's master list: a promoted or revived robot gets a new
//! id and therefore moves to the end of the list, exactly like a replacement
//! appended to a list.
//!
//! Occupancy is computed from the robots themselves rather than cached, so
//! a query always reflects moves made earlier in the same round.
//!
//! # Example
//!
//! ```
//! use gridbots_core::arena::Arena;
//! use gridbots_core::config::RobotDefaults;
//! use gridbots_core::entity::RobotState;
//! use gridbots_core::grid::Grid;
//! use glam::IVec2;
//!
//! let mut arena = Arena::new(Grid::new(5, 5).unwrap());
//! let defaults = RobotDefaults::default();
//!
//! let a = arena.spawn(RobotState::generic("Ann", IVec2::new(0, 0), &defaults));
//! let b = arena.spawn(RobotState::generic("Bob", IVec2::new(4, 4), &defaults));
//!
//! let ids: Vec<_> = arena.ids_sorted().collect();
//! assert_eq!(ids, vec![a, b]);
//! assert!(arena.is_occupied(IVec2::new(4, 4)));
//! assert_eq!(arena.occupant_at(IVec2::new(0, 0)), Some(a));
//! ```

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::entity::{Robot, RobotId, RobotState};
use crate::grid::{Grid, Position};

/// Container for all robots on one battlefield.
///
/// # Invariants
///
/// - No two alive robots share a cell. The arena does not enforce this on
///   [`Arena::get_mut`]; behaviours check [`Arena::is_occupied`] before
///   committing a relocation.
/// - Ids are never reused.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    /// Monotonically increasing id counter.
    next_id: u64,
    /// Robots in master-list order.
    robots: BTreeMap<RobotId, Robot>,
    /// Battlefield bounds.
    grid: Grid,
    /// Rounds started so far.
    round: u32,
}

impl Arena {
    /// Creates an empty arena over `grid`.
    #[must_use]
    pub const fn new(grid: Grid) -> Self {
        Self {
            next_id: 0,
            robots: BTreeMap::new(),
            grid,
            round: 0,
        }
    }

    /// Adds a robot to the end of the master list.
    ///
    /// # Returns
    ///
    /// The id assigned to the new robot.
    pub fn spawn(&mut self, state: RobotState) -> RobotId {
        let id = RobotId::new(self.next_id);
        self.next_id += 1;
        self.robots.insert(id, Robot::new(id, state));
        id
    }

    /// Removes a robot, invalidating its id.
    pub fn despawn(&mut self, id: RobotId) -> Option<Robot> {
        self.robots.remove(&id)
    }

    /// Returns a robot by id.
    #[must_use]
    pub fn get(&self, id: RobotId) -> Option<&Robot> {
        self.robots.get(&id)
    }

    /// Returns a robot by id, mutably.
    #[must_use]
    pub fn get_mut(&mut self, id: RobotId) -> Option<&mut Robot> {
        self.robots.get_mut(&id)
    }

    /// Returns `true` if `id` still resolves.
    #[must_use]
    pub fn contains(&self, id: RobotId) -> bool {
        self.robots.contains_key(&id)
    }

    /// Ids in master-list order.
    pub fn ids_sorted(&self) -> impl Iterator<Item = RobotId> + '_ {
        self.robots.keys().copied()
    }

    /// Robots in master-list order.
    pub fn robots_sorted(&self) -> impl Iterator<Item = &Robot> + '_ {
        self.robots.values()
    }

    /// Alive robots in master-list order.
    pub fn alive(&self) -> impl Iterator<Item = &Robot> + '_ {
        self.robots.values().filter(|robot| robot.is_alive())
    }

    /// Ids of alive robots in master-list order.
    #[must_use]
    pub fn alive_ids(&self) -> Vec<RobotId> {
        self.alive().map(Robot::id).collect()
    }

    /// Number of alive robots.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    /// Number of robots, dead or alive.
    #[must_use]
    pub fn robot_count(&self) -> usize {
        self.robots.len()
    }

    /// Returns `true` if the arena holds no robots at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.robots.is_empty()
    }

    /// Battlefield bounds.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns `true` if `pos` lies on the battlefield.
    #[must_use]
    pub const fn is_inside(&self, pos: Position) -> bool {
        self.grid.is_inside(pos)
    }

    /// Returns `true` if an alive robot stands on `pos`.
    #[must_use]
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.occupant_at(pos).is_some()
    }

    /// The alive robot standing on `pos`, if any.
    #[must_use]
    pub fn occupant_at(&self, pos: Position) -> Option<RobotId> {
        self.alive()
            .find(|robot| robot.position() == pos)
            .map(Robot::id)
    }

    /// Looks a robot up by name, preferring an alive one.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<RobotId> {
        let mut named = self.robots.values().filter(|robot| robot.name() == name);
        let first = named.next()?;
        if first.is_alive() {
            return Some(first.id());
        }
        Some(
            named
                .find(|robot| robot.is_alive())
                .map_or(first.id(), Robot::id),
        )
    }

    /// Returns `true` if at least one cell is free of alive robots.
    #[must_use]
    pub fn has_free_cell(&self) -> bool {
        self.alive_count() < self.grid.cell_count()
    }

    /// Draws uniformly random cells until one is free of alive robots.
    ///
    /// Returns `None` without drawing when every cell is occupied.
    pub fn random_free_cell<R: Rng>(&self, rng: &mut R) -> Option<Position> {
        if !self.has_free_cell() {
            return None;
        }
        loop {
            let cell = self.grid.random_cell(rng);
            if !self.is_occupied(cell) {
                return Some(cell);
            }
        }
    }

    /// Number of rounds started so far.
    #[must_use]
    pub const fn current_round(&self) -> u32 {
        self.round
    }

    /// Advances the round counter and returns the new round number.
    pub fn advance_round(&mut self) -> u32 {
        self.round += 1;
        self.round
    }
}

// =============================================================================
// Tests
// =============================================================================
