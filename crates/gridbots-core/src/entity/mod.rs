//! Robot identity and the robot container.
//!
//! - [`RobotId`]: stable handle into the [`Arena`](crate::arena::Arena)
//! - [`Robot`]: an id paired with its [`RobotState`]
//!
//! The graveyard queue and every behaviour refer to robots by [`RobotId`]
//! only. A despawned robot's id is never reused, so a stale id simply fails
//! to resolve.
//!
//! # Example
//!
//! ```
//! use gridbots_core::config::RobotDefaults;
//! use gridbots_core::entity::{Robot, RobotId, RobotState};
//! use glam::IVec2;
//!
//! let state = RobotState::generic("Ace", IVec2::new(1, 2), &RobotDefaults::default());
//! let robot = Robot::new(RobotId::new(7), state);
//!
//! assert_eq!(robot.id().as_u64(), 7);
//! assert!(robot.is_alive());
//! assert_eq!(robot.kind_label(), "GenericRobot");
//! ```

pub mod components;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use components::{Arsenal, Charges, Progress, RobotState, TierFlags, Vitals};

use crate::capability::Defense;
use crate::grid::Position;

/// Unique identifier for a robot.
///
/// Ids are assigned monotonically by the arena, so ordering by id is the
/// order robots were spawned in. That order is the battle's master list
/// order.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RobotId(u64);

impl RobotId {
    /// Creates a `RobotId` from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for RobotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RobotId({})", self.0)
    }
}

impl fmt::Display for RobotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RobotId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<RobotId> for u64 {
    fn from(id: RobotId) -> Self {
        id.0
    }
}

/// A robot on the battlefield.
///
/// Dead robots (zero lives) stay in the arena until the lifecycle manager
/// revives or discards them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Robot {
    id: RobotId,
    state: RobotState,
}

impl Robot {
    /// Pairs an id with a state.
    #[must_use]
    pub const fn new(id: RobotId, state: RobotState) -> Self {
        Self { id, state }
    }

    /// Returns the robot's identifier.
    #[must_use]
    pub const fn id(&self) -> RobotId {
        self.id
    }

    /// Returns the robot's state.
    #[must_use]
    pub const fn state(&self) -> &RobotState {
        &self.state
    }

    /// Returns the robot's state mutably.
    #[must_use]
    pub fn state_mut(&mut self) -> &mut RobotState {
        &mut self.state
    }

    /// Returns the robot's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.state.name
    }

    /// Returns the robot's current cell.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.state.position
    }

    /// Returns `true` while the robot has lives left.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.state.vitals.lives > 0
    }

    /// Returns `true` if incoming damage would currently be absorbed.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.state.loadout.defense == Some(Defense::Hide) && self.state.charges.hides > 0
    }

    /// Display name of the robot's kind, e.g. `HideLongshotScoutBot`.
    #[must_use]
    pub fn kind_label(&self) -> String {
        self.state.loadout.kind_label()
    }

    /// Three-character board label.
    #[must_use]
    pub fn board_label(&self) -> String {
        self.state.name.chars().take(3).collect()
    }
}
