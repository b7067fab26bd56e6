//! # Gridbots Core
//!
//! Deterministic simulation engine for turn-based robot battles on a grid.
//!
//! ## Architecture
//!
//! - **Entities**: robots with plain state components and a [`Loadout`]
//! - **Capabilities**: one behaviour per axis (movement, firing, vision) plus
//!   an optional defense modifier, composed freely
//! - **Resolvers**: shared combat and vision rules behind a [`TurnContext`]
//! - **Battlefield**: owns the arena, graveyard and random source, and runs
//!   the revive/act/triage/promote round loop
//!
//! Everything a battle does is recorded as a typed [`BattleEvent`]; a
//! [`LogSink`] turns events and board snapshots into text.
//!
//! ## Usage
//!
//! ```
//! use gridbots_core::{BattleConfig, MemorySink, Roster};
//!
//! let roster: Roster = "M by N : 4 4\nsteps: 5\nGenericRobot Ace 0 0\nGenericRobot Bob 3 3"
//!     .parse()?;
//! let mut battle = roster.into_battlefield(BattleConfig::default(), 42)?;
//! let summary = battle.run(&mut MemorySink::new())?;
//! assert!(summary.rounds <= 5);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arena;
pub mod battlefield;
pub mod capability;
pub mod config;
pub mod display;
pub mod entity;
pub mod error;
pub mod event;
pub mod grid;
pub mod resolver;
pub mod roster;
pub mod sink;
pub mod upgrade;

pub use arena::Arena;
pub use battlefield::{BattleSummary, Battlefield};
pub use capability::{Defense, Firing, Loadout, Movement, Vision};
pub use config::{BattleConfig, CombatOdds, RobotDefaults};
pub use display::Board;
pub use entity::{Robot, RobotId, RobotState, TierFlags};
pub use error::{BattleError, RosterError, SetupError};
pub use event::{BattleEvent, EventLog, Outcome};
pub use grid::{Direction, Grid, Position};
pub use resolver::TurnContext;
pub use roster::Roster;
pub use sink::{LogSink, MemorySink, TeeSink, WriterSink};

#[cfg(test)]
mod tests;
