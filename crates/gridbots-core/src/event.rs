//! Battle events and the per-battle event log.
//!
//! Every notable action produces one [`BattleEvent`]. Events are typed values
//! so tests and embedders can match on them; [`fmt::Display`] renders the
//! human-readable log line.
//!
//! The [`EventLog`] records events in the exact order actions happen within a
//! round. Callers drain it with [`EventLog::take_events`], typically once per
//! round, and forward the events to a [`LogSink`](crate::sink::LogSink).
//!
//! # Example
//!
//! ```
//! use gridbots_core::event::{BattleEvent, EventLog};
//!
//! let mut log = EventLog::new();
//! log.record(BattleEvent::Thinking { name: "Ace".into() });
//!
//! let events = log.take_events();
//! assert_eq!(events[0].to_string(), "Ace is thinking about its next move.");
//! assert!(log.is_empty());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grid::{Direction, Position};

/// Formats a position as `(x, y)`.
struct At(Position);

impl fmt::Display for At {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0.x, self.0.y)
    }
}

// =============================================================================
// Outcome
// =============================================================================

/// Why a battle stopped.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Exactly one robot is alive.
    SoleSurvivor,
    /// No robot is alive.
    Annihilated,
    /// The step budget ran out with several robots still alive.
    BudgetExhausted,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SoleSurvivor => write!(f, "Only 1 robot left"),
            Self::Annihilated => write!(f, "No robots left"),
            Self::BudgetExhausted => write!(f, "Step budget exhausted"),
        }
    }
}

// =============================================================================
// Battle Event
// =============================================================================

/// One notable action or state change.
///
/// `name` is always the robot performing the action; `target` is the robot
/// on the receiving end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum BattleEvent {
    // Setup
    Loaded { name: String, at: Position },
    PlacementRerolled { name: String },
    RosterLoaded { cols: i32, rows: i32, steps: u32, robots: usize },

    // Round structure
    RoundStarted { round: u32 },
    Thinking { name: String },

    // Movement
    MoveRequested { name: String, to: Position },
    Moved { name: String, to: Position },
    MoveRejected { name: String, to: Position },
    Jumped { name: String, from: Position, to: Position, remaining: u32 },
    JumpRejected { name: String, to: Position },
    JumpsExhausted { name: String },
    ChargeBlocked { name: String, direction: Direction },
    Charging { name: String, from: Position, to: Position },
    ChargeEvaded { name: String, target: String },

    // Firing
    Fired { name: String, at: Position },
    FireOutOfBounds { name: String, at: Position },
    SelfDestructed { name: String },
    Hit { name: String, target: String },
    TrueDamage { target: String },
    Lifesteal { target: String },
    BurstFired { name: String, at: Position },
    BurstShotHit { name: String, shot: u32, target: String },
    BurstShotMissed { name: String, shot: u32 },
    LowAmmo { name: String },

    // Damage
    Damaged { name: String },
    HideAbsorbed { name: String, remaining: u32 },
    HideExhausted { name: String },

    // Vision
    Looking { name: String, at: Position },
    LookOutOfBounds { name: String, at: Position },
    ScanningAll { name: String },
    ScansExhausted { name: String },
    Spotted { name: String, target: String, at: Position },
    TrackerPlaced { name: String, target: String, remaining: u32 },
    TrackedSighting { name: String, target: String, at: Position },

    // Lifecycle
    Buried { name: String },
    Revived { name: String, at: Position, remaining: u32 },
    RevivalDeferred { name: String },
    Ascended { name: String },
    Promoted { name: String, kind: String },
    BattleEnded { outcome: Outcome },
}

impl fmt::Display for BattleEvent {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded { name, at } => write!(f, "Loaded robot {name} at {}", At(*at)),
            Self::PlacementRerolled { name } => {
                write!(f, "Invalid position for {name}. Randomizing new position")
            }
            Self::RosterLoaded {
                cols,
                rows,
                steps,
                robots,
            } => write!(
                f,
                "Finished loading file. Battlefield size: {cols}x{rows}, Steps: {steps}, Robots: {robots}"
            ),
            Self::RoundStarted { round } => write!(f, "Step: {round}"),
            Self::Thinking { name } => write!(f, "{name} is thinking about its next move."),

            Self::MoveRequested { name, to } => write!(f, "{name} wants to move to {}", At(*to)),
            Self::Moved { name, to } => write!(f, "{name} moves to {}", At(*to)),
            Self::MoveRejected { name, to } => {
                write!(f, "{name} cannot move to {}: invalid position", At(*to))
            }
            Self::Jumped {
                name,
                from,
                to,
                remaining,
            } => write!(
                f,
                "{name} jumps from {} to {}. Jumps left: {remaining}",
                At(*from),
                At(*to)
            ),
            Self::JumpRejected { name, to } => write!(
                f,
                "{name} tried to jump to {}. Invalid position. No jumps consumed.",
                At(*to)
            ),
            Self::JumpsExhausted { name } => write!(
                f,
                "{name} tried to jump but has no jumps left! Proceeding with normal movement."
            ),
            Self::ChargeBlocked { name, direction } => write!(
                f,
                "{name} is at the edge and cannot charge {direction}. Skipping move."
            ),
            Self::Charging { name, from, to } => write!(
                f,
                "{name} is charging through the line from {} towards {}, dealing damage to every robot along the path",
                At(*from),
                At(*to)
            ),
            Self::ChargeEvaded { name, target } => {
                write!(f, "{target} is hiding and evades {name}'s charge")
            }

            Self::Fired { name, at } => write!(f, "{name} fires at {}", At(*at)),
            Self::FireOutOfBounds { name, at } => write!(
                f,
                "{name} tried to fire at {} outside the battlefield.",
                At(*at)
            ),
            Self::SelfDestructed { name } => {
                write!(f, "{name} is out of shells and self-destructs!")
            }
            Self::Hit { name, target } => write!(f, "{name} hits {target}!"),
            Self::TrueDamage { target } => write!(
                f,
                "True damage triggered, directly reducing {target} revivals by 1"
            ),
            Self::Lifesteal { target } => write!(
                f,
                "Lifesteal triggered, {target} absorbs energy and gains 1 revival point!"
            ),
            Self::BurstFired { name, at } => {
                write!(f, "{name} performs semi-auto fire at {}", At(*at))
            }
            Self::BurstShotHit { name, shot, target } => {
                write!(f, "{name}'s shot #{shot} hits {target}!")
            }
            Self::BurstShotMissed { name, shot } => write!(f, "{name}'s shot #{shot} hit nothing."),
            Self::LowAmmo { name } => {
                write!(f, "{name} is low on shells, switching to normal shooting.")
            }

            Self::Damaged { name } => write!(f, "{name} is taking damage!"),
            Self::HideAbsorbed { name, remaining } => write!(
                f,
                "{name} is hiding and avoids the hit. Hides left: {remaining}"
            ),
            Self::HideExhausted { name } => write!(
                f,
                "{name} tried to hide but has no hides left! Taking damage!"
            ),

            Self::Looking { name, at } => write!(f, "{name} is looking at {}", At(*at)),
            Self::LookOutOfBounds { name, at } => write!(
                f,
                "{name} tried to look at {} outside the battlefield.",
                At(*at)
            ),
            Self::ScanningAll { name } => write!(f, "{name} is looking at the entire battlefield."),
            Self::ScansExhausted { name } => write!(
                f,
                "{name} tries to perform a scan but has no scans remaining. Proceeding with normal looking."
            ),
            Self::Spotted { name, target, at } => write!(f, "{name} found {target} at {}", At(*at)),
            Self::TrackerPlaced {
                name,
                target,
                remaining,
            } => write!(
                f,
                "{name} put a tracker on {target}. Trackers left: {remaining}"
            ),
            Self::TrackedSighting { name, target, at } => {
                write!(f, "{name} sees {target} at {} from the tracker.", At(*at))
            }

            Self::Buried { name } => write!(f, "{name} is dead. Sent to graveyard."),
            Self::Revived {
                name,
                at,
                remaining,
            } => write!(
                f,
                "{name} has been revived at {}. Remaining revivals: {remaining}",
                At(*at)
            ),
            Self::RevivalDeferred { name } => write!(
                f,
                "No free cell to revive {name}. Waiting for the next round."
            ),
            Self::Ascended { name } => write!(
                f,
                "Attempting to revive {name} but no revivals left. Letting them ascend."
            ),
            Self::Promoted { name, kind } => write!(f, "{name} upgraded to {kind}"),
            Self::BattleEnded { outcome } => write!(f, "{outcome}"),
        }
    }
}

// =============================================================================
// Event Log
// =============================================================================

/// Ordered buffer of events awaiting delivery to a sink.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<BattleEvent>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Appends an event.
    pub fn record(&mut self, event: BattleEvent) {
        tracing::trace!(target: "gridbots::event", "{event}");
        self.events.push(event);
    }

    /// Drains and returns all recorded events in the order they were recorded.
    pub fn take_events(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    /// Returns the events recorded since the last drain.
    #[must_use]
    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Number of buffered events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if no events are buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Discards all buffered events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
