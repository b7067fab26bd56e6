//! Error types for battle setup and roster loading.
//!
//! Nothing inside the round loop fails: invalid targets and exhausted
//! resources are handled by the behaviours themselves and only show up in the
//! event log. The errors here cover building a battle in the first place.

use std::io;

use thiserror::Error;

use crate::grid::Position;

/// Failure while constructing a battlefield or placing robots on it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    /// Grid dimensions must both be positive.
    #[error("grid dimensions must be positive, got {cols}x{rows}")]
    InvalidDimensions {
        /// Requested width.
        cols: i32,
        /// Requested height.
        rows: i32,
    },
    /// A fixed starting position is off the grid.
    #[error("{name} cannot start at ({}, {}): outside the battlefield", .position.x, .position.y)]
    OutOfBounds {
        /// Robot name.
        name: String,
        /// Rejected position.
        position: Position,
    },
    /// A fixed starting position already holds a live robot.
    #[error("{name} cannot start at ({}, {}): cell is occupied", .position.x, .position.y)]
    Occupied {
        /// Robot name.
        name: String,
        /// Rejected position.
        position: Position,
    },
    /// Robot names identify trackers and log lines, so they must be unique.
    #[error("duplicate robot name: {0}")]
    DuplicateName(String),
    /// More robots were requested than the grid has cells.
    #[error("{robots} robots do not fit on a grid of {cells} cells")]
    Overcrowded {
        /// Number of robots requested.
        robots: usize,
        /// Number of cells available.
        cells: usize,
    },
}

/// Failure while reading a roster file.
#[derive(Debug, Error)]
pub enum RosterError {
    /// The roster could not be read.
    #[error("failed to read roster: {0}")]
    Io(#[from] io::Error),
    /// A line could not be parsed.
    #[error("line {line}: {reason}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },
    /// Only `GenericRobot` entries may appear in a starting roster.
    #[error("line {line}: unknown robot kind `{kind}`")]
    UnknownKind {
        /// 1-based line number.
        line: usize,
        /// The kind that was given.
        kind: String,
    },
    /// The `M by N` dimension line never appeared.
    #[error("roster has no `M by N` dimension line")]
    MissingDimensions,
    /// The dimension line was present but described an invalid grid.
    #[error(transparent)]
    Setup(#[from] SetupError),
}

/// Top-level error for running a battle end to end.
#[derive(Debug, Error)]
pub enum BattleError {
    /// Building the battlefield failed.
    #[error(transparent)]
    Setup(#[from] SetupError),
    /// Reading the roster failed.
    #[error(transparent)]
    Roster(#[from] RosterError),
    /// Writing to a log sink failed.
    #[error("log sink failed: {0}")]
    Sink(#[from] io::Error),
}
