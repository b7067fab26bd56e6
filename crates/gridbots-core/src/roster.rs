//! Starting roster files.
//!
//! A roster is plain text, one directive per line. Blank lines and lines
//! starting with `#` are skipped.
//!
//! ```text
//! M by N : 5 8
//! steps: 30
//! robots: 2
//! GenericRobot Kira 3 4
//! GenericRobot Zed random random
//! ```
//!
//! The dimension line lists rows first, then columns. Robot coordinates are
//! `x` (column) then `y` (row); either may be `random`. The `robots:` line is
//! optional and only checked against the actual count.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::battlefield::Battlefield;
use crate::config::BattleConfig;
use crate::error::{BattleError, RosterError, SetupError};
use crate::event::BattleEvent;
use crate::grid::Grid;

/// The only kind a starting roster may contain.
pub const GENERIC_KIND: &str = "GenericRobot";

/// Minimum name length; shorter names are padded with `_`.
pub const MIN_NAME_LEN: usize = 3;

// =============================================================================
// Entries
// =============================================================================

/// One starting coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Coord {
    /// A fixed value; re-randomised if invalid at placement time.
    Fixed(i32),
    /// Drawn at placement time.
    Random,
}

impl Coord {
    /// The fixed value, if any.
    #[must_use]
    pub const fn fixed(self) -> Option<i32> {
        match self {
            Self::Fixed(value) => Some(value),
            Self::Random => None,
        }
    }
}

impl FromStr for Coord {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "random" {
            return Ok(Self::Random);
        }
        s.parse().map(Self::Fixed)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(value) => write!(f, "{value}"),
            Self::Random => f.write_str("random"),
        }
    }
}

/// One robot line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Robot name, already padded.
    pub name: String,
    /// Starting column.
    pub x: Coord,
    /// Starting row.
    pub y: Coord,
}

// =============================================================================
// Roster
// =============================================================================

/// A parsed roster file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    /// Grid height.
    pub rows: i32,
    /// Grid width.
    pub cols: i32,
    /// Step budget, if the file sets one.
    pub steps: Option<u32>,
    /// Robot count announced by a `robots:` line.
    pub declared: Option<usize>,
    /// Robots in file order.
    pub robots: Vec<RosterEntry>,
}

impl Roster {
    /// Reads and parses a roster file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let roster: Self = text.parse()?;
        tracing::debug!(
            path = %path.display(),
            robots = roster.robots.len(),
            "roster loaded"
        );
        Ok(roster)
    }

    /// The grid the roster describes.
    ///
    /// # Errors
    ///
    /// Fails if either dimension is not positive.
    pub fn grid(&self) -> Result<Grid, SetupError> {
        Grid::new(self.cols, self.rows)
    }

    /// Builds a battlefield with every robot placed.
    ///
    /// The roster's step budget, when present, replaces `config.max_rounds`.
    ///
    /// # Errors
    ///
    /// Fails if the grid is invalid, the robots do not fit, or two robots
    /// share a name.
    pub fn into_battlefield(self, config: BattleConfig, seed: u64) -> Result<Battlefield, BattleError> {
        let grid = self.grid()?;
        if self.robots.len() > grid.cell_count() {
            return Err(SetupError::Overcrowded {
                robots: self.robots.len(),
                cells: grid.cell_count(),
            }
            .into());
        }
        if let Some(declared) = self.declared.filter(|n| *n != self.robots.len()) {
            tracing::warn!(
                declared,
                actual = self.robots.len(),
                "roster robot count does not match its robots: line"
            );
        }

        let config = self
            .steps
            .map_or(config, |steps| config.with_max_rounds(steps));
        let mut battle = Battlefield::new(grid, config, seed);
        for entry in self.robots {
            battle.deploy(entry.name, entry.x.fixed(), entry.y.fixed())?;
        }
        battle.record(BattleEvent::RosterLoaded {
            cols: grid.cols(),
            rows: grid.rows(),
            steps: config.max_rounds,
            robots: battle.arena().robot_count(),
        });
        Ok(battle)
    }
}

impl FromStr for Roster {
    type Err = RosterError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut dims = None;
        let mut steps = None;
        let mut declared = None;
        let mut robots = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with("M by N") {
                dims = Some(parse_dimensions(line, line_no)?);
            } else if let Some(rest) = line.strip_prefix("steps:") {
                steps = Some(parse_number(rest, line_no, "step count")?);
            } else if let Some(rest) = line.strip_prefix("robots:") {
                declared = Some(parse_number(rest, line_no, "robot count")?);
            } else {
                robots.push(parse_robot(line, line_no)?);
            }
        }

        let (rows, cols) = dims.ok_or(RosterError::MissingDimensions)?;
        Ok(Self {
            rows,
            cols,
            steps,
            declared,
            robots,
        })
    }
}

// =============================================================================
// Line Parsers
// =============================================================================

fn malformed(line: usize, reason: impl Into<String>) -> RosterError {
    RosterError::Malformed {
        line,
        reason: reason.into(),
    }
}

/// `M by N : <rows> <cols>`
fn parse_dimensions(line: &str, line_no: usize) -> Result<(i32, i32), RosterError> {
    let values = line
        .split_once(':')
        .map(|(_, rest)| rest)
        .ok_or_else(|| malformed(line_no, "expected `M by N : <rows> <cols>`"))?;
    let mut fields = values.split_whitespace();
    let (Some(rows), Some(cols), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(malformed(line_no, "expected `M by N : <rows> <cols>`"));
    };
    let rows = rows
        .parse()
        .map_err(|_| malformed(line_no, format!("invalid row count `{rows}`")))?;
    let cols = cols
        .parse()
        .map_err(|_| malformed(line_no, format!("invalid column count `{cols}`")))?;
    Ok((rows, cols))
}

fn parse_number<T: FromStr>(rest: &str, line_no: usize, what: &str) -> Result<T, RosterError> {
    let value = rest.trim();
    value
        .parse()
        .map_err(|_| malformed(line_no, format!("invalid {what} `{value}`")))
}

/// `<kind> <name> <x> <y>`
fn parse_robot(line: &str, line_no: usize) -> Result<RosterEntry, RosterError> {
    let fields: Vec<_> = line.split_whitespace().collect();
    let [kind, name, x, y] = fields.as_slice() else {
        return Err(malformed(line_no, "expected `<kind> <name> <x> <y>`"));
    };
    if *kind != GENERIC_KIND {
        return Err(RosterError::UnknownKind {
            line: line_no,
            kind: (*kind).to_owned(),
        });
    }

    let x = x
        .parse()
        .map_err(|_| malformed(line_no, format!("invalid x coordinate `{x}`")))?;
    let y = y
        .parse()
        .map_err(|_| malformed(line_no, format!("invalid y coordinate `{y}`")))?;
    Ok(RosterEntry {
        name: pad_name(name),
        x,
        y,
    })
}

/// Pads `name` with `_` up to [`MIN_NAME_LEN`] characters.
#[must_use]
pub fn pad_name(name: &str) -> String {
    let mut padded = name.to_owned();
    for _ in name.chars().count()..MIN_NAME_LEN {
        padded.push('_');
    }
    padded
}
