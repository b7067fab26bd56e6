//! Text rendering of the battlefield.
//!
//! [`Board`] is a plain snapshot of which cell holds which label; it owns no
//! robots and can be rendered or inspected after the battle moves on.
//!
//! ```
//! use glam::IVec2;
//! use gridbots_core::display::Board;
//!
//! let mut board = Board::empty(2, 1);
//! board.place(IVec2::new(1, 0), "Ace");
//! assert_eq!(board.render_text(), "+___+_0_+_1_\n+_0_+___+Ace\n");
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::arena::Arena;
use crate::grid::Position;

/// Labels of the alive robots, keyed by row-major cell index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cols: i32,
    rows: i32,
    cells: BTreeMap<usize, String>,
}

impl Board {
    /// A board with no robots on it.
    #[must_use]
    pub const fn empty(cols: i32, rows: i32) -> Self {
        Self {
            cols,
            rows,
            cells: BTreeMap::new(),
        }
    }

    /// Snapshots every alive robot in `arena`.
    #[must_use]
    pub fn from_arena(arena: &Arena) -> Self {
        let grid = arena.grid();
        let mut board = Self::empty(grid.cols(), grid.rows());
        for robot in arena.alive() {
            board.place(robot.position(), robot.board_label());
        }
        board
    }

    /// Puts `label` on `pos`. Positions off the board are ignored.
    pub fn place(&mut self, pos: Position, label: impl Into<String>) {
        if let Some(index) = self.index(pos) {
            self.cells.insert(index, label.into());
        }
    }

    /// Label at `pos`, if a robot stands there.
    #[must_use]
    pub fn label_at(&self, pos: Position) -> Option<&str> {
        self.index(pos)
            .and_then(|index| self.cells.get(&index))
            .map(String::as_str)
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.cells.len()
    }

    /// Board width.
    #[must_use]
    pub const fn cols(&self) -> i32 {
        self.cols
    }

    /// Board height.
    #[must_use]
    pub const fn rows(&self) -> i32 {
        self.rows
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.cols || pos.y >= self.rows {
            return None;
        }
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        let cols = usize::try_from(self.cols).ok()?;
        y.checked_mul(cols)?.checked_add(x)
    }

    /// Renders the board as text, one line per row plus a header line.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::from("+___");
        for x in 0..self.cols {
            out.push_str(&axis_cell(x));
        }
        out.push('\n');

        for y in 0..self.rows {
            out.push_str(&axis_cell(y));
            for x in 0..self.cols {
                match self.label_at(Position::new(x, y)) {
                    Some(label) => {
                        out.push('+');
                        out.push_str(label);
                    }
                    None => out.push_str("+___"),
                }
            }
            out.push('\n');
        }
        out
    }
}

/// Index cell of the header row or row prefix.
fn axis_cell(index: i32) -> String {
    if index < 10 {
        format!("+_{index}_")
    } else {
        format!("+_{index}")
    }
}

/// Renders the graveyard queue as `Graveyard : [a] [b] `.
#[must_use]
pub fn graveyard_line(names: &[String]) -> String {
    let mut line = String::from("Graveyard : ");
    for name in names {
        line.push('[');
        line.push_str(name);
        line.push_str("] ");
    }
    line
}
