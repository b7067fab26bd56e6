//! Grid geometry for the battlefield.
//!
//! The battlefield is a `cols × rows` lattice of integer cells. Positions are
//! [`IVec2`] values where `x` is the column and `y` is the row, both counted
//! from the top-left corner.
//!
//! The grid only answers geometric questions (bounds, neighbourhoods, line
//! sweeps). Occupancy depends on which robots are alive, so it lives on the
//! [`Arena`](crate::arena::Arena).
//!
//! # Example
//!
//! ```
//! use gridbots_core::grid::{Direction, Grid, Position};
//!
//! let grid = Grid::new(5, 5).unwrap();
//! assert!(grid.is_inside(Position::new(4, 4)));
//! assert!(!grid.is_inside(Position::new(5, 0)));
//! assert_eq!(grid.distance_to_edge(Position::new(1, 3), Direction::Up), 3);
//! ```

use std::fmt;

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SetupError;

/// A cell coordinate on the grid (`x` = column, `y` = row).
pub type Position = IVec2;

// =============================================================================
// Direction
// =============================================================================

/// One of the four cardinal directions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards the last row.
    Down,
    /// Towards column 0.
    Left,
    /// Towards the last column.
    Right,
}

impl Direction {
    /// All directions, in the order used for uniform random selection.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit step for this direction.
    #[must_use]
    pub const fn delta(self) -> Position {
        match self {
            Self::Up => IVec2::new(0, -1),
            Self::Down => IVec2::new(0, 1),
            Self::Left => IVec2::new(-1, 0),
            Self::Right => IVec2::new(1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

// =============================================================================
// Grid
// =============================================================================

/// Bounds of the battlefield.
///
/// # Invariants
///
/// - `cols > 0` and `rows > 0`
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cols: i32,
    rows: i32,
}

impl Grid {
    /// Creates a grid with the given width (`cols`) and height (`rows`).
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::InvalidDimensions`] if either dimension is not
    /// positive.
    pub fn new(cols: i32, rows: i32) -> Result<Self, SetupError> {
        if cols <= 0 || rows <= 0 {
            return Err(SetupError::InvalidDimensions { cols, rows });
        }
        Ok(Self { cols, rows })
    }

    /// Number of columns (width).
    #[must_use]
    pub const fn cols(&self) -> i32 {
        self.cols
    }

    /// Number of rows (height).
    #[must_use]
    pub const fn rows(&self) -> i32 {
        self.rows
    }

    /// Total number of cells.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn cell_count(&self) -> usize {
        (self.cols as usize) * (self.rows as usize)
    }

    /// Returns `true` if `pos` lies within `[0, cols) × [0, rows)`.
    #[must_use]
    pub const fn is_inside(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.cols && pos.y < self.rows
    }

    /// Draws a uniformly random in-bounds cell.
    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> Position {
        let x = rng.gen_range(0..self.cols);
        let y = rng.gen_range(0..self.rows);
        IVec2::new(x, y)
    }

    /// The 3×3 block centred on `center`, clipped to the grid.
    ///
    /// Cells are listed column-major (x outer, y inner).
    #[must_use]
    pub fn neighborhood(&self, center: Position) -> Vec<Position> {
        let mut cells = Vec::with_capacity(9);
        for dx in -1..=1 {
            for dy in -1..=1 {
                let cell = center + IVec2::new(dx, dy);
                if self.is_inside(cell) {
                    cells.push(cell);
                }
            }
        }
        cells
    }

    /// Number of steps from `pos` to the board edge travelling in `direction`.
    ///
    /// Zero means `pos` already sits on that edge.
    #[must_use]
    pub const fn distance_to_edge(&self, pos: Position, direction: Direction) -> i32 {
        match direction {
            Direction::Up => pos.y,
            Direction::Down => self.rows - 1 - pos.y,
            Direction::Left => pos.x,
            Direction::Right => self.cols - 1 - pos.x,
        }
    }

    /// Cells swept travelling `len` steps from `from` in `direction`.
    ///
    /// The start cell is excluded; the final cell is included. Cells outside
    /// the grid are dropped.
    #[must_use]
    pub fn sweep(&self, from: Position, direction: Direction, len: i32) -> Vec<Position> {
        let step = direction.delta();
        (1..=len)
            .map(|i| from + step * i)
            .filter(|cell| self.is_inside(*cell))
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.cols, self.rows)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    mod construction_tests {
        use super::*;

        #[test]
        fn rejects_zero_and_negative_dimensions() {
            assert!(matches!(
                Grid::new(0, 5),
                Err(SetupError::InvalidDimensions { cols: 0, rows: 5 })
            ));
            assert!(Grid::new(5, -1).is_err());
        }

        #[test]
        fn cell_count_is_area() {
            let grid = Grid::new(4, 3).unwrap();
            assert_eq!(grid.cell_count(), 12);
            assert_eq!(grid.to_string(), "4x3");
        }
    }

    mod bounds_tests {
        use super::*;

        #[test]
        fn corners_are_inside() {
            let grid = Grid::new(5, 3).unwrap();
            assert!(grid.is_inside(IVec2::new(0, 0)));
            assert!(grid.is_inside(IVec2::new(4, 2)));
        }

        #[test]
        fn width_and_height_are_not_swapped() {
            let grid = Grid::new(5, 3).unwrap();
            assert!(grid.is_inside(IVec2::new(4, 0)));
            assert!(!grid.is_inside(IVec2::new(0, 4)));
        }

        #[test]
        fn negative_coordinates_are_outside() {
            let grid = Grid::new(5, 5).unwrap();
            assert!(!grid.is_inside(IVec2::new(-1, 0)));
            assert!(!grid.is_inside(IVec2::new(0, -1)));
        }

        #[test]
        fn random_cell_stays_inside() {
            let grid = Grid::new(3, 7).unwrap();
            let mut rng = ChaCha8Rng::seed_from_u64(9);
            for _ in 0..500 {
                assert!(grid.is_inside(grid.random_cell(&mut rng)));
            }
        }
    }

    mod neighborhood_tests {
        use super::*;

        #[test]
        fn interior_cell_has_nine_neighbours() {
            let grid = Grid::new(5, 5).unwrap();
            let cells = grid.neighborhood(IVec2::new(2, 2));
            assert_eq!(cells.len(), 9);
            assert!(cells.contains(&IVec2::new(2, 2)));
        }

        #[test]
        fn corner_is_clipped() {
            let grid = Grid::new(5, 5).unwrap();
            let cells = grid.neighborhood(IVec2::new(0, 0));
            assert_eq!(
                cells,
                vec![
                    IVec2::new(0, 0),
                    IVec2::new(0, 1),
                    IVec2::new(1, 0),
                    IVec2::new(1, 1)
                ]
            );
        }
    }

    mod sweep_tests {
        use super::*;

        #[test]
        fn distance_to_each_edge() {
            let grid = Grid::new(6, 4).unwrap();
            let pos = IVec2::new(2, 1);
            assert_eq!(grid.distance_to_edge(pos, Direction::Up), 1);
            assert_eq!(grid.distance_to_edge(pos, Direction::Down), 2);
            assert_eq!(grid.distance_to_edge(pos, Direction::Left), 2);
            assert_eq!(grid.distance_to_edge(pos, Direction::Right), 3);
        }

        #[test]
        fn sweep_excludes_start_and_includes_end() {
            let grid = Grid::new(6, 6).unwrap();
            let cells = grid.sweep(IVec2::new(1, 1), Direction::Right, 3);
            assert_eq!(
                cells,
                vec![IVec2::new(2, 1), IVec2::new(3, 1), IVec2::new(4, 1)]
            );
        }

        #[test]
        fn zero_length_sweep_is_empty() {
            let grid = Grid::new(6, 6).unwrap();
            assert!(grid.sweep(IVec2::new(1, 1), Direction::Up, 0).is_empty());
        }

        #[test]
        fn sweep_drops_cells_past_the_edge() {
            let grid = Grid::new(3, 3).unwrap();
            let cells = grid.sweep(IVec2::new(0, 1), Direction::Up, 4);
            assert_eq!(cells, vec![IVec2::new(0, 0)]);
        }
    }
}
