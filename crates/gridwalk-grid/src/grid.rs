//! The reachability grid and its geometric queries.

use gridwalk_core::{Coord, Direction};
use smallvec::SmallVec;

use crate::error::GridError;
use crate::scope::VisitScope;

/// Per-cell state: static reachability plus a live visit counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Cell {
    reachable: bool,
    visits: u64,
}

/// A rectangular grid of reachable and blocked cells.
///
/// Cells are stored row-major: `(x, y)` lives at `y * width + x`. The
/// reachability map is fixed at construction. Visit counters change only
/// through a [`VisitScope`] obtained from [`Grid::visits`].
#[derive(Clone, Debug)]
pub struct Grid {
    width: u32,
    height: u32,
    start: Coord,
    goal: Coord,
    cells: Vec<Cell>,
}

impl Grid {
    /// Largest allowed width or height, so every axis fits in an `i32`.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Build a grid from a row-major reachability map.
    ///
    /// # Errors
    ///
    /// Returns `Err` if either dimension is 0 or above [`MAX_DIM`](Self::MAX_DIM),
    /// if `reachable.len() != width * height`, or if start or goal is out of
    /// bounds or blocked.
    pub fn new(
        width: u32,
        height: u32,
        start: Coord,
        goal: Coord,
        reachable: Vec<bool>,
    ) -> Result<Self, GridError> {
        let expected = Self::checked_cell_count(width, height)?;
        if reachable.len() != expected {
            return Err(GridError::CellCountMismatch {
                expected,
                found: reachable.len(),
            });
        }
        let grid = Self {
            width,
            height,
            start,
            goal,
            cells: reachable
                .into_iter()
                .map(|reachable| Cell {
                    reachable,
                    visits: 0,
                })
                .collect(),
        };
        for (which, coord) in [("start", start), ("goal", goal)] {
            if !grid.contains(coord) {
                return Err(grid.out_of_bounds(coord));
            }
            if !grid.is_reachable(coord) {
                return Err(GridError::UnreachableEndpoint { which, coord });
            }
        }
        Ok(grid)
    }

    /// `width * height`, once both dimensions are in range.
    ///
    /// # Errors
    ///
    /// `EmptyGrid` for a zero dimension, `DimensionTooLarge` above
    /// [`MAX_DIM`](Self::MAX_DIM), `TooManyCells` if the product overflows
    /// `usize`.
    pub fn checked_cell_count(width: u32, height: u32) -> Result<usize, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid);
        }
        for (name, value) in [("width", width), ("height", height)] {
            if value > Self::MAX_DIM {
                return Err(GridError::DimensionTooLarge {
                    name,
                    value,
                    max: Self::MAX_DIM,
                });
            }
        }
        (width as usize)
            .checked_mul(height as usize)
            .ok_or(GridError::TooManyCells { width, height })
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Where every history begins.
    pub fn start(&self) -> Coord {
        self.start
    }

    /// Where every history ends.
    pub fn goal(&self) -> Coord {
        self.goal
    }

    /// Total number of cells, reachable or not.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        if coord.x < self.width && coord.y < self.height {
            Some((coord.y as usize) * (self.width as usize) + (coord.x as usize))
        } else {
            None
        }
    }

    fn out_of_bounds(&self, coord: Coord) -> GridError {
        GridError::OutOfBounds {
            coord,
            width: self.width,
            height: self.height,
        }
    }

    /// `true` if `coord` lies inside the grid.
    pub fn contains(&self, coord: Coord) -> bool {
        self.index(coord).is_some()
    }

    /// `true` if `coord` is inside the grid and not blocked.
    pub fn is_reachable(&self, coord: Coord) -> bool {
        self.index(coord).is_some_and(|i| self.cells[i].reachable)
    }

    /// The adjacent cell in `direction`, if it exists and is reachable.
    pub fn neighbor(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        coord
            .checked_step(direction, 1)
            .filter(|&next| self.is_reachable(next))
    }

    /// Directions whose immediate neighbour is reachable, in compass order.
    pub fn reachable_directions(&self, coord: Coord) -> SmallVec<[Direction; 8]> {
        Direction::ALL
            .into_iter()
            .filter(|&d| self.neighbor(coord, d).is_some())
            .collect()
    }

    /// Number of contiguous reachable cells starting one step past `coord`
    /// in `direction`. Zero if the immediate neighbour is blocked or off
    /// the grid.
    pub fn run_length(&self, coord: Coord, direction: Direction) -> u32 {
        let mut count = 0;
        let mut runner = coord;
        while let Some(next) = self.neighbor(runner, direction) {
            runner = next;
            count += 1;
        }
        count
    }

    /// Times `coord` has been visited in the current scope, or `None` if it
    /// is off the grid.
    pub fn visit_count(&self, coord: Coord) -> Option<u64> {
        self.index(coord).map(|i| self.cells[i].visits)
    }

    /// Sum of all visit counters.
    pub fn total_visits(&self) -> u64 {
        self.cells.iter().map(|c| c.visits).sum()
    }

    /// Increment the visit counter at `coord`.
    ///
    /// A failure here means a walker left the reachable region, which is a
    /// defect in the walker, never a user error.
    pub(crate) fn visit(&mut self, coord: Coord) -> Result<(), GridError> {
        let i = self.index(coord).ok_or_else(|| self.out_of_bounds(coord))?;
        let cell = &mut self.cells[i];
        if !cell.reachable {
            return Err(GridError::UnreachableVisit { coord });
        }
        cell.visits += 1;
        Ok(())
    }

    /// Reset every visit counter to zero.
    pub fn clear_visits(&mut self) {
        for cell in &mut self.cells {
            cell.visits = 0;
        }
    }

    /// Average visits per history for every cell, one `Vec` per row.
    pub fn average_visit_density(&self, num_histories: u64) -> Vec<Vec<f64>> {
        let n = num_histories.max(1) as f64;
        self.cells
            .chunks(self.width as usize)
            .map(|row| row.iter().map(|c| c.visits as f64 / n).collect())
            .collect()
    }

    /// Borrow the grid for one run. Visit counters are cleared when the
    /// returned scope is dropped.
    pub fn visits(&mut self) -> VisitScope<'_> {
        VisitScope::new(self)
    }
}
