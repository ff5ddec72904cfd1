//! Scoped access to a grid's visit counters.

use std::ops::Deref;

use gridwalk_core::Coord;

use crate::error::GridError;
use crate::grid::Grid;

/// Exclusive borrow of a [`Grid`] for the duration of one walk run.
///
/// The scope is the only way to record visits. Dropping it clears every
/// counter, so one configuration's visits can never leak into the next.
/// Read the heatmap with [`Grid::average_visit_density`] (through `Deref`)
/// before the scope ends.
pub struct VisitScope<'g> {
    grid: &'g mut Grid,
}

impl<'g> VisitScope<'g> {
    pub(crate) fn new(grid: &'g mut Grid) -> Self {
        Self { grid }
    }

    /// Record a visit at `coord`.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` or `UnreachableVisit` if `coord` is not a reachable
    /// cell.
    pub fn visit(&mut self, coord: Coord) -> Result<(), GridError> {
        self.grid.visit(coord)
    }

    /// The underlying grid.
    pub fn grid(&self) -> &Grid {
        self.grid
    }
}

impl Deref for VisitScope<'_> {
    type Target = Grid;

    fn deref(&self) -> &Grid {
        self.grid
    }
}

impl Drop for VisitScope<'_> {
    fn drop(&mut self) {
        self.grid.clear_visits();
    }
}
