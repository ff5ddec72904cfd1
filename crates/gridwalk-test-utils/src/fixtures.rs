//! Reusable grid layouts.
//!
//! - [`two_cell`]: 1x2, only South is ever reachable; every history takes
//!   exactly one step.
//! - [`corridor`]: 1xN vertical corridor, start at the top, goal at the
//!   bottom; path lengths vary, so the estimator is non-degenerate.
//! - [`open`]: fully reachable rectangle, start and goal in opposite corners.
//! - [`walled`]: 5x5 with an internal wall and a single gap.
//! - [`sealed`]: goal walled off from the start.

use gridwalk_core::Coord;
use gridwalk_grid::{parse_grid, Grid};

pub const TWO_CELL: &str = "dimensions 1 2\nstart 0 0\ngoal 0 1\n1\n1\n";

pub const WALLED: &str = "\
dimensions 5 5
start 0 0
goal 4 4
1 1 1 1 1
1 1 1 1 1
0 0 0 1 0
1 1 1 1 1
1 1 1 1 1
";

pub const SEALED: &str = "\
dimensions 3 3
start 0 0
goal 2 2
1 1 0
1 1 0
0 0 1
";

pub fn two_cell() -> Grid {
    parse_grid(TWO_CELL).unwrap()
}

pub fn corridor(length: u32) -> Grid {
    Grid::new(
        1,
        length,
        Coord::new(0, 0),
        Coord::new(0, length - 1),
        vec![true; length as usize],
    )
    .unwrap()
}

pub fn open(width: u32, height: u32) -> Grid {
    Grid::new(
        width,
        height,
        Coord::new(0, 0),
        Coord::new(width - 1, height - 1),
        vec![true; (width * height) as usize],
    )
    .unwrap()
}

pub fn walled() -> Grid {
    parse_grid(WALLED).unwrap()
}

pub fn sealed() -> Grid {
    parse_grid(SEALED).unwrap()
}
