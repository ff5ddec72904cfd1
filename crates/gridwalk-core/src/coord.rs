//! Unsigned grid coordinates with checked signed offsets.

use std::fmt;
use std::ops::Add;

use crate::direction::Direction;

/// A cell position on a 2-D grid.
///
/// `x` grows to the east and `y` grows to the south, so row 0 is the first
/// row of the input grid. Coordinates are always non-negative; applying a
/// signed offset goes through [`checked_offset`](Coord::checked_offset),
/// which returns `None` instead of wrapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    /// Column index.
    pub x: u32,
    /// Row index.
    pub y: u32,
}

impl Coord {
    /// Construct a coordinate from column and row.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Apply a signed offset, returning `None` if either axis would leave
    /// the `u32` range.
    ///
    /// Upper grid bounds are not checked here; that is the grid's job.
    pub fn checked_offset(self, dx: i64, dy: i64) -> Option<Self> {
        let dx = i32::try_from(dx).ok()?;
        let dy = i32::try_from(dy).ok()?;
        Some(Self {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }

    /// Component-wise addition, `None` if either sum overflows `u32`.
    pub fn checked_add(self, rhs: Coord) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(rhs.x)?,
            y: self.y.checked_add(rhs.y)?,
        })
    }

    /// Move `distance` cells in `direction`.
    pub fn checked_step(self, direction: Direction, distance: u32) -> Option<Self> {
        let (dx, dy) = direction.offset();
        let distance = i64::from(distance);
        self.checked_offset(i64::from(dx) * distance, i64::from(dy) * distance)
    }
}

impl Add for Coord {
    type Output = Coord;

    /// Component-wise addition of two non-negative coordinates.
    ///
    /// Overflow behaves like `u32` addition: a panic in debug builds,
    /// wraparound in release. Use [`Coord::checked_add`] when the sum may
    /// not fit, and [`Coord::checked_step`] for signed movement.
    fn add(self, rhs: Coord) -> Coord {
        Coord {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl From<(u32, u32)> for Coord {
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
