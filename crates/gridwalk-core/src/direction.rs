//! The eight compass directions a walker can move in.

use std::fmt;

/// A compass direction, in clockwise order starting at North.
///
/// The discriminant is the index of the direction in a policy's weight
/// vector, so `Direction::ALL[d.index()] == d`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Direction {
    /// Row - 1.
    North = 0,
    /// Row - 1, column + 1.
    NorthEast = 1,
    /// Column + 1.
    East = 2,
    /// Row + 1, column + 1.
    SouthEast = 3,
    /// Row + 1.
    South = 4,
    /// Row + 1, column - 1.
    SouthWest = 5,
    /// Column - 1.
    West = 6,
    /// Row - 1, column - 1.
    NorthWest = 7,
}

impl Direction {
    /// Number of directions.
    pub const COUNT: usize = 8;

    /// All directions in clockwise order from North.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Position of this direction in [`Direction::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Unit offset `(dx, dy)`; `dy = -1` is one row up.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// The direction pointing the other way.
    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
        }
    }

    /// Short compass label, e.g. `"NE"`.
    pub const fn label(self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::NorthEast => "NE",
            Direction::East => "E",
            Direction::SouthEast => "SE",
            Direction::South => "S",
            Direction::SouthWest => "SW",
            Direction::West => "W",
            Direction::NorthWest => "NW",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
