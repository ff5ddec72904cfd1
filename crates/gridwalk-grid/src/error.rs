//! Error types for grid construction, parsing, and visits.

use gridwalk_core::Coord;
use thiserror::Error;

/// Errors arising from building, parsing, or visiting a [`Grid`](crate::Grid).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// Width or height is zero.
    #[error("grid must have at least one cell")]
    EmptyGrid,
    /// A dimension exceeds what signed offsets can address.
    #[error("{name} {value} exceeds maximum {max}")]
    DimensionTooLarge {
        /// Which dimension.
        name: &'static str,
        /// The configured value.
        value: u32,
        /// The maximum allowed.
        max: u32,
    },
    /// `width * height` does not fit in memory addressing.
    #[error("{width}x{height} grid has too many cells")]
    TooManyCells {
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },
    /// The reachability map does not have `width * height` cells.
    #[error("expected {expected} cells, found {found}")]
    CellCountMismatch {
        /// `width * height`.
        expected: usize,
        /// Cells supplied.
        found: usize,
    },
    /// A coordinate lies outside the grid.
    #[error("coordinate {coord} out of bounds for {width}x{height} grid")]
    OutOfBounds {
        /// The offending coordinate.
        coord: Coord,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },
    /// The start or goal cell is blocked.
    #[error("{which} cell {coord} is not reachable")]
    UnreachableEndpoint {
        /// `"start"` or `"goal"`.
        which: &'static str,
        /// The blocked coordinate.
        coord: Coord,
    },
    /// A visit was recorded on a blocked cell.
    #[error("attempt to visit unreachable cell {coord}")]
    UnreachableVisit {
        /// The blocked coordinate.
        coord: Coord,
    },
    /// The grid text ended early.
    #[error("grid specification ended before {expected}")]
    MissingToken {
        /// What the parser was looking for.
        expected: &'static str,
    },
    /// A header value is not a non-negative integer.
    #[error("invalid {field} value '{token}'")]
    InvalidNumber {
        /// Header field being read.
        field: &'static str,
        /// The offending token.
        token: String,
    },
    /// A cell token contains something other than `0` and `1`.
    #[error("invalid cell token '{token}', expected binary digits")]
    InvalidCell {
        /// The offending token.
        token: String,
    },
}
