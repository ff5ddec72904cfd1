//! Text grid specifications.
//!
//! ```text
//! dimensions <width> <height>
//! start <x> <y>
//! goal <x> <y>
//! <height rows of width binary digits, 1 = reachable>
//! ```
//!
//! Tokens are whitespace-delimited and the header labels are not checked.
//! Cell digits may be separated (`1 0 1`) or packed (`101`); the first row
//! is `y = 0`.

use std::str::{FromStr, SplitWhitespace};

use gridwalk_core::Coord;

use crate::error::GridError;
use crate::grid::Grid;

struct Header<'a> {
    tokens: SplitWhitespace<'a>,
}

impl<'a> Header<'a> {
    fn next(&mut self, expected: &'static str) -> Result<&'a str, GridError> {
        self.tokens.next().ok_or(GridError::MissingToken { expected })
    }

    fn number(&mut self, field: &'static str) -> Result<u32, GridError> {
        let token = self.next(field)?;
        token.parse().map_err(|_| GridError::InvalidNumber {
            field,
            token: token.to_string(),
        })
    }

    /// A label token followed by two integers.
    fn labelled_pair(
        &mut self,
        label: &'static str,
        first: &'static str,
        second: &'static str,
    ) -> Result<(u32, u32), GridError> {
        self.next(label)?;
        Ok((self.number(first)?, self.number(second)?))
    }
}

/// Parse a grid specification.
///
/// # Errors
///
/// Any [`GridError`] from a short or malformed header, non-binary cell
/// tokens, the wrong number of cells, or an invalid start or goal.
pub fn parse_grid(text: &str) -> Result<Grid, GridError> {
    let mut header = Header {
        tokens: text.split_whitespace(),
    };
    let (width, height) = header.labelled_pair("dimensions label", "width", "height")?;
    let (sx, sy) = header.labelled_pair("start label", "start x", "start y")?;
    let (gx, gy) = header.labelled_pair("goal label", "goal x", "goal y")?;

    // Every cell takes at least one byte of text.
    let expected = Grid::checked_cell_count(width, height)?;
    let mut reachable = Vec::with_capacity(expected.min(text.len()));
    for token in header.tokens {
        for ch in token.chars() {
            match ch {
                '1' => reachable.push(true),
                '0' => reachable.push(false),
                _ => {
                    return Err(GridError::InvalidCell {
                        token: token.to_string(),
                    })
                }
            }
        }
    }

    Grid::new(
        width,
        height,
        Coord::new(sx, sy),
        Coord::new(gx, gy),
        reachable,
    )
}

impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_grid(s)
    }
}
