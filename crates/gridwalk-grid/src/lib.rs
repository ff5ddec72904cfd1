//! Reachability grid for gridwalk simulations.
//!
//! A [`Grid`] is a rectangle of cells, each either reachable or blocked,
//! with a start and a goal cell. Geometry queries (which neighbours can be
//! stepped to, how far a straight run extends) are bounds-checked and never
//! rely on unsigned wraparound.
//!
//! Visit counters are only written through a [`VisitScope`], which borrows
//! the grid for one run and clears the counters when dropped.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
pub mod parse;
pub mod scope;

pub use error::GridError;
pub use grid::Grid;
pub use parse::parse_grid;
pub use scope::VisitScope;
