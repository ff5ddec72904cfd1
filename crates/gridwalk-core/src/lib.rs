//! Core types for the gridwalk Monte Carlo framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! vocabulary shared by every other gridwalk crate: grid coordinates, the
//! eight compass directions, walker policies, and the outcome records the
//! batch driver accumulates.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod coord;
pub mod direction;
pub mod error;
pub mod outcome;
pub mod policy;

pub use coord::Coord;
pub use direction::Direction;
pub use error::PolicyError;
pub use outcome::{Evaluation, WalkOutcome, WalkRecord};
pub use policy::PolicyParameters;
