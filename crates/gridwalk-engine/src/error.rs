//! Error types for walks, batch runs, and report parsing.

use gridwalk_core::{Coord, Direction, PolicyError};
use gridwalk_dist::DistError;
use gridwalk_grid::GridError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors from evaluating a single policy.
///
/// Domain errors end the evaluation of that configuration. Defects
/// ([`is_defect`](WalkError::is_defect)) mean the walker and grid disagree
/// about the reachable region and must never be swallowed.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum WalkError {
    /// The walk configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A distribution rejected its parameters or produced an out-of-support
    /// sample.
    #[error(transparent)]
    Distribution(#[from] DistError),
    /// A candidate policy could not be constructed.
    #[error(transparent)]
    Policy(#[from] PolicyError),
    /// The walker has no reachable neighbour.
    #[error("walker at {at} has no reachable neighbour")]
    Stranded {
        /// Where the walker is stuck.
        at: Coord,
    },
    /// `T` or the variance came out exactly zero, so no figure of merit
    /// exists.
    #[error("degenerate estimator: average steps {mean_steps}, mean {mean}, variance {variance}")]
    DegenerateEstimator {
        /// Plain average step count.
        mean_steps: f64,
        /// Weight-adjusted mean.
        mean: f64,
        /// Variance of the mean.
        variance: f64,
    },
    /// `sample_step` was called before the walker was placed.
    #[error("walker has not been placed on the grid")]
    Unplaced,
    /// A sampled step would leave the coordinate space.
    #[error("step of {distance} {direction} from {from} leaves the grid")]
    LeftGrid {
        /// Position before the step.
        from: Coord,
        /// Chosen direction.
        direction: Direction,
        /// Sampled distance.
        distance: u32,
    },
    /// A visit landed on a blocked or out-of-bounds cell.
    #[error("invalid grid state: {0}")]
    InvalidState(#[from] GridError),
}

impl WalkError {
    /// `true` for internal invariant violations between walker and grid.
    pub fn is_defect(&self) -> bool {
        matches!(
            self,
            WalkError::Unplaced | WalkError::LeftGrid { .. } | WalkError::InvalidState(_)
        )
    }
}

/// Errors from a [`WalkManager`](crate::WalkManager) run.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ManagerError {
    /// Configuration rejected before the run started.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Walk `index` failed.
    #[error("walk {index} failed: {source}")]
    Walk {
        /// Position of the walk in evaluation order.
        index: usize,
        /// The underlying failure.
        source: WalkError,
    },
}

/// Errors from reading back a report row.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ReportError {
    /// The row does not have eight weights, a rate, and a figure of merit.
    #[error("report row has {found} fields, expected {expected}")]
    WrongFieldCount {
        /// Fields expected.
        expected: usize,
        /// Fields found.
        found: usize,
    },
    /// A field is not a number.
    #[error("invalid number '{token}' in report row")]
    InvalidNumber {
        /// The offending token.
        token: String,
    },
    /// The weights and rate do not form a valid policy.
    #[error(transparent)]
    Policy(#[from] PolicyError),
}
