//! Error types for policy construction.

use thiserror::Error;

/// Errors arising from constructing a [`PolicyParameters`](crate::PolicyParameters).
#[derive(Clone, Debug, PartialEq, Error)]
pub enum PolicyError {
    /// A row did not hold exactly eight weights plus a rate.
    #[error("policy row has {found} values, expected {expected}")]
    WrongLength {
        /// Number of values expected.
        expected: usize,
        /// Number of values supplied.
        found: usize,
    },
    /// A direction weight is negative, NaN, or infinite.
    #[error("direction weight {index} is {value}; weights must be finite and >= 0")]
    InvalidWeight {
        /// Index of the offending weight.
        index: usize,
        /// The offending value.
        value: f64,
    },
    /// All direction weights are zero.
    #[error("direction weights sum to zero")]
    ZeroWeights,
    /// The step-length rate is not a finite positive number.
    #[error("rate parameter is {value}; it must be finite and > 0")]
    InvalidRate {
        /// The offending value.
        value: f64,
    },
}
