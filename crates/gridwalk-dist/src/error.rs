//! Error types for sampling and evaluation.

use thiserror::Error;

use crate::kind::DistributionKind;

/// Domain errors raised by distribution functions.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum DistError {
    /// A point was sampled or evaluated outside the support `[0, bound]`.
    #[error("{kind} point {point} outside support [0, {bound}]")]
    OutsideSupport {
        /// Distribution that rejected the point.
        kind: DistributionKind,
        /// The offending point.
        point: u64,
        /// Upper end of the support.
        bound: u32,
    },
    /// The support is empty, e.g. a truncated exponential with bound 0.
    #[error("{kind} has an empty support")]
    EmptySupport {
        /// Distribution with nothing to sample.
        kind: DistributionKind,
    },
    /// A weight vector is empty, negative, non-finite, or sums to zero.
    #[error("{kind} weights are unusable: {reason}")]
    DegenerateWeights {
        /// Distribution given the weights.
        kind: DistributionKind,
        /// What is wrong with them.
        reason: String,
    },
    /// An index past the end of the weight vector.
    #[error("{kind} index {index} out of range for {len} weights")]
    IndexOutOfRange {
        /// Distribution evaluated.
        kind: DistributionKind,
        /// The offending index.
        index: usize,
        /// Number of weights.
        len: usize,
    },
    /// A rate or scale parameter is not finite and positive.
    #[error("{kind} parameter {name} is {value}")]
    InvalidParameter {
        /// Distribution given the parameter.
        kind: DistributionKind,
        /// Parameter name.
        name: &'static str,
        /// The offending value.
        value: f64,
    },
    /// Mean and standard deviation vectors differ in length.
    #[error("{kind} has {means} means but {stdevs} standard deviations")]
    ShapeMismatch {
        /// Distribution sampled.
        kind: DistributionKind,
        /// Length of the mean vector.
        means: usize,
        /// Length of the standard-deviation vector.
        stdevs: usize,
    },
}
