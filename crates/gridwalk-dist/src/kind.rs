//! Distribution tags.

use std::fmt;

/// Identifies which distribution an operation belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DistributionKind {
    /// See [`categorical`](crate::categorical).
    Categorical,
    /// See [`truncated_exponential`](crate::truncated_exponential).
    TruncatedExponential,
    /// See [`gaussian`](crate::gaussian).
    Gaussian,
    /// See [`uniform`](crate::uniform).
    Uniform,
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DistributionKind::Categorical => "categorical",
            DistributionKind::TruncatedExponential => "truncated exponential",
            DistributionKind::Gaussian => "gaussian",
            DistributionKind::Uniform => "uniform",
        };
        f.write_str(name)
    }
}
