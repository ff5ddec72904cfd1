//! Step-selection policies.

use std::fmt;

use crate::direction::Direction;
use crate::error::PolicyError;

/// Direction weights and step-length rate that drive a walker.
///
/// The eight weights are relative: they are non-negative and need not sum
/// to one, since the categorical sampler normalizes them over whichever
/// directions are reachable. `rate` is the λ of the truncated exponential
/// governing how far the walker travels in the chosen direction.
///
/// Weights are indexed by [`Direction::index`], North through North-West.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolicyParameters {
    weights: [f64; Direction::COUNT],
    rate: f64,
}

impl PolicyParameters {
    /// Number of values in a flattened policy row: eight weights and a rate.
    pub const ROW_LEN: usize = Direction::COUNT + 1;

    /// Rate of the unbiased step-length distribution.
    pub const ANALOG_RATE: f64 = 1.0;

    /// Validate and construct a policy.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any weight is negative or non-finite, if all weights
    /// are zero, or if `rate` is not finite and positive.
    pub fn new(weights: [f64; Direction::COUNT], rate: f64) -> Result<Self, PolicyError> {
        for (index, &value) in weights.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(PolicyError::InvalidWeight { index, value });
            }
        }
        if weights.iter().sum::<f64>() <= 0.0 {
            return Err(PolicyError::ZeroWeights);
        }
        if !rate.is_finite() || rate <= 0.0 {
            return Err(PolicyError::InvalidRate { value: rate });
        }
        Ok(Self { weights, rate })
    }

    /// The unbiased policy: every direction equally likely, rate 1.
    pub fn analog() -> Self {
        Self {
            weights: [1.0 / Direction::COUNT as f64; Direction::COUNT],
            rate: Self::ANALOG_RATE,
        }
    }

    /// Build a policy from a flattened `[w_N, .., w_NW, rate]` row.
    pub fn from_row(row: &[f64]) -> Result<Self, PolicyError> {
        if row.len() != Self::ROW_LEN {
            return Err(PolicyError::WrongLength {
                expected: Self::ROW_LEN,
                found: row.len(),
            });
        }
        let mut weights = [0.0; Direction::COUNT];
        weights.copy_from_slice(&row[..Direction::COUNT]);
        Self::new(weights, row[Direction::COUNT])
    }

    /// Flatten to `[w_N, .., w_NW, rate]`.
    pub fn to_row(&self) -> [f64; Self::ROW_LEN] {
        let mut row = [0.0; Self::ROW_LEN];
        row[..Direction::COUNT].copy_from_slice(&self.weights);
        row[Direction::COUNT] = self.rate;
        row
    }

    /// Raw (unnormalized) direction weights.
    pub fn weights(&self) -> &[f64; Direction::COUNT] {
        &self.weights
    }

    /// Raw weight of a single direction.
    pub fn weight(&self, direction: Direction) -> f64 {
        self.weights[direction.index()]
    }

    /// Step-length rate λ.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Direction weights scaled to sum to one.
    pub fn normalized_weights(&self) -> [f64; Direction::COUNT] {
        let total: f64 = self.weights.iter().sum();
        self.weights.map(|w| w / total)
    }

    /// `true` when this policy samples exactly like the analog walk, in
    /// which case no importance weight correction is needed.
    pub fn is_analog(&self) -> bool {
        let first = self.weights[0];
        self.rate == Self::ANALOG_RATE && self.weights.iter().all(|&w| w == first)
    }
}

impl Default for PolicyParameters {
    fn default() -> Self {
        Self::analog()
    }
}

impl fmt::Display for PolicyParameters {
    /// Normalized weights in compass order, then the rate.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (direction, weight) in Direction::ALL.iter().zip(self.normalized_weights()) {
            write!(f, "{direction}={weight:.4} ")?;
        }
        write!(f, "lambda={:.4}", self.rate)
    }
}
