//! Running moments of the per-history step counts.
//!
//! Weighted step counts are accumulated with Welford's update so the
//! variance never comes from subtracting two large, nearly equal sums.
//! Partial accumulators from disjoint sets of histories combine with
//! [`Moments::merge`].

use gridwalk_core::WalkOutcome;

use crate::error::WalkError;

/// Accumulator for one policy evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Moments {
    count: u64,
    raw_steps: u64,
    mean: f64,
    m2: f64,
}

impl Moments {
    /// An empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one history that reached the goal after `steps` steps with
    /// final importance weight `weight`.
    pub fn record(&mut self, steps: u64, weight: f64) {
        let x = weight * steps as f64;
        self.count += 1;
        self.raw_steps += steps;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    /// Fold in the moments of a disjoint set of histories.
    pub fn merge(&mut self, other: &Moments) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }
        let (na, nb) = (self.count as f64, other.count as f64);
        let n = na + nb;
        let delta = other.mean - self.mean;
        self.mean += delta * nb / n;
        self.m2 += other.m2 + delta * delta * na * nb / n;
        self.count += other.count;
        self.raw_steps += other.raw_steps;
    }

    /// Histories recorded.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Plain average step count `T`.
    pub fn mean_steps(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.raw_steps as f64 / self.count as f64
    }

    /// Weight-adjusted mean step count.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Variance of [`mean`](Self::mean): the population variance of the
    /// weighted step counts divided by the history count.
    pub fn variance_of_mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let n = self.count as f64;
        self.m2 / n / n
    }

    /// Reduce to a [`WalkOutcome`] with `FOM = 1 / (T · variance)`.
    ///
    /// # Errors
    ///
    /// `DegenerateEstimator` when `T` or the variance is exactly zero.
    pub fn finish(&self) -> Result<WalkOutcome, WalkError> {
        let mean_steps = self.mean_steps();
        let variance = self.variance_of_mean();
        if mean_steps == 0.0 || variance == 0.0 {
            return Err(WalkError::DegenerateEstimator {
                mean_steps,
                mean: self.mean,
                variance,
            });
        }
        Ok(WalkOutcome {
            histories: self.count,
            mean_steps,
            mean: self.mean,
            variance,
            fom: 1.0 / (mean_steps * variance),
        })
    }
}
