//! Results of evaluating a policy.

use crate::policy::PolicyParameters;

/// Statistics of one converged Monte Carlo evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WalkOutcome {
    /// Number of histories sampled.
    pub histories: u64,
    /// Plain (unweighted) average step count, `T`.
    pub mean_steps: f64,
    /// Weight-adjusted estimate of the analog mean step count.
    pub mean: f64,
    /// Variance of `mean`, `R²`.
    pub variance: f64,
    /// Figure of merit, `1 / (T · R²)`.
    pub fom: f64,
}

impl WalkOutcome {
    /// Standard error of the mean estimate.
    pub fn std_error(&self) -> f64 {
        self.variance.sqrt()
    }
}

/// The result of running one policy through the walk driver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Evaluation {
    /// Every history reached the goal.
    Converged(WalkOutcome),
    /// A history hit the step ceiling; the evaluation stopped there.
    NonConvergent {
        /// Zero-based index of the history that hit the ceiling.
        history: u64,
        /// The ceiling that was exceeded.
        max_steps: u64,
    },
}

impl Evaluation {
    /// Figure of merit; zero for a non-convergent walk.
    pub fn fom(&self) -> f64 {
        match self {
            Evaluation::Converged(outcome) => outcome.fom,
            Evaluation::NonConvergent { .. } => 0.0,
        }
    }

    /// The converged statistics, if any.
    pub fn outcome(&self) -> Option<&WalkOutcome> {
        match self {
            Evaluation::Converged(outcome) => Some(outcome),
            Evaluation::NonConvergent { .. } => None,
        }
    }

    /// `true` if every history reached the goal.
    pub fn is_converged(&self) -> bool {
        matches!(self, Evaluation::Converged(_))
    }
}

/// A policy together with the evaluation it produced.
///
/// Records are written once and never modified.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WalkRecord {
    /// The evaluated policy.
    pub policy: PolicyParameters,
    /// What the walk driver reported for it.
    pub evaluation: Evaluation,
}

impl WalkRecord {
    /// Pair a policy with its evaluation.
    pub fn new(policy: PolicyParameters, evaluation: Evaluation) -> Self {
        Self { policy, evaluation }
    }

    /// Shorthand for `self.evaluation.fom()`.
    pub fn fom(&self) -> f64 {
        self.evaluation.fom()
    }
}
