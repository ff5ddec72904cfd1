//! Walk and search configuration, validation, and error types.
//!
//! [`WalkConfig`] controls a single policy evaluation; [`AnnealingConfig`]
//! shapes the optimization search. Both are validated before any
//! simulation runs.

use gridwalk_core::PolicyError;
use gridwalk_dist::CANONICAL_SEED;
use thiserror::Error;

/// Hard per-history step ceiling. A history that has not reached the goal
/// after this many steps marks the whole configuration non-convergent.
pub const DEFAULT_MAX_STEPS: u64 = 100_000;

// ── WalkConfig ──────────────────────────────────────────────────

/// Configuration for one [`Walk`](crate::Walk) evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalkConfig {
    /// Independent histories per evaluation. Default: 10,000.
    pub num_samples: u64,
    /// Per-history step ceiling. Default: [`DEFAULT_MAX_STEPS`].
    pub max_steps: u64,
    /// Seed the walk stream is reset to before every evaluation.
    /// Default: [`CANONICAL_SEED`].
    pub seed: u64,
    /// Record per-cell visits for heatmap output. Default: `false`.
    pub track_visits: bool,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            num_samples: 10_000,
            max_steps: DEFAULT_MAX_STEPS,
            seed: CANONICAL_SEED,
            track_visits: false,
        }
    }
}

impl WalkConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_samples == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if self.max_steps == 0 {
            return Err(ConfigError::ZeroStepCeiling);
        }
        Ok(())
    }
}

// ── AnnealingConfig ─────────────────────────────────────────────

/// Parameters of the simulated-annealing search.
///
/// Iteration `i` of `N` runs at temperature
/// `−initial_temperature · ln(i / N)`. Direction weights are perturbed with
/// standard deviation equal to the temperature, the rate with
/// `rate_spread` times that.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnealingConfig {
    /// Cooling coefficient `T_0`. Default: 0.1.
    pub initial_temperature: f64,
    /// Multiplier on the rate's perturbation width. Default: 10.0.
    pub rate_spread: f64,
    /// Floor applied to a perturbed rate. Default: 1e-3.
    pub min_rate: f64,
    /// Seed of the proposal and acceptance stream. Default: [`CANONICAL_SEED`].
    pub seed: u64,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 0.1,
            rate_spread: 10.0,
            min_rate: 1e-3,
            seed: CANONICAL_SEED,
        }
    }
}

impl AnnealingConfig {
    /// Check that every parameter is finite and positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("initial_temperature", self.initial_temperature),
            ("rate_spread", self.rate_spread),
            ("min_rate", self.min_rate),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidAnnealing {
                    reason: format!("{name} must be finite and > 0, got {value}"),
                });
            }
        }
        Ok(())
    }
}

// ── ConfigError ─────────────────────────────────────────────────

/// Errors detected while reading or validating configuration. All of these
/// abort before any simulation runs.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The batch mode keyword is neither `Entries` nor `Optimization`.
    #[error("input file parameter '{keyword}' not recognized")]
    UnknownMode {
        /// The keyword found.
        keyword: String,
    },
    /// The batch text ended before a required field.
    #[error("batch specification ended before {field}")]
    MissingField {
        /// What the parser was looking for.
        field: &'static str,
    },
    /// A field could not be parsed.
    #[error("invalid {field} value '{token}'")]
    InvalidValue {
        /// Field being read.
        field: &'static str,
        /// The offending token.
        token: String,
    },
    /// Tokens remain after the last expected field.
    #[error("{count} unexpected trailing tokens in batch specification")]
    TrailingData {
        /// Number of leftover tokens.
        count: usize,
    },
    /// An entry row is not a valid policy.
    #[error("entry {index}: {source}")]
    Policy {
        /// One-based row number in the batch file.
        index: usize,
        /// Why the row was rejected.
        source: PolicyError,
    },
    /// `num_samples` is zero.
    #[error("sample count must be at least 1")]
    ZeroSamples,
    /// `max_steps` is zero.
    #[error("step ceiling must be at least 1")]
    ZeroStepCeiling,
    /// An annealing parameter is out of range.
    #[error("invalid annealing configuration: {reason}")]
    InvalidAnnealing {
        /// Which parameter and why.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(WalkConfig::default().validate(), Ok(()));
        assert_eq!(AnnealingConfig::default().validate(), Ok(()));
        assert_eq!(WalkConfig::default().max_steps, 100_000);
    }

    #[test]
    fn zero_counts_rejected() {
        let cfg = WalkConfig {
            num_samples: 0,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroSamples));
        let cfg = WalkConfig {
            max_steps: 0,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroStepCeiling));
    }

    #[test]
    fn annealing_parameters_must_be_positive() {
        let cfg = AnnealingConfig {
            rate_spread: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidAnnealing { .. })));
        let cfg = AnnealingConfig {
            initial_temperature: 0.0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
