//! Simulated-annealing primitives: cooling schedule, proposals, and the
//! acceptance rule.
//!
//! The search maximizes the figure of merit. A candidate at least as good
//! as the incumbent is always accepted; a worse one is accepted with
//! probability `exp((candidate − incumbent) / T)`.

use gridwalk_core::{Direction, PolicyParameters};
use gridwalk_dist::{gaussian, RandomSource};

use crate::config::AnnealingConfig;
use crate::error::WalkError;

/// Temperature of iteration `iteration` out of `budget`:
/// `−initial · ln(iteration / budget)`.
///
/// Positive for `0 < iteration < budget` and zero at `iteration == budget`.
pub fn temperature(iteration: u64, budget: u64, initial: f64) -> f64 {
    -initial * (iteration as f64 / budget as f64).ln()
}

/// Probability of moving from an incumbent with FOM `incumbent` to a
/// candidate with FOM `candidate` at `temperature`.
///
/// Always in `[0, 1]`. Indeterminate comparisons (NaN inputs) are never
/// accepted.
pub fn acceptance_probability(candidate: f64, incumbent: f64, temperature: f64) -> f64 {
    if candidate >= incumbent {
        return 1.0;
    }
    let p = ((candidate - incumbent) / temperature).exp();
    if p.is_nan() {
        0.0
    } else {
        p.min(1.0)
    }
}

/// Perturb `base` with independent Gaussian noise.
///
/// Each direction weight gets standard deviation `temperature`, the rate
/// `rate_spread · temperature`. Negative weights are clamped to 0 and the
/// rate is floored at `min_rate`.
///
/// # Errors
///
/// `Distribution` if the temperature is not a valid standard deviation,
/// `Policy` if every weight clamps to 0.
pub fn propose<R: RandomSource + ?Sized>(
    rng: &mut R,
    base: &PolicyParameters,
    temperature: f64,
    config: &AnnealingConfig,
) -> Result<PolicyParameters, WalkError> {
    let means = base.to_row();
    let mut stdevs = [temperature; PolicyParameters::ROW_LEN];
    stdevs[Direction::COUNT] = config.rate_spread * temperature;

    let mut row = gaussian::sample(rng, &means, &stdevs)?;
    for weight in &mut row[..Direction::COUNT] {
        *weight = weight.max(0.0);
    }
    row[Direction::COUNT] = row[Direction::COUNT].max(config.min_rate);
    Ok(PolicyParameters::from_row(&row)?)
}
