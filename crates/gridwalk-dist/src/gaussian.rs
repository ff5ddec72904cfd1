//! Independent normal components via the Box-Muller transform.
//!
//! Used for proposal perturbation in the annealing search; walkers never
//! draw from it.

use std::f64::consts::TAU;

use crate::error::DistError;
use crate::kind::DistributionKind;
use crate::source::RandomSource;

const KIND: DistributionKind = DistributionKind::Gaussian;

/// One standard normal deviate from two uniform draws.
pub fn standard_normal<R: RandomSource + ?Sized>(rng: &mut R) -> f64 {
    let u1 = rng.sample().max(1e-300); // avoid ln(0)
    let u2 = rng.sample();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

/// Draw `means[i] + stdevs[i] · N(0, 1)` for every component.
///
/// Components are sampled in order, two uniform draws each.
///
/// # Errors
///
/// `ShapeMismatch` if the slices differ in length, `InvalidParameter` if a
/// standard deviation is negative or non-finite.
pub fn sample<R: RandomSource + ?Sized>(
    rng: &mut R,
    means: &[f64],
    stdevs: &[f64],
) -> Result<Vec<f64>, DistError> {
    if means.len() != stdevs.len() {
        return Err(DistError::ShapeMismatch {
            kind: KIND,
            means: means.len(),
            stdevs: stdevs.len(),
        });
    }
    if let Some(&bad) = stdevs.iter().find(|s| !s.is_finite() || **s < 0.0) {
        return Err(DistError::InvalidParameter {
            kind: KIND,
            name: "stdev",
            value: bad,
        });
    }
    Ok(means
        .iter()
        .zip(stdevs)
        .map(|(&mean, &stdev)| mean + stdev * standard_normal(rng))
        .collect())
}
