//! Discretized exponential distribution truncated to `[0, bound]`.
//!
//! The continuous density is `λ·e^(−λx) / (1 − e^(−λb))` on `[0, b]`.
//! A sample is the ceiling of a continuous inverse-CDF draw, so integer
//! point `k` carries the mass between `k − 1` and `k`.

use crate::error::DistError;
use crate::kind::DistributionKind;
use crate::source::RandomSource;

const KIND: DistributionKind = DistributionKind::TruncatedExponential;

fn check_parameters(bound: u32, rate: f64) -> Result<(), DistError> {
    if bound == 0 {
        return Err(DistError::EmptySupport { kind: KIND });
    }
    if !rate.is_finite() || rate <= 0.0 {
        return Err(DistError::InvalidParameter {
            kind: KIND,
            name: "rate",
            value: rate,
        });
    }
    Ok(())
}

/// `1 − e^(−rate·x)`, accurate for small arguments.
fn unnormalized_cdf(rate: f64, x: f64) -> f64 {
    -(-rate * x).exp_m1()
}

/// Draw an integer in `[1, bound]`.
///
/// Returns `ceil(−ln(1 − u·(1 − e^(−λb))) / λ)`. The only way to land on 0
/// is a draw of exactly `u = 0`; that is lifted to 1 since a step always
/// moves at least one cell.
///
/// # Errors
///
/// `EmptySupport` if `bound` is 0, `InvalidParameter` if `rate` is not
/// finite and positive, `OutsideSupport` if round-off pushes the draw past
/// `bound`.
pub fn sample<R: RandomSource + ?Sized>(
    rng: &mut R,
    bound: u32,
    rate: f64,
) -> Result<u32, DistError> {
    check_parameters(bound, rate)?;
    let b = f64::from(bound);
    let u = rng.sample();
    let x = -(-u * unnormalized_cdf(rate, b)).ln_1p() / rate;
    let point = x.ceil().max(1.0);
    if point > b {
        return Err(DistError::OutsideSupport {
            kind: KIND,
            point: point as u64,
            bound,
        });
    }
    Ok(point as u32)
}

/// Probability mass at integer `point`.
///
/// `(F(k) − F(k − 1)) / F(b)` with `F(x) = 1 − e^(−λx)` and `F(−1)` taken
/// as 0, so `evaluate(b, λ, 0)` is always 0 and the masses over `0..=b`
/// sum to 1.
///
/// # Errors
///
/// `OutsideSupport` if `point > bound`, plus the parameter errors of
/// [`sample`].
pub fn evaluate(bound: u32, rate: f64, point: u32) -> Result<f64, DistError> {
    check_parameters(bound, rate)?;
    if point > bound {
        return Err(DistError::OutsideSupport {
            kind: KIND,
            point: u64::from(point),
            bound,
        });
    }
    let total = unnormalized_cdf(rate, f64::from(bound));
    let cdf = unnormalized_cdf(rate, f64::from(point)) / total;
    let cdf_prev = if point == 0 {
        0.0
    } else {
        unnormalized_cdf(rate, f64::from(point - 1)) / total
    };
    Ok(cdf - cdf_prev)
}
