//! Uniform draws on `[0, 1)` for accept/reject tests.

use crate::source::RandomSource;

/// A raw draw from `rng`.
pub fn sample<R: RandomSource + ?Sized>(rng: &mut R) -> f64 {
    rng.sample()
}

/// Density of the unit uniform, which is 1 everywhere on its support.
pub fn evaluate(point: f64) -> f64 {
    if (0.0..1.0).contains(&point) {
        1.0
    } else {
        0.0
    }
}
