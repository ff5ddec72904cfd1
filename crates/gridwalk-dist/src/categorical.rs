//! Categorical distribution over the indices of a weight vector.

use crate::error::DistError;
use crate::kind::DistributionKind;
use crate::source::RandomSource;

const KIND: DistributionKind = DistributionKind::Categorical;

/// Sum of `weights` after checking they form a usable distribution.
fn checked_total(weights: &[f64]) -> Result<f64, DistError> {
    if weights.is_empty() {
        return Err(DistError::DegenerateWeights {
            kind: KIND,
            reason: "no weights".into(),
        });
    }
    if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(DistError::DegenerateWeights {
            kind: KIND,
            reason: format!("weight {bad} is negative or non-finite"),
        });
    }
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Err(DistError::DegenerateWeights {
            kind: KIND,
            reason: "weights sum to zero".into(),
        });
    }
    Ok(total)
}

/// Draw an index with probability `weights[i] / Σ weights`.
///
/// Uses the inverse CDF: one uniform draw is reduced by each normalized
/// weight in turn until it is no longer positive. Zero-weight entries are
/// never returned, including when round-off runs the loop to the end.
pub fn sample<R: RandomSource + ?Sized>(rng: &mut R, weights: &[f64]) -> Result<usize, DistError> {
    let total = checked_total(weights)?;
    let mut stop = rng.sample();
    for (i, &w) in weights.iter().enumerate() {
        stop -= w / total;
        if w > 0.0 && stop <= 0.0 {
            return Ok(i);
        }
    }
    // Round-off left a sliver of probability unassigned.
    Ok(weights
        .iter()
        .rposition(|&w| w > 0.0)
        .unwrap_or(weights.len() - 1))
}

/// Probability of drawing `index`: `weights[index] / Σ weights`.
pub fn evaluate(weights: &[f64], index: usize) -> Result<f64, DistError> {
    let total = checked_total(weights)?;
    let w = weights.get(index).ok_or(DistError::IndexOutOfRange {
        kind: KIND,
        index,
        len: weights.len(),
    })?;
    Ok(w / total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ChaChaSource;
    use proptest::prelude::*;

    struct Fixed(f64);

    impl RandomSource for Fixed {
        fn sample(&mut self) -> f64 {
            self.0
        }
        fn reseed(&mut self, _seed: u64) {}
    }

    #[test]
    fn inverse_cdf_boundaries() {
        let w = [1.0, 1.0, 2.0];
        assert_eq!(sample(&mut Fixed(0.0), &w).unwrap(), 0);
        assert_eq!(sample(&mut Fixed(0.25), &w).unwrap(), 0);
        assert_eq!(sample(&mut Fixed(0.3), &w).unwrap(), 1);
        assert_eq!(sample(&mut Fixed(0.6), &w).unwrap(), 2);
        assert_eq!(sample(&mut Fixed(0.999_999), &w).unwrap(), 2);
    }

    #[test]
    fn zero_weights_are_never_drawn() {
        let w = [0.0, 3.0, 0.0];
        assert_eq!(sample(&mut Fixed(0.0), &w).unwrap(), 1);
        // Past the end of the CDF: falls back to the last positive weight.
        assert_eq!(sample(&mut Fixed(1.5), &w).unwrap(), 1);
    }

    #[test]
    fn rejects_degenerate_weights() {
        let mut src = Fixed(0.5);
        assert!(matches!(sample(&mut src, &[]), Err(DistError::DegenerateWeights { .. })));
        assert!(matches!(sample(&mut src, &[0.0, 0.0]), Err(DistError::DegenerateWeights { .. })));
        assert!(matches!(evaluate(&[1.0, -1.0], 0), Err(DistError::DegenerateWeights { .. })));
        assert!(matches!(evaluate(&[1.0, f64::NAN], 0), Err(DistError::DegenerateWeights { .. })));
        assert_eq!(
            evaluate(&[1.0], 1),
            Err(DistError::IndexOutOfRange {
                kind: DistributionKind::Categorical,
                index: 1,
                len: 1
            })
        );
    }

    #[test]
    fn empirical_frequencies_match_evaluate() {
        let w = [0.5, 2.0, 1.0, 0.25, 3.0, 1.0, 0.0, 0.25];
        let mut src = ChaChaSource::new(99);
        let draws = 200_000;
        let mut counts = [0usize; 8];
        for _ in 0..draws {
            counts[sample(&mut src, &w).unwrap()] += 1;
        }
        for (i, &count) in counts.iter().enumerate() {
            let expected = evaluate(&w, i).unwrap();
            let observed = count as f64 / draws as f64;
            assert!(
                (observed - expected).abs() < 0.005,
                "index {i}: observed {observed}, expected {expected}"
            );
        }
        assert_eq!(counts[6], 0);
    }

    proptest! {
        #[test]
        fn evaluate_sums_to_one(w in prop::collection::vec(0.001f64..100.0, 1..12)) {
            let total: f64 = (0..w.len()).map(|i| evaluate(&w, i).unwrap()).sum();
            prop_assert!((total - 1.0).abs() < 1e-12);
        }

        #[test]
        fn sample_in_range(w in prop::collection::vec(0.001f64..100.0, 1..12), u in 0.0f64..1.0) {
            let i = sample(&mut Fixed(u), &w).unwrap();
            prop_assert!(i < w.len());
        }
    }
}
