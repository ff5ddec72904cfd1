//! Seedable uniform random sources.
//!
//! [`RandomSource`] is the only seam through which randomness enters a
//! simulation. The production implementation, [`ChaChaSource`], wraps a
//! ChaCha8 stream so that the same seed replays the same sequence of draws
//! on every platform.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Default seed for every gridwalk run.
///
/// Reseeding the walk stream to this value at the start of each
/// configuration makes biased and analog evaluations see the same
/// underlying uniform sequence.
pub const CANONICAL_SEED: u64 = 16_180_339;

/// A deterministic stream of uniform draws on `[0, 1)`.
pub trait RandomSource {
    /// Next uniform draw in `[0, 1)`.
    fn sample(&mut self) -> f64;

    /// Restart the stream from `seed`.
    fn reseed(&mut self, seed: u64);
}

/// ChaCha8-backed [`RandomSource`] that remembers its seed.
#[derive(Clone, Debug)]
pub struct ChaChaSource {
    seed: u64,
    rng: ChaCha8Rng,
}

impl ChaChaSource {
    /// Create a source positioned at the start of `seed`'s stream.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create a source seeded with [`CANONICAL_SEED`].
    pub fn canonical() -> Self {
        Self::new(CANONICAL_SEED)
    }

    /// Seed the stream was last started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Rewind to the start of the current seed's stream.
    pub fn reset(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
    }
}

impl Default for ChaChaSource {
    fn default() -> Self {
        Self::canonical()
    }
}

impl RandomSource for ChaChaSource {
    fn sample(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_lie_in_unit_interval() {
        let mut src = ChaChaSource::canonical();
        for _ in 0..10_000 {
            let u = src.sample();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn reset_replays_stream() {
        let mut src = ChaChaSource::new(7);
        let first: Vec<f64> = (0..16).map(|_| src.sample()).collect();
        src.reset();
        let again: Vec<f64> = (0..16).map(|_| src.sample()).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn reseed_switches_stream() {
        let mut a = ChaChaSource::new(1);
        let mut b = ChaChaSource::new(2);
        assert_ne!(a.sample(), b.sample());
        b.reseed(1);
        a.reset();
        assert_eq!(b.seed(), 1);
        assert_eq!(a.sample(), b.sample());
    }
}
