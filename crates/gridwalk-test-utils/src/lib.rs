//! Test utilities for gridwalk development.
//!
//! Provides a replayable [`ScriptedSource`] for injecting exact uniform
//! draws into samplers, and grid [`fixtures`] covering the degenerate and
//! branching layouts the engine tests rely on.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use gridwalk_dist::RandomSource;

/// A [`RandomSource`] that cycles through a fixed list of draws.
///
/// `reseed` rewinds to the first draw regardless of the seed, so a
/// scripted walk replays identically on every configuration.
#[derive(Clone, Debug)]
pub struct ScriptedSource {
    draws: Vec<f64>,
    cursor: usize,
    consumed: usize,
}

impl ScriptedSource {
    /// Panics if `draws` is empty or any draw lies outside `[0, 1)`.
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        let draws = draws.into();
        assert!(!draws.is_empty(), "ScriptedSource needs at least one draw");
        assert!(
            draws.iter().all(|u| (0.0..1.0).contains(u)),
            "scripted draws must lie in [0, 1)"
        );
        Self {
            draws,
            cursor: 0,
            consumed: 0,
        }
    }

    /// A source that always returns `u`.
    pub fn constant(u: f64) -> Self {
        Self::new(vec![u])
    }

    /// Total draws handed out since construction or the last reseed.
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl RandomSource for ScriptedSource {
    fn sample(&mut self) -> f64 {
        let u = self.draws[self.cursor];
        self.cursor = (self.cursor + 1) % self.draws.len();
        self.consumed += 1;
        u
    }

    fn reseed(&mut self, _seed: u64) {
        self.cursor = 0;
        self.consumed = 0;
    }
}
