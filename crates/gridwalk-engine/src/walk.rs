//! Single-policy Monte Carlo driver.

use gridwalk_core::{Evaluation, PolicyParameters};
use gridwalk_dist::RandomSource;
use gridwalk_grid::VisitScope;
use tracing::warn;

use crate::config::{ConfigError, WalkConfig};
use crate::error::WalkError;
use crate::moments::Moments;
use crate::walker::Walker;

/// Evaluates one policy over `num_samples` independent histories.
///
/// A `Walk` is reusable: [`reconfigure`](Walk::reconfigure) swaps the
/// policy and the next [`run`](Walk::run) starts from scratch.
#[derive(Clone, Debug)]
pub struct Walk {
    config: WalkConfig,
    walker: Walker,
}

impl Walk {
    /// Build a driver for `policy`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `config` fails validation.
    pub fn new(policy: PolicyParameters, config: WalkConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            walker: Walker::new(policy),
        })
    }

    /// Evaluate `policy` on the next run.
    pub fn reconfigure(&mut self, policy: PolicyParameters) {
        self.walker.set_policy(policy);
    }

    /// Turn per-cell visit recording on or off.
    pub fn set_track_visits(&mut self, track: bool) {
        self.config.track_visits = track;
    }

    /// Current configuration.
    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    /// Policy under evaluation.
    pub fn policy(&self) -> &PolicyParameters {
        self.walker.policy()
    }

    /// Run every history and reduce the moments.
    ///
    /// `rng` is reseeded to `config.seed` first, so two runs of the same
    /// policy draw the same stream. A history that has not reached the goal
    /// after `max_steps` steps stops the evaluation and yields
    /// [`Evaluation::NonConvergent`].
    ///
    /// # Errors
    ///
    /// Domain errors from step sampling, `DegenerateEstimator` from the
    /// final reduction, and the walker/grid defects.
    pub fn run<R: RandomSource + ?Sized>(
        &mut self,
        scope: &mut VisitScope<'_>,
        rng: &mut R,
    ) -> Result<Evaluation, WalkError> {
        rng.reseed(self.config.seed);
        let start = scope.start();
        let goal = scope.goal();
        let track = self.config.track_visits;
        let max_steps = self.config.max_steps;
        let mut moments = Moments::new();

        for history in 0..self.config.num_samples {
            self.walker.reset_for_new_history();
            self.walker.place(start);
            if track {
                scope.visit(start)?;
            }

            let mut steps: u64 = 0;
            while !self.walker.is_at(goal) {
                if steps >= max_steps {
                    warn!(history, max_steps, "step ceiling exceeded");
                    return Ok(Evaluation::NonConvergent { history, max_steps });
                }
                let step = self.walker.sample_step(scope.grid(), rng)?;
                if track {
                    scope.visit(step.to)?;
                }
                steps += 1;
            }
            moments.record(steps, self.walker.weight());
        }

        Ok(Evaluation::Converged(moments.finish()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwalk_core::Coord;
    use gridwalk_dist::ChaChaSource;
    use gridwalk_test_utils::{fixtures, ScriptedSource};

    fn config(num_samples: u64) -> WalkConfig {
        WalkConfig {
            num_samples,
            ..Default::default()
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert_eq!(
            Walk::new(PolicyParameters::analog(), config(0)).unwrap_err(),
            ConfigError::ZeroSamples
        );
    }

    #[test]
    fn forced_single_step_is_degenerate() {
        let mut grid = fixtures::two_cell();
        let mut walk = Walk::new(PolicyParameters::analog(), config(1000)).unwrap();
        let err = walk
            .run(&mut grid.visits(), &mut ChaChaSource::canonical())
            .unwrap_err();
        assert_eq!(
            err,
            WalkError::DegenerateEstimator {
                mean_steps: 1.0,
                mean: 1.0,
                variance: 0.0
            }
        );
    }

    #[test]
    fn ceiling_breach_is_non_convergent() {
        let mut grid = fixtures::sealed();
        let cfg = WalkConfig {
            num_samples: 10,
            max_steps: 50,
            ..Default::default()
        };
        let mut walk = Walk::new(PolicyParameters::analog(), cfg).unwrap();
        let eval = walk
            .run(&mut grid.visits(), &mut ChaChaSource::canonical())
            .unwrap();
        assert_eq!(
            eval,
            Evaluation::NonConvergent {
                history: 0,
                max_steps: 50
            }
        );
        assert_eq!(eval.fom(), 0.0);
    }

    #[test]
    fn tracking_counts_every_landing() {
        let mut grid = fixtures::two_cell();
        let mut walk = Walk::new(PolicyParameters::analog(), config(5)).unwrap();
        walk.set_track_visits(true);
        let mut scope = grid.visits();
        // The run ends in a degenerate estimator, but the visits stay in
        // the scope until it is dropped.
        let _ = walk.run(&mut scope, &mut ScriptedSource::constant(0.5));
        assert_eq!(scope.visit_count(Coord::new(0, 0)), Some(5));
        assert_eq!(scope.visit_count(Coord::new(0, 1)), Some(5));
        drop(scope);
        assert_eq!(grid.total_visits(), 0);
    }

    #[test]
    fn untracked_run_leaves_counters_alone() {
        let mut grid = fixtures::corridor(4);
        let mut walk = Walk::new(PolicyParameters::analog(), config(200)).unwrap();
        let mut scope = grid.visits();
        walk.run(&mut scope, &mut ChaChaSource::canonical()).unwrap();
        assert_eq!(scope.total_visits(), 0);
    }

    #[test]
    fn runs_are_reproducible() {
        let mut grid = fixtures::corridor(6);
        let mut walk = Walk::new(PolicyParameters::analog(), config(500)).unwrap();
        let mut rng = ChaChaSource::new(1);
        let a = walk.run(&mut grid.visits(), &mut rng).unwrap();
        let b = walk.run(&mut grid.visits(), &mut rng).unwrap();
        assert_eq!(a, b);
        assert!(a.is_converged());
    }
}
