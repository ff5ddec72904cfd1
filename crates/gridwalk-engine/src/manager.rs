//! Batch and optimization driver.
//!
//! [`WalkManager`] owns the random streams and the evaluated records. It
//! borrows the grid once per walk through a [`VisitScope`], so visit
//! counters never leak from one configuration into the next.

use std::io::{self, Write};
use std::time::Instant;

use gridwalk_core::{Evaluation, PolicyParameters, WalkRecord};
use gridwalk_dist::{uniform, ChaChaSource, RandomSource};
use gridwalk_grid::{Grid, VisitScope};
use tracing::{debug, info, warn};

use crate::anneal;
use crate::batch::{BatchMode, BatchSpec};
use crate::config::{AnnealingConfig, WalkConfig};
use crate::error::{ManagerError, WalkError};
use crate::report::{self, Heatmap};
use crate::walk::Walk;

/// Tracked re-runs of the analog and best policies at the end of an
/// optimization.
#[derive(Clone, Debug, PartialEq)]
pub struct FinalComparison {
    /// The analog policy's re-run.
    pub analog: WalkRecord,
    /// The best policy's re-run.
    pub best: WalkRecord,
    /// Visit density of the analog re-run.
    pub analog_heatmap: Heatmap,
    /// Visit density of the best re-run.
    pub best_heatmap: Heatmap,
}

/// Runs every walk a [`BatchSpec`] asks for and keeps the results.
///
/// Record 0 is always the analog policy. In entries mode the batch rows
/// follow in order; in optimization mode each accepted candidate is
/// appended.
///
/// `W` feeds every walk and is reseeded at the start of each one. `S`
/// drives annealing proposals and acceptance draws.
#[derive(Debug)]
pub struct WalkManager<W = ChaChaSource, S = ChaChaSource> {
    batch: BatchSpec,
    walk_config: WalkConfig,
    annealing: AnnealingConfig,
    walk_rng: W,
    search_rng: S,
    records: Vec<WalkRecord>,
    best: usize,
    heatmaps: Vec<Heatmap>,
    final_comparison: Option<FinalComparison>,
}

impl WalkManager {
    /// Validate `batch` and prepare to run it with default walk and
    /// annealing settings and seeded ChaCha streams.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the walk configuration implied by `batch` is
    /// invalid.
    pub fn new(batch: BatchSpec) -> Result<Self, ManagerError> {
        let walk_rng = ChaChaSource::new(batch.walk_config().seed);
        let search_rng = ChaChaSource::new(AnnealingConfig::default().seed);
        Self::with_sources(batch, walk_rng, search_rng)
    }
}

impl<W: RandomSource, S: RandomSource> WalkManager<W, S> {
    /// Like [`WalkManager::new`], drawing from the given streams as they
    /// are. The walk stream is still reseeded at the start of every walk.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the walk configuration implied by `batch` is
    /// invalid.
    pub fn with_sources(
        batch: BatchSpec,
        walk_rng: W,
        search_rng: S,
    ) -> Result<Self, ManagerError> {
        let walk_config = batch.walk_config();
        walk_config.validate()?;
        Ok(Self {
            walk_rng,
            search_rng,
            annealing: AnnealingConfig::default(),
            batch,
            walk_config,
            records: Vec::new(),
            best: 0,
            heatmaps: Vec::new(),
            final_comparison: None,
        })
    }

    /// Replace the annealing parameters and reseed the search stream.
    pub fn with_annealing(mut self, annealing: AnnealingConfig) -> Result<Self, ManagerError> {
        annealing.validate()?;
        self.search_rng.reseed(annealing.seed);
        self.annealing = annealing;
        Ok(self)
    }

    /// Replace the walk configuration, sample count included.
    pub fn with_walk_config(mut self, walk_config: WalkConfig) -> Result<Self, ManagerError> {
        walk_config.validate()?;
        self.walk_rng.reseed(walk_config.seed);
        self.walk_config = walk_config;
        Ok(self)
    }

    /// The batch being run.
    pub fn batch(&self) -> &BatchSpec {
        &self.batch
    }

    /// Configuration every walk runs with.
    pub fn walk_config(&self) -> &WalkConfig {
        &self.walk_config
    }

    /// Every evaluated record, analog first.
    pub fn records(&self) -> &[WalkRecord] {
        &self.records
    }

    /// The record with the highest figure of merit.
    pub fn best(&self) -> Option<&WalkRecord> {
        self.records.get(self.best)
    }

    /// Heatmaps of tracked walks, in evaluation order.
    pub fn heatmaps(&self) -> &[Heatmap] {
        &self.heatmaps
    }

    /// Analog vs best re-runs, present after an optimization.
    pub fn final_comparison(&self) -> Option<&FinalComparison> {
        self.final_comparison.as_ref()
    }

    /// Run the batch on `grid`, replacing any previous results.
    ///
    /// # Errors
    ///
    /// In entries mode any failing walk aborts the batch. In optimization
    /// mode a candidate with a domain error is discarded; defects and
    /// failures of the analog or final walks abort.
    pub fn execute(&mut self, grid: &mut Grid) -> Result<(), ManagerError> {
        self.records.clear();
        self.heatmaps.clear();
        self.final_comparison = None;
        self.best = 0;
        match &self.batch.mode {
            BatchMode::Entries(entries) => {
                let entries = entries.clone();
                self.run_all_cases(grid, &entries)
            }
            BatchMode::Optimization { evaluations } => {
                let evaluations = *evaluations;
                self.simulate_annealing(grid, evaluations)
            }
        }
    }

    /// Write the text report for the current records.
    pub fn write_report<O: Write>(&self, out: &mut O) -> io::Result<()> {
        report::write_report(
            out,
            &self.records,
            self.walk_config.num_samples,
            self.walk_config.max_steps,
        )
    }

    /// Run one walk on a fresh visit scope, timing and logging it.
    ///
    /// The heatmap is only built when the walk tracks visits.
    fn timed_walk(
        &mut self,
        walk: &mut Walk,
        grid: &mut Grid,
        index: usize,
    ) -> Result<(Evaluation, Option<Heatmap>), WalkError> {
        let mut scope = grid.visits();
        let evaluation = self.run_logged(walk, &mut scope, index)?;
        let heatmap = walk
            .config()
            .track_visits
            .then(|| snapshot(&scope, index, walk.config().num_samples));
        Ok((evaluation, heatmap))
    }

    /// A final re-run with visit tracking forced on.
    fn tracked_rerun(
        &mut self,
        walk: &mut Walk,
        grid: &mut Grid,
        index: usize,
    ) -> Result<(Evaluation, Heatmap), ManagerError> {
        walk.set_track_visits(true);
        let mut scope = grid.visits();
        let evaluation = self
            .run_logged(walk, &mut scope, index)
            .map_err(|source| ManagerError::Walk { index, source })?;
        let heatmap = snapshot(&scope, index, walk.config().num_samples);
        Ok((evaluation, heatmap))
    }

    fn run_logged(
        &mut self,
        walk: &mut Walk,
        scope: &mut VisitScope<'_>,
        index: usize,
    ) -> Result<Evaluation, WalkError> {
        info!(index, policy = %walk.policy(), "starting walk");
        let started = Instant::now();
        let evaluation = walk.run(scope, &mut self.walk_rng)?;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match evaluation.outcome() {
            Some(outcome) => info!(
                index,
                elapsed_ms,
                mean = outcome.mean,
                error = outcome.std_error(),
                fom = outcome.fom,
                "walk complete"
            ),
            None => info!(index, elapsed_ms, fom = 0.0, "walk stopped at step ceiling"),
        }
        Ok(evaluation)
    }

    fn push_record(&mut self, record: WalkRecord, heatmap: Option<Heatmap>) {
        self.heatmaps.extend(heatmap);
        self.records.push(record);
        let last = self.records.len() - 1;
        if record.fom() > self.records[self.best].fom() {
            self.best = last;
        }
    }

    fn run_all_cases(
        &mut self,
        grid: &mut Grid,
        entries: &[PolicyParameters],
    ) -> Result<(), ManagerError> {
        let total = entries.len() + 1;
        info!(
            walks = total,
            samples = self.walk_config.num_samples,
            "running all cases, walk 0 is analog"
        );
        let analog = PolicyParameters::analog();
        let mut walk = Walk::new(analog, self.walk_config.clone())?;

        for (index, policy) in std::iter::once(analog)
            .chain(entries.iter().copied())
            .enumerate()
        {
            walk.reconfigure(policy);
            let (evaluation, heatmap) = self
                .timed_walk(&mut walk, grid, index)
                .map_err(|source| ManagerError::Walk { index, source })?;
            self.push_record(WalkRecord::new(policy, evaluation), heatmap);
        }
        Ok(())
    }

    fn simulate_annealing(&mut self, grid: &mut Grid, evaluations: u64) -> Result<(), ManagerError> {
        info!(
            evaluations,
            samples = self.walk_config.num_samples,
            "running simulated annealing, walk 0 is analog"
        );
        let analog = PolicyParameters::analog();
        let mut walk = Walk::new(analog, self.walk_config.clone())?;

        let (evaluation, heatmap) = self
            .timed_walk(&mut walk, grid, 0)
            .map_err(|source| ManagerError::Walk { index: 0, source })?;
        let mut incumbent = WalkRecord::new(analog, evaluation);
        self.push_record(incumbent, heatmap);

        for iteration in 1..evaluations {
            let index = iteration as usize;
            let temperature =
                anneal::temperature(iteration, evaluations, self.annealing.initial_temperature);
            let candidate = match anneal::propose(
                &mut self.search_rng,
                &incumbent.policy,
                temperature,
                &self.annealing,
            ) {
                Ok(candidate) => candidate,
                Err(err) => {
                    warn!(iteration, %err, "discarding candidate");
                    continue;
                }
            };

            walk.reconfigure(candidate);
            let (evaluation, heatmap) = match self.timed_walk(&mut walk, grid, index) {
                Ok(result) => result,
                Err(err) if !err.is_defect() => {
                    warn!(iteration, %err, "discarding candidate");
                    continue;
                }
                Err(source) => return Err(ManagerError::Walk { index, source }),
            };
            let record = WalkRecord::new(candidate, evaluation);

            let p = anneal::acceptance_probability(record.fom(), incumbent.fom(), temperature);
            let u = uniform::sample(&mut self.search_rng);
            if u < p {
                debug!(iteration, temperature, fom = record.fom(), p, "accepted");
                incumbent = record;
                self.push_record(record, heatmap);
            } else {
                debug!(iteration, temperature, fom = record.fom(), p, "rejected");
            }
        }

        let best = self.records[self.best];
        info!(
            accepted = self.records.len() - 1,
            best_index = self.best,
            best_fom = best.fom(),
            policy = %best.policy,
            "optimization complete"
        );

        let final_index = index_after(evaluations);
        let mut final_walk = Walk::new(analog, self.walk_config.clone())?;

        info!(policy = %analog, "analog case");
        let (analog_eval, analog_heatmap) =
            self.tracked_rerun(&mut final_walk, grid, final_index)?;

        final_walk.reconfigure(best.policy);
        info!(policy = %best.policy, "optimized case");
        let (best_eval, best_heatmap) =
            self.tracked_rerun(&mut final_walk, grid, final_index.saturating_add(1))?;

        self.final_comparison = Some(FinalComparison {
            analog: WalkRecord::new(analog, analog_eval),
            best: WalkRecord::new(best.policy, best_eval),
            analog_heatmap,
            best_heatmap,
        });
        Ok(())
    }
}

/// Average visit density of the walk that just ran in `scope`.
fn snapshot(scope: &VisitScope<'_>, index: usize, histories: u64) -> Heatmap {
    Heatmap::new(
        format!("walk {index}"),
        histories,
        scope.average_visit_density(histories),
    )
}

/// Index of the first re-run after an `evaluations`-long search.
fn index_after(evaluations: u64) -> usize {
    usize::try_from(evaluations)
        .unwrap_or(usize::MAX)
        .saturating_add(1)
}
