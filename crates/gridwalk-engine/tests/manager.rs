//! Batch and optimization runs through `WalkManager`.

use gridwalk_core::{Direction, Evaluation, PolicyParameters};
use gridwalk_dist::ChaChaSource;
use gridwalk_engine::report::parse_report_row;
use gridwalk_engine::{
    anneal, AnnealingConfig, BatchMode, BatchSpec, ManagerError, WalkConfig, WalkError,
    WalkManager,
};
use gridwalk_test_utils::{fixtures, ScriptedSource};

// ── Helpers ─────────────────────────────────────────────────────

fn entries(policies: Vec<PolicyParameters>, samples: u64, print_spatial: bool) -> BatchSpec {
    BatchSpec {
        mode: BatchMode::Entries(policies),
        samples,
        print_spatial,
    }
}

fn optimization(evaluations: u64, samples: u64) -> BatchSpec {
    BatchSpec {
        mode: BatchMode::Optimization { evaluations },
        samples,
        print_spatial: false,
    }
}

fn slow() -> PolicyParameters {
    PolicyParameters::new([1.0; 8], 0.6).unwrap()
}

// ── Entries mode ────────────────────────────────────────────────

#[test]
fn parsed_batch_runs_end_to_end() {
    let spec: BatchSpec = "\
Entries 2
Samples 400
Print Spatial Distributions 0
1 1 1 1 1 1 1 1 0.7
0.5 0.5 1 1 2 1 1 0.5 1.3
"
    .parse()
    .unwrap();
    let mut grid = fixtures::walled();
    let mut manager = WalkManager::new(spec).unwrap();
    manager.execute(&mut grid).unwrap();

    assert_eq!(manager.records().len(), 3);
    assert!(manager.records()[0].policy.is_analog());
    assert!(manager.records().iter().all(|r| r.fom() > 0.0));
    let best = manager.best().unwrap();
    assert!(manager.records().iter().all(|r| r.fom() <= best.fom()));
}

#[test]
fn heatmaps_follow_every_tracked_walk() {
    let mut grid = fixtures::corridor(4);
    let mut manager = WalkManager::new(entries(vec![slow()], 250, true)).unwrap();
    manager.execute(&mut grid).unwrap();

    let maps = manager.heatmaps();
    assert_eq!(maps.len(), 2);
    for map in maps {
        assert_eq!(map.histories, 250);
        assert_eq!(map.density.len(), 4);
        assert!(map.density.iter().all(|row| row.len() == 1));
        // Every history starts on the start cell and stops on the goal.
        assert!(map.density[0][0] >= 1.0);
        assert_eq!(map.density[3][0], 1.0);
    }
    assert_eq!(grid.total_visits(), 0);
}

#[test]
fn non_convergent_entries_record_zero_and_continue() {
    let mut grid = fixtures::sealed();
    let config = WalkConfig {
        num_samples: 4,
        max_steps: 500,
        ..Default::default()
    };
    let mut manager = WalkManager::new(entries(vec![slow()], 4, false))
        .unwrap()
        .with_walk_config(config)
        .unwrap();
    manager.execute(&mut grid).unwrap();

    assert_eq!(manager.records().len(), 2);
    for record in manager.records() {
        assert!(matches!(
            record.evaluation,
            Evaluation::NonConvergent { max_steps: 500, .. }
        ));
        assert_eq!(record.fom(), 0.0);
    }
}

#[test]
fn degenerate_entry_aborts_with_its_index() {
    let mut grid = fixtures::two_cell();
    let mut manager = WalkManager::new(entries(vec![slow()], 50, false)).unwrap();
    let err = manager.execute(&mut grid).unwrap_err();
    assert!(matches!(
        err,
        ManagerError::Walk {
            index: 0,
            source: WalkError::DegenerateEstimator { .. }
        }
    ));
}

#[test]
fn report_rows_parse_back() {
    let mut grid = fixtures::corridor(5);
    let mut manager = WalkManager::new(entries(vec![slow()], 300, false)).unwrap();
    manager.execute(&mut grid).unwrap();

    let mut out = Vec::new();
    manager.write_report(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Entries: 2");
    assert_eq!(lines[3], "All Monte Carlo walks ran with 300 samples");
    assert_eq!(lines[4], "Maximum steps allowed per walk was 100,000");

    for (line, record) in lines[1..3].iter().zip(manager.records()) {
        let (policy, fom) = parse_report_row(line).unwrap();
        for (a, b) in policy
            .normalized_weights()
            .iter()
            .zip(record.policy.normalized_weights())
        {
            assert!((a - b).abs() < 1e-5);
        }
        assert!((policy.rate() - record.policy.rate()).abs() < 1e-5);
        assert!((fom - record.fom()).abs() <= 5e-6 * record.fom().max(1.0));
    }
}

// ── Optimization mode ───────────────────────────────────────────

#[test]
fn annealing_keeps_analog_first_and_tracks_best() {
    let mut grid = fixtures::corridor(5);
    let mut manager = WalkManager::new(optimization(12, 300)).unwrap();
    manager.execute(&mut grid).unwrap();

    let records = manager.records();
    assert!(!records.is_empty());
    assert!(records[0].policy.is_analog());
    let best = manager.best().unwrap();
    assert!(records.iter().all(|r| r.fom() <= best.fom()));

    let comparison = manager.final_comparison().unwrap();
    assert!(comparison.analog.policy.is_analog());
    assert_eq!(comparison.best.policy, best.policy);
    assert_eq!(comparison.analog_heatmap.density.len(), 5);
    assert_eq!(comparison.best_heatmap.density.len(), 5);
    // Same seed, same policy: the analog re-run reproduces record 0.
    assert_eq!(comparison.analog.evaluation, records[0].evaluation);
    assert_eq!(grid.total_visits(), 0);
}

/// Box-Muller pair giving a deviate of about `+9.6`.
const FAR: [f64; 2] = [1e-20, 0.0];
/// Box-Muller pair giving a deviate within `1e-16` of zero.
const STILL: [f64; 2] = [0.5, 0.25];

/// Search draws for one iteration: a `(u1, u2)` pair per policy
/// component, then the acceptance draw.
fn iteration_draws(pairs: [[f64; 2]; PolicyParameters::ROW_LEN], accept: f64) -> Vec<f64> {
    let mut draws: Vec<f64> = pairs.iter().flatten().copied().collect();
    draws.push(accept);
    draws
}

#[test]
fn rejected_candidates_never_seed_the_next_proposal() {
    // Iteration 1 pushes North and the rate far up. On a corridor that
    // walker almost never gets back down, so it hits the ceiling with
    // FOM 0 and the near-certain draw rejects it. Iteration 2 barely
    // moves and a zero draw accepts it.
    let mut first = [STILL; PolicyParameters::ROW_LEN];
    first[Direction::North.index()] = FAR;
    first[Direction::COUNT] = FAR;
    let mut draws = iteration_draws(first, 0.999_999);
    draws.extend(iteration_draws([STILL; PolicyParameters::ROW_LEN], 0.0));

    let annealing = AnnealingConfig {
        initial_temperature: 100.0,
        ..Default::default()
    };
    let config = WalkConfig {
        num_samples: 500,
        max_steps: 5_000,
        ..Default::default()
    };
    let mut grid = fixtures::corridor(5);
    let mut manager = WalkManager::with_sources(
        optimization(3, 500),
        ChaChaSource::canonical(),
        ScriptedSource::new(draws),
    )
    .unwrap()
    .with_walk_config(config)
    .unwrap()
    .with_annealing(annealing.clone())
    .unwrap();
    manager.execute(&mut grid).unwrap();

    let analog = PolicyParameters::analog();
    let rejected = anneal::propose(
        &mut ScriptedSource::new(iteration_draws(first, 0.5)),
        &analog,
        anneal::temperature(1, 3, annealing.initial_temperature),
        &annealing,
    )
    .unwrap();
    assert!(rejected.weights()[Direction::North.index()] > 100.0);

    let records = manager.records();
    assert_eq!(records.len(), 2, "one rejection, one acceptance");
    assert!(records[0].policy.is_analog());
    assert!(records.iter().all(|r| r.policy != rejected));

    // The accepted candidate was perturbed from record 0, not from the
    // rejected proposal.
    let expected = anneal::propose(
        &mut ScriptedSource::new(STILL.to_vec()),
        &analog,
        anneal::temperature(2, 3, annealing.initial_temperature),
        &annealing,
    )
    .unwrap();
    assert_eq!(records[1].policy, expected);
    assert!(records[1].policy.weights()[Direction::North.index()] < 0.2);
}

#[test]
fn untracked_walks_keep_no_heatmaps_but_reruns_do() {
    let mut grid = fixtures::corridor(4);
    let mut manager = WalkManager::new(optimization(4, 100)).unwrap();
    manager.execute(&mut grid).unwrap();
    assert!(manager.heatmaps().is_empty());
    let comparison = manager.final_comparison().unwrap();
    assert_eq!(comparison.analog_heatmap.density.len(), 4);
    assert!(comparison.best_heatmap.peak() >= 1.0);
}

#[test]
fn budget_of_one_runs_only_the_analog_walk() {
    let mut grid = fixtures::corridor(4);
    let mut manager = WalkManager::new(optimization(1, 200)).unwrap();
    manager.execute(&mut grid).unwrap();
    assert_eq!(manager.records().len(), 1);
    let comparison = manager.final_comparison().unwrap();
    assert_eq!(comparison.analog.evaluation, comparison.best.evaluation);
}

#[test]
fn annealing_is_deterministic_per_seed() {
    let run = |seed: u64| {
        let mut grid = fixtures::walled();
        let annealing = AnnealingConfig {
            seed,
            ..Default::default()
        };
        let mut manager = WalkManager::new(optimization(8, 150))
            .unwrap()
            .with_annealing(annealing)
            .unwrap();
        manager.execute(&mut grid).unwrap();
        manager.records().to_vec()
    };
    assert_eq!(run(7), run(7));
}

#[test]
fn execute_replaces_previous_results() {
    let mut grid = fixtures::corridor(4);
    let mut manager = WalkManager::new(entries(vec![slow()], 100, true)).unwrap();
    manager.execute(&mut grid).unwrap();
    let first = manager.records().to_vec();
    manager.execute(&mut grid).unwrap();
    assert_eq!(manager.records(), first.as_slice());
    assert_eq!(manager.heatmaps().len(), 2);
}
