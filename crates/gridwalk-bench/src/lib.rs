//! Benchmark profiles for the gridwalk engine.
//!
//! - [`open_profile`]: fully reachable square, start and goal in opposite corners
//! - [`room_profile`]: square split by a wall with one gap, the reference layout
//! - [`reference_policies`]: a fixed spread of biased policies for entries runs
//! - [`entries_batch`] / [`annealing_batch`]: ready-made batch specifications

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use gridwalk_core::{Coord, PolicyParameters};
use gridwalk_engine::{BatchMode, BatchSpec};
use gridwalk_grid::{Grid, GridError};

/// An `n × n` grid with every cell reachable.
pub fn open_profile(n: u32) -> Result<Grid, GridError> {
    Grid::new(
        n,
        n,
        Coord::new(0, 0),
        Coord::new(n.saturating_sub(1), n.saturating_sub(1)),
        vec![true; (n * n) as usize],
    )
}

/// An `n × n` grid with a horizontal wall across row `n / 2`, open only at
/// column `gap_at(n)`.
///
/// Start is the top-left corner, goal the bottom-right, so every history
/// has to find the gap.
pub fn room_profile(n: u32) -> Result<Grid, GridError> {
    let wall_row = n / 2;
    let gap = gap_at(n);
    let cells = (0..n)
        .flat_map(|y| (0..n).map(move |x| y != wall_row || x == gap))
        .collect();
    let corner = n.saturating_sub(1);
    Grid::new(n, n, Coord::new(0, 0), Coord::new(corner, corner), cells)
}

/// Column of the gap in [`room_profile`]'s wall.
pub fn gap_at(n: u32) -> u32 {
    (n * 3) / 4
}

/// Biased policies leaning toward the south-east corner, each with a
/// different step-length rate.
pub fn reference_policies() -> Vec<PolicyParameters> {
    let mut policies = Vec::new();
    for (lean, rate) in [(1.0, 0.5), (1.5, 1.0), (2.0, 1.5), (3.0, 0.8)] {
        // N, NE, E, SE, S, SW, W, NW
        let weights = [1.0, 1.0, lean, lean, lean, 1.0, 1.0, 1.0];
        if let Ok(policy) = PolicyParameters::new(weights, rate) {
            policies.push(policy);
        }
    }
    policies
}

/// Entries batch over [`reference_policies`].
pub fn entries_batch(samples: u64) -> BatchSpec {
    BatchSpec {
        mode: BatchMode::Entries(reference_policies()),
        samples,
        print_spatial: false,
    }
}

/// Annealing batch with `evaluations` walks.
pub fn annealing_batch(evaluations: u64, samples: u64) -> BatchSpec {
    BatchSpec {
        mode: BatchMode::Optimization { evaluations },
        samples,
        print_spatial: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_has_a_single_gap() {
        let g = room_profile(12).unwrap();
        let wall = 6;
        let open: Vec<u32> = (0..12)
            .filter(|&x| g.is_reachable(Coord::new(x, wall)))
            .collect();
        assert_eq!(open, vec![gap_at(12)]);
        assert!(g.is_reachable(g.start()));
        assert!(g.is_reachable(g.goal()));
    }

    #[test]
    fn reference_policies_are_biased() {
        let policies = reference_policies();
        assert_eq!(policies.len(), 4);
        assert!(policies.iter().all(|p| !p.is_analog()));
    }

    #[test]
    fn batches_validate() {
        assert_eq!(entries_batch(100).walk_config().validate(), Ok(()));
        assert_eq!(annealing_batch(5, 100).walk_config().validate(), Ok(()));
    }
}
