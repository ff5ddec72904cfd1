//! Gridwalk: Monte Carlo random walks on reachability grids, with a
//! simulated-annealing search for variance-reducing walk policies.
//!
//! This is the top-level facade crate that re-exports the public API of the
//! gridwalk sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use gridwalk::prelude::*;
//!
//! // A 1x4 corridor: start at the top, goal at the bottom.
//! let mut grid: Grid = "dimensions 1 4 start 0 0 goal 0 3 1 1 1 1".parse().unwrap();
//! let batch: BatchSpec = "Entries 1 Samples 500 Print Spatial Distributions 0 \
//!                         1 1 1 1 1 1 1 1 0.5"
//!     .parse()
//!     .unwrap();
//!
//! let mut manager = WalkManager::new(batch).unwrap();
//! manager.execute(&mut grid).unwrap();
//!
//! // Record 0 is always the analog walk.
//! assert!(manager.records()[0].policy.is_analog());
//! assert!(manager.records().iter().all(|r| r.fom() > 0.0));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `gridwalk-core` | Coordinates, directions, policies, outcomes |
//! | [`dist`] | `gridwalk-dist` | Random sources and the sampling distributions |
//! | [`grid`] | `gridwalk-grid` | Reachability grid, visit scopes, grid parsing |
//! | [`engine`] | `gridwalk-engine` | Walker, walk driver, batch manager, reports |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core value types (`gridwalk-core`).
///
/// [`types::PolicyParameters`] is the thing being optimized;
/// [`types::Evaluation`] is what a walk reports for it.
pub use gridwalk_core as types;

/// Random sources and distributions (`gridwalk-dist`).
///
/// Everything that samples takes a [`dist::RandomSource`];
/// [`dist::ChaChaSource`] is the seeded production stream.
pub use gridwalk_dist as dist;

/// The reachability grid (`gridwalk-grid`).
///
/// Visit counters are only reachable through a [`grid::VisitScope`], which
/// clears them on drop.
pub use gridwalk_grid as grid;

/// Walk driver and batch manager (`gridwalk-engine`).
///
/// [`engine::Walk`] evaluates one policy; [`engine::WalkManager`] runs a
/// whole batch or annealing search.
pub use gridwalk_engine as engine;

/// Common imports for typical gridwalk usage.
///
/// ```rust
/// use gridwalk::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use gridwalk_core::{
        Coord, Direction, Evaluation, PolicyParameters, WalkOutcome, WalkRecord,
    };

    // Randomness
    pub use gridwalk_dist::{ChaChaSource, RandomSource, CANONICAL_SEED};

    // Grid
    pub use gridwalk_grid::{parse_grid, Grid, VisitScope};

    // Engine
    pub use gridwalk_engine::{
        AnnealingConfig, BatchMode, BatchSpec, FinalComparison, Heatmap, Walk, WalkConfig,
        WalkManager,
    };

    // Errors
    pub use gridwalk_core::PolicyError;
    pub use gridwalk_dist::DistError;
    pub use gridwalk_engine::{ConfigError, ManagerError, ReportError, WalkError};
    pub use gridwalk_grid::GridError;
}
