//! Monte Carlo walk driver and policy optimizer.
//!
//! The engine runs a [`Walker`] from a grid's start to its goal many times
//! and turns the accumulated step counts into a figure of merit. Two layers
//! sit on top of the walker:
//!
//! - [`Walk`] evaluates one policy: N independent histories, importance
//!   weights applied when the policy is biased, moments reduced to a
//!   [`WalkOutcome`](gridwalk_core::WalkOutcome).
//! - [`WalkManager`] evaluates many policies, either a fixed list from a
//!   [`BatchSpec`] or a simulated-annealing search for the policy with the
//!   highest figure of merit.
//!
//! All randomness is injected: the manager owns two
//! [`RandomSource`](gridwalk_dist::RandomSource) streams, one reseeded for
//! every walk and one driving the search. [`WalkManager::new`] seeds
//! ChaCha streams; [`WalkManager::with_sources`] takes any pair.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod anneal;
pub mod batch;
pub mod config;
pub mod error;
pub mod manager;
pub mod moments;
pub mod report;
pub mod walk;
pub mod walker;

pub use batch::{BatchMode, BatchSpec};
pub use config::{AnnealingConfig, ConfigError, WalkConfig, DEFAULT_MAX_STEPS};
pub use error::{ManagerError, ReportError, WalkError};
pub use manager::{FinalComparison, WalkManager};
pub use moments::Moments;
pub use report::Heatmap;
pub use walk::Walk;
pub use walker::{Step, Walker};
