//! Random source and probability distributions for gridwalk.
//!
//! Every sampling function takes the [`RandomSource`] it draws from as an
//! explicit `&mut` argument; nothing in this crate owns hidden RNG state.
//! Evaluation functions are pure.
//!
//! | Module | Distribution |
//! |--------|--------------|
//! | [`categorical`] | index draw proportional to a weight vector |
//! | [`truncated_exponential`] | discretized exponential on `[0, b]` |
//! | [`gaussian`] | independent normal components (Box-Muller) |
//! | [`uniform`] | raw `[0, 1)` pass-through |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod categorical;
pub mod error;
pub mod gaussian;
pub mod kind;
pub mod source;
pub mod truncated_exponential;
pub mod uniform;

pub use error::DistError;
pub use kind::DistributionKind;
pub use source::{ChaChaSource, RandomSource, CANONICAL_SEED};
