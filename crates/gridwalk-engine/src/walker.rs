//! A single walker and its importance-weight bookkeeping.
//!
//! Each step is two draws: a direction from the policy's weights restricted
//! to the reachable neighbours, then a distance from a truncated exponential
//! bounded by how far the grid stays open in that direction.
//!
//! When the policy is biased, every draw multiplies the walker's weight by
//! `p_analog / p_biased` for the value drawn. The analog walk picks uniformly
//! among reachable directions and uses rate 1, so the weighted step count
//! stays an unbiased estimate of the analog mean.

use gridwalk_core::{Coord, Direction, PolicyParameters};
use gridwalk_dist::{categorical, truncated_exponential, RandomSource};
use gridwalk_grid::Grid;
use smallvec::SmallVec;

use crate::error::WalkError;

/// One sampled move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    /// Direction travelled.
    pub direction: Direction,
    /// Cells travelled, at least 1.
    pub distance: u32,
    /// Position after the move.
    pub to: Coord,
}

/// A walker following a fixed policy.
#[derive(Clone, Debug)]
pub struct Walker {
    policy: PolicyParameters,
    biased: bool,
    position: Option<Coord>,
    weight: f64,
}

impl Walker {
    /// Create an unplaced walker with weight 1.
    pub fn new(policy: PolicyParameters) -> Self {
        Self {
            biased: !policy.is_analog(),
            policy,
            position: None,
            weight: 1.0,
        }
    }

    /// Switch to a new policy and reset for a fresh history.
    pub fn set_policy(&mut self, policy: PolicyParameters) {
        self.biased = !policy.is_analog();
        self.policy = policy;
        self.reset_for_new_history();
    }

    /// The policy being followed.
    pub fn policy(&self) -> &PolicyParameters {
        &self.policy
    }

    /// `true` if importance weights are being applied.
    pub fn is_biased(&self) -> bool {
        self.biased
    }

    /// Weight back to 1 and position cleared until [`place`](Self::place).
    pub fn reset_for_new_history(&mut self) {
        self.weight = 1.0;
        self.position = None;
    }

    /// Put the walker on `at`.
    pub fn place(&mut self, at: Coord) {
        self.position = Some(at);
    }

    /// Current position, `None` before placement.
    pub fn position(&self) -> Option<Coord> {
        self.position
    }

    /// `true` if the walker stands on `coord`.
    pub fn is_at(&self, coord: Coord) -> bool {
        self.position == Some(coord)
    }

    /// Accumulated importance weight for the current history.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Sample one move on `grid` and advance the walker.
    ///
    /// # Errors
    ///
    /// Domain errors from the distributions, `Stranded` if no neighbour is
    /// reachable, and the defects `Unplaced` and `LeftGrid`.
    pub fn sample_step<R: RandomSource + ?Sized>(
        &mut self,
        grid: &Grid,
        rng: &mut R,
    ) -> Result<Step, WalkError> {
        let from = self.position.ok_or(WalkError::Unplaced)?;
        let direction = self.sample_direction(grid, from, rng)?;
        let distance = self.sample_distance(grid, from, direction, rng)?;
        let to = from
            .checked_step(direction, distance)
            .ok_or(WalkError::LeftGrid {
                from,
                direction,
                distance,
            })?;
        self.position = Some(to);
        Ok(Step {
            direction,
            distance,
            to,
        })
    }

    fn sample_direction<R: RandomSource + ?Sized>(
        &mut self,
        grid: &Grid,
        from: Coord,
        rng: &mut R,
    ) -> Result<Direction, WalkError> {
        let open = grid.reachable_directions(from);
        if open.is_empty() {
            return Err(WalkError::Stranded { at: from });
        }
        // With all eight open this is the full weight vector; otherwise the
        // sampler renormalizes over the reachable subset.
        let weights: SmallVec<[f64; 8]> = open.iter().map(|&d| self.policy.weight(d)).collect();
        let choice = categorical::sample(rng, &weights)?;
        if self.biased {
            let biased = categorical::evaluate(&weights, choice)?;
            let analog = 1.0 / open.len() as f64;
            self.weight *= analog / biased;
        }
        Ok(open[choice])
    }

    fn sample_distance<R: RandomSource + ?Sized>(
        &mut self,
        grid: &Grid,
        from: Coord,
        direction: Direction,
        rng: &mut R,
    ) -> Result<u32, WalkError> {
        let bound = grid.run_length(from, direction);
        let rate = self.policy.rate();
        let distance = truncated_exponential::sample(rng, bound, rate)?;
        if self.biased {
            let analog =
                truncated_exponential::evaluate(bound, PolicyParameters::ANALOG_RATE, distance)?;
            let biased = truncated_exponential::evaluate(bound, rate, distance)?;
            self.weight *= analog / biased;
        }
        Ok(distance)
    }
}
