//! Neighborhood generation over boolean assignments.
//!
//! Every strategy works on a copy: the assignment passed in is left intact
//! so it can still be compared against the candidate.

use rand::Rng;

use crate::formula::Assignment;

/// Closed set of neighbor moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NeighborStrategy {
    /// Invert one uniformly chosen variable.
    SingleFlip,

    /// Invert each variable independently with probability 0.5.
    UniformFlip,

    /// `floor(n / 4)` single flips at uniformly chosen, possibly repeated, indices.
    QuarterFlip,

    /// Single flip or quarter flip, chosen by comparing a draw from `{0, 1}`
    /// against `exp(-temperature)`.
    ///
    /// For any positive temperature the threshold lies in `(0, 1)`, so only a
    /// draw of `0` passes: the two moves are picked with equal odds and the
    /// temperature does not shift the split.
    #[default]
    TemperatureMixed,
}

impl NeighborStrategy {
    /// Returns a candidate derived from `current`.
    pub fn neighbor<R: Rng>(
        &self,
        current: &Assignment,
        temperature: f64,
        rng: &mut R,
    ) -> Assignment {
        let mut candidate = current.clone();
        match self {
            NeighborStrategy::SingleFlip => single_flip(&mut candidate, rng),
            NeighborStrategy::UniformFlip => uniform_flip(&mut candidate, rng),
            NeighborStrategy::QuarterFlip => quarter_flip(&mut candidate, rng),
            NeighborStrategy::TemperatureMixed => {
                let draw = f64::from(rng.random_range(0..=1u8));
                if draw < (-temperature).exp() {
                    single_flip(&mut candidate, rng);
                } else {
                    quarter_flip(&mut candidate, rng);
                }
            }
        }
        candidate
    }
}

/// Inverts one random variable in place.
pub fn single_flip<R: Rng>(assignment: &mut Assignment, rng: &mut R) {
    if assignment.is_empty() {
        return;
    }
    let i = rng.random_range(0..assignment.len());
    assignment.flip(i);
}

/// Inverts each variable with probability 0.5, in place.
pub fn uniform_flip<R: Rng>(assignment: &mut Assignment, rng: &mut R) {
    for i in 0..assignment.len() {
        if rng.random_bool(0.5) {
            assignment.flip(i);
        }
    }
}

/// Performs `floor(n / 4)` single flips in place.
pub fn quarter_flip<R: Rng>(assignment: &mut Assignment, rng: &mut R) {
    for _ in 0..assignment.len() / 4 {
        single_flip(assignment, rng);
    }
}
