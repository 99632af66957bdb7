//! Preference order over evaluated states and the Metropolis acceptance test.

use rand::Rng;

use crate::formula::EvalInfo;

/// Whether `candidate` is strictly preferred to `reference`.
///
/// Satisfying states beat non-satisfying ones. Two satisfying states are
/// compared by weight, two non-satisfying ones by satisfied-clause count.
/// Ties are not better.
pub fn is_better(candidate: &EvalInfo, reference: &EvalInfo) -> bool {
    match (candidate.is_satisfying(), reference.is_satisfying()) {
        (true, true) => candidate.weight() > reference.weight(),
        (true, false) => true,
        (false, false) => candidate.sat_clause_count() > reference.sat_clause_count(),
        (false, true) => false,
    }
}

/// Probability of moving from `current` to a not-better `candidate`.
///
/// `exp(-(current.sat - candidate.sat) / temperature)`, zero at zero
/// temperature. The delta is taken over satisfied-clause counts even when
/// both states are satisfying, so equally satisfying candidates are always
/// accepted regardless of weight.
pub fn acceptance_probability(current: &EvalInfo, candidate: &EvalInfo, temperature: f64) -> f64 {
    if temperature <= 0.0 {
        return 0.0;
    }
    let delta = current.sat_clause_count() as f64 - candidate.sat_clause_count() as f64;
    (-delta / temperature).exp()
}

/// Metropolis draw against [`acceptance_probability`].
pub fn accept_worse<R: Rng>(
    current: &EvalInfo,
    candidate: &EvalInfo,
    temperature: f64,
    rng: &mut R,
) -> bool {
    if temperature <= 0.0 {
        return false;
    }
    rng.random_range(0.0..1.0) < acceptance_probability(current, candidate, temperature)
}
