//! Clause satisfaction, sat/unsat tallies and weight scoring.
//!
//! Every function here is a full pass over the formula; nothing is cached
//! between calls.

use rand::Rng;

use super::model::{Assignment, Formula, Literal};

/// Rule used to turn an assignment into a weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeightScoring {
    /// Clause-local sum: for every satisfied clause, add the weight of each
    /// positive literal in it that is true. A variable is counted once per
    /// satisfied clause it appears in positively.
    #[default]
    SatisfiedClauses,

    /// Sum of `weight[i]` over all variables assigned true.
    Assignment,
}

/// True iff some literal of `clause` is true under `assignment`.
///
/// An empty clause is unsatisfied.
#[inline]
pub fn evaluate_clause(clause: &[Literal], assignment: &Assignment) -> bool {
    clause.iter().any(|&lit| assignment.satisfies(lit))
}

/// Returns `(sat_count, unsat_count)` over all clauses.
pub fn evaluate_formula(formula: &Formula, assignment: &Assignment) -> (usize, usize) {
    let sat = formula
        .clauses()
        .iter()
        .filter(|clause| evaluate_clause(clause, assignment))
        .count();
    (sat, formula.clause_count() - sat)
}

/// Clause-local weight, see [`WeightScoring::SatisfiedClauses`].
pub fn satisfied_clause_weight(formula: &Formula, assignment: &Assignment) -> u64 {
    formula
        .clauses()
        .iter()
        .filter(|clause| evaluate_clause(clause, assignment))
        .flat_map(|clause| clause.iter())
        .filter(|&&lit| lit > 0 && assignment.satisfies(lit))
        .map(|&lit| formula.weight(lit as usize))
        .sum()
}

/// Dot product of weights and truth values.
pub fn assignment_weight(formula: &Formula, assignment: &Assignment) -> u64 {
    formula
        .weights()
        .iter()
        .zip(assignment.as_slice())
        .filter(|&(_, &value)| value)
        .map(|(&w, _)| w)
        .sum()
}

/// Weight of `assignment` under `scoring`.
pub fn compute_weight(formula: &Formula, assignment: &Assignment, scoring: WeightScoring) -> u64 {
    match scoring {
        WeightScoring::SatisfiedClauses => satisfied_clause_weight(formula, assignment),
        WeightScoring::Assignment => assignment_weight(formula, assignment),
    }
}

/// Each variable set true or false with probability 0.5.
pub fn random_assignment<R: Rng>(variable_count: usize, rng: &mut R) -> Assignment {
    Assignment::new((0..variable_count).map(|_| rng.random_bool(0.5)).collect())
}

/// Evaluation of one assignment against one formula.
///
/// Never mutated after construction: a changed assignment gets a new
/// `EvalInfo`. Only serializable: the counts are derived, never read back.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EvalInfo {
    assignment: Assignment,
    weight: u64,
    sat_clause_count: usize,
    unsat_clause_count: usize,
}

impl EvalInfo {
    /// Evaluates `assignment`, taking ownership of it.
    pub fn evaluate(formula: &Formula, assignment: Assignment, scoring: WeightScoring) -> Self {
        let (sat_clause_count, unsat_clause_count) = evaluate_formula(formula, &assignment);
        let weight = compute_weight(formula, &assignment, scoring);
        Self {
            assignment,
            weight,
            sat_clause_count,
            unsat_clause_count,
        }
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn into_assignment(self) -> Assignment {
        self.assignment
    }

    pub fn weight(&self) -> u64 {
        self.weight
    }

    pub fn sat_clause_count(&self) -> usize {
        self.sat_clause_count
    }

    pub fn unsat_clause_count(&self) -> usize {
        self.unsat_clause_count
    }

    /// All clauses satisfied.
    pub fn is_satisfying(&self) -> bool {
        self.unsat_clause_count == 0
    }
}
