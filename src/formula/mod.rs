//! Weighted CNF formulas and their evaluation.
//!
//! - [`Formula`]: immutable clauses and per-variable weights
//! - [`Assignment`]: one truth value per variable, the search state
//! - [`EvalInfo`]: sat/unsat tallies and weight of one assignment
//! - [`parse_str`] / [`load`]: the `.mwcnf` instance loader

mod eval;
mod model;
mod parser;

pub use eval::{
    assignment_weight, compute_weight, evaluate_clause, evaluate_formula, random_assignment,
    satisfied_clause_weight, EvalInfo, WeightScoring,
};
pub use model::{Assignment, Clause, Formula, Literal, RawFormula};
pub use parser::{load, parse_str, Instance, HEADER_LINES};
