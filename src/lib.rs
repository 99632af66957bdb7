//! Simulated Annealing search for weighted MAX-SAT (MWSAT).
//!
//! Looks for an assignment that satisfies every clause of a weighted CNF
//! formula while maximizing the weight of true positive literals. The
//! search is a heuristic: it may stop without a satisfying assignment and
//! does not prove optimality.
//!
//! - [`formula`]: instance model, `.mwcnf` loader and evaluation
//! - [`sa`]: neighborhood moves, acceptance rule and the annealing loop
//! - [`error`]: format, configuration and I/O errors
//!
//! # Examples
//!
//! ```
//! use u_mwsat::formula::Formula;
//! use u_mwsat::sa::{SaConfig, SaRunner};
//!
//! let formula = Formula::new(2, 2, vec![vec![1, 2], vec![-1]], vec![4, 3]).unwrap();
//! let result = SaRunner::run(&formula, &SaConfig::default().with_seed(42)).unwrap();
//! assert!(result.best.is_satisfying());
//! ```

pub mod error;
pub mod formula;
pub mod sa;

pub use error::{ConfigError, Error, FormatError, Result};
