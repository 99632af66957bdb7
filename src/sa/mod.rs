//! Simulated Annealing (SA) for weighted MAX-SAT.
//!
//! A single-solution trajectory search over boolean assignments. Worse
//! candidates are accepted with a probability that shrinks as the
//! temperature cools, letting the search climb out of local optima. When
//! the schedule runs cold without a satisfying incumbent, the temperature
//! is reset a bounded number of times.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Selman, Kautz & Cohen (1994), "Noise Strategies for Improving Local Search"

mod acceptance;
mod config;
mod neighbor;
mod runner;

pub use acceptance::{accept_worse, acceptance_probability, is_better};
pub use config::SaConfig;
pub use neighbor::{quarter_flip, single_flip, uniform_flip, NeighborStrategy};
pub use runner::{SaResult, SaRunner};
