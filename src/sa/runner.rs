//! SA execution loop.
//!
//! # Algorithm
//!
//! 1. Start from a uniformly random assignment at `initial_temperature`
//! 2. At each iteration:
//!    a. Generate a candidate from the current assignment
//!    b. Evaluate it and replace the incumbent if it is better
//!    c. Move to the candidate if it is better than the current state, or
//!       if the Metropolis test accepts it
//!    d. Cool geometrically; reheat if cold and still unsatisfied
//! 3. Stop once the temperature is at or below `final_temperature` or the
//!    iteration budget is spent

use std::fmt;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::acceptance::{accept_worse, is_better};
use super::config::SaConfig;
use crate::error::ConfigError;
use crate::formula::{random_assignment, EvalInfo, Formula};

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult {
    /// The best evaluated candidate (the incumbent).
    pub best: EvalInfo,

    /// Total number of iterations (candidate evaluations).
    pub iterations: usize,

    /// Number of temperature resets performed.
    pub reheats: usize,

    /// Temperature when the loop stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of accepted moves that were better than the current state.
    pub improving_moves: usize,

    /// Temperature in effect at each iteration.
    pub temperature_history: Vec<f64>,

    /// Seed the generator was built from, when the runner created it.
    pub seed: Option<u64>,

    /// Wall-clock time spent in the loop.
    pub duration: Duration,
}

/// `<satisfying:0|1> <sat> <unsat> <weight> <iterations> <seconds>`
impl fmt::Display for SaResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            u8::from(self.best.is_satisfying()),
            self.best.sat_clause_count(),
            self.best.unsat_clause_count(),
            self.best.weight(),
            self.iterations,
            self.duration.as_secs_f64()
        )
    }
}

/// Executes the Simulated Annealing search.
pub struct SaRunner;

impl SaRunner {
    /// Runs the search with a generator seeded from `config.seed`, or from
    /// the wall clock when no seed is set.
    pub fn run(formula: &Formula, config: &SaConfig) -> Result<SaResult, ConfigError> {
        let seed = config.seed.unwrap_or_else(clock_seed);
        info!(seed, from_clock = config.seed.is_none(), "seeded generator");
        let mut rng = StdRng::seed_from_u64(seed);
        let mut result = Self::run_with_rng(formula, config, &mut rng)?;
        result.seed = Some(seed);
        Ok(result)
    }

    /// Runs the search drawing every random decision from `rng`.
    ///
    /// `config.seed` is ignored.
    pub fn run_with_rng<R: Rng>(
        formula: &Formula,
        config: &SaConfig,
        rng: &mut R,
    ) -> Result<SaResult, ConfigError> {
        config.validate()?;
        let start = Instant::now();

        info!(
            variables = formula.variable_count(),
            clauses = formula.clause_count(),
            initial_temperature = config.initial_temperature,
            final_temperature = config.final_temperature,
            max_iterations = config.max_iterations,
            cool_factor = config.cool_factor,
            "annealing started"
        );

        let scoring = config.scoring;
        let initial = random_assignment(formula.variable_count(), rng);
        let mut current = EvalInfo::evaluate(formula, initial, scoring);
        let mut best: Option<EvalInfo> = None;

        let mut temperature = config.initial_temperature;
        let mut iterations = 0usize;
        let mut reheats = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut temperature_history = Vec::new();

        while temperature > config.final_temperature && iterations < config.max_iterations {
            temperature_history.push(temperature);

            let neighbor = config
                .neighbor
                .neighbor(current.assignment(), temperature, rng);
            let candidate = EvalInfo::evaluate(formula, neighbor, scoring);

            if best.as_ref().is_none_or(|b| is_better(&candidate, b)) {
                best = Some(candidate.clone());
            }

            let improving = is_better(&candidate, &current);
            if improving || accept_worse(&current, &candidate, temperature, rng) {
                accepted_moves += 1;
                if improving {
                    improving_moves += 1;
                }
                current = candidate;
                debug!(
                    iteration = iterations,
                    temperature,
                    satisfying = current.is_satisfying(),
                    sat = current.sat_clause_count(),
                    unsat = current.unsat_clause_count(),
                    weight = current.weight(),
                    "accepted move"
                );
            }

            temperature *= config.cool_factor;

            let satisfied = best.as_ref().is_some_and(EvalInfo::is_satisfying);
            if temperature < config.final_temperature && !satisfied && reheats < config.max_reheats
            {
                temperature = config.initial_temperature;
                reheats += 1;
                info!(iteration = iterations, reheats, "reheating");
            }

            iterations += 1;
        }

        // Only a zero iteration budget leaves no incumbent.
        let best = best.unwrap_or(current);
        let duration = start.elapsed();

        info!(
            iterations,
            reheats,
            satisfying = best.is_satisfying(),
            sat = best.sat_clause_count(),
            weight = best.weight(),
            elapsed_ms = duration.as_millis() as u64,
            "annealing finished"
        );

        Ok(SaResult {
            best,
            iterations,
            reheats,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            temperature_history,
            seed: None,
            duration,
        })
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{compute_weight, Assignment, WeightScoring};
    use crate::sa::NeighborStrategy;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    fn formula(vars: usize, clauses: Vec<Vec<i32>>, weights: Vec<u64>) -> Formula {
        Formula::new(vars, clauses.len(), clauses, weights).unwrap()
    }

    /// Clauses over 3 distinct variables, each satisfied by the planted
    /// assignment `x_i = (i % 2 == 0)`.
    fn planted(vars: usize, clause_count: usize, seed: u64) -> Formula {
        let mut rng = StdRng::seed_from_u64(seed);
        let planted = |v: i32| v % 2 == 0;
        let clauses = (0..clause_count)
            .map(|_| {
                let mut vs: Vec<i32> = Vec::new();
                while vs.len() < 3 {
                    let v = rng.random_range(1..=vars as i32);
                    if !vs.contains(&v) {
                        vs.push(v);
                    }
                }
                let mut clause: Vec<i32> =
                    vs.iter().map(|&v| if rng.random_bool(0.5) { v } else { -v }).collect();
                if !clause.iter().any(|&l| planted(l.abs()) == (l > 0)) {
                    clause[0] = -clause[0];
                }
                clause
            })
            .collect();
        let weights = (0..vars).map(|_| rng.random_range(1..100)).collect();
        formula(vars, clauses, weights)
    }

    #[test]
    fn test_sa_single_positive_clause() {
        let f = formula(1, vec![vec![1]], vec![5]);
        let config = SaConfig::default().with_seed(42);

        let result = SaRunner::run(&f, &config).unwrap();

        assert!(result.best.is_satisfying());
        assert_eq!(result.best.weight(), 5);
        assert_eq!(result.best.assignment(), &Assignment::new(vec![true]));
        assert_eq!(result.reheats, 0);
        assert_eq!(result.seed, Some(42));
    }

    #[test]
    fn test_sa_contradiction_reheats_twice() {
        let f = formula(1, vec![vec![1], vec![-1]], vec![3]);
        let config = SaConfig::default().with_seed(7);

        let result = SaRunner::run(&f, &config).unwrap();

        assert!(!result.best.is_satisfying());
        assert_eq!(result.best.sat_clause_count(), 1);
        assert_eq!(result.best.unsat_clause_count(), 1);
        assert_eq!(result.reheats, 2);
        // 135 geometric steps from 50.0 to below 0.05, three times over.
        assert_eq!(result.iterations, 405);
    }

    #[test]
    fn test_sa_cooling_strictly_decreases_between_reheats() {
        let f = formula(1, vec![vec![1], vec![-1]], vec![3]);
        let config = SaConfig::default().with_seed(11);

        let result = SaRunner::run(&f, &config).unwrap();

        let mut resets = 0;
        for w in result.temperature_history.windows(2) {
            if w[1] > w[0] {
                assert!((w[1] - config.initial_temperature).abs() < 1e-12);
                resets += 1;
            } else {
                assert!((w[1] - w[0] * config.cool_factor).abs() < 1e-12);
                assert!(w[1] < w[0]);
            }
        }
        assert_eq!(resets, result.reheats);
        assert!(resets <= 2);
    }

    #[test]
    fn test_sa_max_iterations_limit() {
        let f = formula(1, vec![vec![1], vec![-1]], vec![3]);
        let config = SaConfig::default().with_max_iterations(10).with_seed(1);

        let result = SaRunner::run(&f, &config).unwrap();

        assert_eq!(result.iterations, 10);
        assert_eq!(result.temperature_history.len(), 10);
    }

    #[test]
    fn test_sa_zero_budget_reports_initial_state() {
        let f = formula(2, vec![vec![1, 2]], vec![1, 1]);
        let config = SaConfig::default().with_max_iterations(0).with_seed(1);

        let result = SaRunner::run(&f, &config).unwrap();

        assert_eq!(result.iterations, 0);
        assert_eq!(result.best.assignment().len(), 2);
        assert_eq!(
            result.best.sat_clause_count() + result.best.unsat_clause_count(),
            1
        );
    }

    #[test]
    fn test_sa_invalid_config() {
        let f = formula(1, vec![vec![1]], vec![1]);
        let config = SaConfig::default().with_cool_factor(1.2);
        assert_eq!(
            SaRunner::run(&f, &config).unwrap_err(),
            ConfigError::CoolFactor(1.2)
        );
    }

    #[test]
    fn test_sa_deterministic_with_seed() {
        let f = planted(20, 60, 3);
        let config = SaConfig::default().with_seed(99);

        let a = SaRunner::run(&f, &config).unwrap();
        let b = SaRunner::run(&f, &config).unwrap();

        assert_eq!(a.best, b.best);
        assert_eq!(a.iterations, b.iterations);
        assert_eq!(a.accepted_moves, b.accepted_moves);
    }

    #[test]
    fn test_sa_run_with_rng_matches_seeded_run() {
        let f = planted(12, 30, 8);
        let config = SaConfig::default().with_seed(5);

        let seeded = SaRunner::run(&f, &config).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let injected = SaRunner::run_with_rng(&f, &config, &mut rng).unwrap();

        assert_eq!(seeded.best, injected.best);
        assert_eq!(injected.seed, None);
    }

    #[test]
    fn test_sa_planted_instance_progress() {
        let f = planted(10, 20, 21);
        let config = SaConfig::default()
            .with_neighbor(NeighborStrategy::SingleFlip)
            .with_seed(42);

        let result = SaRunner::run(&f, &config).unwrap();

        assert!(
            result.best.sat_clause_count() >= 18,
            "expected near-feasible incumbent, got {} of 20",
            result.best.sat_clause_count()
        );
        assert!(result.accepted_moves >= result.improving_moves);
        assert!(result.improving_moves > 0);
    }

    #[test]
    fn test_sa_reported_weight_follows_scoring() {
        let f = planted(12, 30, 4);
        for scoring in [WeightScoring::SatisfiedClauses, WeightScoring::Assignment] {
            let config = SaConfig::default().with_scoring(scoring).with_seed(17);
            let result = SaRunner::run(&f, &config).unwrap();
            assert_eq!(
                result.best.weight(),
                compute_weight(&f, result.best.assignment(), scoring)
            );
        }
    }

    /// Shared in-memory sink for a test subscriber.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn logged_run(f: &Formula, config: &SaConfig) -> (SaResult, String) {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let result = tracing::subscriber::with_default(subscriber, || SaRunner::run(f, config))
            .unwrap();
        let logs = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        (result, logs)
    }

    #[test]
    fn test_sa_logs_configured_seed() {
        let f = formula(1, vec![vec![1]], vec![5]);
        let (_, logs) = logged_run(&f, &SaConfig::default().with_seed(4242));
        assert!(logs.contains("seed=4242"), "seed missing from logs:\n{logs}");
        assert!(logs.contains("from_clock=false"));
    }

    #[test]
    fn test_sa_logs_clock_seed_for_replay() {
        let f = formula(3, vec![vec![1, -2], vec![2, 3]], vec![1, 2, 3]);
        let config = SaConfig::default();
        let (result, logs) = logged_run(&f, &config);
        let seed = result.seed.unwrap();
        assert!(logs.contains(&format!("seed={seed}")), "seed missing from logs:\n{logs}");

        let replay = SaRunner::run(&f, &config.clone().with_seed(seed)).unwrap();
        assert_eq!(replay.best, result.best);
        assert_eq!(replay.iterations, result.iterations);
    }

    #[test]
    fn test_sa_result_line() {
        let f = formula(1, vec![vec![1]], vec![5]);
        let result = SaResult {
            best: EvalInfo::evaluate(&f, Assignment::new(vec![true]), WeightScoring::default()),
            iterations: 135,
            reheats: 0,
            final_temperature: 0.04,
            accepted_moves: 3,
            improving_moves: 1,
            temperature_history: Vec::new(),
            seed: Some(1),
            duration: Duration::from_millis(1500),
        };
        assert_eq!(result.to_string(), "1 1 0 5 135 1.5");
    }
}
