//! SA configuration.

use super::neighbor::NeighborStrategy;
use crate::error::ConfigError;
use crate::formula::WeightScoring;

/// Configuration for the annealing run.
///
/// Temperature follows a geometric schedule, `T_{k+1} = cool_factor * T_k`,
/// and is reset to `initial_temperature` (a *reheat*) when it falls below
/// `final_temperature` before a satisfying assignment has been found, at
/// most `max_reheats` times.
///
/// # Examples
///
/// ```
/// use u_mwsat::sa::{NeighborStrategy, SaConfig};
///
/// let config = SaConfig::default()
///     .with_initial_temperature(80.0)
///     .with_max_iterations(5000)
///     .with_cool_factor(0.98)
///     .with_neighbor(NeighborStrategy::SingleFlip)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Starting temperature, also the reheat target.
    pub initial_temperature: f64,

    /// The run stops once the temperature is no longer above this.
    pub final_temperature: f64,

    /// Iteration budget. The run stops once this many candidates were evaluated.
    pub max_iterations: usize,

    /// Geometric cooling factor in (0, 1).
    pub cool_factor: f64,

    /// Maximum number of temperature resets while unsatisfied.
    pub max_reheats: usize,

    /// How candidates are generated from the current assignment.
    pub neighbor: NeighborStrategy,

    /// How assignments are weighted, for both ordering and reporting.
    pub scoring: WeightScoring,

    /// Random seed. `None` seeds from the wall clock.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 50.0,
            final_temperature: 0.05,
            max_iterations: 1000,
            cool_factor: 0.95,
            max_reheats: 2,
            neighbor: NeighborStrategy::default(),
            scoring: WeightScoring::default(),
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_final_temperature(mut self, t: f64) -> Self {
        self.final_temperature = t;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_cool_factor(mut self, factor: f64) -> Self {
        self.cool_factor = factor;
        self
    }

    pub fn with_max_reheats(mut self, n: usize) -> Self {
        self.max_reheats = n;
        self
    }

    pub fn with_neighbor(mut self, neighbor: NeighborStrategy) -> Self {
        self.neighbor = neighbor;
        self
    }

    pub fn with_scoring(mut self, scoring: WeightScoring) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(ConfigError::InitialTemperature(self.initial_temperature));
        }
        if !self.final_temperature.is_finite() || self.final_temperature <= 0.0 {
            return Err(ConfigError::FinalTemperature(self.final_temperature));
        }
        if self.final_temperature >= self.initial_temperature {
            return Err(ConfigError::TemperatureOrder {
                initial_temperature: self.initial_temperature,
                final_temperature: self.final_temperature,
            });
        }
        if !(self.cool_factor > 0.0 && self.cool_factor < 1.0) {
            return Err(ConfigError::CoolFactor(self.cool_factor));
        }
        Ok(())
    }
}
