//! GA configuration.
//!
//! All parameters have defaults and builder setters. The struct derives
//! serde with `#[serde(default)]`, so a JSON document only needs the fields
//! it wants to override.
//!
//! ```
//! use u_workflow::ga::GaConfig;
//!
//! let config = GaConfig::default()
//!     .with_population_size(30)
//!     .with_generations(50)
//!     .with_seed(42);
//! assert!(config.validate().is_ok());
//! assert_eq!(config.elite_count(), 6);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::models::SimulationResult;
use crate::scheduler::CommModel;

/// Objective weights: `fitness = α·makespan + β·cost + γ·comm_delay`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectiveWeights {
    /// α, weight of the makespan.
    pub makespan: f64,
    /// β, weight of the monetary cost.
    pub cost: f64,
    /// γ, weight of the total communication delay.
    pub comm: f64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self {
            makespan: 1.0,
            cost: 0.3,
            comm: 0.2,
        }
    }
}

impl ObjectiveWeights {
    /// Creates weights (α, β, γ).
    pub fn new(makespan: f64, cost: f64, comm: f64) -> Self {
        Self {
            makespan,
            cost,
            comm,
        }
    }

    /// Weighted scalar of a simulation result (lower is better).
    #[inline]
    pub fn score(&self, r: &SimulationResult) -> f64 {
        self.makespan * r.makespan + self.cost * r.cost + self.comm * r.comm_delay
    }
}

/// Genetic optimizer parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Individuals per generation (>= 1).
    pub population_size: usize,
    /// Number of generations to run (0 = evaluate the initial population only).
    pub generations: usize,
    /// Per-gene mutation probability in `[0, 1]`.
    pub mutation_probability: f64,
    /// Fraction of the population kept unchanged, in `(0, 1]`.
    /// At least one individual always survives.
    pub elite_fraction: f64,
    /// Objective weights.
    pub weights: ObjectiveWeights,
    /// Transfer model used by the simulator.
    pub comm: CommModel,
    /// RNG seed. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Evaluate fitness on the rayon pool.
    pub parallel: bool,
    /// Dedicated worker count. `None` uses rayon's global pool.
    pub threads: Option<usize>,
    /// Wall-clock budget (ms), checked between generations.
    pub time_limit_ms: Option<u64>,
    /// Return the best individual of any generation instead of the best
    /// of the final population.
    pub track_best_ever: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 40,
            generations: 20,
            mutation_probability: 0.12,
            elite_fraction: 0.2,
            weights: ObjectiveWeights::default(),
            comm: CommModel::default(),
            seed: None,
            parallel: true,
            threads: None,
            time_limit_ms: None,
            track_best_ever: false,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Sets the per-gene mutation probability.
    pub fn with_mutation_probability(mut self, probability: f64) -> Self {
        self.mutation_probability = probability;
        self
    }

    /// Sets the elite fraction.
    pub fn with_elite_fraction(mut self, fraction: f64) -> Self {
        self.elite_fraction = fraction;
        self
    }

    /// Sets objective weights.
    pub fn with_weights(mut self, weights: ObjectiveWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the transfer model.
    pub fn with_comm(mut self, comm: CommModel) -> Self {
        self.comm = comm;
        self
    }

    /// Fixes the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel fitness evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Uses a dedicated pool of `threads` workers.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Sets a wall-clock budget in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Enables best-ever tracking.
    pub fn with_best_ever_tracking(mut self, enabled: bool) -> Self {
        self.track_best_ever = enabled;
        self
    }

    /// Number of elites: `max(1, floor(population_size * elite_fraction))`.
    pub fn elite_count(&self) -> usize {
        let raw = (self.population_size as f64 * self.elite_fraction).floor() as usize;
        raw.clamp(1, self.population_size.max(1))
    }

    /// Breeding pool size for a ranked population of `ranked_len`:
    /// the top half, at least two, never more than available.
    pub fn breeding_pool_size(&self, ranked_len: usize) -> usize {
        (self.population_size / 2).max(2).min(ranked_len)
    }

    /// Checks parameter ranges.
    ///
    /// # Errors
    /// [`ScheduleError::InvalidConfiguration`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(ScheduleError::InvalidConfiguration(msg));

        if self.population_size < 1 {
            return invalid("population_size must be >= 1".into());
        }
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return invalid(format!(
                "mutation_probability must be in [0, 1], got {}",
                self.mutation_probability
            ));
        }
        if !(self.elite_fraction > 0.0 && self.elite_fraction <= 1.0) {
            return invalid(format!(
                "elite_fraction must be in (0, 1], got {}",
                self.elite_fraction
            ));
        }
        let w = &self.weights;
        for (name, value) in [("makespan", w.makespan), ("cost", w.cost), ("comm", w.comm)] {
            if !(value.is_finite() && value >= 0.0) {
                return invalid(format!("weight '{name}' must be non-negative, got {value}"));
            }
        }
        if self.threads == Some(0) {
            return invalid("threads must be >= 1".into());
        }
        self.comm.validate()
    }
}
