//! Generational GA loop.
//!
//! # Algorithm
//!
//! ```text
//! INIT → EVALUATE → SELECT_AND_BREED → REPLACE ─┐
//!          ▲                                    │ (generations times)
//!          └────────────────────────────────────┘
//!        → FINAL_EVALUATE → TERMINATED
//! ```
//!
//! - **Evaluate**: fitness of every individual, on the rayon pool when
//!   enabled, then a stable sort by fitness so ties keep population order.
//! - **Select**: the top `elite_count` survive unchanged; parents are drawn
//!   uniformly from the top half.
//! - **Breed**: single-point crossover, then per-gene reset mutation of
//!   both children. An odd last slot keeps only the first child.
//!
//! Cancellation and the time limit are checked between generations only.
//! A stopped run still evaluates its current population and returns the
//! best individual.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rayon::ThreadPool;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::chromosome::AssignmentChromosome;
use super::config::GaConfig;
use super::problem::WorkflowProblem;
use crate::error::{Result, ScheduleError};
use crate::models::{Assignment, SimulationResult, Task, Vm};
use crate::scheduler::SchedulingInstance;

/// Shared flag that asks a running optimizer to stop after the current
/// generation.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Creates an untriggered token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Fitness summary of one evaluated generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation index (0-based).
    pub generation: usize,
    /// Lowest fitness.
    pub best: f64,
    /// Mean fitness.
    pub mean: f64,
    /// Highest fitness.
    pub worst: f64,
}

impl GenerationStats {
    fn from_ranked(generation: usize, ranked: &[AssignmentChromosome]) -> Self {
        let n = ranked.len().max(1) as f64;
        Self {
            generation,
            best: ranked.first().map_or(f64::INFINITY, |c| c.fitness),
            mean: ranked.iter().map(|c| c.fitness).sum::<f64>() / n,
            worst: ranked.last().map_or(f64::INFINITY, |c| c.fitness),
        }
    }
}

/// Outcome of an optimization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaResult {
    /// Best assignment found.
    pub best: Assignment,
    /// Its weighted fitness.
    pub best_fitness: f64,
    /// Its simulation totals.
    pub objectives: SimulationResult,
    /// Generations completed before termination or cancellation.
    pub generations: usize,
    /// Per-generation statistics, one entry per completed generation.
    pub history: Vec<GenerationStats>,
    /// Whether the run stopped early (token or time limit).
    pub cancelled: bool,
    /// Final population, best first. Can seed a follow-up run.
    pub population: Vec<Assignment>,
}

/// Genetic optimizer over one workflow.
///
/// # Example
/// ```
/// use u_workflow::ga::{GaConfig, GaRunner};
/// use u_workflow::models::{Task, Vm};
///
/// let tasks = vec![
///     Task::new("T1", 100.0),
///     Task::new("T2", 50.0).with_predecessor("T1").with_data_size(4.0),
/// ];
/// let vms = vec![Vm::new("VM1", 100.0).with_cores(2), Vm::new("VM2", 200.0)];
/// let config = GaConfig::default()
///     .with_population_size(10)
///     .with_generations(5)
///     .with_seed(42);
///
/// let result = GaRunner::new(&tasks, &vms, config).unwrap().run().unwrap();
/// assert_eq!(result.best.len(), 2);
/// assert!(result.best_fitness.is_finite());
/// ```
pub struct GaRunner<'a> {
    problem: WorkflowProblem<'a>,
    config: GaConfig,
    initial_population: Vec<Assignment>,
    cancel: CancellationToken,
}

impl<'a> GaRunner<'a> {
    /// Validates configuration and inputs and sequences the workflow.
    ///
    /// # Errors
    /// Any invalid parameter, malformed task/VM, or cyclic workflow is
    /// reported here, before a single generation runs.
    pub fn new(tasks: &'a [Task], vms: &'a [Vm], config: GaConfig) -> Result<Self> {
        config.validate()?;
        let instance = SchedulingInstance::new(tasks, vms, config.comm)?;
        let problem = WorkflowProblem::new(instance, config.weights, config.mutation_probability);
        Ok(Self {
            problem,
            config,
            initial_population: Vec::new(),
            cancel: CancellationToken::new(),
        })
    }

    /// Seeds the first generation with caller assignments.
    ///
    /// Missing slots are filled with random individuals. A seed larger
    /// than the population size takes part in the first evaluation in
    /// full; later generations have `population_size` individuals.
    pub fn with_initial_population(mut self, population: Vec<Assignment>) -> Self {
        self.initial_population = population;
        self
    }

    /// Attaches a cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// The problem being optimized.
    pub fn problem(&self) -> &WorkflowProblem<'a> {
        &self.problem
    }

    /// The run configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Runs with an RNG seeded from `config.seed` (or the OS).
    pub fn run(&self) -> Result<GaResult> {
        let mut rng = match self.config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        self.run_with_rng(&mut rng)
    }

    /// Runs with a caller-provided RNG. All stochastic choices draw from
    /// `rng`, so the same RNG state and inputs give the same result.
    pub fn run_with_rng<R: Rng>(&self, rng: &mut R) -> Result<GaResult> {
        let pool = self.build_pool()?;
        let mut population = self.initial_individuals(rng)?;
        let deadline = self
            .config
            .time_limit_ms
            .map(|ms| Instant::now() + Duration::from_millis(ms));
        let elite_count = self.config.elite_count();

        let instance = self.problem.instance();
        info!(
            tasks = instance.tasks().len(),
            vms = instance.vms().len(),
            population = population.len(),
            generations = self.config.generations,
            "starting GA"
        );

        let mut history = Vec::with_capacity(self.config.generations);
        let mut best_ever: Option<AssignmentChromosome> = None;
        let mut cancelled = false;

        for generation in 0..self.config.generations {
            if self.should_stop(deadline) {
                warn!(generation, "GA stopped early, returning best of current population");
                cancelled = true;
                break;
            }

            self.evaluate_population(&mut population, pool.as_ref());
            let stats = GenerationStats::from_ranked(generation, &population);
            debug!(
                generation,
                best = stats.best,
                mean = stats.mean,
                worst = stats.worst,
                "generation evaluated"
            );
            history.push(stats);
            Self::remember_best(&mut best_ever, &population);

            population = self.breed(&population, elite_count, rng);
        }

        self.evaluate_population(&mut population, pool.as_ref());
        Self::remember_best(&mut best_ever, &population);

        let winner = match (&best_ever, self.config.track_best_ever) {
            (Some(best), true) => best,
            _ => &population[0],
        };
        let objectives = self.problem.objectives(winner);
        let result = GaResult {
            best: self.problem.decode(winner),
            best_fitness: winner.fitness,
            objectives,
            generations: history.len(),
            history,
            cancelled,
            population: population.iter().map(|c| self.problem.decode(c)).collect(),
        };

        info!(
            best_fitness = result.best_fitness,
            makespan = objectives.makespan,
            cost = objectives.cost,
            comm_delay = objectives.comm_delay,
            generations = result.generations,
            "GA finished"
        );
        Ok(result)
    }

    fn build_pool(&self) -> Result<Option<ThreadPool>> {
        match self.config.threads {
            Some(threads) if self.config.parallel => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map(Some)
                .map_err(|e| ScheduleError::InvalidConfiguration(e.to_string())),
            _ => Ok(None),
        }
    }

    fn initial_individuals<R: Rng>(&self, rng: &mut R) -> Result<Vec<AssignmentChromosome>> {
        let mut population = self
            .initial_population
            .iter()
            .map(|a| self.problem.encode(a))
            .collect::<Result<Vec<_>>>()?;
        while population.len() < self.config.population_size {
            population.push(self.problem.create_individual(rng));
        }
        Ok(population)
    }

    fn should_stop(&self, deadline: Option<Instant>) -> bool {
        self.cancel.is_cancelled() || deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Scores every individual and ranks the population, best first.
    fn evaluate_population(&self, population: &mut [AssignmentChromosome], pool: Option<&ThreadPool>) {
        let problem = &self.problem;
        let score_all = |population: &mut [AssignmentChromosome]| {
            population
                .par_iter_mut()
                .for_each(|ind| ind.fitness = problem.evaluate(ind));
        };

        match pool {
            _ if !self.config.parallel => population
                .iter_mut()
                .for_each(|ind| ind.fitness = problem.evaluate(ind)),
            Some(pool) => pool.install(|| score_all(population)),
            None => score_all(population),
        }

        // Stable: equal fitness keeps population order.
        population.sort_by(|a, b| a.fitness.total_cmp(&b.fitness));
    }

    fn breed<R: Rng>(
        &self,
        ranked: &[AssignmentChromosome],
        elite_count: usize,
        rng: &mut R,
    ) -> Vec<AssignmentChromosome> {
        let size = self.config.population_size;
        let mut next: Vec<AssignmentChromosome> =
            ranked.iter().take(elite_count.min(size)).cloned().collect();
        let parents = &ranked[..self.config.breeding_pool_size(ranked.len())];

        while next.len() < size {
            let p1 = &parents[rng.random_range(0..parents.len())];
            let p2 = &parents[rng.random_range(0..parents.len())];
            let (mut c1, mut c2) = self.problem.crossover(p1, p2, rng);
            self.problem.mutate(&mut c1, rng);
            self.problem.mutate(&mut c2, rng);
            next.push(c1);
            if next.len() < size {
                next.push(c2);
            }
        }
        next
    }

    fn remember_best(best: &mut Option<AssignmentChromosome>, ranked: &[AssignmentChromosome]) {
        if let Some(candidate) = ranked.first() {
            if best.as_ref().map_or(true, |b| candidate.fitness < b.fitness) {
                *best = Some(candidate.clone());
            }
        }
    }
}

/// Optimizes the placement of `tasks` on `vms`.
///
/// Shorthand for `GaRunner::new(tasks, vms, config.clone())?.run()`.
pub fn optimize(tasks: &[Task], vms: &[Vm], config: &GaConfig) -> Result<GaResult> {
    GaRunner::new(tasks, vms, config.clone())?.run()
}
