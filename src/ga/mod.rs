//! GA-based workflow placement optimization.
//!
//! Searches task-to-core assignments with a generational genetic
//! algorithm, using the schedule simulator as its fitness oracle.
//!
//! # Encoding
//!
//! One gene per task (supplied order), each gene a `(VM, core)` slot.
//! Random initialization, single-point crossover, and per-gene reset
//! mutation all preserve totality and core ranges.
//!
//! # Fitness
//!
//! `α·makespan + β·cost + γ·comm_delay`, minimized.
//!
//! # Submodules
//!
//! - [`GaConfig`]: parameters, serde-loadable
//! - [`GaRunner`]: the generation loop, cancellation, result reporting
//!
//! # Reference
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and
//!   Machine Learning"
//! - Wang et al. (1997), "Task matching and scheduling in heterogeneous
//!   computing environments using a genetic-algorithm-based approach"

mod chromosome;
mod config;
mod problem;
mod runner;

pub use chromosome::{random_slot, reset_mutation, single_point_crossover, AssignmentChromosome};
pub use config::{GaConfig, ObjectiveWeights};
pub use problem::WorkflowProblem;
pub use runner::{optimize, CancellationToken, GaResult, GaRunner, GenerationStats};
