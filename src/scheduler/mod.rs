//! Schedule simulation and baseline scheduling.
//!
//! Provides the deterministic simulator used as the GA's fitness oracle
//! and a greedy baseline for comparison.
//!
//! # Simulation
//!
//! `simulate` replays an assignment over the workflow DAG, honoring
//! precedence, per-core contention, VM queue waits and cross-VM transfer
//! penalties, and reports `(makespan, cost, comm_delay)`.
//!
//! # Baseline
//!
//! `greedy_assignment` places each task, in topological order, on the core
//! that finishes it earliest.
//!
//! # References
//!
//! - Topcuoglu et al. (2002), "Performance-effective and low-complexity
//!   task scheduling for heterogeneous computing"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

mod greedy;
mod simulator;

pub use greedy::{greedy_assignment, greedy_slots};
pub use simulator::{simulate, simulate_schedule, CommModel, SchedulingInstance, Slot};
