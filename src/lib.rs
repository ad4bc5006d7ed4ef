//! Workflow-to-VM scheduling for the U-Engine ecosystem.
//!
//! Places the tasks of a workflow DAG on the cores of heterogeneous
//! virtual machines, minimizing a weighted sum of makespan, monetary cost,
//! and inter-VM communication delay.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `Vm`, `Assignment`, `Schedule`
//! - **`validation`**: Input integrity checks (duplicate IDs, dangling
//!   predecessors, unusable VMs)
//! - **`topology`**: Kahn topological sequencing and cycle detection
//! - **`scheduler`**: Deterministic schedule simulator and greedy baseline
//! - **`ga`**: Genetic optimizer using the simulator as fitness oracle
//!
//! # Example
//!
//! ```
//! use u_workflow::ga::{optimize, GaConfig};
//! use u_workflow::models::{Task, Vm};
//!
//! let tasks = vec![
//!     Task::new("T1", 100.0),
//!     Task::new("T2", 50.0).with_predecessor("T1").with_data_size(8.0),
//!     Task::new("T3", 50.0).with_predecessor("T1").with_data_size(8.0),
//! ];
//! let vms = vec![
//!     Vm::new("VM1", 500.0).with_cores(2).with_queue_wait(0.1),
//!     Vm::new("VM2", 250.0).with_cores(2).with_cost_rate(0.6),
//! ];
//!
//! let result = optimize(&tasks, &vms, &GaConfig::default().with_seed(7)).unwrap();
//! assert_eq!(result.best.len(), 3);
//! ```
//!
//! # References
//!
//! - Topcuoglu et al. (2002), "Performance-effective and low-complexity task
//!   scheduling for heterogeneous computing"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod error;
pub mod ga;
pub mod models;
pub mod scheduler;
pub mod topology;
pub mod validation;

pub use error::{Result, ScheduleError};
