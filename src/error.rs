//! Error types.
//!
//! Every fallible operation of the crate returns [`ScheduleError`]. Errors
//! abort the whole call: the simulator never returns a partial result and
//! the optimizer never starts a generation on invalid input.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised by sequencing, simulation, and optimization.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    /// The predecessor relation contains a cycle through `task_id`.
    #[error("Circular dependency detected involving task '{task_id}'")]
    CycleDetected { task_id: String },
    /// The assignment is partial, names an unknown task or VM, or uses an
    /// out-of-range core.
    #[error("Invalid assignment: {0}")]
    InvalidAssignment(String),
    /// Optimizer or communication parameters are out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// Task or VM definitions are malformed.
    #[error("Invalid input: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ScheduleError>;
