//! Input validation for workflow scheduling problems.
//!
//! Checks structural integrity of tasks and VMs before simulation or
//! optimization. Detects:
//! - Duplicate IDs
//! - Missing or self-referencing predecessors
//! - Non-positive demands and negative data sizes
//! - VMs without cores, with unusable speeds, or negative cost/wait
//!
//! Acyclicity is not checked here: the topological sequencer
//! ([`crate::topology`]) is the single DAG check of the crate.

use std::collections::HashSet;

use thiserror::Error;

use crate::models::{Task, Vm};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two tasks or two VMs share the same ID.
    DuplicateId,
    /// A task references a predecessor that doesn't exist, or itself.
    InvalidPredecessor,
    /// A task has a non-positive demand or a negative data size.
    InvalidTask,
    /// A VM cannot execute tasks (no cores, bad speed, negative cost/wait).
    InvalidVm,
    /// Tasks were supplied but no VM can host them.
    NoVms,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for a workflow scheduling problem.
///
/// Checks:
/// 1. No duplicate task IDs
/// 2. Positive, finite demand and non-negative data size per task
/// 3. Every predecessor exists and no task depends on itself
/// 4. No duplicate VM IDs
/// 5. Every VM has cores, positive finite speeds, non-negative cost rate
///    and queue wait
/// 6. At least one VM when there are tasks
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(tasks: &[Task], vms: &[Vm]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut task_ids = HashSet::new();
    for task in tasks {
        if !task_ids.insert(task.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", task.id),
            ));
        }
        if !(task.demand.is_finite() && task.demand > 0.0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTask,
                format!("Task '{}' has non-positive demand {}", task.id, task.demand),
            ));
        }
        if !(task.data_size.is_finite() && task.data_size >= 0.0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTask,
                format!("Task '{}' has negative data size {}", task.id, task.data_size),
            ));
        }
    }

    for task in tasks {
        for pred in &task.predecessors {
            if pred == &task.id {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidPredecessor,
                    format!("Task '{}' lists itself as a predecessor", task.id),
                ));
            } else if !task_ids.contains(pred.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidPredecessor,
                    format!("Task '{}' references unknown predecessor '{}'", task.id, pred),
                ));
            }
        }
    }

    let mut vm_ids = HashSet::new();
    for vm in vms {
        if !vm_ids.insert(vm.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate VM ID: {}", vm.id),
            ));
        }
        errors.extend(check_vm(vm));
    }

    if !tasks.is_empty() && vms.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoVms,
            format!("{} tasks supplied but no VMs", tasks.len()),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_vm(vm: &Vm) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut invalid = |message: String| {
        errors.push(ValidationError::new(ValidationErrorKind::InvalidVm, message));
    };

    if vm.cores == 0 {
        invalid(format!("VM '{}' has no cores", vm.id));
    }
    let rates = vm.speed.rates();
    if rates.is_empty() {
        invalid(format!("VM '{}' has an empty per-core speed list", vm.id));
    }
    if rates.iter().any(|r| !(r.is_finite() && *r > 0.0)) {
        invalid(format!("VM '{}' has a non-positive core speed", vm.id));
    }
    if !(vm.cost_rate.is_finite() && vm.cost_rate >= 0.0) {
        invalid(format!("VM '{}' has negative cost rate {}", vm.id, vm.cost_rate));
    }
    if !(vm.queue_wait.is_finite() && vm.queue_wait >= 0.0) {
        invalid(format!("VM '{}' has negative queue wait {}", vm.id, vm.queue_wait));
    }
    errors
}
