//! Workflow task model.
//!
//! A task is one node of a workflow DAG: a unit of computation that can
//! only start after all of its predecessors have finished.
//!
//! # Reference
//! Topcuoglu et al. (2002), "Performance-effective and low-complexity task
//! scheduling for heterogeneous computing" (workflow DAG model)

use serde::{Deserialize, Serialize};

/// A workflow task (DAG node) to be placed on a VM core.
///
/// # Units
/// `demand` is abstract work units; dividing it by a core speed (work units
/// per time unit) yields the execution time. `data_size` is the volume
/// handed from each predecessor to this task, divided by link bandwidth to
/// obtain the transfer time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Computation demand (work units, positive).
    pub demand: f64,
    /// IDs of tasks that must finish before this one starts.
    pub predecessors: Vec<String>,
    /// Data volume received from each predecessor (non-negative).
    pub data_size: f64,
    /// Descriptive kind. Does not affect simulation.
    pub kind: TaskKind,
}

/// Task classification (display only).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// CPU-bound work.
    #[default]
    Compute,
    /// I/O-bound work.
    Io,
}

impl Task {
    /// Creates a compute task with the given demand and no predecessors.
    pub fn new(id: impl Into<String>, demand: f64) -> Self {
        Self {
            id: id.into(),
            demand,
            predecessors: Vec::new(),
            data_size: 0.0,
            kind: TaskKind::Compute,
        }
    }

    /// Adds a predecessor. Repeated IDs are ignored (predecessors form a set).
    pub fn with_predecessor(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        if !self.predecessors.contains(&id) {
            self.predecessors.push(id);
        }
        self
    }

    /// Adds several predecessors.
    pub fn with_predecessors<I, S>(self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ids.into_iter()
            .fold(self, |task, id| task.with_predecessor(id))
    }

    /// Sets the per-predecessor data transfer size.
    pub fn with_data_size(mut self, data_size: f64) -> Self {
        self.data_size = data_size;
        self
    }

    /// Sets the task kind.
    pub fn with_kind(mut self, kind: TaskKind) -> Self {
        self.kind = kind;
        self
    }

    /// Whether this task has no predecessors (a DAG entry node).
    pub fn is_entry(&self) -> bool {
        self.predecessors.is_empty()
    }
}
