//! Simulated schedule (timeline) model.
//!
//! A schedule is the timeline the simulator derives from an assignment:
//! start and finish time of every task plus the objective totals.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Objective totals of one simulated assignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Latest task finish time (0 for an empty workflow).
    pub makespan: f64,
    /// Sum of execution time times the VM cost rate.
    pub cost: f64,
    /// Sum of transfer penalties over all crossing edges.
    pub comm_delay: f64,
}

/// A task placed in time on a VM core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTask {
    /// Task ID.
    pub task_id: String,
    /// VM ID.
    pub vm_id: String,
    /// Core index.
    pub core: usize,
    /// Start time.
    pub start: f64,
    /// Finish time.
    pub finish: f64,
    /// Pure execution time (`finish - start`).
    pub exec_time: f64,
}

/// Full simulated timeline of an assignment.
///
/// Entries are stored in execution (topological) order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Per-task timeline entries.
    pub entries: Vec<ScheduledTask>,
    /// Objective totals.
    pub result: SimulationResult,
}

impl Schedule {
    /// Makespan of the schedule.
    #[inline]
    pub fn makespan(&self) -> f64 {
        self.result.makespan
    }

    /// Entry for a given task.
    pub fn entry_for_task(&self, task_id: &str) -> Option<&ScheduledTask> {
        self.entries.iter().find(|e| e.task_id == task_id)
    }

    /// All entries on a given VM, in execution order.
    pub fn entries_for_vm(&self, vm_id: &str) -> Vec<&ScheduledTask> {
        self.entries.iter().filter(|e| e.vm_id == vm_id).collect()
    }

    /// Total execution time spent on a VM across its cores.
    pub fn vm_busy_time(&self, vm_id: &str) -> f64 {
        self.entries_for_vm(vm_id).iter().map(|e| e.exec_time).sum()
    }

    /// VM utilization: busy time / (makespan * cores).
    ///
    /// Returns `None` if the makespan is zero or `cores` is zero.
    pub fn vm_utilization(&self, vm_id: &str, cores: usize) -> Option<f64> {
        let horizon = self.makespan() * cores as f64;
        if horizon <= 0.0 {
            return None;
        }
        Some(self.vm_busy_time(vm_id) / horizon)
    }

    /// Busy time for every VM that has at least one task.
    pub fn busy_times(&self) -> HashMap<String, f64> {
        let mut busy: HashMap<String, f64> = HashMap::new();
        for e in &self.entries {
            *busy.entry(e.vm_id.clone()).or_insert(0.0) += e.exec_time;
        }
        busy
    }

    /// Number of scheduled tasks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
