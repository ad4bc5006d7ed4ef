//! Task-to-core assignment model.
//!
//! An assignment maps every task of a workflow to one core of one VM.
//! It carries no timing: start and finish times are derived by the
//! simulator.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Target core for one task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// Assigned VM ID.
    pub vm_id: String,
    /// Core index on that VM (0-based).
    pub core: usize,
}

impl Placement {
    /// Creates a placement.
    pub fn new(vm_id: impl Into<String>, core: usize) -> Self {
        Self {
            vm_id: vm_id.into(),
            core,
        }
    }
}

/// Mapping from task ID to placement.
///
/// Only total, in-range assignments are accepted by the simulator; this
/// type does not enforce that on its own (see
/// [`SchedulingInstance::encode`](crate::scheduler::SchedulingInstance::encode)).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    placements: HashMap<String, Placement>,
}

impl Assignment {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a task on `(vm_id, core)`, replacing any previous placement.
    pub fn assign(&mut self, task_id: impl Into<String>, vm_id: impl Into<String>, core: usize) {
        self.placements
            .insert(task_id.into(), Placement::new(vm_id, core));
    }

    /// Builder form of [`assign`](Self::assign).
    pub fn with(mut self, task_id: impl Into<String>, vm_id: impl Into<String>, core: usize) -> Self {
        self.assign(task_id, vm_id, core);
        self
    }

    /// Placement of a task.
    pub fn get(&self, task_id: &str) -> Option<&Placement> {
        self.placements.get(task_id)
    }

    /// Whether the task is placed.
    pub fn contains(&self, task_id: &str) -> bool {
        self.placements.contains_key(task_id)
    }

    /// Number of placed tasks.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Whether no task is placed.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Iterates over `(task_id, placement)` in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Placement)> {
        self.placements.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Task IDs placed on a given VM.
    pub fn tasks_on_vm(&self, vm_id: &str) -> Vec<&str> {
        self.placements
            .iter()
            .filter(|(_, p)| p.vm_id == vm_id)
            .map(|(t, _)| t.as_str())
            .collect()
    }
}

impl FromIterator<(String, Placement)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (String, Placement)>>(iter: I) -> Self {
        Self {
            placements: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_and_lookup() {
        let a = Assignment::new()
            .with("T1", "VM1", 0)
            .with("T2", "VM2", 1);

        assert_eq!(a.len(), 2);
        assert_eq!(a.get("T1"), Some(&Placement::new("VM1", 0)));
        assert!(a.contains("T2"));
        assert!(!a.contains("T3"));
    }

    #[test]
    fn test_reassign_replaces() {
        let mut a = Assignment::new().with("T1", "VM1", 0);
        a.assign("T1", "VM2", 1);
        assert_eq!(a.len(), 1);
        assert_eq!(a.get("T1").unwrap().vm_id, "VM2");
    }

    #[test]
    fn test_tasks_on_vm() {
        let a = Assignment::new()
            .with("T1", "VM1", 0)
            .with("T2", "VM2", 0)
            .with("T3", "VM1", 1);
        let mut on_vm1 = a.tasks_on_vm("VM1");
        on_vm1.sort();
        assert_eq!(on_vm1, vec!["T1", "T3"]);
    }
}
