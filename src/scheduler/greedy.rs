//! Earliest-finish-time greedy baseline.
//!
//! # Algorithm
//!
//! 1. Walk tasks in topological order.
//! 2. For each task, try every (VM, core) and compute the finish time the
//!    simulator would give it, including queue wait and cross-VM penalties.
//! 3. Keep the earliest finish (ties: lower cost, then first VM/core).
//!
//! Not optimal, but fast. Useful as a comparison point for the GA, or as a
//! seed individual for its initial population.
//!
//! # Complexity
//! O(V * C + E * C) where C is the total number of cores.
//!
//! # Reference
//! Topcuoglu et al. (2002), HEFT processor selection phase

use crate::error::Result;
use crate::models::{Assignment, Task, Vm};

use super::simulator::{CommModel, SchedulingInstance, Slot};

/// Builds an earliest-finish-time assignment for `tasks` on `vms`.
///
/// # Example
/// ```
/// use u_workflow::models::{Task, Vm};
/// use u_workflow::scheduler::{greedy_assignment, simulate, CommModel};
///
/// let tasks = vec![Task::new("T1", 100.0), Task::new("T2", 100.0)];
/// let vms = vec![Vm::new("VM1", 100.0).with_cores(2)];
/// let comm = CommModel::default();
///
/// let assignment = greedy_assignment(&tasks, &vms, &comm).unwrap();
/// let result = simulate(&tasks, &vms, &assignment, &comm).unwrap();
/// assert!((result.makespan - 1.0).abs() < 1e-12);
/// ```
pub fn greedy_assignment(tasks: &[Task], vms: &[Vm], comm: &CommModel) -> Result<Assignment> {
    let instance = SchedulingInstance::new(tasks, vms, *comm)?;
    Ok(instance.decode(&greedy_slots(&instance)))
}

/// Greedy slots for an already validated instance.
pub fn greedy_slots(instance: &SchedulingInstance<'_>) -> Vec<Slot> {
    let tasks = instance.tasks();
    let vms = instance.vms();
    let comm = instance.comm();

    let mut core_free: Vec<Vec<f64>> = vms.iter().map(|vm| vec![vm.queue_wait; vm.cores]).collect();
    let mut finish = vec![0.0_f64; tasks.len()];
    let mut slots = vec![Slot { vm: 0, core: 0 }; tasks.len()];

    for &t in instance.order() {
        let task = &tasks[t];
        let penalty = comm.penalty(task.data_size);
        let preds = instance.graph().predecessors(t);

        let mut best: Option<(f64, f64, Slot)> = None;
        for (v, vm) in vms.iter().enumerate() {
            for core in 0..vm.cores {
                let slot = Slot { vm: v, core };
                let exec = task.demand / instance.core_speed(slot);
                let pred_finish = preds.iter().map(|&p| finish[p]).fold(0.0, f64::max);
                let transfer = if preds.iter().any(|&p| slots[p].vm != v) {
                    penalty
                } else {
                    0.0
                };
                let ready = (pred_finish + transfer).max(core_free[v][core]);
                let end = ready + exec;
                let cost = exec * vm.cost_rate;

                let better = match best {
                    None => true,
                    Some((best_end, best_cost, _)) => {
                        end < best_end || (end == best_end && cost < best_cost)
                    }
                };
                if better {
                    best = Some((end, cost, slot));
                }
            }
        }

        // Validated instances have at least one VM with one core whenever
        // there is a task to place.
        if let Some((end, _, slot)) = best {
            slots[t] = slot;
            finish[t] = end;
            core_free[slot.vm][slot.core] = end;
        }
    }

    slots
}
