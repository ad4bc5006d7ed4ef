//! Deterministic schedule simulator.
//!
//! # Algorithm
//!
//! 1. Sequence the DAG topologically (fails on a cycle).
//! 2. Every core of a VM starts free at that VM's queue wait.
//! 3. Walk tasks in order. For task T on (vm, core):
//!    - `exec = demand / core_speed`
//!    - `ready = max(core_free, max over preds P of finish(P) + transfer)`
//!      where `transfer` is the largest penalty over the predecessors that
//!      run on another VM (zero if none do), and a penalty is
//!      `T.data_size / bandwidth + fixed_latency`
//!    - `finish = ready + exec`, the core becomes free at `finish`,
//!      `cost += exec * cost_rate`
//! 4. Makespan is the latest finish.
//! 5. Communication delay is the penalty summed over every crossing edge.
//!
//! Steps 3 and 5 aggregate the same penalty differently. The transfer is
//! added once, to the latest predecessor finish, even when that predecessor
//! shares the task's VM. The reported delay sums every crossing edge.
//!
//! # Complexity
//! O(V + E) per assignment once the instance is built.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::models::{Assignment, Placement, Schedule, ScheduledTask, SimulationResult, Task, Vm};
use crate::topology::{self, TaskGraph};
use crate::validation::{validate_input, ValidationError, ValidationErrorKind};

/// Inter-VM transfer model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommModel {
    /// Link bandwidth (data units per time unit, positive).
    pub bandwidth: f64,
    /// Constant latency added to every cross-VM transfer (non-negative).
    pub fixed_latency: f64,
}

impl Default for CommModel {
    fn default() -> Self {
        Self {
            bandwidth: 100.0,
            fixed_latency: 0.02,
        }
    }
}

impl CommModel {
    /// Creates a transfer model.
    pub fn new(bandwidth: f64, fixed_latency: f64) -> Self {
        Self {
            bandwidth,
            fixed_latency,
        }
    }

    /// Transfer time of `data_size` across VMs.
    #[inline]
    pub fn penalty(&self, data_size: f64) -> f64 {
        data_size / self.bandwidth + self.fixed_latency
    }

    /// Checks that bandwidth is positive and latency non-negative.
    pub fn validate(&self) -> Result<()> {
        if !(self.bandwidth.is_finite() && self.bandwidth > 0.0) {
            return Err(ScheduleError::InvalidConfiguration(format!(
                "bandwidth must be positive, got {}",
                self.bandwidth
            )));
        }
        if !(self.fixed_latency.is_finite() && self.fixed_latency >= 0.0) {
            return Err(ScheduleError::InvalidConfiguration(format!(
                "fixed_latency must be non-negative, got {}",
                self.fixed_latency
            )));
        }
        Ok(())
    }
}

/// Index-resolved placement: `vms[vm]`, core `core`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    /// VM index.
    pub vm: usize,
    /// Core index on that VM.
    pub core: usize,
}

/// A validated, sequenced workflow ready for repeated simulation.
///
/// Construction validates tasks, VMs and the communication model and
/// sequences the DAG once; afterwards any number of assignments can be
/// evaluated without repeating those checks. Tasks and VMs are borrowed
/// and never mutated.
///
/// # Example
/// ```
/// use u_workflow::models::{Assignment, Task, Vm};
/// use u_workflow::scheduler::{CommModel, SchedulingInstance};
///
/// let tasks = vec![Task::new("T1", 100.0), Task::new("T2", 50.0).with_predecessor("T1")];
/// let vms = vec![Vm::new("VM1", 100.0)];
/// let instance = SchedulingInstance::new(&tasks, &vms, CommModel::default()).unwrap();
///
/// let assignment = Assignment::new().with("T1", "VM1", 0).with("T2", "VM1", 0);
/// let result = instance.simulate(&assignment).unwrap();
/// assert!((result.makespan - 1.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct SchedulingInstance<'a> {
    tasks: &'a [Task],
    vms: &'a [Vm],
    comm: CommModel,
    graph: TaskGraph,
    order: Vec<usize>,
    core_speeds: Vec<Vec<f64>>,
    task_index: HashMap<&'a str, usize>,
    vm_index: HashMap<&'a str, usize>,
}

impl<'a> SchedulingInstance<'a> {
    /// Validates and sequences a workflow.
    ///
    /// # Errors
    /// - [`ScheduleError::InvalidConfiguration`] for a bad `comm` model
    /// - [`ScheduleError::InvalidInput`] for malformed tasks or VMs
    /// - [`ScheduleError::CycleDetected`] for a cyclic predecessor relation
    pub fn new(tasks: &'a [Task], vms: &'a [Vm], comm: CommModel) -> Result<Self> {
        comm.validate()?;
        validate_input(tasks, vms).map_err(ScheduleError::InvalidInput)?;
        let graph = TaskGraph::from_tasks(tasks)?;
        let order = topology::sequence(&graph, tasks)?;

        let core_speeds = vms
            .iter()
            .map(|vm| {
                (0..vm.cores)
                    .map(|core| {
                        vm.core_speed(core).ok_or_else(|| {
                            ScheduleError::InvalidInput(vec![ValidationError::new(
                                ValidationErrorKind::InvalidVm,
                                format!("VM '{}' has no speed for core {core}", vm.id),
                            )])
                        })
                    })
                    .collect::<Result<Vec<f64>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        let task_index = tasks
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.as_str(), i))
            .collect();
        let vm_index = vms
            .iter()
            .enumerate()
            .map(|(i, vm)| (vm.id.as_str(), i))
            .collect();

        Ok(Self {
            tasks,
            vms,
            comm,
            graph,
            order,
            core_speeds,
            task_index,
            vm_index,
        })
    }

    /// Tasks in their supplied order.
    pub fn tasks(&self) -> &'a [Task] {
        self.tasks
    }

    /// VMs in their supplied order.
    pub fn vms(&self) -> &'a [Vm] {
        self.vms
    }

    /// Communication model.
    pub fn comm(&self) -> CommModel {
        self.comm
    }

    /// Precedence graph.
    pub fn graph(&self) -> &TaskGraph {
        &self.graph
    }

    /// Execution order as task indices.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Resolved speed of `vms[vm]` core `core`.
    #[inline]
    pub fn core_speed(&self, slot: Slot) -> f64 {
        self.core_speeds[slot.vm][slot.core]
    }

    /// Resolves an assignment into per-task slots (indexed like `tasks`).
    ///
    /// # Errors
    /// [`ScheduleError::InvalidAssignment`] if a task is missing, an unknown
    /// task or VM is named, or a core index is out of range.
    pub fn encode(&self, assignment: &Assignment) -> Result<Vec<Slot>> {
        let mut slots = Vec::with_capacity(self.tasks.len());
        for task in self.tasks {
            let placement = assignment.get(&task.id).ok_or_else(|| {
                ScheduleError::InvalidAssignment(format!("task '{}' is not assigned", task.id))
            })?;
            slots.push(self.resolve(&task.id, placement)?);
        }
        if let Some((task_id, _)) = assignment
            .iter()
            .find(|(task_id, _)| !self.task_index.contains_key(task_id))
        {
            return Err(ScheduleError::InvalidAssignment(format!(
                "unknown task '{task_id}'"
            )));
        }
        Ok(slots)
    }

    fn resolve(&self, task_id: &str, placement: &Placement) -> Result<Slot> {
        let vm = *self.vm_index.get(placement.vm_id.as_str()).ok_or_else(|| {
            ScheduleError::InvalidAssignment(format!(
                "task '{task_id}' assigned to unknown VM '{}'",
                placement.vm_id
            ))
        })?;
        if !self.vms[vm].has_core(placement.core) {
            return Err(ScheduleError::InvalidAssignment(format!(
                "task '{task_id}' assigned to core {} of VM '{}' which has {} cores",
                placement.core, placement.vm_id, self.vms[vm].cores
            )));
        }
        Ok(Slot {
            vm,
            core: placement.core,
        })
    }

    /// Converts slots back into an ID-based assignment.
    pub fn decode(&self, slots: &[Slot]) -> Assignment {
        self.tasks
            .iter()
            .zip(slots)
            .map(|(task, slot)| {
                (
                    task.id.clone(),
                    Placement::new(self.vms[slot.vm].id.clone(), slot.core),
                )
            })
            .collect()
    }

    /// Simulates an assignment.
    pub fn simulate(&self, assignment: &Assignment) -> Result<SimulationResult> {
        let slots = self.encode(assignment)?;
        Ok(self.evaluate(&slots))
    }

    /// Simulates an assignment and returns the full timeline.
    pub fn schedule(&self, assignment: &Assignment) -> Result<Schedule> {
        let slots = self.encode(assignment)?;
        Ok(self.timeline(&slots))
    }

    /// Simulates pre-resolved slots.
    ///
    /// `slots` must come from [`encode`](Self::encode) or be otherwise
    /// in range for this instance.
    pub fn evaluate(&self, slots: &[Slot]) -> SimulationResult {
        self.run(slots, |_, _, _| {})
    }

    /// Simulates pre-resolved slots, recording every task's timing.
    pub fn timeline(&self, slots: &[Slot]) -> Schedule {
        let mut entries = Vec::with_capacity(self.tasks.len());
        let result = self.run(slots, |t, start, finish| {
            let slot = slots[t];
            entries.push(ScheduledTask {
                task_id: self.tasks[t].id.clone(),
                vm_id: self.vms[slot.vm].id.clone(),
                core: slot.core,
                start,
                finish,
                exec_time: finish - start,
            });
        });
        Schedule { entries, result }
    }

    fn run<F>(&self, slots: &[Slot], mut on_task: F) -> SimulationResult
    where
        F: FnMut(usize, f64, f64),
    {
        debug_assert_eq!(slots.len(), self.tasks.len());

        let mut core_free: Vec<Vec<f64>> = self
            .vms
            .iter()
            .map(|vm| vec![vm.queue_wait; vm.cores])
            .collect();
        let mut finish = vec![0.0_f64; self.tasks.len()];
        let mut result = SimulationResult::default();

        for &t in &self.order {
            let task = &self.tasks[t];
            let slot = slots[t];
            let exec = task.demand / self.core_speed(slot);
            let penalty = self.comm.penalty(task.data_size);

            let mut pred_finish = 0.0_f64;
            let mut transfer = 0.0_f64;
            for &p in self.graph.predecessors(t) {
                pred_finish = pred_finish.max(finish[p]);
                if slots[p].vm != slot.vm {
                    result.comm_delay += penalty;
                    transfer = penalty;
                }
            }
            let ready = (pred_finish + transfer).max(core_free[slot.vm][slot.core]);

            let end = ready + exec;
            finish[t] = end;
            core_free[slot.vm][slot.core] = end;
            result.cost += exec * self.vms[slot.vm].cost_rate;
            result.makespan = result.makespan.max(end);
            on_task(t, ready, end);
        }

        result
    }
}

/// Simulates `assignment` of `tasks` onto `vms`.
///
/// Returns `(makespan, cost, comm_delay)` as a [`SimulationResult`].
///
/// # Errors
/// Cyclic tasks, malformed inputs, or a partial / out-of-range assignment
/// abort the simulation with no partial result.
pub fn simulate(
    tasks: &[Task],
    vms: &[Vm],
    assignment: &Assignment,
    comm: &CommModel,
) -> Result<SimulationResult> {
    SchedulingInstance::new(tasks, vms, *comm)?.simulate(assignment)
}

/// Like [`simulate`], returning the full per-task timeline.
pub fn simulate_schedule(
    tasks: &[Task],
    vms: &[Vm],
    assignment: &Assignment,
    comm: &CommModel,
) -> Result<Schedule> {
    SchedulingInstance::new(tasks, vms, *comm)?.schedule(assignment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    const EPS: f64 = 1e-12;

    fn three_task_workflow() -> Vec<Task> {
        vec![
            Task::new("T1", 100.0),
            Task::new("T2", 50.0).with_predecessor("T1"),
            Task::new("T3", 50.0).with_predecessor("T1"),
        ]
    }

    fn all_on(tasks: &[Task], vm: &str, core: usize) -> Assignment {
        tasks
            .iter()
            .map(|t| (t.id.clone(), Placement::new(vm, core)))
            .collect()
    }

    #[test]
    fn test_single_core_scenario() {
        let tasks = three_task_workflow();
        let vms = vec![Vm::new("VM1", 100.0).with_cost_rate(2.5)];
        let assignment = all_on(&tasks, "VM1", 0);

        let schedule =
            simulate_schedule(&tasks, &vms, &assignment, &CommModel::default()).unwrap();

        let t1 = schedule.entry_for_task("T1").unwrap();
        assert!((t1.exec_time - 1.0).abs() < EPS);
        assert!((t1.finish - 1.0).abs() < EPS);
        let t2 = schedule.entry_for_task("T2").unwrap();
        assert!((t2.start - 1.0).abs() < EPS);
        assert!((t2.finish - 1.5).abs() < EPS);
        let t3 = schedule.entry_for_task("T3").unwrap();
        assert!((t3.start - 1.5).abs() < EPS);
        assert!((t3.finish - 2.0).abs() < EPS);

        let r = schedule.result;
        assert!((r.makespan - 2.0).abs() < EPS);
        assert!((r.cost - 2.0 * 2.5).abs() < EPS);
        assert_eq!(r.comm_delay, 0.0);
    }

    #[test]
    fn test_empty_workflow() {
        let r = simulate(&[], &[], &Assignment::new(), &CommModel::default()).unwrap();
        assert_eq!(r, SimulationResult::default());
    }

    #[test]
    fn test_queue_wait_delays_start() {
        let tasks = vec![Task::new("T1", 100.0)];
        let vms = vec![Vm::new("VM1", 100.0).with_queue_wait(0.5)];
        let r = simulate(&tasks, &vms, &all_on(&tasks, "VM1", 0), &CommModel::default()).unwrap();
        assert!((r.makespan - 1.5).abs() < EPS);
        // Waiting is not billed
        assert!((r.cost - 1.0).abs() < EPS);
    }

    #[test]
    fn test_parallel_cores() {
        let tasks = three_task_workflow();
        let vms = vec![Vm::new("VM1", 100.0).with_cores(2)];
        let assignment = Assignment::new()
            .with("T1", "VM1", 0)
            .with("T2", "VM1", 0)
            .with("T3", "VM1", 1);
        let r = simulate(&tasks, &vms, &assignment, &CommModel::default()).unwrap();
        assert!((r.makespan - 1.5).abs() < EPS);
        // Same VM: no transfer
        assert_eq!(r.comm_delay, 0.0);
    }

    #[test]
    fn test_per_core_speeds() {
        let tasks = vec![Task::new("T1", 100.0)];
        let vms = vec![Vm::new("VM1", 0.0)
            .with_core_speeds(vec![100.0, 50.0])
            .with_cores(3)];
        let comm = CommModel::default();
        let on_core = |core| simulate(&tasks, &vms, &all_on(&tasks, "VM1", core), &comm).unwrap();
        assert!((on_core(0).makespan - 1.0).abs() < EPS);
        assert!((on_core(1).makespan - 2.0).abs() < EPS);
        assert!((on_core(2).makespan - 1.0).abs() < EPS);
    }

    #[test]
    fn test_cross_vm_penalty() {
        let tasks = vec![
            Task::new("T1", 100.0),
            Task::new("T2", 100.0).with_predecessor("T1").with_data_size(10.0),
        ];
        let vms = vec![Vm::new("VM1", 100.0), Vm::new("VM2", 100.0)];
        let comm = CommModel::new(100.0, 0.02);
        let assignment = Assignment::new().with("T1", "VM1", 0).with("T2", "VM2", 0);

        let schedule = simulate_schedule(&tasks, &vms, &assignment, &comm).unwrap();
        let penalty = 10.0 / 100.0 + 0.02;
        let t2 = schedule.entry_for_task("T2").unwrap();
        assert!((t2.start - (1.0 + penalty)).abs() < EPS);
        assert!((schedule.result.comm_delay - penalty).abs() < EPS);
    }

    #[test]
    fn test_comm_delay_sums_edges_but_ready_time_adds_one_transfer() {
        // T3 has two predecessors on VM1 and runs on VM2: both edges cross.
        let tasks = vec![
            Task::new("T1", 100.0),
            Task::new("T2", 100.0),
            Task::new("T3", 100.0)
                .with_predecessors(["T1", "T2"])
                .with_data_size(30.0),
        ];
        let vms = vec![Vm::new("VM1", 100.0).with_cores(2), Vm::new("VM2", 100.0)];
        let comm = CommModel::new(10.0, 0.5);
        let assignment = Assignment::new()
            .with("T1", "VM1", 0)
            .with("T2", "VM1", 1)
            .with("T3", "VM2", 0);

        let schedule = simulate_schedule(&tasks, &vms, &assignment, &comm).unwrap();
        let penalty = 30.0 / 10.0 + 0.5;
        let t3 = schedule.entry_for_task("T3").unwrap();
        // One penalty on the critical arrival
        assert!((t3.start - (1.0 + penalty)).abs() < EPS);
        // Two penalties in the reported total
        assert!((schedule.result.comm_delay - 2.0 * penalty).abs() < EPS);
    }

    #[test]
    fn test_transfer_added_to_latest_local_predecessor() {
        // T1 (remote) finishes early, T2 (local) finishes last: T3 still
        // waits for the transfer on top of T2's finish.
        let tasks = vec![
            Task::new("T1", 100.0),
            Task::new("T2", 300.0),
            Task::new("T3", 100.0)
                .with_predecessors(["T1", "T2"])
                .with_data_size(10.0),
        ];
        let vms = vec![Vm::new("VM1", 100.0).with_cores(2), Vm::new("VM2", 100.0)];
        let comm = CommModel::new(100.0, 0.02);
        let assignment = Assignment::new()
            .with("T1", "VM2", 0)
            .with("T2", "VM1", 0)
            .with("T3", "VM1", 1);

        let schedule = simulate_schedule(&tasks, &vms, &assignment, &comm).unwrap();
        let t3 = schedule.entry_for_task("T3").unwrap();
        assert!((t3.start - 3.12).abs() < 1e-9, "start {}", t3.start);
        assert!((schedule.result.makespan - 4.12).abs() < 1e-9);
        assert!((schedule.result.comm_delay - 0.12).abs() < 1e-9);
    }

    #[test]
    fn test_same_vm_other_core_has_no_penalty() {
        let tasks = vec![
            Task::new("T1", 100.0),
            Task::new("T2", 100.0).with_predecessor("T1").with_data_size(50.0),
        ];
        let vms = vec![Vm::new("VM1", 100.0).with_cores(2)];
        let assignment = Assignment::new().with("T1", "VM1", 0).with("T2", "VM1", 1);
        let schedule =
            simulate_schedule(&tasks, &vms, &assignment, &CommModel::default()).unwrap();
        assert!((schedule.entry_for_task("T2").unwrap().start - 1.0).abs() < EPS);
        assert_eq!(schedule.result.comm_delay, 0.0);
    }

    #[test]
    fn test_cycle_aborts() {
        let tasks = vec![
            Task::new("A", 1.0).with_predecessor("B"),
            Task::new("B", 1.0).with_predecessor("A"),
        ];
        let vms = vec![Vm::new("VM1", 1.0)];
        let err = simulate(&tasks, &vms, &all_on(&tasks, "VM1", 0), &CommModel::default())
            .unwrap_err();
        assert!(matches!(err, ScheduleError::CycleDetected { .. }));
    }

    #[test]
    fn test_invalid_assignments() {
        let tasks = three_task_workflow();
        let vms = vec![Vm::new("VM1", 100.0).with_cores(2)];
        let comm = CommModel::default();
        let instance = SchedulingInstance::new(&tasks, &vms, comm).unwrap();

        let missing = Assignment::new().with("T1", "VM1", 0).with("T2", "VM1", 0);
        let bad_core = all_on(&tasks, "VM1", 2);
        let bad_vm = all_on(&tasks, "VM9", 0);
        let extra = all_on(&tasks, "VM1", 0).with("T9", "VM1", 0);

        for assignment in [missing, bad_core, bad_vm, extra] {
            assert!(matches!(
                instance.simulate(&assignment),
                Err(ScheduleError::InvalidAssignment(_))
            ));
        }
    }

    #[test]
    fn test_invalid_comm_model() {
        let tasks = three_task_workflow();
        let vms = vec![Vm::new("VM1", 100.0)];
        for comm in [CommModel::new(0.0, 0.0), CommModel::new(10.0, -1.0)] {
            assert!(matches!(
                SchedulingInstance::new(&tasks, &vms, comm),
                Err(ScheduleError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn test_encode_decode_preserves_assignment() {
        let tasks = three_task_workflow();
        let vms = vec![Vm::new("VM1", 100.0).with_cores(2), Vm::new("VM2", 50.0)];
        let instance = SchedulingInstance::new(&tasks, &vms, CommModel::default()).unwrap();
        let assignment = Assignment::new()
            .with("T1", "VM2", 0)
            .with("T2", "VM1", 1)
            .with("T3", "VM1", 0);
        let slots = instance.encode(&assignment).unwrap();
        assert_eq!(slots[0], Slot { vm: 1, core: 0 });
        assert_eq!(instance.decode(&slots), assignment);
    }

    // ---- property checks over random DAGs ----

    fn random_problem(rng: &mut SmallRng) -> (Vec<Task>, Vec<Vm>) {
        let n = rng.random_range(1..15);
        let tasks = (0..n)
            .map(|i| {
                let mut t = Task::new(format!("T{i}"), rng.random_range(20.0..200.0))
                    .with_data_size(rng.random_range(0.0..20.0));
                for j in 0..i {
                    if rng.random_bool(0.3) {
                        t = t.with_predecessor(format!("T{j}"));
                    }
                }
                t
            })
            .collect();
        let vms = (0..rng.random_range(1..4))
            .map(|i| {
                Vm::new(format!("VM{i}"), rng.random_range(100.0..500.0))
                    .with_cores(rng.random_range(1..3))
                    .with_cost_rate(rng.random_range(0.5..1.5))
                    .with_queue_wait(rng.random_range(0.0..0.5))
            })
            .collect();
        (tasks, vms)
    }

    fn random_slots(instance: &SchedulingInstance<'_>, rng: &mut SmallRng) -> Vec<Slot> {
        (0..instance.tasks().len())
            .map(|_| {
                let vm = rng.random_range(0..instance.vms().len());
                let core = rng.random_range(0..instance.vms()[vm].cores);
                Slot { vm, core }
            })
            .collect()
    }

    #[test]
    fn test_deterministic() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..20 {
            let (tasks, vms) = random_problem(&mut rng);
            let instance = SchedulingInstance::new(&tasks, &vms, CommModel::default()).unwrap();
            let slots = random_slots(&instance, &mut rng);
            let a = instance.evaluate(&slots);
            let b = instance.evaluate(&slots);
            assert_eq!(a.makespan.to_bits(), b.makespan.to_bits());
            assert_eq!(a.cost.to_bits(), b.cost.to_bits());
            assert_eq!(a.comm_delay.to_bits(), b.comm_delay.to_bits());
        }
    }

    #[test]
    fn test_timing_bounds() {
        let mut rng = SmallRng::seed_from_u64(7);
        let comm = CommModel::default();
        for _ in 0..30 {
            let (tasks, vms) = random_problem(&mut rng);
            let instance = SchedulingInstance::new(&tasks, &vms, comm).unwrap();
            let slots = random_slots(&instance, &mut rng);
            let schedule = instance.timeline(&slots);

            for (i, task) in tasks.iter().enumerate() {
                let e = schedule.entry_for_task(&task.id).unwrap();
                let exec = task.demand / instance.core_speed(slots[i]);
                assert!(e.finish >= e.start + exec - 1e-9);
                assert!(e.start >= vms[slots[i].vm].queue_wait);
                for pred in &task.predecessors {
                    let p = schedule.entry_for_task(pred).unwrap();
                    let p_idx = tasks.iter().position(|t| &t.id == pred).unwrap();
                    let penalty = if slots[p_idx].vm != slots[i].vm {
                        comm.penalty(task.data_size)
                    } else {
                        0.0
                    };
                    assert!(e.start >= p.finish + penalty - 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_faster_core_never_increases_makespan() {
        let mut rng = SmallRng::seed_from_u64(99);
        for _ in 0..30 {
            let (tasks, vms) = random_problem(&mut rng);
            let slots = {
                let instance = SchedulingInstance::new(&tasks, &vms, CommModel::default()).unwrap();
                random_slots(&instance, &mut rng)
            };
            let before = SchedulingInstance::new(&tasks, &vms, CommModel::default())
                .unwrap()
                .evaluate(&slots);

            let mut faster = vms.clone();
            let target = rng.random_range(0..faster.len());
            let rates: Vec<f64> = (0..faster[target].cores)
                .map(|c| faster[target].core_speed(c).unwrap())
                .collect();
            let boosted_core = rng.random_range(0..rates.len());
            let mut boosted = rates.clone();
            boosted[boosted_core] *= 2.0;
            faster[target].speed = crate::models::CoreSpeed::PerCore(boosted);

            let after = SchedulingInstance::new(&tasks, &faster, CommModel::default())
                .unwrap()
                .evaluate(&slots);
            assert!(after.makespan <= before.makespan + 1e-9);
        }
    }
}
