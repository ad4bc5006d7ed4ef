//! Topological sequencing of workflow DAGs.
//!
//! # Algorithm
//! Kahn's algorithm: compute in-degrees from predecessor edges, then
//! repeatedly emit zero in-degree tasks, decrementing their successors.
//! Ready tasks are emitted first-in first-out, seeded in the original task
//! order, so the output is reproducible. If fewer tasks are emitted than
//! supplied, the predecessor relation contains a cycle.
//!
//! This is the single acyclicity check of the crate.
//!
//! # Complexity
//! O(V + E)
//!
//! # Reference
//! Kahn (1962), "Topological sorting of large networks"

use std::collections::{HashMap, VecDeque};

use crate::error::{Result, ScheduleError};
use crate::models::Task;
use crate::validation::{ValidationError, ValidationErrorKind};

/// Index-based precedence graph over a task list.
///
/// Node `i` is `tasks[i]`. Repeated predecessor references collapse into
/// one edge.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    predecessors: Vec<Vec<usize>>,
    successors: Vec<Vec<usize>>,
}

impl TaskGraph {
    /// Builds the graph, resolving predecessor IDs to indices.
    ///
    /// Fails with [`ScheduleError::InvalidInput`] on duplicate task IDs or
    /// unknown predecessors.
    pub fn from_tasks(tasks: &[Task]) -> Result<Self> {
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(tasks.len());
        let mut errors = Vec::new();
        for (i, task) in tasks.iter().enumerate() {
            if index.insert(task.id.as_str(), i).is_some() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!("Duplicate task ID: {}", task.id),
                ));
            }
        }

        let mut predecessors = vec![Vec::new(); tasks.len()];
        let mut successors = vec![Vec::new(); tasks.len()];
        for (i, task) in tasks.iter().enumerate() {
            for pred in &task.predecessors {
                match index.get(pred.as_str()) {
                    Some(&p) => {
                        if !predecessors[i].contains(&p) {
                            predecessors[i].push(p);
                            successors[p].push(i);
                        }
                    }
                    None => errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidPredecessor,
                        format!("Task '{}' references unknown predecessor '{}'", task.id, pred),
                    )),
                }
            }
        }

        if !errors.is_empty() {
            return Err(ScheduleError::InvalidInput(errors));
        }
        Ok(Self {
            predecessors,
            successors,
        })
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.predecessors.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.predecessors.is_empty()
    }

    /// Predecessor indices of node `i`.
    pub fn predecessors(&self, i: usize) -> &[usize] {
        &self.predecessors[i]
    }

    /// Successor indices of node `i`.
    pub fn successors(&self, i: usize) -> &[usize] {
        &self.successors[i]
    }

    /// Number of precedence edges.
    pub fn edge_count(&self) -> usize {
        self.predecessors.iter().map(Vec::len).sum()
    }

    /// Kahn order as node indices.
    ///
    /// On a cycle, returns `Err(i)` where node `i` lies on a cycle.
    pub fn order(&self) -> std::result::Result<Vec<usize>, usize> {
        let n = self.len();
        let mut in_degree: Vec<usize> = self.predecessors.iter().map(Vec::len).collect();
        let mut queue: VecDeque<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
        let mut order = Vec::with_capacity(n);

        while let Some(u) = queue.pop_front() {
            order.push(u);
            for &v in &self.successors[u] {
                in_degree[v] -= 1;
                if in_degree[v] == 0 {
                    queue.push_back(v);
                }
            }
        }

        if order.len() == n {
            return Ok(order);
        }
        Err(self.node_on_cycle(&in_degree))
    }

    /// Walks backwards through unprocessed predecessors until a node
    /// repeats. Every unprocessed node still has an unprocessed
    /// predecessor, so the walk cannot stall.
    fn node_on_cycle(&self, in_degree: &[usize]) -> usize {
        let remaining = |i: usize| in_degree[i] > 0;
        let mut visited = vec![false; self.len()];
        let mut node = (0..self.len()).find(|&i| remaining(i)).unwrap_or(0);
        while !visited[node] {
            visited[node] = true;
            match self.predecessors[node].iter().copied().find(|&p| remaining(p)) {
                Some(p) => node = p,
                None => break,
            }
        }
        node
    }
}

/// Returns task IDs in a valid execution order.
///
/// Ties are broken by the original task order. Fails with
/// [`ScheduleError::CycleDetected`] naming a task on a cycle.
pub fn topological_order(tasks: &[Task]) -> Result<Vec<String>> {
    let graph = TaskGraph::from_tasks(tasks)?;
    let order = sequence(&graph, tasks)?;
    Ok(order.into_iter().map(|i| tasks[i].id.clone()).collect())
}

/// Index order of `graph`, mapping a cycle to [`ScheduleError::CycleDetected`].
pub(crate) fn sequence(graph: &TaskGraph, tasks: &[Task]) -> Result<Vec<usize>> {
    graph.order().map_err(|i| ScheduleError::CycleDetected {
        task_id: tasks[i].id.clone(),
    })
}
