//! Direct assignment chromosome.
//!
//! # Encoding
//!
//! One gene per task, in the order the tasks were supplied. Gene `i` is the
//! [`Slot`] (VM index, core index) that runs `tasks[i]`. Every chromosome is
//! total and in range by construction, so the operators below never fail.
//!
//! # Reference
//! Wang et al. (1997), "Task matching and scheduling in heterogeneous
//! computing environments using a genetic-algorithm-based approach"

use rand::Rng;

use crate::models::Vm;
use crate::scheduler::Slot;

/// Task-to-core chromosome.
///
/// Lower fitness = better schedule (minimization convention).
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentChromosome {
    /// One slot per task, indexed like the task list.
    pub genes: Vec<Slot>,
    /// Fitness value (lower = better). `INFINITY` until evaluated.
    pub fitness: f64,
}

impl AssignmentChromosome {
    /// Wraps genes into an unevaluated chromosome.
    pub fn from_genes(genes: Vec<Slot>) -> Self {
        Self {
            genes,
            fitness: f64::INFINITY,
        }
    }

    /// Uniformly random chromosome: for each task a random VM, then a
    /// random core of that VM.
    pub fn random<R: Rng>(task_count: usize, vms: &[Vm], rng: &mut R) -> Self {
        let genes = (0..task_count).map(|_| random_slot(vms, rng)).collect();
        Self::from_genes(genes)
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the chromosome has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Whether every gene names an existing VM core.
    pub fn is_valid(&self, task_count: usize, vms: &[Vm]) -> bool {
        self.genes.len() == task_count
            && self
                .genes
                .iter()
                .all(|g| vms.get(g.vm).is_some_and(|vm| vm.has_core(g.core)))
    }
}

/// Draws a VM uniformly, then one of its cores uniformly.
///
/// `vms` must be non-empty and every VM must have at least one core.
pub fn random_slot<R: Rng>(vms: &[Vm], rng: &mut R) -> Slot {
    let vm = rng.random_range(0..vms.len());
    let core = rng.random_range(0..vms[vm].cores);
    Slot { vm, core }
}

// ======================== Crossover ========================

/// Single-point crossover over the task order.
///
/// A cut is drawn uniformly in `[1, n-1]`. Child 1 takes parent 1's genes
/// before the cut and parent 2's from the cut on; child 2 is the
/// complement. With fewer than two genes the parents are copied.
pub fn single_point_crossover<R: Rng>(
    p1: &AssignmentChromosome,
    p2: &AssignmentChromosome,
    rng: &mut R,
) -> (AssignmentChromosome, AssignmentChromosome) {
    let n = p1.genes.len().min(p2.genes.len());
    if n < 2 {
        return (
            AssignmentChromosome::from_genes(p1.genes.clone()),
            AssignmentChromosome::from_genes(p2.genes.clone()),
        );
    }
    let cut = rng.random_range(1..n);

    let child1 = p1.genes[..cut].iter().chain(&p2.genes[cut..n]).copied().collect();
    let child2 = p2.genes[..cut].iter().chain(&p1.genes[cut..n]).copied().collect();
    (
        AssignmentChromosome::from_genes(child1),
        AssignmentChromosome::from_genes(child2),
    )
}

// ======================== Mutation ========================

/// Random-reset mutation: each gene is redrawn with probability
/// `probability` (the new slot may equal the old one).
///
/// Returns the number of redrawn genes.
pub fn reset_mutation<R: Rng>(
    chromosome: &mut AssignmentChromosome,
    vms: &[Vm],
    probability: f64,
    rng: &mut R,
) -> usize {
    let mut redrawn = 0;
    for gene in &mut chromosome.genes {
        if rng.random_bool(probability) {
            *gene = random_slot(vms, rng);
            redrawn += 1;
        }
    }
    if redrawn > 0 {
        chromosome.fitness = f64::INFINITY;
    }
    redrawn
}
