//! Workflow GA problem definition.
//!
//! Bridges the domain (tasks, VMs, assignments) to the genetic loop:
//! creates random individuals, scores them through the simulator, and
//! applies crossover and mutation.

use rand::Rng;

use super::chromosome::{reset_mutation, single_point_crossover, AssignmentChromosome};
use super::config::ObjectiveWeights;
use crate::error::Result;
use crate::models::{Assignment, SimulationResult};
use crate::scheduler::SchedulingInstance;

/// GA problem over a validated scheduling instance.
///
/// Fitness is `weights.score(simulate(genes))`, lower is better.
#[derive(Debug, Clone)]
pub struct WorkflowProblem<'a> {
    instance: SchedulingInstance<'a>,
    weights: ObjectiveWeights,
    mutation_probability: f64,
}

impl<'a> WorkflowProblem<'a> {
    /// Creates a problem.
    pub fn new(
        instance: SchedulingInstance<'a>,
        weights: ObjectiveWeights,
        mutation_probability: f64,
    ) -> Self {
        Self {
            instance,
            weights,
            mutation_probability,
        }
    }

    /// Underlying scheduling instance.
    pub fn instance(&self) -> &SchedulingInstance<'a> {
        &self.instance
    }

    /// Objective weights.
    pub fn weights(&self) -> ObjectiveWeights {
        self.weights
    }

    /// Uniformly random individual.
    pub fn create_individual<R: Rng>(&self, rng: &mut R) -> AssignmentChromosome {
        AssignmentChromosome::random(self.instance.tasks().len(), self.instance.vms(), rng)
    }

    /// Simulation totals of an individual.
    pub fn objectives(&self, individual: &AssignmentChromosome) -> SimulationResult {
        self.instance.evaluate(&individual.genes)
    }

    /// Weighted fitness of an individual.
    pub fn evaluate(&self, individual: &AssignmentChromosome) -> f64 {
        self.weights.score(&self.objectives(individual))
    }

    /// Single-point crossover.
    pub fn crossover<R: Rng>(
        &self,
        parent1: &AssignmentChromosome,
        parent2: &AssignmentChromosome,
        rng: &mut R,
    ) -> (AssignmentChromosome, AssignmentChromosome) {
        single_point_crossover(parent1, parent2, rng)
    }

    /// Per-gene random-reset mutation.
    pub fn mutate<R: Rng>(&self, individual: &mut AssignmentChromosome, rng: &mut R) {
        reset_mutation(individual, self.instance.vms(), self.mutation_probability, rng);
    }

    /// Converts a caller-supplied assignment into an individual.
    ///
    /// # Errors
    /// [`ScheduleError::InvalidAssignment`](crate::ScheduleError::InvalidAssignment)
    /// if the assignment is partial or out of range.
    pub fn encode(&self, assignment: &Assignment) -> Result<AssignmentChromosome> {
        Ok(AssignmentChromosome::from_genes(self.instance.encode(assignment)?))
    }

    /// Converts an individual back into an ID-based assignment.
    pub fn decode(&self, individual: &AssignmentChromosome) -> Assignment {
        self.instance.decode(&individual.genes)
    }
}
