//! Workflow scheduling domain models.
//!
//! Provides the value types of the scheduling problem and its solution.
//! Tasks and VMs are immutable inputs; assignments are produced by the
//! optimizer (or a caller) and read by the simulator.
//!
//! # Domain Mappings
//!
//! | u-workflow | Cloud workflow | Cluster batch |
//! |------------|----------------|---------------|
//! | Task | Workflow step | Job |
//! | Vm | Virtual machine | Node |
//! | Placement | VM + vCPU | Node + slot |
//! | Schedule | Execution timeline | Gantt chart |

mod assignment;
mod schedule;
mod task;
mod vm;

pub use assignment::{Assignment, Placement};
pub use schedule::{Schedule, ScheduledTask, SimulationResult};
pub use task::{Task, TaskKind};
pub use vm::{CoreSpeed, Vm, VmKind};
