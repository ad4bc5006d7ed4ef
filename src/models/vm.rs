//! Virtual machine model.
//!
//! A VM offers a fixed number of cores, each with a processing speed, and
//! charges a cost rate per unit of busy time. VMs are fixed inputs: the
//! scheduler never provisions or resizes them.

use serde::{Deserialize, Serialize};

/// A virtual machine whose cores can run tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vm {
    /// Unique VM identifier.
    pub id: String,
    /// Processing speed of the cores (work units per time unit).
    pub speed: CoreSpeed,
    /// Number of cores (positive).
    pub cores: usize,
    /// Cost per unit of simulated execution time.
    pub cost_rate: f64,
    /// Descriptive kind. Does not affect simulation.
    pub kind: VmKind,
    /// Pre-existing load: every core becomes free at this time.
    pub queue_wait: f64,
}

/// Per-core processing speed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoreSpeed {
    /// All cores share one rate.
    Uniform(f64),
    /// Explicit rates; core `i` uses `rates[i % rates.len()]`.
    PerCore(Vec<f64>),
}

/// VM classification (display only).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VmKind {
    /// General purpose instance.
    #[default]
    General,
    /// Compute optimized instance.
    Compute,
    /// Memory optimized instance.
    Memory,
    /// Storage optimized instance.
    Storage,
}

impl CoreSpeed {
    /// Speed of the given core.
    ///
    /// Returns `None` only for an empty `PerCore` list.
    pub fn for_core(&self, core: usize) -> Option<f64> {
        match self {
            CoreSpeed::Uniform(rate) => Some(*rate),
            CoreSpeed::PerCore(rates) if rates.is_empty() => None,
            CoreSpeed::PerCore(rates) => Some(rates[core % rates.len()]),
        }
    }

    /// All configured rates (one for `Uniform`).
    pub fn rates(&self) -> &[f64] {
        match self {
            CoreSpeed::Uniform(rate) => std::slice::from_ref(rate),
            CoreSpeed::PerCore(rates) => rates,
        }
    }
}

impl Vm {
    /// Creates a single-core general VM with uniform speed, unit cost rate
    /// and no queue wait.
    pub fn new(id: impl Into<String>, speed: f64) -> Self {
        Self {
            id: id.into(),
            speed: CoreSpeed::Uniform(speed),
            cores: 1,
            cost_rate: 1.0,
            kind: VmKind::General,
            queue_wait: 0.0,
        }
    }

    /// Replaces the uniform speed with explicit per-core rates.
    pub fn with_core_speeds(mut self, rates: Vec<f64>) -> Self {
        self.speed = CoreSpeed::PerCore(rates);
        self
    }

    /// Sets the core count.
    pub fn with_cores(mut self, cores: usize) -> Self {
        self.cores = cores;
        self
    }

    /// Sets the cost rate.
    pub fn with_cost_rate(mut self, cost_rate: f64) -> Self {
        self.cost_rate = cost_rate;
        self
    }

    /// Sets the VM kind.
    pub fn with_kind(mut self, kind: VmKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the initial queue wait of every core.
    pub fn with_queue_wait(mut self, queue_wait: f64) -> Self {
        self.queue_wait = queue_wait;
        self
    }

    /// Processing speed of `core`, or `None` if the core is out of range.
    pub fn core_speed(&self, core: usize) -> Option<f64> {
        if core >= self.cores {
            return None;
        }
        self.speed.for_core(core)
    }

    /// Whether `core` is a valid index for this VM.
    #[inline]
    pub fn has_core(&self, core: usize) -> bool {
        core < self.cores
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vm_builder() {
        let vm = Vm::new("VM1", 500.0)
            .with_cores(2)
            .with_cost_rate(0.6)
            .with_kind(VmKind::Storage)
            .with_queue_wait(0.5);

        assert_eq!(vm.id, "VM1");
        assert_eq!(vm.cores, 2);
        assert!((vm.cost_rate - 0.6).abs() < 1e-10);
        assert_eq!(vm.kind, VmKind::Storage);
        assert!((vm.queue_wait - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_uniform_speed() {
        let vm = Vm::new("VM1", 400.0).with_cores(3);
        assert_eq!(vm.core_speed(0), Some(400.0));
        assert_eq!(vm.core_speed(2), Some(400.0));
        assert_eq!(vm.core_speed(3), None);
    }

    #[test]
    fn test_per_core_speed_wraps() {
        let vm = Vm::new("VM1", 0.0)
            .with_core_speeds(vec![500.0, 300.0])
            .with_cores(3);
        assert_eq!(vm.core_speed(0), Some(500.0));
        assert_eq!(vm.core_speed(1), Some(300.0));
        // Fewer rates than cores: index modulo length
        assert_eq!(vm.core_speed(2), Some(500.0));
    }

    #[test]
    fn test_empty_per_core_speed() {
        let speed = CoreSpeed::PerCore(vec![]);
        assert_eq!(speed.for_core(0), None);
        assert!(speed.rates().is_empty());
    }

    #[test]
    fn test_core_speed_serde_shape() {
        let json = serde_json::to_string(&CoreSpeed::PerCore(vec![1.0, 2.0])).unwrap();
        assert_eq!(json, r#"{"per_core":[1.0,2.0]}"#);

        let parsed: CoreSpeed = serde_json::from_str(r#"{"uniform":250.0}"#).unwrap();
        assert_eq!(parsed, CoreSpeed::Uniform(250.0));
    }
}
