//! Resource monitoring
//!
//! Samples process memory and coarse system metrics so the generation
//! engines can halt before memory grows out of hand. When the measurement
//! facility is unavailable every check degrades to "continue" and the
//! `is_available` flag lets callers report reduced monitoring fidelity.

use sysinfo::{get_current_pid, Pid, System};

/// Coarse system snapshot for diagnostic callbacks
#[derive(Debug, Clone, Default)]
pub struct SystemSnapshot {
    pub memory_usage_mb: f64,
    pub cpu_usage_percent: f64,
    pub available_memory_gb: f64,
    pub load_average: [f64; 3],
    pub monitoring_available: bool,
}

/// Sampling interface consulted by the engines
///
/// `should_continue` answers from the last sample; refreshing is the
/// engine's job and happens on a time cadence, never per candidate.
pub trait ResourceProbe {
    /// Whether real measurements back this probe
    fn is_available(&self) -> bool;

    /// Refresh and return current process memory in MB (0.0 when unavailable)
    fn sample(&mut self) -> f64;

    /// Last sampled process memory in MB
    fn last_memory_mb(&self) -> f64;

    /// How far the sampled peak has risen above the first sample, in MB
    fn peak_delta_mb(&self) -> f64;

    /// True iff the last sampled memory usage is below the limit
    fn should_continue(&self, limit_mb: f64) -> bool {
        !self.is_available() || self.last_memory_mb() < limit_mb
    }

    /// Full diagnostic snapshot (refreshes CPU and system memory)
    fn snapshot(&mut self) -> SystemSnapshot;
}

/// Probe backed by sysinfo process and system metrics
pub struct SystemProbe {
    system: System,
    pid: Option<Pid>,
    baseline_mb: Option<f64>,
    last_mb: f64,
    peak_mb: f64,
}

impl SystemProbe {
    pub fn new() -> Self {
        let pid = if sysinfo::IS_SUPPORTED_SYSTEM {
            get_current_pid().ok()
        } else {
            None
        };

        if pid.is_none() {
            log::warn!("process metrics unavailable; resource limits will not be enforced");
        }

        Self {
            system: System::new(),
            pid,
            baseline_mb: None,
            last_mb: 0.0,
            peak_mb: 0.0,
        }
    }
}

impl Default for SystemProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceProbe for SystemProbe {
    fn is_available(&self) -> bool {
        self.pid.is_some()
    }

    fn sample(&mut self) -> f64 {
        let Some(pid) = self.pid else {
            return 0.0;
        };

        if !self.system.refresh_process(pid) {
            return self.last_mb;
        }

        if let Some(process) = self.system.process(pid) {
            self.last_mb = process.memory() as f64 / (1024.0 * 1024.0);
            self.baseline_mb.get_or_insert(self.last_mb);
            self.peak_mb = self.peak_mb.max(self.last_mb);
        }

        self.last_mb
    }

    fn last_memory_mb(&self) -> f64 {
        self.last_mb
    }

    fn peak_delta_mb(&self) -> f64 {
        match self.baseline_mb {
            Some(baseline) => (self.peak_mb - baseline).max(0.0),
            None => 0.0,
        }
    }

    fn snapshot(&mut self) -> SystemSnapshot {
        if !self.is_available() {
            return SystemSnapshot::default();
        }

        self.sample();
        self.system.refresh_memory();
        self.system.refresh_cpu_usage();

        let load = System::load_average();

        SystemSnapshot {
            memory_usage_mb: self.last_mb,
            cpu_usage_percent: self.system.global_cpu_info().cpu_usage() as f64,
            available_memory_gb: self.system.available_memory() as f64 / (1024.0 * 1024.0 * 1024.0),
            load_average: [load.one, load.five, load.fifteen],
            monitoring_available: true,
        }
    }
}

/// Null probe for platforms without measurement support: never halts
pub struct NullProbe;

impl ResourceProbe for NullProbe {
    fn is_available(&self) -> bool {
        false
    }

    fn sample(&mut self) -> f64 {
        0.0
    }

    fn last_memory_mb(&self) -> f64 {
        0.0
    }

    fn peak_delta_mb(&self) -> f64 {
        0.0
    }

    fn snapshot(&mut self) -> SystemSnapshot {
        SystemSnapshot::default()
    }
}

/// Capability-checked probe selection
pub fn create_probe() -> Box<dyn ResourceProbe> {
    if sysinfo::IS_SUPPORTED_SYSTEM {
        Box::new(SystemProbe::new())
    } else {
        Box::new(NullProbe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_probe_always_continues() {
        let mut probe = NullProbe;

        assert!(!probe.is_available());
        assert_eq!(probe.sample(), 0.0);
        assert!(probe.should_continue(0.0));

        let snapshot = probe.snapshot();
        assert!(!snapshot.monitoring_available);
    }

    #[test]
    fn test_system_probe_sampling() {
        let mut probe = SystemProbe::new();
        if !probe.is_available() {
            return; // nothing to assert on unsupported platforms
        }

        let memory = probe.sample();
        assert!(memory > 0.0);
        assert_eq!(probe.last_memory_mb(), memory);
        assert!(probe.should_continue(f64::MAX));

        let snapshot = probe.snapshot();
        assert!(snapshot.monitoring_available);
        assert!(snapshot.memory_usage_mb > 0.0);
    }

    #[test]
    fn test_peak_delta_starts_at_zero() {
        let mut probe = SystemProbe::new();
        probe.sample();
        // Peak equals baseline right after the first sample
        assert_eq!(probe.peak_delta_mb(), 0.0);
    }
}
