//! Generation run statistics
//!
//! Counters live behind an `Arc` so the caller can watch a run while the
//! engine iterates. Finalized values stay readable after the run ends.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Mutable counters for one generation run
#[derive(Debug)]
pub struct GenerationStats {
    generated: AtomicU64,
    duplicates: AtomicU64,
    variations_processed: AtomicU64,
    peak_memory_mb: AtomicU64,
    monitoring_available: bool,
    start_time: Instant,
}

impl GenerationStats {
    pub fn new(monitoring_available: bool) -> Self {
        Self {
            generated: AtomicU64::new(0),
            duplicates: AtomicU64::new(0),
            variations_processed: AtomicU64::new(0),
            peak_memory_mb: AtomicU64::new(0),
            monitoring_available,
            start_time: Instant::now(),
        }
    }

    pub fn record_generated(&self) {
        self.generated.fetch_add(1, Ordering::Relaxed);
        self.variations_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_duplicate(&self) {
        self.duplicates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_memory_mb(&self, memory_mb: f64) {
        self.peak_memory_mb
            .fetch_max(memory_mb.max(0.0) as u64, Ordering::Relaxed);
    }

    pub fn generated(&self) -> u64 {
        self.generated.load(Ordering::Relaxed)
    }

    pub fn duplicates(&self) -> u64 {
        self.duplicates.load(Ordering::Relaxed)
    }

    pub fn variations_processed(&self) -> u64 {
        self.variations_processed.load(Ordering::Relaxed)
    }

    pub fn peak_memory_mb(&self) -> u64 {
        self.peak_memory_mb.load(Ordering::Relaxed)
    }

    pub fn monitoring_available(&self) -> bool {
        self.monitoring_available
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn words_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.generated() as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Combined throughput/memory score in [0, 100]
    ///
    /// Zero when monitoring is unavailable, since the memory half of the
    /// score would be meaningless.
    pub fn efficiency_score(&self) -> f64 {
        if !self.monitoring_available || self.elapsed().as_secs_f64() == 0.0 {
            return 0.0;
        }

        let wps_score = (self.words_per_second() / 1000.0).min(1.0);
        let memory_score = (1.0 - self.peak_memory_mb() as f64 / 500.0).max(0.0);

        let efficiency = (wps_score * 0.6 + memory_score * 0.4) * 100.0;
        (efficiency * 10.0).round() / 10.0
    }

    /// Read-only snapshot usable during or after the run
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            generated: self.generated(),
            duplicates: self.duplicates(),
            variations_processed: self.variations_processed(),
            peak_memory_mb: self.peak_memory_mb(),
            elapsed: self.elapsed(),
            words_per_second: self.words_per_second(),
            efficiency_score: self.efficiency_score(),
            monitoring_available: self.monitoring_available,
        }
    }
}

/// Immutable view of a run's statistics
#[derive(Debug, Clone)]
pub struct StatsSnapshot {
    pub generated: u64,
    pub duplicates: u64,
    pub variations_processed: u64,
    pub peak_memory_mb: u64,
    pub elapsed: Duration,
    pub words_per_second: f64,
    pub efficiency_score: f64,
    pub monitoring_available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let stats = GenerationStats::new(true);

        stats.record_generated();
        stats.record_generated();
        stats.record_duplicate();

        assert_eq!(stats.generated(), 2);
        assert_eq!(stats.duplicates(), 1);
        assert_eq!(stats.variations_processed(), 2);
    }

    #[test]
    fn test_peak_memory_keeps_maximum() {
        let stats = GenerationStats::new(true);

        stats.record_memory_mb(120.0);
        stats.record_memory_mb(80.0);
        stats.record_memory_mb(200.0);

        assert_eq!(stats.peak_memory_mb(), 200);
    }

    #[test]
    fn test_efficiency_score_zero_without_monitoring() {
        let stats = GenerationStats::new(false);
        stats.record_generated();

        assert_eq!(stats.efficiency_score(), 0.0);
    }

    #[test]
    fn test_snapshot_reflects_counters() {
        let stats = GenerationStats::new(true);
        stats.record_generated();
        stats.record_duplicate();
        stats.record_memory_mb(50.0);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.generated, 1);
        assert_eq!(snapshot.duplicates, 1);
        assert_eq!(snapshot.peak_memory_mb, 50);
        assert!(snapshot.monitoring_available);
    }
}
