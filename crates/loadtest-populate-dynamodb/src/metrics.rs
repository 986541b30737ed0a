//! Load run counters shared by the workers of a pool.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Counters updated concurrently by every worker.
#[derive(Debug, Default)]
pub struct LoadMetrics {
    workers_started: AtomicU64,
    failed_workers: AtomicU64,
    batches_written: AtomicU64,
    items_written: AtomicU64,
    unprocessed_items: AtomicU64,
    bytes_written: AtomicU64,
}

impl LoadMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_worker_started(&self) {
        self.workers_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_worker_failed(&self) {
        self.failed_workers.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one acknowledged batch.
    pub fn record_batch(&self, items: u64, bytes: u64, unprocessed: u64) {
        self.batches_written.fetch_add(1, Ordering::Relaxed);
        self.items_written.fetch_add(items, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes, Ordering::Relaxed);
        self.unprocessed_items.fetch_add(unprocessed, Ordering::Relaxed);
    }

    /// Take a point-in-time copy of the counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            workers_started: self.workers_started.load(Ordering::Relaxed),
            failed_workers: self.failed_workers.load(Ordering::Relaxed),
            batches_written: self.batches_written.load(Ordering::Relaxed),
            items_written: self.items_written.load(Ordering::Relaxed),
            unprocessed_items: self.unprocessed_items.load(Ordering::Relaxed),
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
        }
    }
}

/// Populate metrics for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Workers that entered their write loop
    pub workers_started: u64,
    /// Workers stopped by a synthesis or write error
    pub failed_workers: u64,
    /// Batches acknowledged by the service
    pub batches_written: u64,
    /// Items in acknowledged batches, unprocessed ones included
    pub items_written: u64,
    /// Items the service returned as unprocessed (not retried)
    pub unprocessed_items: u64,
    /// Estimated key bytes written
    pub bytes_written: u64,
}

impl MetricsSnapshot {
    /// Calculate items per second over `elapsed`.
    pub fn items_per_second(&self, elapsed: Duration) -> f64 {
        if elapsed.as_secs_f64() > 0.0 {
            self.items_written as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_snapshot() {
        let metrics = LoadMetrics::new();
        metrics.record_worker_started();
        metrics.record_worker_started();
        metrics.record_batch(25, 500, 0);
        metrics.record_batch(25, 500, 3);
        metrics.record_worker_failed();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.workers_started, 2);
        assert_eq!(snapshot.failed_workers, 1);
        assert_eq!(snapshot.batches_written, 2);
        assert_eq!(snapshot.items_written, 50);
        assert_eq!(snapshot.unprocessed_items, 3);
        assert_eq!(snapshot.bytes_written, 1000);
    }

    #[test]
    fn test_items_per_second() {
        let snapshot = MetricsSnapshot {
            items_written: 1000,
            ..Default::default()
        };

        assert_eq!(snapshot.items_per_second(Duration::from_secs(10)), 100.0);
        assert_eq!(snapshot.items_per_second(Duration::ZERO), 0.0);
    }
}
