//! Metrics hooks for check-in filter operations
//!
//! Provides instrumentation points for monitoring admissions, lookups and
//! the memory held by filters.
//!
//! ## Usage
//!
//! ```
//! use checkin_filter::metrics::Metrics;
//! use std::time::Duration;
//!
//! let metrics = Metrics::new();
//! metrics.record_check_in(Duration::from_nanos(250), true);
//! assert_eq!(metrics.snapshot().checkins_admitted, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Metrics collector for filter operations
///
/// Thread-safe counters for monitoring filter usage.
#[derive(Default)]
pub struct Metrics {
    /// Total filters created
    pub filters_created: AtomicU64,
    /// Total bytes allocated for bit buffers
    pub bytes_allocated: AtomicU64,
    /// Check-ins that admitted a new item
    pub checkins_admitted: AtomicU64,
    /// Check-ins refused because the item looked present
    pub checkins_rejected: AtomicU64,
    /// Plain inserts
    pub inserts: AtomicU64,
    /// Plain lookups
    pub lookups: AtomicU64,
    /// Lookups that reported "present"
    pub lookups_positive: AtomicU64,
    /// Cumulative check-in time in nanoseconds
    pub checkin_time_ns: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record filter creation
    pub fn record_filter_created(&self, byte_len: usize) {
        self.filters_created.fetch_add(1, Ordering::Relaxed);
        self.bytes_allocated
            .fetch_add(byte_len as u64, Ordering::Relaxed);
    }

    /// Record a plain insert
    pub fn record_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a plain lookup
    pub fn record_lookup(&self, found: bool) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        if found {
            self.lookups_positive.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a check-in and whether it admitted the item
    pub fn record_check_in(&self, duration: Duration, admitted: bool) {
        let counter = if admitted {
            &self.checkins_admitted
        } else {
            &self.checkins_rejected
        };
        counter.fetch_add(1, Ordering::Relaxed);
        self.checkin_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            filters_created: self.filters_created.load(Ordering::Relaxed),
            bytes_allocated: self.bytes_allocated.load(Ordering::Relaxed),
            checkins_admitted: self.checkins_admitted.load(Ordering::Relaxed),
            checkins_rejected: self.checkins_rejected.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            lookups: self.lookups.load(Ordering::Relaxed),
            lookups_positive: self.lookups_positive.load(Ordering::Relaxed),
            avg_checkin_ns: self.avg_checkin_time_ns(),
        }
    }

    /// Calculate average check-in time in nanoseconds
    pub fn avg_checkin_time_ns(&self) -> u64 {
        let total = self.checkin_time_ns.load(Ordering::Relaxed);
        let count = self.checkins_admitted.load(Ordering::Relaxed)
            + self.checkins_rejected.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        self.filters_created.store(0, Ordering::Relaxed);
        self.bytes_allocated.store(0, Ordering::Relaxed);
        self.checkins_admitted.store(0, Ordering::Relaxed);
        self.checkins_rejected.store(0, Ordering::Relaxed);
        self.inserts.store(0, Ordering::Relaxed);
        self.lookups.store(0, Ordering::Relaxed);
        self.lookups_positive.store(0, Ordering::Relaxed);
        self.checkin_time_ns.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetricsSnapshot {
    pub filters_created: u64,
    pub bytes_allocated: u64,
    pub checkins_admitted: u64,
    pub checkins_rejected: u64,
    pub inserts: u64,
    pub lookups: u64,
    pub lookups_positive: u64,
    pub avg_checkin_ns: u64,
}

/// Trait for custom metrics recording implementations
///
/// Implement this trait to forward filter activity to an external metrics
/// system.
pub trait MetricsRecorder: Send + Sync {
    /// Record filter creation
    fn record_filter_created(&self, byte_len: usize);

    /// Record a plain insert
    fn record_insert(&self);

    /// Record a plain lookup
    fn record_lookup(&self, found: bool);

    /// Record a check-in
    fn record_check_in(&self, duration: Duration, admitted: bool);
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_filter_created(&self, _: usize) {}
    fn record_insert(&self) {}
    fn record_lookup(&self, _: bool) {}
    fn record_check_in(&self, _: Duration, _: bool) {}
}

impl MetricsRecorder for Metrics {
    fn record_filter_created(&self, byte_len: usize) {
        Metrics::record_filter_created(self, byte_len);
    }

    fn record_insert(&self) {
        Metrics::record_insert(self);
    }

    fn record_lookup(&self, found: bool) {
        Metrics::record_lookup(self, found);
    }

    fn record_check_in(&self, duration: Duration, admitted: bool) {
        Metrics::record_check_in(self, duration, admitted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_initialization() {
        let snapshot = Metrics::new().snapshot();
        assert_eq!(snapshot, MetricsSnapshot::default());
    }

    #[test]
    fn test_record_filter_created() {
        let metrics = Metrics::new();

        metrics.record_filter_created(120);
        metrics.record_filter_created(1199);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.filters_created, 2);
        assert_eq!(snapshot.bytes_allocated, 1319);
    }

    #[test]
    fn test_record_check_ins() {
        let metrics = Metrics::new();

        metrics.record_check_in(Duration::from_nanos(100), true);
        metrics.record_check_in(Duration::from_nanos(150), false);
        metrics.record_check_in(Duration::from_nanos(120), true);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.checkins_admitted, 2);
        assert_eq!(snapshot.checkins_rejected, 1);
        assert_eq!(snapshot.avg_checkin_ns, 123); // (100 + 150 + 120) / 3
    }

    #[test]
    fn test_record_lookups() {
        let metrics = Metrics::new();
        metrics.record_lookup(true);
        metrics.record_lookup(false);
        metrics.record_insert();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.lookups, 2);
        assert_eq!(snapshot.lookups_positive, 1);
        assert_eq!(snapshot.inserts, 1);
    }

    #[test]
    fn test_reset() {
        let metrics = Metrics::new();

        metrics.record_filter_created(120);
        metrics.record_check_in(Duration::from_nanos(100), true);
        metrics.record_lookup(true);

        metrics.reset();

        assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_noop_metrics() {
        let metrics = NoOpMetrics;
        metrics.record_filter_created(120);
        metrics.record_insert();
        metrics.record_lookup(true);
        metrics.record_check_in(Duration::from_nanos(100), true);
    }
}
