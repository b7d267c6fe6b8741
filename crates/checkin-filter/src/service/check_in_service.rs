//! Check-in Service
//!
//! Shares one `MembershipFilter` between threads. Each call takes the lock
//! once, so a whole check-then-set runs as a single critical section.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use tracing::{debug, info, trace};

use crate::domain::{FilterConfig, Item, MembershipFilter};
use crate::error::FilterError;
use crate::metrics::{MetricsRecorder, NoOpMetrics};
use crate::ports::CheckInApi;

/// Point-in-time view of the filter held by a service
#[derive(Clone, Debug, PartialEq)]
pub struct FilterStats {
    pub bit_count: usize,
    pub hash_rounds: usize,
    pub byte_len: usize,
    pub bits_set: usize,
    pub items_recorded: u64,
    pub estimated_fpr: f64,
}

/// Thread-safe check-in service
///
/// Implements the `CheckInApi` port over a mutex-guarded filter.
pub struct CheckInService<M: MetricsRecorder = NoOpMetrics> {
    /// The filter; every access goes through this lock
    filter: Mutex<MembershipFilter>,
    /// Metrics sink
    metrics: Arc<M>,
}

impl CheckInService<NoOpMetrics> {
    /// Wrap an existing filter without metrics
    pub fn new(filter: MembershipFilter) -> Self {
        Self::with_metrics(filter, Arc::new(NoOpMetrics))
    }
}

impl<M: MetricsRecorder> CheckInService<M> {
    /// Wrap an existing filter, reporting to `metrics`
    pub fn with_metrics(filter: MembershipFilter, metrics: Arc<M>) -> Self {
        metrics.record_filter_created(filter.byte_len());
        info!(
            bit_count = filter.bit_count(),
            hash_rounds = filter.hash_rounds(),
            bytes = filter.byte_len(),
            "Check-in filter ready"
        );
        Self {
            filter: Mutex::new(filter),
            metrics,
        }
    }

    /// Build a fresh filter from `config`
    pub fn from_config(config: &FilterConfig, metrics: Arc<M>) -> Result<Self, FilterError> {
        let filter = MembershipFilter::from_config(config)?;
        Ok(Self::with_metrics(filter, metrics))
    }

    /// Current filter statistics
    pub fn stats(&self) -> FilterStats {
        let filter = self.filter.lock();
        FilterStats {
            bit_count: filter.bit_count(),
            hash_rounds: filter.hash_rounds(),
            byte_len: filter.byte_len(),
            bits_set: filter.bits_set(),
            items_recorded: filter.items_recorded(),
            estimated_fpr: filter.estimated_fpr(),
        }
    }

    /// Metrics sink shared with this service
    pub fn metrics(&self) -> &Arc<M> {
        &self.metrics
    }

    /// Unwrap the filter
    pub fn into_inner(self) -> MembershipFilter {
        self.filter.into_inner()
    }
}

impl<M: MetricsRecorder> CheckInApi for CheckInService<M> {
    fn check_in(&self, item: &Item<'_>) -> bool {
        let start = Instant::now();
        let admitted = self.filter.lock().check_in_and_sign(item);
        self.metrics.record_check_in(start.elapsed(), admitted);

        if admitted {
            debug!(item = %item, "Checked in");
        } else {
            debug!(item = %item, "Already present");
        }
        admitted
    }

    fn record(&self, item: &Item<'_>) {
        self.filter.lock().insert(item);
        self.metrics.record_insert();
        trace!(item = %item, "Recorded");
    }

    fn is_known(&self, item: &Item<'_>) -> bool {
        let found = self.filter.lock().might_contain(item);
        self.metrics.record_lookup(found);
        found
    }
}
