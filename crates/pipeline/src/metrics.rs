//! Pipeline metrics
//!
//! Lock-free counters owned by one loop instance, shared out through an
//! `Arc` handle so callers can observe progress while the loop runs.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for one ingestion loop
#[derive(Debug, Default)]
pub struct PipelineMetrics {
    /// Raw records pulled from the transport
    pub records_read: AtomicU64,

    /// Records that parsed into events
    pub events_parsed: AtomicU64,

    /// Records dropped as unparseable
    pub parse_failures: AtomicU64,

    /// Batches durably committed to the sink
    pub batches_committed: AtomicU64,

    /// Events contained in committed batches
    pub events_committed: AtomicU64,

    /// Commit attempts that failed and were retried
    pub commit_retries: AtomicU64,

    /// Read attempts that failed and were retried
    pub read_retries: AtomicU64,

    /// Checkpoint saves performed
    pub checkpoint_saves: AtomicU64,
}

impl PipelineMetrics {
    /// Create zeroed metrics
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_read(&self) {
        self.records_read.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_parsed(&self) {
        self.events_parsed.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_parse_failure(&self) {
        self.parse_failures.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_commit(&self, events: u64) {
        self.batches_committed.fetch_add(1, Ordering::Relaxed);
        self.events_committed.fetch_add(events, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_commit_retry(&self) {
        self.commit_retries.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_read_retry(&self) {
        self.read_retries.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_checkpoint_save(&self) {
        self.checkpoint_saves.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a point-in-time snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            records_read: self.records_read.load(Ordering::Relaxed),
            events_parsed: self.events_parsed.load(Ordering::Relaxed),
            parse_failures: self.parse_failures.load(Ordering::Relaxed),
            batches_committed: self.batches_committed.load(Ordering::Relaxed),
            events_committed: self.events_committed.load(Ordering::Relaxed),
            commit_retries: self.commit_retries.load(Ordering::Relaxed),
            read_retries: self.read_retries.load(Ordering::Relaxed),
            checkpoint_saves: self.checkpoint_saves.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time snapshot of pipeline counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub records_read: u64,
    pub events_parsed: u64,
    pub parse_failures: u64,
    pub batches_committed: u64,
    pub events_committed: u64,
    pub commit_retries: u64,
    pub read_retries: u64,
    pub checkpoint_saves: u64,
}
