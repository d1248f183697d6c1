//! Logger metrics for observability
//!
//! Counters for the remote delivery pipeline: how many records were queued,
//! delivered, rejected, or never made it onto the queue.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for the remote delivery pipeline
///
/// # Example
///
/// ```
/// use relay_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_enqueued();
/// metrics.record_delivered();
///
/// assert_eq!(metrics.enqueued(), 1);
/// assert_eq!(metrics.delivered(), 1);
/// assert_eq!(metrics.failure_rate(), 0.0);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records accepted onto the outbound queue
    enqueued: AtomicU64,

    /// Records the collector acknowledged with 200
    delivered: AtomicU64,

    /// Records dropped because they could not be encoded
    encode_failures: AtomicU64,

    /// Records dropped after a network error or non-200 response
    transport_failures: AtomicU64,

    /// Records never queued because the overflow policy gave up on them
    dropped_on_overflow: AtomicU64,

    /// Number of times a producer had to wait for queue space
    block_events: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            enqueued: AtomicU64::new(0),
            delivered: AtomicU64::new(0),
            encode_failures: AtomicU64::new(0),
            transport_failures: AtomicU64::new(0),
            dropped_on_overflow: AtomicU64::new(0),
            block_events: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn enqueued(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn encode_failures(&self) -> u64 {
        self.encode_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn transport_failures(&self) -> u64 {
        self.transport_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_on_overflow(&self) -> u64 {
        self.dropped_on_overflow.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn block_events(&self) -> u64 {
        self.block_events.load(Ordering::Relaxed)
    }

    /// Records that left the sender without reaching the collector
    pub fn failed(&self) -> u64 {
        self.encode_failures() + self.transport_failures()
    }

    /// Record a queued record. Returns the previous count.
    #[inline]
    pub fn record_enqueued(&self) -> u64 {
        self.enqueued.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_delivered(&self) -> u64 {
        self.delivered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_encode_failure(&self) -> u64 {
        self.encode_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_transport_failure(&self) -> u64 {
        self.transport_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dropped_on_overflow(&self) -> u64 {
        self.dropped_on_overflow.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_block(&self) -> u64 {
        self.block_events.fetch_add(1, Ordering::Relaxed)
    }

    /// Get failure rate of processed records as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if the sender has not processed anything yet.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.failed() as f64;
        let total = self.delivered() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            enqueued: AtomicU64::new(self.enqueued()),
            delivered: AtomicU64::new(self.delivered()),
            encode_failures: AtomicU64::new(self.encode_failures()),
            transport_failures: AtomicU64::new(self.transport_failures()),
            dropped_on_overflow: AtomicU64::new(self.dropped_on_overflow()),
            block_events: AtomicU64::new(self.block_events()),
        }
    }
}
