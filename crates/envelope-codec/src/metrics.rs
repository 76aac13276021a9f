//! Metrics hooks for codec operations
//!
//! Counters for encoded and decoded envelopes, body sizes, latencies, and
//! decoding failures broken down by reason.
//!
//! ## Usage
//!
//! ```ignore
//! use envelope_codec::metrics::Metrics;
//! use envelope_codec::NativeSerializer;
//! use std::sync::Arc;
//!
//! let metrics = Arc::new(Metrics::new());
//! let serializer = NativeSerializer::new(registry).with_metrics(metrics.clone());
//!
//! // ... encode / decode ...
//! println!("{:?}", metrics.snapshot());
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::error::FailureReason;

/// Metrics collector for codec operations
///
/// Thread-safe counters; all updates use relaxed ordering.
#[derive(Default)]
pub struct Metrics {
    /// Envelopes successfully encoded
    pub envelopes_encoded: AtomicU64,
    /// Envelopes successfully decoded
    pub envelopes_decoded: AtomicU64,
    /// Total escaped body bytes produced by encode
    pub bytes_encoded: AtomicU64,
    /// Total escaped body bytes accepted by decode
    pub bytes_decoded: AtomicU64,
    /// Cumulative encode time in nanoseconds
    pub encode_time_ns: AtomicU64,
    /// Cumulative decode time in nanoseconds
    pub decode_time_ns: AtomicU64,
    pub failures_empty_body: AtomicU64,
    pub failures_body_too_large: AtomicU64,
    pub failures_unknown_class: AtomicU64,
    pub failures_malformed_payload: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_encoded(&self, body_len: usize, duration: Duration) {
        self.envelopes_encoded.fetch_add(1, Ordering::Relaxed);
        self.bytes_encoded.fetch_add(body_len as u64, Ordering::Relaxed);
        self.encode_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    pub fn record_decoded(&self, body_len: usize, duration: Duration) {
        self.envelopes_decoded.fetch_add(1, Ordering::Relaxed);
        self.bytes_decoded.fetch_add(body_len as u64, Ordering::Relaxed);
        self.decode_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    pub fn record_decode_failure(&self, reason: FailureReason) {
        let counter = match reason {
            FailureReason::EmptyBody => &self.failures_empty_body,
            FailureReason::BodyTooLarge => &self.failures_body_too_large,
            FailureReason::UnknownClass => &self.failures_unknown_class,
            FailureReason::MalformedPayload => &self.failures_malformed_payload,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            envelopes_encoded: self.envelopes_encoded.load(Ordering::Relaxed),
            envelopes_decoded: self.envelopes_decoded.load(Ordering::Relaxed),
            bytes_encoded: self.bytes_encoded.load(Ordering::Relaxed),
            bytes_decoded: self.bytes_decoded.load(Ordering::Relaxed),
            decode_failures: self.decode_failures(),
            failures_unknown_class: self.failures_unknown_class.load(Ordering::Relaxed),
            failures_malformed_payload: self.failures_malformed_payload.load(Ordering::Relaxed),
            avg_encode_ns: average(&self.encode_time_ns, &self.envelopes_encoded),
            avg_decode_ns: average(&self.decode_time_ns, &self.envelopes_decoded),
        }
    }

    /// Total decoding failures across all reasons
    pub fn decode_failures(&self) -> u64 {
        [
            &self.failures_empty_body,
            &self.failures_body_too_large,
            &self.failures_unknown_class,
            &self.failures_malformed_payload,
        ]
        .iter()
        .map(|counter| counter.load(Ordering::Relaxed))
        .sum()
    }

    /// Reset all counters
    pub fn reset(&self) {
        for counter in [
            &self.envelopes_encoded,
            &self.envelopes_decoded,
            &self.bytes_encoded,
            &self.bytes_decoded,
            &self.encode_time_ns,
            &self.decode_time_ns,
            &self.failures_empty_body,
            &self.failures_body_too_large,
            &self.failures_unknown_class,
            &self.failures_malformed_payload,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

fn average(total: &AtomicU64, count: &AtomicU64) -> u64 {
    let total = total.load(Ordering::Relaxed);
    let count = count.load(Ordering::Relaxed);
    if count > 0 {
        total / count
    } else {
        0
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub envelopes_encoded: u64,
    pub envelopes_decoded: u64,
    pub bytes_encoded: u64,
    pub bytes_decoded: u64,
    pub decode_failures: u64,
    pub failures_unknown_class: u64,
    pub failures_malformed_payload: u64,
    pub avg_encode_ns: u64,
    pub avg_decode_ns: u64,
}

/// Trait for custom metrics recording implementations
///
/// Implement this trait to integrate with external metrics systems.
pub trait MetricsRecorder: Send + Sync {
    fn record_encoded(&self, body_len: usize, duration: Duration);

    fn record_decoded(&self, body_len: usize, duration: Duration);

    fn record_decode_failure(&self, reason: FailureReason);
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_encoded(&self, _: usize, _: Duration) {}
    fn record_decoded(&self, _: usize, _: Duration) {}
    fn record_decode_failure(&self, _: FailureReason) {}
}

impl MetricsRecorder for Metrics {
    fn record_encoded(&self, body_len: usize, duration: Duration) {
        Metrics::record_encoded(self, body_len, duration);
    }

    fn record_decoded(&self, body_len: usize, duration: Duration) {
        Metrics::record_decoded(self, body_len, duration);
    }

    fn record_decode_failure(&self, reason: FailureReason) {
        Metrics::record_decode_failure(self, reason);
    }
}
