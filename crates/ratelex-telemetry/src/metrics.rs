//! Metrics collection and reporting

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counter: terms classified, labelled by `strategy` and `subjectivity`
pub const TERMS_CLASSIFIED: &str = "ratelex_terms_classified_total";

/// Counter: terms rejected by the classifiability gate, labelled by `reason`
pub const TERMS_SKIPPED: &str = "ratelex_terms_skipped_total";

/// Counter: sentiment windows emitted by the window strategy
pub const WINDOWS_EMITTED: &str = "ratelex_windows_emitted_total";

/// Histogram: per-term classification latency
pub const CLASSIFICATION_LATENCY: &str = "ratelex_classification_latency_us";

/// Register descriptions for every exported metric. Call once after
/// installing a recorder.
pub fn describe_metrics() {
    ::metrics::describe_counter!(TERMS_CLASSIFIED, "Total number of terms classified");
    ::metrics::describe_counter!(
        TERMS_SKIPPED,
        "Total number of terms skipped by the classifiability gate"
    );
    ::metrics::describe_counter!(
        WINDOWS_EMITTED,
        "Total number of sentiment windows produced"
    );
    ::metrics::describe_histogram!(
        CLASSIFICATION_LATENCY,
        ::metrics::Unit::Microseconds,
        "Per-term classification latency in microseconds"
    );
    tracing::debug!("metric descriptions registered");
}

/// Metrics collector for classification runs
#[derive(Clone)]
pub struct MetricsCollector {
    inner: Arc<MetricsInner>,
}

struct MetricsInner {
    classified: AtomicU64,
    skipped: AtomicU64,
    subjective: AtomicU64,
    degenerate: AtomicU64,
    windows: AtomicU64,
    latency_us: AtomicU64,
}

impl MetricsCollector {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner {
                classified: AtomicU64::new(0),
                skipped: AtomicU64::new(0),
                subjective: AtomicU64::new(0),
                degenerate: AtomicU64::new(0),
                windows: AtomicU64::new(0),
                latency_us: AtomicU64::new(0),
            }),
        }
    }

    /// Record one classified term
    pub fn record_classified(&self, subjective: bool, degenerate: bool, windows: u64) {
        self.inner.classified.fetch_add(1, Ordering::Relaxed);
        if subjective {
            self.inner.subjective.fetch_add(1, Ordering::Relaxed);
        }
        if degenerate {
            self.inner.degenerate.fetch_add(1, Ordering::Relaxed);
        }
        self.inner.windows.fetch_add(windows, Ordering::Relaxed);
    }

    /// Record a term rejected by the gate
    pub fn record_skipped(&self) {
        self.inner.skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Record classification latency
    pub fn record_latency(&self, latency_us: u64) {
        self.inner.latency_us.fetch_add(latency_us, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            classified: self.inner.classified.load(Ordering::Relaxed),
            skipped: self.inner.skipped.load(Ordering::Relaxed),
            subjective: self.inner.subjective.load(Ordering::Relaxed),
            degenerate: self.inner.degenerate.load(Ordering::Relaxed),
            windows: self.inner.windows.load(Ordering::Relaxed),
            latency_us: self.inner.latency_us.load(Ordering::Relaxed),
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of current metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub classified: u64,
    pub skipped: u64,
    pub subjective: u64,
    pub degenerate: u64,
    pub windows: u64,
    pub latency_us: u64,
}

impl MetricsSnapshot {
    /// Terms seen, classified or skipped
    pub fn total_terms(&self) -> u64 {
        self.classified + self.skipped
    }

    /// Objective terms among the classified ones
    pub fn objective(&self) -> u64 {
        self.classified - self.subjective
    }

    /// Share of classified terms found subjective
    pub fn subjective_rate(&self) -> f64 {
        if self.classified == 0 {
            0.0
        } else {
            self.subjective as f64 / self.classified as f64
        }
    }

    /// Share of seen terms rejected by the gate
    pub fn skip_rate(&self) -> f64 {
        let total = self.total_terms();
        if total == 0 {
            0.0
        } else {
            self.skipped as f64 / total as f64
        }
    }

    /// Calculate average latency per classified term
    pub fn avg_latency_us(&self) -> u64 {
        if self.classified == 0 {
            0
        } else {
            self.latency_us / self.classified
        }
    }
}
