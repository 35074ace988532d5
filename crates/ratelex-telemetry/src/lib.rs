//! ratelex Telemetry
//!
//! Counters for batch classification runs.
//!
//! Provides:
//! - Lock-free in-process counters with derived rates
//! - Names and descriptions of the metrics exported through the `metrics` facade

pub mod metrics;

pub use crate::metrics::{describe_metrics, MetricsCollector, MetricsSnapshot};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::metrics::{MetricsCollector, MetricsSnapshot};
}
