//! Metrics observer hook.
//!
//! A [`MetricsCollector`] receives timing measurements from the registry and
//! the operator resolver. Every method has a no-op default, so collectors
//! override only what they route to their reporting pipeline.

use std::time::Duration;

use typekit_core::RuntimeType;

/// Sink for timing measurements.
pub trait MetricsCollector: Send + Sync {
    /// First-use resolution of a type's traits took `elapsed`.
    fn report_resolution_time(&self, runtime_type: &RuntimeType, elapsed: Duration) {
        let _ = (runtime_type, elapsed);
    }

    /// An operator lookup missed the cache and took `elapsed` to resolve.
    fn report_lookup_time(&self, source: &RuntimeType, target: &RuntimeType, elapsed: Duration) {
        let _ = (source, target, elapsed);
    }
}

/// Collector that discards every measurement.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetrics;

impl MetricsCollector for NoopMetrics {}
