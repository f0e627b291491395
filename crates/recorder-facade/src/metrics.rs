//! Prometheus metrics for the recorders
//!
//! Counts what the facade did with each call: recorded or suppressed
//! failures, forwarded custom keys and forwarded events. Nothing here
//! observes the sinks themselves.

use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

/// Outcome label for a failure that reached the sink
pub const OUTCOME_RECORDED: &str = "recorded";
/// Outcome label for a failure vetoed by the delegate
pub const OUTCOME_SUPPRESSED: &str = "suppressed";

/// Source label for analytics events
pub const SOURCE_ANALYTICS: &str = "analytics";
/// Source label for answers events
pub const SOURCE_ANSWERS: &str = "answers";

/// Central metrics registry holding the recorder counters.
pub struct RecorderMetrics {
    registry: Registry,
    /// Counter: failures handled by outcome (recorded, suppressed)
    pub errors_total: IntCounterVec,
    /// Counter: custom keys forwarded to the crash sink
    pub attributes_total: IntCounter,
    /// Counter: events forwarded by source (analytics, answers)
    pub events_total: IntCounterVec,
}

impl RecorderMetrics {
    /// Creates a new `RecorderMetrics` with all metrics registered.
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new_custom(Some("recorder".to_string()), None)?;

        let errors_total = IntCounterVec::new(
            Opts::new("errors_total", "Failures handled by the crash recorder"),
            &["outcome"],
        )?;
        registry.register(Box::new(errors_total.clone()))?;

        let attributes_total = IntCounter::with_opts(Opts::new(
            "attributes_total",
            "Custom keys forwarded to the crash sink",
        ))?;
        registry.register(Box::new(attributes_total.clone()))?;

        let events_total = IntCounterVec::new(
            Opts::new("events_total", "Events forwarded to the analytics sinks"),
            &["source"],
        )?;
        registry.register(Box::new(events_total.clone()))?;

        Ok(Self {
            registry,
            errors_total,
            attributes_total,
            events_total,
        })
    }

    // ========================================================================
    // Recording helpers
    // ========================================================================

    /// Record what happened to a failure.
    pub fn record_error_outcome(&self, outcome: &str) {
        self.errors_total.with_label_values(&[outcome]).inc();
    }

    /// Record a forwarded custom key.
    pub fn record_attribute(&self) {
        self.attributes_total.inc();
    }

    /// Record a forwarded event.
    pub fn record_event(&self, source: &str) {
        self.events_total.with_label_values(&[source]).inc();
    }

    // ========================================================================
    // Encoding
    // ========================================================================

    /// Encode all metrics in Prometheus text exposition format.
    pub fn encode(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
