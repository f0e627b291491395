//! AnalyticsRecorder - named analytics events
//!
//! Every method is a direct forward to the installed analytics sink. The
//! typed overloads translate vocabulary members to their canonical strings
//! first, leaving values untouched.

use std::sync::Arc;

use recorder_core::{
    domain::{
        analytics::translate_parameters, AnalyticsEvent, AnalyticsUserProperty, Parameters,
        TypedParameters,
    },
    ports::IAnalyticsSink,
};
use tracing::trace;

use crate::metrics::{RecorderMetrics, SOURCE_ANALYTICS};
use crate::shared::ANALYTICS;

/// Facade over the installed analytics sink.
#[derive(Clone)]
pub struct AnalyticsRecorder {
    sink: Arc<dyn IAnalyticsSink>,
    metrics: Option<Arc<RecorderMetrics>>,
}

impl AnalyticsRecorder {
    pub fn new(sink: Arc<dyn IAnalyticsSink>) -> Self {
        Self {
            sink,
            metrics: None,
        }
    }

    /// Counts forwarded events in `metrics`.
    pub fn with_metrics(mut self, metrics: Arc<RecorderMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Makes this recorder the process-wide active one and returns it.
    pub fn install(self) -> Self {
        ANALYTICS.install(self.clone());
        self
    }

    /// The active recorder, if one was installed.
    pub fn shared() -> Option<Self> {
        ANALYTICS.get()
    }

    /// Removes the active recorder, returning it.
    pub fn uninstall() -> Option<Self> {
        ANALYTICS.take()
    }

    /// Logs an event by name, forwarding name and parameters verbatim.
    pub fn log_event(&self, name: &str, parameters: Option<Parameters>) {
        trace!(event = %name, "Logging analytics event");
        self.sink.log_event(name, parameters.as_ref());
        if let Some(metrics) = &self.metrics {
            metrics.record_event(SOURCE_ANALYTICS);
        }
    }

    /// Logs a well-known event with well-known parameters.
    pub fn log_typed_event(&self, event: AnalyticsEvent, parameters: Option<TypedParameters>) {
        self.log_event(event.as_str(), parameters.map(translate_parameters));
    }

    pub fn set_user_property(&self, value: Option<&str>, name: &str) {
        self.sink.set_user_property(value, name);
    }

    pub fn set_typed_user_property(&self, value: Option<&str>, name: AnalyticsUserProperty) {
        self.sink.set_user_property(value, name.as_str());
    }

    pub fn set_user_id(&self, user_id: Option<&str>) {
        self.sink.set_user_id(user_id);
    }

    pub fn set_screen_name(&self, screen_name: Option<&str>, screen_class: Option<&str>) {
        self.sink.set_screen_name(screen_name, screen_class);
    }

    pub fn app_instance_id(&self) -> String {
        self.sink.app_instance_id()
    }

    pub fn reset_analytics_data(&self) {
        self.sink.reset_analytics_data();
    }
}

impl std::fmt::Debug for AnalyticsRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticsRecorder")
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}
