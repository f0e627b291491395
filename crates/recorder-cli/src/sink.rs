//! Development sink
//!
//! Stands in for the vendor SDKs when running the CLI. Every call that
//! reaches a port is described as JSON and printed through [`Output`], so
//! it shows up whatever the log level. A `debug!` event is emitted as well
//! for correlation with the facade's own logs.

use recorder_core::{
    domain::{AnswersEvent, AttributeValue, Attributes, Failure, Parameters},
    ports::{IAnalyticsSink, IAnswersSink, ICrashSink},
};
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use crate::output::Output;

/// Sink adapter implementing every port by printing the call.
pub struct PrintingSink {
    instance_id: String,
    output: Output,
}

impl PrintingSink {
    /// Creates a sink with a fresh per-process app instance id.
    pub fn new(output: Output) -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
            output,
        }
    }

    fn emit(&self, sink: &str, operation: &str, payload: Value) {
        debug!(sink, op = operation, "Sink call");
        self.output.sink_call(sink, operation, &payload);
    }
}

/// JSON description of a failure as it would be handed to the vendor.
pub fn describe_failure(failure: &Failure, attributes: Option<&Attributes>) -> Value {
    json!({
        "kind": failure.kind(),
        "message": failure.message(),
        "occurred_at": failure.occurred_at().to_rfc3339(),
        "attributes": attributes,
    })
}

impl ICrashSink for PrintingSink {
    fn log(&self, message: &str) {
        self.emit("crash", "log", json!({ "message": message }));
    }

    fn set_user_id(&self, user_id: &str) {
        self.emit("crash", "set_user_id", json!({ "user_id": user_id }));
    }

    fn set_attribute(&self, key: &str, value: &AttributeValue) {
        self.emit(
            "crash",
            "set_attribute",
            json!({ "key": key, "value": value, "type": value.kind() }),
        );
    }

    fn record(&self, failure: &Failure, attributes: Option<&Attributes>) {
        self.emit("crash", "record", describe_failure(failure, attributes));
    }
}

impl IAnalyticsSink for PrintingSink {
    fn log_event(&self, name: &str, parameters: Option<&Parameters>) {
        self.emit(
            "analytics",
            "log_event",
            json!({ "name": name, "parameters": parameters }),
        );
    }

    fn set_user_property(&self, value: Option<&str>, name: &str) {
        self.emit(
            "analytics",
            "set_user_property",
            json!({ "name": name, "value": value }),
        );
    }

    fn set_user_id(&self, user_id: Option<&str>) {
        self.emit("analytics", "set_user_id", json!({ "user_id": user_id }));
    }

    fn set_screen_name(&self, screen_name: Option<&str>, screen_class: Option<&str>) {
        self.emit(
            "analytics",
            "set_screen_name",
            json!({ "screen_name": screen_name, "screen_class": screen_class }),
        );
    }

    fn app_instance_id(&self) -> String {
        self.instance_id.clone()
    }

    fn reset_analytics_data(&self) {
        self.emit("analytics", "reset_analytics_data", Value::Null);
    }
}

impl IAnswersSink for PrintingSink {
    fn log_answer(&self, event: &AnswersEvent) {
        let payload = serde_json::to_value(event).unwrap_or(Value::Null);
        self.emit("answers", "log_answer", payload);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use recorder_core::domain::Enrichment;

    #[test]
    fn test_instance_id_is_stable_per_sink() {
        let output = Output::new(OutputFormat::Human);
        let sink = PrintingSink::new(output);
        assert_eq!(sink.app_instance_id(), sink.app_instance_id());
        assert!(Uuid::parse_str(&sink.app_instance_id()).is_ok());
        assert_ne!(
            sink.app_instance_id(),
            PrintingSink::new(output).app_instance_id()
        );
    }

    #[test]
    fn test_describe_failure() {
        let failure = Failure::new("io", "disk full")
            .with_enrichment(Enrichment::new("Disk").with_attribute("free", 0));
        let merged = failure.enrichment().unwrap().merged_attributes();
        let value = describe_failure(&failure, Some(&merged));

        assert_eq!(value["kind"], "io");
        assert_eq!(value["message"], "disk full");
        assert_eq!(value["attributes"]["free"], 0);
        assert_eq!(value["attributes"]["title"], "Disk");
        assert!(value["occurred_at"].is_string());
    }

    #[test]
    fn test_describe_plain_failure_has_null_attributes() {
        let value = describe_failure(&Failure::new("x", "y"), None);
        assert!(value["attributes"].is_null());
    }
}
