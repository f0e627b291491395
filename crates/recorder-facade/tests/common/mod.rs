//! Stub sinks shared by the integration tests

use std::sync::Mutex;

use recorder_core::{
    domain::{AnswersEvent, AttributeValue, Attributes, Failure, Parameters},
    ports::{IAnalyticsSink, IAnswersSink, ICrashSink},
};

/// One call received by a stub sink
#[derive(Debug, Clone, PartialEq)]
pub enum SinkCall {
    Log(String),
    UserId(String),
    Attribute(String, AttributeValue),
    Record {
        kind: String,
        message: String,
        attributes: Option<Attributes>,
    },
    Event(String, Option<Parameters>),
    UserProperty(Option<String>, String),
    AnalyticsUserId(Option<String>),
    Screen(Option<String>, Option<String>),
    Reset,
    Answer(AnswersEvent),
}

/// Implements every sink port and keeps the calls in order
#[derive(Default)]
pub struct StubSink {
    calls: Mutex<Vec<SinkCall>>,
}

impl StubSink {
    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().unwrap().clone()
    }

    fn push(&self, call: SinkCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ICrashSink for StubSink {
    fn log(&self, message: &str) {
        self.push(SinkCall::Log(message.to_string()));
    }

    fn set_user_id(&self, user_id: &str) {
        self.push(SinkCall::UserId(user_id.to_string()));
    }

    fn set_attribute(&self, key: &str, value: &AttributeValue) {
        self.push(SinkCall::Attribute(key.to_string(), value.clone()));
    }

    fn record(&self, failure: &Failure, attributes: Option<&Attributes>) {
        self.push(SinkCall::Record {
            kind: failure.kind().to_string(),
            message: failure.message().to_string(),
            attributes: attributes.cloned(),
        });
    }
}

impl IAnalyticsSink for StubSink {
    fn log_event(&self, name: &str, parameters: Option<&Parameters>) {
        self.push(SinkCall::Event(name.to_string(), parameters.cloned()));
    }

    fn set_user_property(&self, value: Option<&str>, name: &str) {
        self.push(SinkCall::UserProperty(value.map(String::from), name.to_string()));
    }

    fn set_user_id(&self, user_id: Option<&str>) {
        self.push(SinkCall::AnalyticsUserId(user_id.map(String::from)));
    }

    fn set_screen_name(&self, screen_name: Option<&str>, screen_class: Option<&str>) {
        self.push(SinkCall::Screen(
            screen_name.map(String::from),
            screen_class.map(String::from),
        ));
    }

    fn app_instance_id(&self) -> String {
        "stub-instance".to_string()
    }

    fn reset_analytics_data(&self) {
        self.push(SinkCall::Reset);
    }
}

impl IAnswersSink for StubSink {
    fn log_answer(&self, event: &AnswersEvent) {
        self.push(SinkCall::Answer(event.clone()));
    }
}
