//! AnswersRecorder - predefined usage events

use std::sync::Arc;

use recorder_core::{domain::AnswersEvent, ports::IAnswersSink};
use tracing::trace;

use crate::metrics::{RecorderMetrics, SOURCE_ANSWERS};
use crate::shared::ANSWERS;

/// Facade over the installed answers sink.
#[derive(Clone)]
pub struct AnswersRecorder {
    sink: Arc<dyn IAnswersSink>,
    metrics: Option<Arc<RecorderMetrics>>,
}

impl AnswersRecorder {
    pub fn new(sink: Arc<dyn IAnswersSink>) -> Self {
        Self {
            sink,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<RecorderMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Makes this recorder the process-wide active one and returns it.
    pub fn install(self) -> Self {
        ANSWERS.install(self.clone());
        self
    }

    pub fn shared() -> Option<Self> {
        ANSWERS.get()
    }

    pub fn uninstall() -> Option<Self> {
        ANSWERS.take()
    }

    /// Logs one usage event.
    pub fn log(&self, event: &AnswersEvent) {
        trace!(event = %event.name(), "Logging answers event");
        self.sink.log_answer(event);
        if let Some(metrics) = &self.metrics {
            metrics.record_event(SOURCE_ANSWERS);
        }
    }
}

impl std::fmt::Debug for AnswersRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnswersRecorder")
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubSink {
        events: Mutex<Vec<AnswersEvent>>,
    }

    impl IAnswersSink for StubSink {
        fn log_answer(&self, event: &AnswersEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    #[test]
    fn test_log_forwards_event_unchanged() {
        let sink = Arc::new(StubSink::default());
        let recorder = AnswersRecorder::new(Arc::clone(&sink) as Arc<dyn IAnswersSink>);

        let event = AnswersEvent::custom("Exported Report").with_attribute("format", "pdf");
        recorder.log(&event);
        recorder.log(&AnswersEvent::login(Some("email".into()), Some(true)));

        let events = sink.events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], event);
        assert_eq!(events[1].name(), "Login");
    }

    #[test]
    fn test_metrics_count_events() {
        let sink = Arc::new(StubSink::default());
        let metrics = Arc::new(RecorderMetrics::new().unwrap());
        let recorder = AnswersRecorder::new(sink).with_metrics(Arc::clone(&metrics));

        recorder.log(&AnswersEvent::custom("x"));
        assert_eq!(
            metrics
                .events_total
                .with_label_values(&[SOURCE_ANSWERS])
                .get(),
            1
        );
    }
}
