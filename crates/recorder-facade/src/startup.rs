//! Startup wiring
//!
//! Installs the recorders a [`Config`] enables, in one call made early in
//! `main` before other threads start recording.

use std::sync::Arc;

use recorder_core::{
    config::Config,
    ports::{IAnalyticsSink, IAnswersSink, ICrashSink},
};
use tracing::info;

use crate::{delegates, AnalyticsRecorder, AnswersRecorder, CrashRecorder, RecorderMetrics};

/// The concrete sinks handed to the recorders.
#[derive(Clone)]
pub struct Sinks {
    pub crash: Arc<dyn ICrashSink>,
    pub analytics: Arc<dyn IAnalyticsSink>,
    pub answers: Arc<dyn IAnswersSink>,
}

impl Sinks {
    /// Uses one adapter for all three ports.
    pub fn single<S>(sink: Arc<S>) -> Self
    where
        S: ICrashSink + IAnalyticsSink + IAnswersSink + 'static,
    {
        Self {
            crash: Arc::clone(&sink) as Arc<dyn ICrashSink>,
            analytics: Arc::clone(&sink) as Arc<dyn IAnalyticsSink>,
            answers: sink as Arc<dyn IAnswersSink>,
        }
    }
}

/// Which recorders [`install_from_config`] installed.
#[derive(Debug, Default)]
pub struct Installed {
    pub crash: Option<CrashRecorder>,
    pub analytics: Option<AnalyticsRecorder>,
    pub answers: Option<AnswersRecorder>,
}

/// Installs every recorder enabled in `config`.
///
/// The crash recorder gets the delegate described by `config.crash`, if any.
pub fn install_from_config(
    config: &Config,
    sinks: Sinks,
    metrics: Option<Arc<RecorderMetrics>>,
) -> Installed {
    let mut installed = Installed::default();

    if config.crash.enabled {
        let mut recorder = CrashRecorder::new(sinks.crash);
        if let Some(metrics) = &metrics {
            recorder = recorder.with_metrics(Arc::clone(metrics));
        }
        if let Some(delegate) = delegates::from_config(&config.crash) {
            recorder.set_delegate_arc(delegate);
        }
        info!(
            ignored_kinds = config.crash.ignored_kinds.len(),
            redacted_keys = config.crash.redacted_keys.len(),
            "Crash recorder installed"
        );
        installed.crash = Some(recorder.install());
    }

    if config.analytics.enabled {
        let mut recorder = AnalyticsRecorder::new(sinks.analytics);
        if let Some(metrics) = &metrics {
            recorder = recorder.with_metrics(Arc::clone(metrics));
        }
        info!("Analytics recorder installed");
        installed.analytics = Some(recorder.install());
    }

    if config.answers.enabled {
        let mut recorder = AnswersRecorder::new(sinks.answers);
        if let Some(metrics) = &metrics {
            recorder = recorder.with_metrics(Arc::clone(metrics));
        }
        info!("Answers recorder installed");
        installed.answers = Some(recorder.install());
    }

    installed
}
