//! Subcommands of the `recorder` binary

pub mod answer;
pub mod config;
pub mod context;
pub mod error;
pub mod event;

use anyhow::{Context, Result};
use recorder_facade::{AnalyticsRecorder, AnswersRecorder, CrashRecorder};

/// The installed crash recorder, or an error naming the config switch.
pub(crate) fn crash_recorder() -> Result<CrashRecorder> {
    CrashRecorder::shared().context("Crash recording is disabled (crash.enabled: false)")
}

pub(crate) fn analytics_recorder() -> Result<AnalyticsRecorder> {
    AnalyticsRecorder::shared().context("Analytics is disabled (analytics.enabled: false)")
}

pub(crate) fn answers_recorder() -> Result<AnswersRecorder> {
    AnswersRecorder::shared().context("Answers is disabled (answers.enabled: false)")
}
