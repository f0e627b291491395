//! Recorder Facade - Stable entry points over the installed sinks
//!
//! Provides:
//! - `CrashRecorder`: Non-fatal error recording with delegate veto/transform,
//!   breadcrumbs, user id and custom keys
//! - `AnalyticsRecorder`: Named and typed analytics events, user properties
//! - `AnswersRecorder`: Predefined usage events
//! - `delegates`: Error delegates built from configuration
//! - `RecorderMetrics`: Prometheus counters for facade outcomes
//! - `startup`: Installs the recorders a configuration enables
//!
//! Each recorder is a cheap `Clone` handle. Install one per kind at startup
//! and reach it through [`crash()`], [`analytics()`] or [`answers()`], or pass the
//! handle to call sites explicitly.

pub mod analytics;
pub mod answers;
pub mod crash;
pub mod delegates;
pub mod metrics;
pub mod shared;
pub mod startup;

pub use analytics::AnalyticsRecorder;
pub use answers::AnswersRecorder;
pub use crash::CrashRecorder;
pub use metrics::RecorderMetrics;
pub use shared::{analytics, answers, crash};
pub use startup::{install_from_config, Sinks};
