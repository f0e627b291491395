//! Port definitions for the external sinks
//!
//! The vendor SDKs sit behind these traits. The recorders in
//! `recorder-facade` depend only on the traits; adapters for a concrete SDK
//! (or a development stand-in) implement them.
//!
//! ## Ports Overview
//!
//! - [`ICrashSink`] - Non-fatal error reports, breadcrumbs, custom keys
//! - [`IAnalyticsSink`] - Named events, user properties, screen tracking
//! - [`IAnswersSink`] - Predefined usage events

pub mod analytics_sink;
pub mod answers_sink;
pub mod crash_sink;

pub use analytics_sink::IAnalyticsSink;
pub use answers_sink::IAnswersSink;
pub use crash_sink::ICrashSink;
