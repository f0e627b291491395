//! Recorder Core - Domain values and sink ports
//!
//! This crate contains everything the recorder facades agree on:
//! - **Domain values** - `Failure`, `Enrichment`, `AttributeValue`, the analytics
//!   vocabularies and the typed `AnswersEvent`
//! - **Port definitions** - Traits the vendor adapters implement: `ICrashSink`,
//!   `IAnalyticsSink`, `IAnswersSink`
//! - **Configuration** - YAML-backed settings for the recorders and the CLI
//!
//! The crate holds no global state. Which sink is active, and whether a
//! delegate is attached, is decided in `recorder-facade`.

pub mod config;
pub mod domain;
pub mod ports;
