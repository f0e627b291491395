//! Domain values shared by every recorder
//!
//! - [`Failure`] and [`Enrichment`] travel the error-recording path
//! - [`AttributeValue`] is the closed set of scalar kinds the sinks accept
//! - [`AnalyticsEvent`], [`AnalyticsParameter`] and [`AnalyticsUserProperty`]
//!   are the well-known analytics vocabularies
//! - [`AnswersEvent`] models the predefined usage events

pub mod analytics;
pub mod answers;
pub mod attribute;
pub mod errors;
pub mod failure;

pub use analytics::{AnalyticsEvent, AnalyticsParameter, AnalyticsUserProperty, TypedParameters};
pub use answers::AnswersEvent;
pub use attribute::{validate_key, AttributeValue, Attributes, Parameters};
pub use errors::DomainError;
pub use failure::{Enrich, Enrichment, ErrorDelegate, Failure, TITLE_KEY};
