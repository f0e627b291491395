//! Crash sink port (driven/secondary port)
//!
//! The interface a crash-reporting SDK exposes for non-fatal reports and the
//! context attached to them.
//!
//! ## Design Notes
//!
//! - Methods are synchronous and return nothing. Buffering, batching and
//!   transmission belong to the SDK; if its buffer overruns it drops the
//!   oldest data on its own.
//! - The facade decides *whether* a failure is recorded. Implementations
//!   record whatever they are given.

use crate::domain::{AttributeValue, Attributes, Failure};

/// Port trait for a crash-reporting SDK
pub trait ICrashSink: Send + Sync {
    /// Adds a breadcrumb that is sent along with the next report
    fn log(&self, message: &str);

    /// Associates subsequent reports with a user identifier
    fn set_user_id(&self, user_id: &str);

    /// Sets a custom key attached to subsequent reports.
    ///
    /// Setting an existing key overwrites its value.
    fn set_attribute(&self, key: &str, value: &AttributeValue);

    /// Records a non-fatal failure
    ///
    /// # Arguments
    /// * `failure` - The failure to record
    /// * `attributes` - Extra attributes for this report only, if any
    fn record(&self, failure: &Failure, attributes: Option<&Attributes>);
}
