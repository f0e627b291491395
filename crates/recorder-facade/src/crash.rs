//! CrashRecorder - error recording and report context
//!
//! Decides, for each failure, whether and in what form it reaches the crash
//! sink. An optional delegate sees every failure first and may pass it
//! through, replace it, or suppress it. Failures that carry an enrichment are
//! recorded with their attributes and title merged into one map.
//!
//! The recorder also forwards the context attached to later reports:
//! breadcrumbs, the user id and custom keys.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use recorder_core::{
    domain::{validate_key, AttributeValue, DomainError, ErrorDelegate, Failure},
    ports::ICrashSink,
};
use tracing::{debug, trace};

use crate::metrics::{RecorderMetrics, OUTCOME_RECORDED, OUTCOME_SUPPRESSED};
use crate::shared::CRASH;

/// Facade over the installed crash sink.
///
/// Clones share the sink, the delegate slot and the metrics.
#[derive(Clone)]
pub struct CrashRecorder {
    sink: Arc<dyn ICrashSink>,
    delegate: Arc<RwLock<Option<ErrorDelegate>>>,
    metrics: Option<Arc<RecorderMetrics>>,
}

impl CrashRecorder {
    /// Creates a recorder forwarding to `sink`, with no delegate attached.
    pub fn new(sink: Arc<dyn ICrashSink>) -> Self {
        Self {
            sink,
            delegate: Arc::new(RwLock::new(None)),
            metrics: None,
        }
    }

    /// Counts outcomes in `metrics`.
    pub fn with_metrics(mut self, metrics: Arc<RecorderMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    // ========================================================================
    // Active instance
    // ========================================================================

    /// Makes this recorder the process-wide active one and returns it.
    ///
    /// Call once during startup, before other threads start recording.
    pub fn install(self) -> Self {
        CRASH.install(self.clone());
        self
    }

    /// The active recorder, if one was installed.
    pub fn shared() -> Option<Self> {
        CRASH.get()
    }

    /// Removes the active recorder, returning it.
    pub fn uninstall() -> Option<Self> {
        CRASH.take()
    }

    // ========================================================================
    // Delegate
    // ========================================================================

    /// Attaches `delegate`, replacing any previous one.
    pub fn set_delegate<F>(&self, delegate: F)
    where
        F: Fn(Failure) -> Option<Failure> + Send + Sync + 'static,
    {
        self.set_delegate_arc(Arc::new(delegate));
    }

    /// Attaches an already shared delegate.
    pub fn set_delegate_arc(&self, delegate: ErrorDelegate) {
        *self.delegate.write().unwrap_or_else(PoisonError::into_inner) = Some(delegate);
    }

    /// Detaches the delegate; every failure is recorded unmodified afterwards.
    pub fn clear_delegate(&self) {
        *self.delegate.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn has_delegate(&self) -> bool {
        self.delegate
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    // ========================================================================
    // Error recording
    // ========================================================================

    /// Records a non-fatal failure.
    ///
    /// The delegate, if any, is consulted exactly once. A suppressed failure
    /// leaves no trace in the sink. Otherwise exactly one `record` call is
    /// made, with the merged enrichment attributes when the failure has them.
    pub fn record_error(&self, failure: impl Into<Failure>) {
        let Some(failure) = self.confirm_with_delegate(failure.into()) else {
            debug!("Failure suppressed by delegate");
            self.count_outcome(OUTCOME_SUPPRESSED);
            return;
        };

        match failure.enrichment() {
            Some(enrichment) => {
                let attributes = enrichment.merged_attributes();
                trace!(kind = %failure.kind(), attributes = attributes.len(), "Recording enriched failure");
                self.sink.record(&failure, Some(&attributes));
            }
            None => {
                trace!(kind = %failure.kind(), "Recording failure");
                self.sink.record(&failure, None);
            }
        }
        self.count_outcome(OUTCOME_RECORDED);
    }

    /// Runs `op`, recording its failure instead of returning it.
    ///
    /// Returns `Some(value)` on success and `None` after the failure went
    /// through [`record_error`](Self::record_error).
    pub fn run_and_record<T, E, F>(&self, op: F) -> Option<T>
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<Failure>,
    {
        match op() {
            Ok(value) => Some(value),
            Err(err) => {
                self.record_error(err);
                None
            }
        }
    }

    /// Runs `op` and reports whether it finished without a failure.
    ///
    /// A failure is recorded exactly like [`run_and_record`](Self::run_and_record).
    pub fn run_and_report<E, F>(&self, op: F) -> bool
    where
        F: FnOnce() -> Result<(), E>,
        E: Into<Failure>,
    {
        self.run_and_record(op).is_some()
    }

    fn confirm_with_delegate(&self, failure: Failure) -> Option<Failure> {
        // Clone out of the lock so a delegate may itself touch the slot.
        let delegate = self
            .delegate
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match delegate {
            Some(delegate) => delegate(failure),
            None => Some(failure),
        }
    }

    fn count_outcome(&self, outcome: &str) {
        if let Some(metrics) = &self.metrics {
            metrics.record_error_outcome(outcome);
        }
    }

    // ========================================================================
    // Report context
    // ========================================================================

    /// Adds a breadcrumb sent along with the next report.
    pub fn log(&self, message: &str) {
        self.sink.log(message);
    }

    /// Formats and adds a breadcrumb.
    ///
    /// ```ignore
    /// recorder.log_fmt(format_args!("retrying upload {} of {}", attempt, max));
    /// ```
    pub fn log_fmt(&self, args: fmt::Arguments<'_>) {
        match args.as_str() {
            Some(message) => self.sink.log(message),
            None => self.sink.log(&args.to_string()),
        }
    }

    /// Associates later reports with `user_id`.
    pub fn set_user_id(&self, user_id: &str) {
        self.sink.set_user_id(user_id);
    }

    /// Sets a custom key attached to later reports.
    ///
    /// Only an empty key is rejected; the value is forwarded verbatim and a
    /// repeated key overwrites the previous value in the sink.
    pub fn set_attribute(
        &self,
        key: &str,
        value: impl Into<AttributeValue>,
    ) -> Result<(), DomainError> {
        let key = validate_key(key)?;
        let value = value.into();
        trace!(key = %key, kind = value.kind(), "Setting custom key");
        self.sink.set_attribute(key, &value);
        if let Some(metrics) = &self.metrics {
            metrics.record_attribute();
        }
        Ok(())
    }
}

impl fmt::Debug for CrashRecorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrashRecorder")
            .field("has_delegate", &self.has_delegate())
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}
