//! Process-wide active recorders
//!
//! Exactly one recorder of each kind is active per process. It is installed
//! once during startup, before concurrent use begins, and read many times
//! afterwards. The slots are `RwLock`s so a late re-installation is still
//! memory safe; it replaces the previous instance and logs a warning.

use std::sync::{PoisonError, RwLock};

use tracing::{debug, warn};

use crate::{AnalyticsRecorder, AnswersRecorder, CrashRecorder};

/// A single-writer, many-reader slot holding the active instance of `T`.
pub(crate) struct SharedSlot<T> {
    name: &'static str,
    inner: RwLock<Option<T>>,
}

impl<T: Clone> SharedSlot<T> {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: RwLock::new(None),
        }
    }

    /// Makes `value` the active instance, returning the one it replaced.
    pub(crate) fn install(&self, value: T) -> Option<T> {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let previous = guard.replace(value);
        if previous.is_some() {
            warn!(recorder = self.name, "Replacing already installed recorder");
        } else {
            debug!(recorder = self.name, "Recorder installed");
        }
        previous
    }

    pub(crate) fn get(&self) -> Option<T> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn take(&self) -> Option<T> {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// Returns the active instance or aborts the caller with a clear message.
    fn expect_installed(&self) -> T {
        match self.get() {
            Some(value) => value,
            None => panic!(
                "{} used before installation; call {}::install during startup",
                self.name, self.name
            ),
        }
    }
}

pub(crate) static CRASH: SharedSlot<CrashRecorder> = SharedSlot::new("CrashRecorder");
pub(crate) static ANALYTICS: SharedSlot<AnalyticsRecorder> = SharedSlot::new("AnalyticsRecorder");
pub(crate) static ANSWERS: SharedSlot<AnswersRecorder> = SharedSlot::new("AnswersRecorder");

/// The active crash recorder.
///
/// # Panics
///
/// Panics if no crash recorder was installed. Recording before startup
/// finished is a configuration bug, not a condition to recover from.
pub fn crash() -> CrashRecorder {
    CRASH.expect_installed()
}

/// The active analytics recorder.
///
/// # Panics
///
/// Panics if no analytics recorder was installed.
pub fn analytics() -> AnalyticsRecorder {
    ANALYTICS.expect_installed()
}

/// The active answers recorder.
///
/// # Panics
///
/// Panics if no answers recorder was installed.
pub fn answers() -> AnswersRecorder {
    ANSWERS.expect_installed()
}
