//! Error delegates built from configuration
//!
//! Deployments usually want the same two decisions: drop failures of kinds
//! that are expected (cancellations, timeouts) and strip attributes that may
//! carry personal data. [`from_config`] builds that delegate from
//! [`CrashConfig`].

use std::collections::HashSet;
use std::sync::Arc;

use recorder_core::{
    config::CrashConfig,
    domain::{ErrorDelegate, Failure},
};

/// Delegate that suppresses failures whose kind is in `kinds`.
pub fn ignore_kinds<I, S>(kinds: I) -> ErrorDelegate
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let kinds: HashSet<String> = kinds.into_iter().map(Into::into).collect();
    Arc::new(move |failure: Failure| {
        if kinds.contains(failure.kind()) {
            None
        } else {
            Some(failure)
        }
    })
}

/// Delegate that removes the given keys from a failure's enrichment.
pub fn redact_keys<I, S>(keys: I) -> ErrorDelegate
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
    Arc::new(move |mut failure: Failure| {
        if let Some(enrichment) = failure.enrichment_mut() {
            for key in &keys {
                enrichment.remove_attribute(key);
            }
        }
        Some(failure)
    })
}

/// Runs `first`, then `second` on whatever `first` let through.
pub fn chain(first: ErrorDelegate, second: ErrorDelegate) -> ErrorDelegate {
    Arc::new(move |failure: Failure| first(failure).and_then(|f| second(f)))
}

/// Builds the delegate described by `config`.
///
/// Returns `None` when there is nothing to filter, so no delegate needs to be
/// attached.
pub fn from_config(config: &CrashConfig) -> Option<ErrorDelegate> {
    let ignore = (!config.ignored_kinds.is_empty())
        .then(|| ignore_kinds(config.ignored_kinds.iter().cloned()));
    let redact = (!config.redacted_keys.is_empty())
        .then(|| redact_keys(config.redacted_keys.iter().cloned()));

    match (ignore, redact) {
        (Some(ignore), Some(redact)) => Some(chain(ignore, redact)),
        (Some(delegate), None) | (None, Some(delegate)) => Some(delegate),
        (None, None) => None,
    }
}
