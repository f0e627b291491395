//! Domain error types
//!
//! Errors raised while building domain values: empty keys, unknown
//! vocabulary entries and the like. Recording itself never fails.

use thiserror::Error;

/// Errors that can occur while constructing or parsing domain values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An attribute or parameter key was empty
    #[error("Key must not be empty")]
    EmptyKey,

    /// A failure kind was empty
    #[error("Failure kind must not be empty")]
    EmptyKind,

    /// Name is not part of the analytics event vocabulary
    #[error("Unknown analytics event: {0}")]
    UnknownEvent(String),

    /// Name is not part of the analytics parameter vocabulary
    #[error("Unknown analytics parameter: {0}")]
    UnknownParameter(String),

    /// Name is not part of the analytics user property vocabulary
    #[error("Unknown user property: {0}")]
    UnknownUserProperty(String),
}
