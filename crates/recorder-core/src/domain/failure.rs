//! Failures travelling the error-recording path
//!
//! A [`Failure`] is created where something went wrong, optionally passes
//! through a delegate, and is handed to the crash sink exactly once. It may
//! carry an [`Enrichment`]: a display title plus diagnostic attributes that
//! the sink stores next to the report.
//!
//! ## Design Notes
//!
//! - `Failure` does not implement `std::error::Error`, which allows the
//!   blanket `From<E: Error + Enrich>` conversion used by `?` and
//!   `run_and_record`.
//! - The source error is kept behind an `Arc` so failures stay cheap to clone
//!   for delegates and test sinks.

use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::attribute::{validate_key, AttributeValue, Attributes};
use super::errors::DomainError;

/// Reserved attribute key under which an enrichment title is recorded.
pub const TITLE_KEY: &str = "title";

/// Kind used when a failure is built with a blank kind.
const UNKNOWN_KIND: &str = "unknown";

/// Decision function consulted before a failure is recorded.
///
/// Returning `None` suppresses the report. Returning `Some` records the
/// returned failure, which may be the input unchanged or a transformed one.
pub type ErrorDelegate = Arc<dyn Fn(Failure) -> Option<Failure> + Send + Sync>;

// ============================================================================
// Enrichment
// ============================================================================

/// Extra metadata a failure can supply for display in the crash dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment {
    title: String,
    attributes: Attributes,
}

impl Enrichment {
    /// Creates an enrichment with the given title and no attributes
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            attributes: Attributes::new(),
        }
    }

    /// Adds a diagnostic attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Replaces the whole attribute map
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Removes an attribute, returning its value if it was present
    pub fn remove_attribute(&mut self, key: &str) -> Option<AttributeValue> {
        self.attributes.remove(key)
    }

    /// Returns the attributes with the title merged in under [`TITLE_KEY`].
    ///
    /// The title overrides an attribute that already uses the reserved key.
    pub fn merged_attributes(&self) -> Attributes {
        let mut merged = self.attributes.clone();
        merged.insert(TITLE_KEY.to_string(), AttributeValue::Text(self.title.clone()));
        merged
    }
}

/// Capability for error types that know how to describe themselves.
///
/// Every error converted with `From`/`?` goes through this trait, so an
/// enrichment the type provides can never be lost on the way to the sink.
/// Errors without extra metadata opt in with an empty impl:
///
/// ```ignore
/// impl Enrich for ParseError {}
/// ```
///
/// Foreign error types without an impl still convert with
/// [`Failure::from_error`].
pub trait Enrich {
    /// The enrichment to attach, or `None` for a plain report
    fn enrichment(&self) -> Option<Enrichment> {
        None
    }
}

impl Enrich for std::io::Error {}
impl Enrich for fmt::Error {}
impl Enrich for std::num::ParseIntError {}
impl Enrich for std::num::ParseFloatError {}
impl Enrich for std::str::ParseBoolError {}
impl Enrich for std::str::Utf8Error {}
impl Enrich for std::string::FromUtf8Error {}
impl Enrich for serde_json::Error {}
impl Enrich for serde_yaml::Error {}

// ============================================================================
// Failure
// ============================================================================

/// An error value on its way to the crash sink
#[derive(Debug, Clone)]
pub struct Failure {
    kind: String,
    message: String,
    occurred_at: DateTime<Utc>,
    enrichment: Option<Enrichment>,
    source: Option<Arc<dyn StdError + Send + Sync + 'static>>,
}

impl Failure {
    /// Creates a plain failure.
    ///
    /// A blank `kind` is replaced by `"unknown"`; use [`Failure::try_new`] to
    /// reject it instead.
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: normalize_kind(kind.into()),
            message: message.into(),
            occurred_at: Utc::now(),
            enrichment: None,
            source: None,
        }
    }

    /// Creates a plain failure, rejecting a blank kind
    pub fn try_new(kind: impl Into<String>, message: impl Into<String>) -> Result<Self, DomainError> {
        let kind = kind.into();
        if kind.trim().is_empty() {
            return Err(DomainError::EmptyKind);
        }
        Ok(Self::new(kind, message))
    }

    /// Wraps an application error.
    ///
    /// The kind is the error's type name without its module path (see
    /// `short_type_name`); the message is its `Display` output. Any
    /// enrichment the type could provide is not consulted.
    pub fn from_error<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let mut failure = Self::new(short_type_name::<E>(), err.to_string());
        failure.source = Some(Arc::new(err));
        failure
    }

    /// Wraps an application error that can describe itself
    pub fn enriched<E>(err: E) -> Self
    where
        E: StdError + Enrich + Send + Sync + 'static,
    {
        let enrichment = err.enrichment();
        let mut failure = Self::from_error(err);
        failure.enrichment = enrichment;
        failure
    }

    /// Overrides the kind; a blank kind becomes `"unknown"` as in [`Failure::new`]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = normalize_kind(kind.into());
        self
    }

    /// Attaches an enrichment, replacing any existing one
    pub fn with_enrichment(mut self, enrichment: Enrichment) -> Self {
        self.enrichment = Some(enrichment);
        self
    }

    /// Adds a single enrichment attribute.
    ///
    /// Creates an enrichment titled with the failure message if none exists.
    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Result<Self, DomainError> {
        let key = key.into();
        validate_key(&key)?;
        let enrichment = self
            .enrichment
            .take()
            .unwrap_or_else(|| Enrichment::new(self.message.clone()));
        self.enrichment = Some(enrichment.with_attribute(key, value));
        Ok(self)
    }

    /// Drops the enrichment so the failure is recorded plain
    pub fn without_enrichment(mut self) -> Self {
        self.enrichment = None;
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn enrichment(&self) -> Option<&Enrichment> {
        self.enrichment.as_ref()
    }

    pub fn enrichment_mut(&mut self) -> Option<&mut Enrichment> {
        self.enrichment.as_mut()
    }

    pub fn is_enriched(&self) -> bool {
        self.enrichment.is_some()
    }

    /// The wrapped application error, if the failure was built from one
    pub fn source(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }
}

impl Display for Failure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl<E> From<E> for Failure
where
    E: StdError + Enrich + Send + Sync + 'static,
{
    fn from(err: E) -> Self {
        Self::enriched(err)
    }
}

/// Type name without its module path.
///
/// A type named plain `Error` keeps its nearest meaningful module
/// (`io::Error`, `serde_json::Error`) so kinds stay distinguishable.
fn short_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    let mut segments = base.rsplit("::");
    let name = segments.next().unwrap_or(base);
    if name != "Error" {
        return name.to_string();
    }
    match segments.find(|segment| *segment != "error") {
        Some(module) => format!("{module}::{name}"),
        None => name.to_string(),
    }
}

fn normalize_kind(kind: String) -> String {
    if kind.trim().is_empty() {
        UNKNOWN_KIND.to_string()
    } else {
        kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("quota exceeded for {user}")]
    struct QuotaError {
        user: String,
    }

    impl Enrich for QuotaError {
        fn enrichment(&self) -> Option<Enrichment> {
            Some(Enrichment::new("Quota exceeded").with_attribute("user", self.user.as_str()))
        }
    }

    #[test]
    fn test_failure_creation() {
        let failure = Failure::new("network", "connection reset");
        assert_eq!(failure.kind(), "network");
        assert_eq!(failure.message(), "connection reset");
        assert!(!failure.is_enriched());
        assert!(failure.source().is_none());
        assert_eq!(failure.to_string(), "network: connection reset");
    }

    #[test]
    fn test_blank_kind() {
        assert_eq!(Failure::new("  ", "x").kind(), "unknown");
        assert_eq!(
            Failure::try_new("", "x").unwrap_err(),
            DomainError::EmptyKind
        );
    }

    #[test]
    fn test_from_std_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
        let failure: Failure = io.into();
        assert_eq!(failure.kind(), "io::Error");
        assert_eq!(failure.message(), "missing file");
        assert!(failure.source().is_some());
        assert!(!failure.is_enriched());
    }

    #[test]
    fn test_enriched_error() {
        let failure = Failure::enriched(QuotaError {
            user: "u-42".to_string(),
        });
        assert_eq!(failure.kind(), "QuotaError");
        let enrichment = failure.enrichment().expect("enrichment");
        assert_eq!(enrichment.title(), "Quota exceeded");
        assert_eq!(
            enrichment.attributes().get("user"),
            Some(&AttributeValue::Text("u-42".into()))
        );
    }

    #[test]
    fn test_merged_attributes_adds_only_title() {
        let enrichment = Enrichment::new("T").with_attribute("a", 1);
        let merged = enrichment.merged_attributes();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged["a"], AttributeValue::Int(1));
        assert_eq!(merged[TITLE_KEY], AttributeValue::Text("T".into()));
    }

    #[test]
    fn test_title_overrides_reserved_attribute() {
        let enrichment = Enrichment::new("real").with_attribute(TITLE_KEY, "stale");
        let merged = enrichment.merged_attributes();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[TITLE_KEY], AttributeValue::Text("real".into()));
    }

    #[test]
    fn test_with_attribute_creates_enrichment() {
        let failure = Failure::new("db", "locked")
            .with_attribute("table", "items")
            .unwrap();
        let enrichment = failure.enrichment().unwrap();
        assert_eq!(enrichment.title(), "locked");
        assert_eq!(enrichment.attributes().len(), 1);

        assert_eq!(
            Failure::new("db", "locked").with_attribute("", 1).unwrap_err(),
            DomainError::EmptyKey
        );
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name::<QuotaError>(), "QuotaError");
        assert_eq!(short_type_name::<Vec<String>>(), "Vec");
        assert_eq!(short_type_name::<std::io::Error>(), "io::Error");
        assert_eq!(short_type_name::<fmt::Error>(), "fmt::Error");
        assert_eq!(short_type_name::<serde_json::Error>(), "serde_json::Error");
    }

    #[test]
    fn test_conversion_keeps_enrichment() {
        let failure: Failure = QuotaError {
            user: "u-7".to_string(),
        }
        .into();
        let enrichment = failure.enrichment().expect("enrichment kept");
        assert_eq!(enrichment.title(), "Quota exceeded");
    }

    #[test]
    fn test_question_mark_keeps_enrichment() {
        fn check_quota() -> Result<(), Failure> {
            Err::<(), _>(QuotaError {
                user: "u-9".to_string(),
            })?;
            Ok(())
        }
        let failure = check_quota().unwrap_err();
        let merged = failure.enrichment().expect("enrichment kept").merged_attributes();
        assert_eq!(merged[TITLE_KEY], AttributeValue::Text("Quota exceeded".into()));
    }

    #[test]
    fn test_with_kind_blank_falls_back() {
        assert_eq!(Failure::new("io", "x").with_kind("   ").kind(), "unknown");
        assert_eq!(Failure::new("io", "x").with_kind("disk").kind(), "disk");
    }
}
