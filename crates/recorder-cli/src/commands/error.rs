//! Error command - Record a non-fatal failure
//!
//! Provides the `recorder error` CLI command, which builds a failure from
//! its arguments and sends it through the crash recorder, including the
//! configured delegate.

use anyhow::Result;
use clap::Args;
use recorder_core::domain::{Enrichment, Failure};
use tracing::info;

use super::crash_recorder;
use crate::args::parse_pairs;
use crate::output::Output;

#[derive(Debug, Args)]
pub struct ErrorCommand {
    /// Failure kind (e.g. "io", "http")
    #[arg(long)]
    pub kind: String,
    /// Human-readable message
    #[arg(long)]
    pub message: String,
    /// Title for the enrichment; defaults to the message when attributes are given
    #[arg(long)]
    pub title: Option<String>,
    /// Enrichment attribute as key=value (repeatable)
    #[arg(long = "attr", value_name = "KEY=VALUE")]
    pub attrs: Vec<String>,
}

impl ErrorCommand {
    pub fn execute(&self, output: &Output) -> Result<()> {
        let failure = self.build_failure()?;
        let enriched = failure.is_enriched();

        info!(kind = %failure.kind(), enriched, "Recording failure");
        crash_recorder()?.record_error(failure);

        output.result(
            &format!("Failure '{}' submitted", self.kind),
            serde_json::json!({ "success": true, "kind": self.kind, "enriched": enriched }),
        );
        Ok(())
    }

    fn build_failure(&self) -> Result<Failure> {
        let failure = Failure::try_new(&self.kind, &self.message)?;
        let attributes = parse_pairs(&self.attrs)?;

        if self.title.is_none() && attributes.is_empty() {
            return Ok(failure);
        }
        let title = self.title.clone().unwrap_or_else(|| self.message.clone());
        Ok(failure.with_enrichment(Enrichment::new(title).with_attributes(attributes)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recorder_core::domain::AttributeValue;

    fn command(title: Option<&str>, attrs: &[&str]) -> ErrorCommand {
        ErrorCommand {
            kind: "payment".into(),
            message: "card declined".into(),
            title: title.map(String::from),
            attrs: attrs.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn test_plain_failure() {
        let failure = command(None, &[]).build_failure().unwrap();
        assert_eq!(failure.kind(), "payment");
        assert!(!failure.is_enriched());
    }

    #[test]
    fn test_enriched_failure() {
        let failure = command(Some("Checkout"), &["amount=12"])
            .build_failure()
            .unwrap();
        let enrichment = failure.enrichment().unwrap();
        assert_eq!(enrichment.title(), "Checkout");
        assert_eq!(enrichment.attributes()["amount"], AttributeValue::Int(12));
    }

    #[test]
    fn test_attributes_without_title_use_message() {
        let failure = command(None, &["retry=true"]).build_failure().unwrap();
        assert_eq!(failure.enrichment().unwrap().title(), "card declined");
    }

    #[test]
    fn test_blank_kind_rejected() {
        let mut cmd = command(None, &[]);
        cmd.kind = "  ".into();
        assert!(cmd.build_failure().is_err());
    }
}
