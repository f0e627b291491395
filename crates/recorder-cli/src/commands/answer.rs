//! Answer command - Log predefined usage events

use anyhow::Result;
use clap::{Args, Subcommand};
use recorder_core::domain::AnswersEvent;
use tracing::info;

use super::answers_recorder;
use crate::args::parse_pairs;
use crate::output::Output;

/// Options shared by the login and sign-up events
#[derive(Debug, Args)]
pub struct AuthEventArgs {
    /// Authentication method (e.g. "email", "google")
    #[arg(long)]
    pub method: Option<String>,
    /// Whether the attempt succeeded
    #[arg(long)]
    pub success: Option<bool>,
    /// Custom attribute as key=value (repeatable)
    #[arg(long = "attr", value_name = "KEY=VALUE")]
    pub attrs: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum AnswerCommand {
    /// Log a custom event
    Custom {
        /// Event name
        name: String,
        /// Custom attribute as key=value (repeatable)
        #[arg(long = "attr", value_name = "KEY=VALUE")]
        attrs: Vec<String>,
    },
    /// Log a login event
    Login(AuthEventArgs),
    /// Log a sign-up event
    SignUp(AuthEventArgs),
    /// Log a search event
    Search {
        /// Search query
        query: Option<String>,
        /// Custom attribute as key=value (repeatable)
        #[arg(long = "attr", value_name = "KEY=VALUE")]
        attrs: Vec<String>,
    },
}

impl AnswerCommand {
    pub fn execute(&self, output: &Output) -> Result<()> {
        let event = self.build_event()?;

        info!(event = %event.name(), "Logging answers event");
        answers_recorder()?.log(&event);

        output.result(
            &format!("Logged {}", event.name()),
            serde_json::json!({ "success": true, "event": event.name() }),
        );
        Ok(())
    }

    fn build_event(&self) -> Result<AnswersEvent> {
        let event = match self {
            AnswerCommand::Custom { name, attrs } => AnswersEvent::Custom {
                name: name.clone(),
                custom_attributes: parse_pairs(attrs)?,
            },
            AnswerCommand::Login(args) => AnswersEvent::Login {
                method: args.method.clone(),
                success: args.success,
                custom_attributes: parse_pairs(&args.attrs)?,
            },
            AnswerCommand::SignUp(args) => AnswersEvent::SignUp {
                method: args.method.clone(),
                success: args.success,
                custom_attributes: parse_pairs(&args.attrs)?,
            },
            AnswerCommand::Search { query, attrs } => AnswersEvent::Search {
                query: query.clone(),
                custom_attributes: parse_pairs(attrs)?,
            },
        };
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recorder_core::domain::{AttributeValue, Attributes};

    #[test]
    fn test_custom_event_with_attributes() {
        let cmd = AnswerCommand::Custom {
            name: "Exported Report".into(),
            attrs: vec!["format=pdf".into()],
        };
        let event = cmd.build_event().unwrap();
        assert_eq!(event.name(), "Exported Report");
        assert_eq!(
            event.custom_attributes()["format"],
            AttributeValue::from("pdf")
        );
    }

    #[test]
    fn test_login_event() {
        let cmd = AnswerCommand::Login(AuthEventArgs {
            method: Some("email".into()),
            success: Some(false),
            attrs: Vec::new(),
        });
        assert_eq!(
            cmd.build_event().unwrap(),
            AnswersEvent::login(Some("email".into()), Some(false))
        );
    }

    #[test]
    fn test_search_event() {
        let cmd = AnswerCommand::Search {
            query: Some("rust".into()),
            attrs: Vec::new(),
        };
        assert_eq!(
            cmd.build_event().unwrap(),
            AnswersEvent::Search {
                query: Some("rust".into()),
                custom_attributes: Attributes::new(),
            }
        );
    }

    #[test]
    fn test_bad_attribute_is_an_error() {
        let cmd = AnswerCommand::Custom {
            name: "x".into(),
            attrs: vec!["broken".into()],
        };
        assert!(cmd.build_event().is_err());
    }
}
