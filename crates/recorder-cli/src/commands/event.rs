//! Analytics commands
//!
//! `recorder event` logs a named event. When the name and every parameter
//! key belong to the well-known vocabulary the typed path is taken;
//! otherwise everything is forwarded verbatim. The remaining commands are
//! direct forwards to the analytics recorder.

use anyhow::Result;
use clap::Args;
use recorder_core::domain::{
    AnalyticsEvent, AnalyticsParameter, AnalyticsUserProperty, DomainError, Parameters,
    TypedParameters,
};
use tracing::{debug, info};

use super::analytics_recorder;
use crate::args::parse_pairs;
use crate::output::Output;

/// An event resolved against the vocabulary.
#[derive(Debug, PartialEq)]
pub enum ResolvedEvent {
    Typed(AnalyticsEvent, Option<TypedParameters>),
    Verbatim(String, Option<Parameters>),
}

impl ResolvedEvent {
    pub fn resolve(name: &str, parameters: Parameters) -> Self {
        let Ok(event) = name.parse::<AnalyticsEvent>() else {
            return Self::verbatim(name, parameters);
        };

        let typed: Result<TypedParameters, DomainError> = parameters
            .iter()
            .map(|(key, value)| {
                key.parse::<AnalyticsParameter>()
                    .map(|param| (param, value.clone()))
            })
            .collect();
        match typed {
            Ok(typed) if typed.is_empty() => Self::Typed(event, None),
            Ok(typed) => Self::Typed(event, Some(typed)),
            Err(e) => {
                debug!(error = %e, "Parameter outside vocabulary, logging verbatim");
                Self::verbatim(name, parameters)
            }
        }
    }

    fn verbatim(name: &str, parameters: Parameters) -> Self {
        let parameters = (!parameters.is_empty()).then_some(parameters);
        Self::Verbatim(name.to_string(), parameters)
    }

    pub fn is_typed(&self) -> bool {
        matches!(self, Self::Typed(..))
    }
}

#[derive(Debug, Args)]
pub struct EventCommand {
    /// Event name
    pub name: String,
    /// Event parameter as key=value (repeatable)
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,
}

impl EventCommand {
    pub fn execute(&self, output: &Output) -> Result<()> {
        let recorder = analytics_recorder()?;
        let resolved = ResolvedEvent::resolve(&self.name, parse_pairs(&self.params)?);
        let typed = resolved.is_typed();

        info!(event = %self.name, typed, "Logging analytics event");
        match resolved {
            ResolvedEvent::Typed(event, params) => recorder.log_typed_event(event, params),
            ResolvedEvent::Verbatim(name, params) => recorder.log_event(&name, params),
        }

        output.result(
            &format!("Logged event {}", self.name),
            serde_json::json!({ "success": true, "event": self.name, "typed": typed }),
        );
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct UserPropertyCommand {
    /// Property name
    pub name: String,
    /// Property value; omit to clear the property
    pub value: Option<String>,
}

impl UserPropertyCommand {
    pub fn execute(&self, output: &Output) -> Result<()> {
        let recorder = analytics_recorder()?;
        let value = self.value.as_deref();

        match self.name.parse::<AnalyticsUserProperty>() {
            Ok(property) => recorder.set_typed_user_property(value, property),
            Err(_) => recorder.set_user_property(value, &self.name),
        }

        let summary = match value {
            Some(value) => format!("Set user property {} = {}", self.name, value),
            None => format!("Cleared user property {}", self.name),
        };
        output.result(
            &summary,
            serde_json::json!({ "success": true, "name": self.name, "value": self.value }),
        );
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct ScreenCommand {
    /// Screen name
    pub name: Option<String>,
    /// Screen class
    #[arg(long)]
    pub class: Option<String>,
}

impl ScreenCommand {
    pub fn execute(&self, output: &Output) -> Result<()> {
        analytics_recorder()?.set_screen_name(self.name.as_deref(), self.class.as_deref());

        output.result(
            &format!("Current screen: {}", self.name.as_deref().unwrap_or("(none)")),
            serde_json::json!({
                "success": true,
                "screen_name": self.name,
                "screen_class": self.class,
            }),
        );
        Ok(())
    }
}

/// Prints the app instance id reported by the analytics sink.
pub fn execute_instance_id(output: &Output) -> Result<()> {
    let id = analytics_recorder()?.app_instance_id();
    output.result(&id, serde_json::json!({ "app_instance_id": id }));
    Ok(())
}

pub fn execute_reset(output: &Output) -> Result<()> {
    analytics_recorder()?.reset_analytics_data();
    output.result("Analytics data reset", serde_json::json!({ "success": true }));
    Ok(())
}
