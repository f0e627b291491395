//! Report context commands
//!
//! `recorder attribute`, `recorder user-id` and `recorder log` set the
//! context that the crash sink attaches to later reports.

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::crash_recorder;
use crate::args::{parse_value, ValueType};
use crate::output::Output;

#[derive(Debug, Args)]
pub struct AttributeCommand {
    /// Custom key name
    pub key: String,
    /// Value; its type is inferred unless --type is given
    pub value: String,
    /// Force the value type
    #[arg(long = "type", value_enum)]
    pub value_type: Option<ValueType>,
}

impl AttributeCommand {
    pub fn execute(&self, output: &Output) -> Result<()> {
        let value = parse_value(&self.value, self.value_type)?;
        let kind = value.kind();

        info!(key = %self.key, kind, "Setting custom key");
        crash_recorder()?.set_attribute(&self.key, value)?;

        output.result(
            &format!("Set {} ({})", self.key, kind),
            serde_json::json!({ "success": true, "key": self.key, "type": kind }),
        );
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct UserIdCommand {
    /// Identifier attached to later crash reports and analytics events
    pub id: String,
}

impl UserIdCommand {
    /// Sets the id on both the crash and the analytics recorder, whichever
    /// are installed.
    pub fn execute(&self, output: &Output) -> Result<()> {
        let crash = crash_recorder().ok();
        let analytics = super::analytics_recorder().ok();

        if crash.is_none() && analytics.is_none() {
            anyhow::bail!("Neither crash recording nor analytics is enabled");
        }
        if let Some(crash) = &crash {
            crash.set_user_id(&self.id);
        }
        if let Some(analytics) = &analytics {
            analytics.set_user_id(Some(&self.id));
        }

        output.result(
            &format!("User id set to {}", self.id),
            serde_json::json!({
                "success": true,
                "user_id": self.id,
                "crash": crash.is_some(),
                "analytics": analytics.is_some(),
            }),
        );
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct LogCommand {
    /// Breadcrumb message
    pub message: String,
}

impl LogCommand {
    pub fn execute(&self, output: &Output) -> Result<()> {
        crash_recorder()?.log(&self.message);

        output.result("Breadcrumb added", serde_json::json!({ "success": true }));
        Ok(())
    }
}
