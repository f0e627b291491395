//! Config command - View and validate recorder configuration
//!
//! Provides the `recorder config` CLI command which:
//! 1. Shows the effective configuration (YAML or JSON)
//! 2. Validates the configuration file and reports errors

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;
use recorder_core::config::Config;
use tracing::info;

use crate::output::Output;

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the effective configuration
    Show,
    /// Validate the configuration file
    Validate,
}

impl ConfigCommand {
    pub fn execute(&self, config_path: &Path, output: &Output) -> Result<()> {
        match self {
            ConfigCommand::Show => execute_show(config_path, output),
            ConfigCommand::Validate => execute_validate(config_path, output),
        }
    }
}

fn execute_show(config_path: &Path, output: &Output) -> Result<()> {
    let config = Config::load_or_default(config_path);

    info!(config_path = %config_path.display(), "Showing configuration");

    let json =
        serde_json::to_value(&config).context("Failed to serialize configuration to JSON")?;
    output.result(
        &format!("Configuration ({})", config_path.display()),
        serde_json::json!({
            "config_path": config_path.display().to_string(),
            "config": json,
        }),
    );

    if !output.is_json() {
        let yaml =
            serde_yaml::to_string(&config).context("Failed to serialize configuration to YAML")?;
        output.note("");
        for line in yaml.lines() {
            output.note(line);
        }
    }

    Ok(())
}

/// Outcome of validating the file at a path.
#[derive(Debug, PartialEq)]
enum Validation {
    Missing,
    Unreadable(String),
    Checked(Vec<String>),
}

fn validate_file(config_path: &Path) -> Validation {
    if !config_path.exists() {
        return Validation::Missing;
    }
    match Config::load(config_path) {
        Ok(config) => Validation::Checked(config.validate().iter().map(|e| e.to_string()).collect()),
        Err(e) => Validation::Unreadable(format!("{e:#}")),
    }
}

fn execute_validate(config_path: &Path, output: &Output) -> Result<()> {
    info!(config_path = %config_path.display(), "Validating configuration");
    let path = config_path.display().to_string();

    match validate_file(config_path) {
        Validation::Missing => {
            output.result(
                &format!("No configuration file at {path}; defaults apply"),
                serde_json::json!({ "valid": true, "config_path": path, "errors": [] }),
            );
        }
        Validation::Unreadable(error) => {
            output.problem(&error);
            output.result(
                "Configuration could not be loaded",
                serde_json::json!({ "valid": false, "config_path": path, "errors": [error] }),
            );
        }
        Validation::Checked(errors) if errors.is_empty() => {
            output.result(
                "Configuration is valid",
                serde_json::json!({ "valid": true, "config_path": path, "errors": [] }),
            );
            output.note(&format!("File: {path}"));
        }
        Validation::Checked(errors) => {
            for error in &errors {
                output.problem(error);
            }
            output.result(
                &format!(
                    "Configuration has {} error{}",
                    errors.len(),
                    if errors.len() == 1 { "" } else { "s" }
                ),
                serde_json::json!({ "valid": false, "config_path": path, "errors": errors }),
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(validate_file(&dir.path().join("none.yaml")), Validation::Missing);
    }

    #[test]
    fn test_validate_reports_field_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "logging:\n  level: loud\n").unwrap();

        let Validation::Checked(errors) = validate_file(&path) else {
            panic!("expected a parsed file");
        };
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("logging.level"));
    }

    #[test]
    fn test_validate_unparseable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "crash: [1, 2]").unwrap();
        assert!(matches!(validate_file(&path), Validation::Unreadable(_)));
    }
}
