//! Recorder CLI - Command-line front end for the recorder facade
//!
//! Provides commands for:
//! - Recording non-fatal failures and setting report context
//! - Logging analytics and Answers usage events
//! - Inspecting and validating configuration
//!
//! Every command goes through the same facade an application would use,
//! backed by a development sink that writes what would have been sent.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use recorder_core::config::Config;
use recorder_facade::{install_from_config, RecorderMetrics, Sinks};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod args;
mod commands;
mod output;
mod sink;

use commands::{
    answer::AnswerCommand,
    config::ConfigCommand,
    context::{AttributeCommand, LogCommand, UserIdCommand},
    error::ErrorCommand,
    event::{EventCommand, ScreenCommand, UserPropertyCommand},
};
use output::{Output, OutputFormat};
use sink::PrintingSink;

#[derive(Debug, Parser)]
#[command(name = "recorder", version, about = "Crash and analytics recorder")]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print the Prometheus exposition of facade counters afterwards
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record a non-fatal failure
    Error(ErrorCommand),
    /// Set a custom key on later crash reports
    Attribute(AttributeCommand),
    /// Set the user id for crash reports and analytics
    UserId(UserIdCommand),
    /// Add a breadcrumb to the next crash report
    Log(LogCommand),
    /// Log an analytics event
    Event(EventCommand),
    /// Set or clear an analytics user property
    UserProperty(UserPropertyCommand),
    /// Set the current screen
    Screen(ScreenCommand),
    /// Print the analytics app instance id
    InstanceId,
    /// Clear all analytics data for this instance
    Reset,
    /// Log a predefined usage event
    #[command(subcommand)]
    Answer(AnswerCommand),
    /// View and validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Levels in increasing verbosity, matching `logging.level` values.
const LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Raises `base` by `verbose` steps, saturating at `trace`.
fn effective_level(base: &str, verbose: u8) -> &'static str {
    let start = LEVELS.iter().position(|l| *l == base).unwrap_or(2);
    let index = (start + verbose as usize).min(LEVELS.len() - 1);
    LEVELS[index]
}

fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        Config::load(path).context("Failed to load configuration")
    } else {
        Ok(Config::default())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    // `config validate` reports parse errors itself, so fall back to defaults there.
    let config = match &cli.command {
        Commands::Config(_) => Config::load_or_default(&config_path),
        _ => load_config(&config_path)?,
    };

    // Setup tracing
    let filter = effective_level(&config.logging.level, cli.verbose);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let output = Output::new(if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    });

    if let Commands::Config(cmd) = &cli.command {
        return cmd.execute(&config_path, &output);
    }

    let metrics = Arc::new(RecorderMetrics::new()?);
    let installed = install_from_config(
        &config,
        Sinks::single(Arc::new(PrintingSink::new(output))),
        Some(Arc::clone(&metrics)),
    );
    debug!(?installed, "Recorders ready");

    let result = match &cli.command {
        Commands::Error(cmd) => cmd.execute(&output),
        Commands::Attribute(cmd) => cmd.execute(&output),
        Commands::UserId(cmd) => cmd.execute(&output),
        Commands::Log(cmd) => cmd.execute(&output),
        Commands::Event(cmd) => cmd.execute(&output),
        Commands::UserProperty(cmd) => cmd.execute(&output),
        Commands::Screen(cmd) => cmd.execute(&output),
        Commands::InstanceId => commands::event::execute_instance_id(&output),
        Commands::Reset => commands::event::execute_reset(&output),
        Commands::Answer(cmd) => cmd.execute(&output),
        Commands::Config(_) => unreachable!("handled before installation"),
    };

    // Exposition text is not JSON, so it goes to stderr when stdout carries JSON lines.
    if cli.metrics {
        let exposition = metrics.encode()?;
        if output.is_json() {
            eprint!("{exposition}");
        } else {
            print!("{exposition}");
        }
    }
    result
}
