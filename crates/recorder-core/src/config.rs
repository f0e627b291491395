//! Configuration module for the recorder.
//!
//! Provides typed configuration structs that map to the YAML configuration file,
//! with loading, validation, defaults, and a builder pattern for programmatic use.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for the recorder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub crash: CrashConfig,
    pub analytics: AnalyticsConfig,
    pub answers: AnswersConfig,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

/// Error-recording settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrashConfig {
    /// Whether the crash recorder is installed at startup.
    pub enabled: bool,
    /// Failure kinds that are never recorded.
    pub ignored_kinds: Vec<String>,
    /// Enrichment attribute keys stripped before a failure is recorded.
    pub redacted_keys: Vec<String>,
}

/// Analytics settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Whether the analytics recorder is installed at startup.
    pub enabled: bool,
}

/// Usage-event settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswersConfig {
    /// Whether the answers recorder is installed at startup.
    pub enabled: bool,
}

// ---------------------------------------------------------------------------
// Config::load()
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/recorder/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("recorder")
            .join("config.yaml")
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for CrashConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ignored_kinds: Vec::new(),
            redacted_keys: Vec::new(),
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for AnswersConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// ---------------------------------------------------------------------------
// Config::validate()
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"logging.level"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        // --- crash ---
        check_no_blank_entries(&self.crash.ignored_kinds, "crash.ignored_kinds", &mut errors);
        check_no_blank_entries(&self.crash.redacted_keys, "crash.redacted_keys", &mut errors);

        errors
    }
}

fn check_no_blank_entries(list: &[String], field: &str, errors: &mut Vec<ValidationError>) {
    for (index, entry) in list.iter().enumerate() {
        if entry.trim().is_empty() {
            errors.push(ValidationError {
                field: format!("{field}[{index}]"),
                message: "must not be empty".into(),
            });
        }
    }
}

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Builder for constructing a [`Config`] programmatically.
///
/// Starts from [`Config::default`] and allows selective overrides.
///
/// # Example
///
/// ```rust
/// use recorder_core::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .logging_level("debug")
///     .crash_ignored_kind("timeout")
///     .build();
/// assert!(config.validate().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder initialised with [`Config::default`] values.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    // --- logging ---

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    // --- crash ---

    pub fn crash_enabled(mut self, enabled: bool) -> Self {
        self.config.crash.enabled = enabled;
        self
    }

    pub fn crash_ignored_kind(mut self, kind: impl Into<String>) -> Self {
        self.config.crash.ignored_kinds.push(kind.into());
        self
    }

    pub fn crash_redacted_key(mut self, key: impl Into<String>) -> Self {
        self.config.crash.redacted_keys.push(key.into());
        self
    }

    // --- analytics / answers ---

    pub fn analytics_enabled(mut self, enabled: bool) -> Self {
        self.config.analytics.enabled = enabled;
        self
    }

    pub fn answers_enabled(mut self, enabled: bool) -> Self {
        self.config.answers.enabled = enabled;
        self
    }

    // --- build ---

    /// Consume the builder and return the finished [`Config`].
    pub fn build(self) -> Config {
        self.config
    }

    /// Build and validate in one step. Returns `Err` with the list of
    /// validation errors if the configuration is invalid.
    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        let config = self.build();
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(errors)
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    // -- Defaults --

    #[test]
    fn default_config_has_sensible_values() {
        let cfg = Config::default();
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.crash.enabled);
        assert!(cfg.crash.ignored_kinds.is_empty());
        assert!(cfg.crash.redacted_keys.is_empty());
        assert!(cfg.analytics.enabled);
        assert!(cfg.answers.enabled);
    }

    #[test]
    fn default_config_passes_validation() {
        assert!(Config::default().validate().is_empty());
    }

    #[test]
    fn default_path_ends_with_config_yaml() {
        let path = Config::default_path();
        assert!(path.ends_with("recorder/config.yaml"));
    }

    // -- Loading --

    #[test]
    fn load_from_yaml_file() {
        let yaml = r#"
logging:
  level: debug
crash:
  enabled: true
  ignored_kinds: [ignorable, timeout]
  redacted_keys: [email]
analytics:
  enabled: false
answers:
  enabled: true
"#;
        let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
        tmp.write_all(yaml.as_bytes()).unwrap();
        tmp.flush().unwrap();

        let cfg = Config::load(tmp.path()).expect("load config");
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.crash.ignored_kinds, vec!["ignorable", "timeout"]);
        assert_eq!(cfg.crash.redacted_keys, vec!["email"]);
        assert!(!cfg.analytics.enabled);
        assert!(cfg.answers.enabled);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"crash:\n  ignored_kinds: [cancelled]\n").unwrap();
        tmp.flush().unwrap();

        let cfg = Config::load(tmp.path()).unwrap();
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.crash.enabled);
        assert_eq!(cfg.crash.ignored_kinds, vec!["cancelled"]);
        assert!(cfg.analytics.enabled);
    }

    #[test]
    fn load_missing_file_fails_and_default_falls_back() {
        let path = Path::new("/nonexistent/recorder/config.yaml");
        assert!(Config::load(path).is_err());
        assert_eq!(Config::load_or_default(path), Config::default());
    }

    #[test]
    fn load_invalid_yaml_fails() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"logging: [not, a, map").unwrap();
        tmp.flush().unwrap();
        assert!(Config::load(tmp.path()).is_err());
    }

    // -- Validation --

    #[test]
    fn invalid_log_level_reported() {
        let cfg = ConfigBuilder::new().logging_level("loud").build();
        let errors = cfg.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "logging.level");
        assert!(errors[0].message.contains("loud"));
    }

    #[test]
    fn blank_list_entries_reported() {
        let cfg = ConfigBuilder::new()
            .crash_ignored_kind("ok")
            .crash_ignored_kind(" ")
            .crash_redacted_key("")
            .build();
        let fields: Vec<_> = cfg.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["crash.ignored_kinds[1]", "crash.redacted_keys[0]"]);
    }

    #[test]
    fn build_validated() {
        assert!(ConfigBuilder::new().build_validated().is_ok());
        let errors = ConfigBuilder::new()
            .logging_level("")
            .build_validated()
            .unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn validation_error_display() {
        let err = ValidationError {
            field: "logging.level".into(),
            message: "bad".into(),
        };
        assert_eq!(err.to_string(), "logging.level: bad");
    }

    #[test]
    fn config_round_trips_through_yaml() {
        let cfg = ConfigBuilder::new()
            .crash_redacted_key("token")
            .answers_enabled(false)
            .build();
        let yaml = serde_yaml::to_string(&cfg).unwrap();
        let back: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, cfg);
    }
}
