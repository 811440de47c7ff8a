//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `MILLBOARD_SNAPSHOT` - Order snapshot JSON file (overridden by `--snapshot`)
//! - `MILLBOARD_OVERRIDES` - Manual raw-cotton entries, YAML or JSON
//!   (overridden by `--overrides`)
//! - `MILLBOARD_OUTPUT` - `table` or `json` (default: table)
//! - `MILLBOARD_LOG_FORMAT` - `text` or `json` (default: text)
//!
//! A `.env` file in the working directory is loaded first when present.

use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `table` or `json`, got `{other}`")),
        }
    }
}

/// Log line format on stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `text` or `json`, got `{other}`")),
        }
    }
}

/// Resolved CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MillboardConfig {
    /// Order snapshot to read
    pub snapshot: Option<PathBuf>,
    /// Manual raw-cotton overlay to apply
    pub overrides: Option<PathBuf>,
    /// Output format for command results
    pub output: OutputFormat,
    /// Log format on stderr
    pub log_format: LogFormat,
}

impl MillboardConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(get_optional_env)
    }

    /// Load configuration from any variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let output = get_env_or_default(&lookup, "MILLBOARD_OUTPUT", "table")
            .parse::<OutputFormat>()
            .map_err(|e| ConfigError::InvalidEnvVar("MILLBOARD_OUTPUT".to_string(), e))?;
        let log_format = get_env_or_default(&lookup, "MILLBOARD_LOG_FORMAT", "text")
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::InvalidEnvVar("MILLBOARD_LOG_FORMAT".to_string(), e))?;

        Ok(Self {
            snapshot: get_optional_path(&lookup, "MILLBOARD_SNAPSHOT"),
            overrides: get_optional_path(&lookup, "MILLBOARD_OVERRIDES"),
            output,
            log_format,
        })
    }

    /// Apply command-line flags on top of the environment.
    #[must_use]
    pub fn with_flags(
        mut self,
        snapshot: Option<PathBuf>,
        overrides: Option<PathBuf>,
        output: Option<OutputFormat>,
    ) -> Self {
        if snapshot.is_some() {
            self.snapshot = snapshot;
        }
        if overrides.is_some() {
            self.overrides = overrides;
        }
        if let Some(output) = output {
            self.output = output;
        }
        self
    }

    /// The snapshot path, which every command needs.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if neither the flag nor the
    /// variable is set.
    pub fn snapshot_path(&self) -> Result<&PathBuf, ConfigError> {
        self.snapshot
            .as_ref()
            .ok_or_else(|| ConfigError::MissingEnvVar("MILLBOARD_SNAPSHOT".to_string()))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get a variable with a default value.
fn get_env_or_default(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

/// Get an optional path; blank values count as unset.
fn get_optional_path(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<PathBuf> {
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}
