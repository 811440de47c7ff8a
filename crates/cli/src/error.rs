//! CLI error types.

use std::path::PathBuf;

use millboard_engine::PayloadError;
use thiserror::Error;

use crate::config::ConfigError;

/// Anything that stops a command from producing output.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Snapshot {}: {source}", path.display())]
    Snapshot {
        path: PathBuf,
        source: PayloadError,
    },

    #[error("Overrides file {}: {source}", path.display())]
    OverridesYaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Overrides file {}: {source}", path.display())]
    OverridesJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("No order with number {0}")]
    UnknownOrder(String),

    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Write(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CliError::UnknownOrder("SO-404".to_string());
        assert_eq!(err.to_string(), "No order with number SO-404");

        let err = CliError::Snapshot {
            path: PathBuf::from("orders.json"),
            source: PayloadError::NotAnOrderList,
        };
        assert!(err.to_string().starts_with("Snapshot orders.json: Expected an array"));
    }

    #[test]
    fn test_config_error_is_transparent() {
        let err = CliError::from(ConfigError::MissingEnvVar("MILLBOARD_SNAPSHOT".to_string()));
        assert_eq!(
            err.to_string(),
            "Missing environment variable: MILLBOARD_SNAPSHOT"
        );
    }
}
