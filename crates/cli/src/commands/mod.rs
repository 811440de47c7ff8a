//! Command implementations.
//!
//! Every command reads the snapshot fresh, runs the engine, and writes either
//! a table or pretty JSON to the writer it is given.

pub mod breakdown;
pub mod ledger;
pub mod pending;
pub mod updates;

use std::io::Write;
use std::path::Path;

use millboard_engine::{ManualStockOverlay, Order, parse_orders};
use serde::Serialize;
use tracing::info;

use crate::config::MillboardConfig;
use crate::error::CliError;

/// Orders plus the optional manual raw-cotton overlay.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub orders: Vec<Order>,
    pub overlay: Option<ManualStockOverlay>,
}

impl Snapshot {
    #[must_use]
    pub const fn overlay(&self) -> Option<&ManualStockOverlay> {
        self.overlay.as_ref()
    }
}

/// Read the snapshot and overlay named by the configuration.
///
/// # Errors
///
/// Returns an error if no snapshot is configured or a file cannot be read or
/// parsed.
pub fn load_snapshot(config: &MillboardConfig) -> Result<Snapshot, CliError> {
    let path = config.snapshot_path()?;
    let orders = parse_orders(&read(path)?).map_err(|source| CliError::Snapshot {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), orders = orders.len(), "Loaded snapshot");

    let overlay = match &config.overrides {
        Some(path) => {
            let overlay = parse_overlay(path, &read(path)?)?;
            info!(path = %path.display(), "Loaded manual raw-cotton entries");
            Some(overlay)
        }
        None => None,
    };

    Ok(Snapshot { orders, overlay })
}

/// Parse an overlay file; `.json` files as JSON, everything else as YAML.
///
/// # Errors
///
/// Returns an error if the text does not match the overlay shape.
pub fn parse_overlay(path: &Path, text: &str) -> Result<ManualStockOverlay, CliError> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(text).map_err(|source| CliError::OverridesJson {
            path: path.to_path_buf(),
            source,
        })
    } else {
        serde_yaml::from_str(text).map_err(|source| CliError::OverridesYaml {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn read(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a value as pretty JSON followed by a newline.
pub(crate) fn write_json(out: &mut impl Write, value: &impl Serialize) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
