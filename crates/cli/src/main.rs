//! Millboard CLI - Fibre requirement and shortage reports from order snapshots.
//!
//! # Usage
//!
//! ```bash
//! # Dashboard summary of open fibre demand
//! mb-cli --snapshot orders.json pending
//!
//! # Only fibres that will run short, as JSON
//! mb-cli pending --shortages-only --output json
//!
//! # Full priority-ordered ledger with manual raw-cotton stock
//! mb-cli --overrides manual.yaml ledger
//!
//! # One order's breakdown
//! mb-cli breakdown SO-1042
//!
//! # raw_cotton_updates body for the order-update endpoint
//! mb-cli --overrides manual.yaml updates SO-1042
//! ```
//!
//! # Commands
//!
//! - `pending` - Pending fibres with total demand and shortfall
//! - `ledger` - Stock ledger in delivery-date priority order
//! - `breakdown` - Per-order fibre and raw-cotton breakdown
//! - `updates` - Manual raw-cotton entries as an update payload
//!
//! Logs go to stderr; stdout carries only command output.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod table;

use config::{LogFormat, MillboardConfig, OutputFormat};
use error::CliError;

#[derive(Parser)]
#[command(name = "mb-cli")]
#[command(author, version, about = "Millboard fibre requirement tools")]
struct Cli {
    /// Order snapshot JSON file [env: `MILLBOARD_SNAPSHOT`]
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Manual raw-cotton entries, YAML or JSON [env: `MILLBOARD_OVERRIDES`]
    #[arg(long, global = true)]
    overrides: Option<PathBuf>,

    /// Output format [env: `MILLBOARD_OUTPUT`]
    #[arg(long, global = true, value_enum)]
    output: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show total open demand per fibre against stock
    Pending {
        /// Only list fibres with a shortfall
        #[arg(long)]
        shortages_only: bool,
    },
    /// Show the stock ledger in priority order
    Ledger,
    /// Show one order's fibre breakdown
    Breakdown {
        /// Order number, e.g. SO-1042
        order_number: String,
    },
    /// Print the `raw_cotton_updates` payload for one order
    Updates {
        /// Order number, e.g. SO-1042
        order_number: String,
    },
}

fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = MillboardConfig::from_env();

    init_tracing(
        config
            .as_ref()
            .map_or(LogFormat::default(), |c| c.log_format),
    );

    let result = config
        .map_err(CliError::from)
        .and_then(|config| run(cli, &config));

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Defaults to info for the CLI and warn for the engine if `RUST_LOG` is not set.
fn init_tracing(format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "millboard_cli=info,millboard_engine=warn".into());

    let is_json = format == LogFormat::Json;
    let json_layer = is_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!is_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

fn run(cli: Cli, config: &MillboardConfig) -> Result<(), CliError> {
    let config = config
        .clone()
        .with_flags(cli.snapshot, cli.overrides, cli.output);
    let snapshot = commands::load_snapshot(&config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Pending { shortages_only } => {
            commands::pending::run(&snapshot, shortages_only, config.output, &mut out)?;
        }
        Commands::Ledger => commands::ledger::run(&snapshot, config.output, &mut out)?,
        Commands::Breakdown { order_number } => {
            commands::breakdown::run(&snapshot, &order_number, config.output, &mut out)?;
        }
        Commands::Updates { order_number } => {
            commands::updates::run(&snapshot, &order_number, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "mb-cli",
            "pending",
            "--shortages-only",
            "--output",
            "json",
            "--snapshot",
            "orders.json",
        ]);
        let Ok(cli) = cli else {
            panic!("arguments should parse");
        };
        assert!(matches!(cli.command, Commands::Pending { shortages_only: true }));
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.snapshot, Some(PathBuf::from("orders.json")));
    }

    #[test]
    fn test_breakdown_requires_order_number() {
        assert!(Cli::try_parse_from(["mb-cli", "breakdown"]).is_err());
    }
}
