//! Priority-ordered stock ledger.
//!
//! # Usage
//!
//! ```bash
//! mb-cli ledger
//! mb-cli --overrides manual.yaml ledger --output json
//! ```

use std::io::Write;

use millboard_engine::display::{NOT_COMPUTABLE, format_qty};
use millboard_engine::ledger::{self, LedgerEntry};

use super::{Snapshot, write_json};
use crate::config::OutputFormat;
use crate::error::CliError;
use crate::table::{Align, Table};

/// Print every open order's draw on stock, earliest delivery first.
///
/// # Errors
///
/// Returns an error if writing the output fails.
pub fn run(
    snapshot: &Snapshot,
    output: OutputFormat,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let report = ledger::run(&snapshot.orders, snapshot.overlay());

    tracing::info!(
        open_orders = report.allocations.len(),
        short_orders = report.short_orders().count(),
        "Ledger computed"
    );

    if output == OutputFormat::Json {
        return write_json(out, &report);
    }

    if report.allocations.is_empty() {
        writeln!(out, "No open orders")?;
        return Ok(());
    }

    for allocation in &report.allocations {
        writeln!(
            out,
            "#{} {} [{}] delivery {} total {}",
            allocation.priority.unwrap_or_default(),
            allocation.order_number,
            allocation.status,
            allocation
                .delivery_date
                .map_or_else(|| NOT_COMPUTABLE.to_string(), |d| d.to_string()),
            format_qty(allocation.conversion.value()),
        )?;

        let mut table = Table::new(&[
            ("Constituent", Align::Left),
            ("%", Align::Right),
            ("Before", Align::Right),
            ("Required", Align::Right),
            ("After", Align::Right),
            ("Band", Align::Left),
            ("", Align::Left),
        ]);
        for entry in allocation.entries() {
            table.row(entry_row(entry));
        }
        if !table.is_empty() {
            table.render(out)?;
        }
        writeln!(out)?;
    }

    let mut balances = Table::new(&[
        ("Constituent", Align::Left),
        ("Opening", Align::Right),
        ("Closing", Align::Right),
    ]);
    for balance in &report.balances {
        balances.row(vec![
            balance.label.clone(),
            format_qty(Some(balance.opening)),
            format_qty(Some(balance.closing)),
        ]);
    }
    if !balances.is_empty() {
        balances.render(out)?;
    }
    Ok(())
}

fn entry_row(entry: &LedgerEntry) -> Vec<String> {
    vec![
        entry.constituent.label.clone(),
        format_qty(Some(entry.constituent.percentage)),
        format_qty(Some(entry.available_before)),
        format_qty(Some(entry.required_qty)),
        format_qty(Some(entry.available_after)),
        entry.band.to_string(),
        if entry.shortage { "SHORT" } else { "" }.to_string(),
    ]
}
