//! One order's fibre breakdown.
//!
//! # Usage
//!
//! ```bash
//! mb-cli breakdown SO-1042
//! ```
//!
//! Open orders are shown against ledger-depleted stock. Any other order is
//! shown against the snapshot stock on its own.

use std::io::Write;

use millboard_engine::display::format_qty;
use millboard_engine::{BreakdownView, OrderBreakdown, compute_plan};

use super::{Snapshot, write_json};
use crate::config::OutputFormat;
use crate::error::CliError;
use crate::table::{Align, Table};

/// Print the breakdown of the order with `order_number`.
///
/// # Errors
///
/// Returns `CliError::UnknownOrder` if no order has that number, or an error
/// if writing the output fails.
pub fn run(
    snapshot: &Snapshot,
    order_number: &str,
    output: OutputFormat,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let plan = compute_plan(&snapshot.orders, snapshot.overlay());
    let breakdown = plan
        .breakdown(order_number)
        .ok_or_else(|| CliError::UnknownOrder(order_number.to_string()))?;

    match output {
        OutputFormat::Json => write_json(out, breakdown),
        OutputFormat::Table => render(breakdown, out),
    }
}

fn render(b: &OrderBreakdown, out: &mut impl Write) -> Result<(), CliError> {
    let view = match b.view {
        BreakdownView::Ledger => "ledger",
        BreakdownView::Isolated => "isolated",
    };
    writeln!(out, "Order {} [{}] shade {}", b.order_number, b.status, b.shade_code)?;
    writeln!(
        out,
        "Quantity {} kg, realisation {} %, raw material {} kg ({view} view)",
        format_qty(Some(b.quantity_kg)),
        format_qty(b.realisation),
        b.display_total(),
    )?;

    if !b.fibres.is_empty() {
        writeln!(out)?;
        let mut table = Table::new(&[
            ("Fibre", Align::Left),
            ("%", Align::Right),
            ("Required", Align::Right),
            ("Available", Align::Right),
            ("Band", Align::Left),
            ("", Align::Left),
        ]);
        for line in &b.fibres {
            table.row(vec![
                line.fibre_code.clone(),
                format_qty(Some(line.percentage)),
                format_qty(Some(line.required_qty)),
                format_qty(Some(line.available_stock)),
                line.band.to_string(),
                shortage_flag(line.shortage),
            ]);
        }
        table.render(out)?;
    }

    if !b.raw_cotton.is_empty() {
        writeln!(out)?;
        let mut table = Table::new(&[
            ("Raw cotton", Align::Left),
            ("Grade", Align::Left),
            ("%", Align::Right),
            ("Required", Align::Right),
            ("Available", Align::Right),
            ("Band", Align::Left),
            ("", Align::Left),
        ]);
        for line in &b.raw_cotton {
            table.row(vec![
                line.label.clone(),
                line.grade.clone().unwrap_or_default(),
                format_qty(Some(line.percentage)),
                format_qty(Some(line.required_qty)),
                format_qty(Some(line.available_stock)),
                line.band.to_string(),
                shortage_flag(line.shortage),
            ]);
        }
        table.render(out)?;
    }

    if !b.unmatched_overrides.is_empty() {
        let keys: Vec<String> = b.unmatched_overrides.iter().map(ToString::to_string).collect();
        writeln!(out)?;
        writeln!(out, "Manual entries not on this shade: {}", keys.join(", "))?;
    }
    Ok(())
}

fn shortage_flag(shortage: bool) -> String {
    if shortage { "SHORT" } else { "" }.to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::fixtures::{output, snapshot};

    #[test]
    fn test_ledger_view() {
        let text = output(|out| run(&snapshot(), "SO-001", OutputFormat::Table, out).unwrap());
        assert!(text.starts_with("Order SO-001 [pending] shade MEL-GREY\n"));
        assert!(text.contains("raw material 1000.00 kg (ledger view)"));
        assert!(text.contains("SHORT"));
    }

    #[test]
    fn test_closed_order_is_isolated_and_not_computable() {
        let text = output(|out| run(&snapshot(), "SO-003", OutputFormat::Table, out).unwrap());
        assert!(text.contains("realisation — %, raw material — kg (isolated view)"));
        assert!(!text.contains("Fibre"));
    }

    #[test]
    fn test_json() {
        let text = output(|out| run(&snapshot(), "SO-002", OutputFormat::Json, out).unwrap());
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["view"], "ledger");
        assert_eq!(value["priority"], 1);
        assert_eq!(value["fibres"][0]["required_qty"], "600");
    }

    #[test]
    fn test_unknown_order() {
        let err = run(&snapshot(), "SO-404", OutputFormat::Table, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::UnknownOrder(ref n) if n == "SO-404"));
    }
}
