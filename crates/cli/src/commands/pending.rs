//! Dashboard pending-fibre summary.
//!
//! # Usage
//!
//! ```bash
//! mb-cli pending
//! mb-cli pending --shortages-only --output json
//! ```

use std::io::Write;

use millboard_engine::display::format_qty;
use millboard_engine::{PendingFiberEntry, aggregate_pending_fibres};

use super::{Snapshot, write_json};
use crate::config::OutputFormat;
use crate::error::CliError;
use crate::table::{Align, Table};

/// Print total open demand per fibre, largest shortfall first.
///
/// # Errors
///
/// Returns an error if writing the output fails.
pub fn run(
    snapshot: &Snapshot,
    shortages_only: bool,
    output: OutputFormat,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut entries: Vec<PendingFiberEntry> = aggregate_pending_fibres(&snapshot.orders)
        .into_iter()
        .filter(|e| !shortages_only || e.is_short())
        .collect();
    entries.sort_by(|a, b| b.shortfall.cmp(&a.shortfall));

    tracing::info!(
        fibres = entries.len(),
        short = entries.iter().filter(|e| e.is_short()).count(),
        "Pending fibre summary"
    );

    match output {
        OutputFormat::Json => write_json(out, &entries),
        OutputFormat::Table => {
            let mut table = Table::new(&[
                ("Code", Align::Left),
                ("Name", Align::Left),
                ("Category", Align::Left),
                ("Available", Align::Right),
                ("Required", Align::Right),
                ("Shortfall", Align::Right),
            ]);
            for e in &entries {
                table.row(vec![
                    e.fibre_code.clone(),
                    e.fibre_name.clone(),
                    e.category.clone(),
                    format_qty(Some(e.available)),
                    format_qty(Some(e.required)),
                    format_qty(Some(e.shortfall)),
                ]);
            }
            if table.is_empty() {
                writeln!(out, "No pending fibre demand")?;
            } else {
                table.render(out)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::fixtures::{output, snapshot};

    #[test]
    fn test_table_sorted_by_shortfall() {
        let text = output(|out| run(&snapshot(), false, OutputFormat::Table, out).unwrap());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Code"));
        assert!(lines[2].starts_with("CT"));
        assert!(lines[2].ends_with("300.00"));
        assert!(lines[3].starts_with("PES"));
        assert!(lines[3].contains("NA"));
    }

    #[test]
    fn test_shortages_only_json() {
        let text = output(|out| run(&snapshot(), true, OutputFormat::Json, out).unwrap());
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["fibre_code"], "CT");
        assert_eq!(entries[0]["required"], "1200");
        assert_eq!(entries[0]["shortfall"], "300");
    }

    #[test]
    fn test_nothing_pending() {
        let text = output(|out| run(&Snapshot::default(), false, OutputFormat::Table, out).unwrap());
        assert_eq!(text, "No pending fibre demand\n");
    }
}
