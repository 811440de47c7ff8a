//! `raw_cotton_updates` payload for the order-update endpoint.
//!
//! # Usage
//!
//! ```bash
//! mb-cli --overrides manual.yaml updates SO-1042
//! ```
//!
//! The payload is always JSON; `--output` does not apply.

use std::io::Write;

use millboard_engine::plan::{find_order, updates_for};

use super::{Snapshot, write_json};
use crate::error::CliError;

/// Print the update body built from the manual entries for one order.
///
/// # Errors
///
/// Returns `CliError::UnknownOrder` if no order has that number, or an error
/// if writing the output fails.
pub fn run(snapshot: &Snapshot, order_number: &str, out: &mut impl Write) -> Result<(), CliError> {
    let order = find_order(&snapshot.orders, order_number)
        .ok_or_else(|| CliError::UnknownOrder(order_number.to_string()))?;

    let payload = updates_for(order, snapshot.overlay());
    if payload.raw_cotton_updates.is_empty() {
        tracing::warn!(order_number, "No manual raw-cotton entries for order");
    }
    write_json(out, &payload)
}
