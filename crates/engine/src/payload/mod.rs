//! Boundary parsing from order-listing payloads to typed snapshots.
//!
//! The order API emits loosely typed JSON: quantities may be numbers or
//! strings, codes may be empty, and a shade may carry one raw-cotton lot or a
//! list of them. Everything is resolved here so the engine itself only sees
//! the typed records of [`crate::model`].
//!
//! Accepted top-level shapes:
//!
//! - a bare array of orders, or
//! - a paginated page `{ "results": [...] }`.
//!
//! A record that cannot be turned into an order (no usable id, no shade, a
//! constituent naming no fibre) is skipped with a warning. The remaining
//! orders are still returned.

mod conversions;
pub mod types;

use serde_json::Value;
use tracing::{debug, warn};

pub use conversions::convert_order;
pub(crate) use conversions::lenient_decimal;

use crate::error::PayloadError;
use crate::model::Order;
use types::RawOrder;

/// Parse an order-listing payload from JSON text.
///
/// # Errors
///
/// Returns an error if the text is not JSON or is not an order list.
pub fn parse_orders(json: &str) -> Result<Vec<Order>, PayloadError> {
    let value: Value = serde_json::from_str(json)?;
    orders_from_value(value)
}

/// Convert an already-decoded order-listing payload.
///
/// # Errors
///
/// Returns [`PayloadError::NotAnOrderList`] if the value is neither an array
/// nor a paginated page. Malformed records are skipped, not reported.
pub fn orders_from_value(value: Value) -> Result<Vec<Order>, PayloadError> {
    let records = match value {
        Value::Array(records) => records,
        Value::Object(mut page) => match page.remove("results") {
            Some(Value::Array(records)) => records,
            _ => return Err(PayloadError::NotAnOrderList),
        },
        _ => return Err(PayloadError::NotAnOrderList),
    };

    let total = records.len();
    let mut orders = Vec::with_capacity(total);
    for (index, record) in records.into_iter().enumerate() {
        match parse_record(record) {
            Ok(order) => orders.push(order),
            Err(e) => warn!(index, error = %e, "Skipping malformed order record"),
        }
    }

    debug!(orders = orders.len(), skipped = total - orders.len(), "Parsed order snapshot");
    Ok(orders)
}

fn parse_record(record: Value) -> Result<Order, PayloadError> {
    let raw: RawOrder = serde_json::from_value(record)?;
    convert_order(raw)
}
