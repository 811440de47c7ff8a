//! Integration tests for Millboard.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p millboard-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `payload_parsing` - Order-listing JSON to typed snapshots
//! - `allocation_pipeline` - Ledger, dashboard and breakdowns end to end
//! - `manual_overlay` - Manual raw-cotton entries and update payloads
//!
//! The helpers below build order-listing payloads in the shape the order API
//! emits, so tests exercise the same boundary parsing as production input.

#![cfg_attr(not(test), forbid(unsafe_code))]

use serde_json::{Value, json};

/// A blend constituent with an embedded fibre stock snapshot.
#[must_use]
pub fn fibre(id: i32, code: &str, percentage: Value, stock_kg: Value) -> Value {
    json!({
        "fibre_id": id,
        "percentage": percentage,
        "fibre": {
            "id": id,
            "fibre_code": code,
            "fibre_name": format!("{code} fibre"),
            "stock_kg": stock_kg,
            "category": "Natural",
        }
    })
}

/// A raw-cotton lot; `stock_kg` may be `null`.
#[must_use]
pub fn raw_cotton(id: i32, lot_number: &str, percentage: Value, stock_kg: Value) -> Value {
    json!({
        "id": id,
        "lot_number": lot_number,
        "percentage": percentage,
        "grade": "A",
        "source": "Gujarat",
        "stock_kg": stock_kg,
    })
}

/// A shade with the given constituents.
#[must_use]
pub fn shade(id: i32, code: &str, fibres: Vec<Value>, cotton: Vec<Value>) -> Value {
    json!({
        "id": id,
        "shade_code": code,
        "blend_composition": fibres,
        "raw_cotton_compositions": cotton,
    })
}

/// An order record as listed by the order API.
#[must_use]
pub fn order(
    id: i32,
    quantity_kg: Value,
    realisation: Value,
    delivery_date: &str,
    status: &str,
    shade: &Value,
) -> Value {
    json!({
        "id": id,
        "order_number": format!("SO-{id:04}"),
        "quantity_kg": quantity_kg,
        "realisation": realisation,
        "delivery_date": delivery_date,
        "status": status,
        "shade": shade,
    })
}
