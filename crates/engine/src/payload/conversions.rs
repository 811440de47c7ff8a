//! Raw payload to typed snapshot conversion functions.

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use millboard_core::{
    FibreId, Lenient, OrderId, OrderStatus, RawCottonId, ShadeId, parse_date,
};

use super::types::{RawCottonEntry, RawFibre, RawFibreComposition, RawOrder, RawShade};
use crate::error::PayloadError;
use crate::model::{Fibre, FibreComposition, Order, RawCottonComposition, Shade};

// =============================================================================
// Order conversions
// =============================================================================

/// Convert one raw order into a typed snapshot.
///
/// Ids and codes may arrive as numbers or numeric strings.
///
/// # Errors
///
/// Returns an error if the order, its shade, a blend constituent or a
/// raw-cotton lot has no usable id. Numeric fields never cause an error.
pub fn convert_order(raw: RawOrder) -> Result<Order, PayloadError> {
    let order_id = lenient_id(raw.id.as_ref())
        .map(OrderId::new)
        .ok_or(PayloadError::MissingOrderId)?;

    let quantity_kg = lenient_field(raw.quantity_kg.as_ref(), order_id, "quantity_kg").or_zero();
    let realisation = lenient_field(raw.realisation.as_ref(), order_id, "realisation");
    let delivery_date = parse_date(raw.delivery_date.as_ref());
    if delivery_date.is_none() {
        debug!(order_id = %order_id, "Order has no usable delivery date");
    }

    let status = raw
        .status
        .as_ref()
        .and_then(Value::as_str)
        .map_or(OrderStatus::Unknown, OrderStatus::parse);

    let shade = raw
        .shade
        .ok_or(PayloadError::MissingShade { order_id })
        .and_then(|shade| convert_shade(shade, order_id))?;

    Ok(Order {
        id: order_id,
        order_number: text_field(raw.order_number).unwrap_or_else(|| order_id.to_string()),
        quantity_kg,
        realisation,
        delivery_date,
        status,
        shade,
    })
}

// =============================================================================
// Shade conversions
// =============================================================================

fn convert_shade(raw: RawShade, order_id: OrderId) -> Result<Shade, PayloadError> {
    let shade_id = lenient_id(raw.id.as_ref())
        .map(ShadeId::new)
        .ok_or(PayloadError::MissingShade { order_id })?;

    let blend_composition = raw
        .blend_composition
        .into_iter()
        .map(|c| convert_fibre_composition(c, order_id))
        .collect::<Result<Vec<_>, _>>()?;

    // The single-lot field only applies when no list was sent.
    let mut raw_cotton = raw.raw_cotton_compositions;
    if raw_cotton.is_empty() {
        raw_cotton.extend(raw.raw_cotton_composition);
    }
    let raw_cotton_compositions = raw_cotton
        .into_iter()
        .map(|c| convert_raw_cotton(c, order_id))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Shade {
        id: shade_id,
        shade_code: text_field(raw.shade_code).unwrap_or_else(|| shade_id.to_string()),
        blend_composition,
        raw_cotton_compositions,
    })
}

fn convert_fibre_composition(
    raw: RawFibreComposition,
    order_id: OrderId,
) -> Result<FibreComposition, PayloadError> {
    let nested_id = raw.fibre.as_ref().and_then(|f| lenient_id(f.id.as_ref()));
    let fibre_id = lenient_id(raw.fibre_id.as_ref())
        .or(nested_id)
        .map(FibreId::new)
        .ok_or(PayloadError::MissingFibreId { order_id })?;

    Ok(FibreComposition {
        fibre_id,
        percentage: lenient_field(raw.percentage.as_ref(), order_id, "percentage").or_zero(),
        fibre: raw.fibre.map(|f| convert_fibre(f, fibre_id, order_id)),
    })
}

fn convert_fibre(raw: RawFibre, fibre_id: FibreId, order_id: OrderId) -> Fibre {
    Fibre {
        id: lenient_id(raw.id.as_ref()).map_or(fibre_id, FibreId::new),
        fibre_code: text_field(raw.fibre_code),
        fibre_name: text_field(raw.fibre_name),
        stock_kg: lenient_field(raw.stock_kg.as_ref(), order_id, "fibre.stock_kg").or_zero(),
        category: text_field(raw.category),
    }
}

fn convert_raw_cotton(
    raw: RawCottonEntry,
    order_id: OrderId,
) -> Result<RawCottonComposition, PayloadError> {
    let id = lenient_id(raw.id.as_ref())
        .map(RawCottonId::new)
        .ok_or(PayloadError::MissingRawCottonId { order_id })?;

    Ok(RawCottonComposition {
        id,
        lot_number: text_field(raw.lot_number),
        percentage: lenient_field(raw.percentage.as_ref(), order_id, "raw_cotton.percentage")
            .or_zero(),
        grade: text_field(raw.grade),
        source: text_field(raw.source),
        notes: text_field(raw.notes),
        stock_kg: lenient_field(raw.stock_kg.as_ref(), order_id, "raw_cotton.stock_kg").value(),
    })
}

// =============================================================================
// Helpers
// =============================================================================

fn lenient_field(value: Option<&Value>, order_id: OrderId, field: &'static str) -> Lenient {
    let parsed = Lenient::from_value(value);
    if let Lenient::Invalid(raw) = &parsed {
        debug!(order_id = %order_id, field, raw = %raw, "Unparseable number treated as zero");
    }
    parsed
}

/// An integer id sent as a JSON number or a numeric string.
fn lenient_id(value: Option<&Value>) -> Option<i32> {
    match value? {
        Value::Number(n) => n.as_i64().and_then(|id| i32::try_from(id).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A code or label sent as a string or a number.
///
/// Empty strings count as absent, matching how the order UI falls back.
fn text_field(value: Option<Value>) -> Option<String> {
    let text = match value? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.trim().is_empty()).then_some(text)
}

/// Parse a decimal from an untyped override field, dropping unusable input.
pub(crate) fn lenient_decimal(value: Option<&Value>) -> Option<Decimal> {
    Lenient::from_value(value).value()
}
