//! Per-order requirement calculation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use millboard_core::{OrderId, OrderStatus};

use crate::model::Order;
use crate::overlay::RawCottonOverrides;
use crate::resolver::{self, ConstituentKind, ResolvedConstituent};
use crate::yield_conversion::{self, YieldConversion};

/// Quantity of one constituent an order needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requirement {
    #[serde(flatten)]
    pub constituent: ResolvedConstituent,
    /// `percentage / 100 * total_qty`, unrounded.
    pub required_qty: Decimal,
}

impl Requirement {
    #[must_use]
    pub const fn kind(&self) -> ConstituentKind {
        self.constituent.kind()
    }
}

/// All constituent requirements of one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequirements {
    pub order_id: OrderId,
    pub order_number: String,
    pub status: OrderStatus,
    pub delivery_date: Option<NaiveDate>,
    pub conversion: YieldConversion,
    /// Empty when the raw-material quantity is zero or not computable.
    pub lines: Vec<Requirement>,
}

impl OrderRequirements {
    /// Lines for ordinary fibres.
    pub fn fibres(&self) -> impl Iterator<Item = &Requirement> {
        self.lines.iter().filter(|r| r.kind() == ConstituentKind::Fibre)
    }

    /// Lines for raw-cotton lots.
    pub fn raw_cotton(&self) -> impl Iterator<Item = &Requirement> {
        self.lines
            .iter()
            .filter(|r| r.kind() == ConstituentKind::RawCotton)
    }
}

/// `percentage / 100 * total_qty`, saturating at the decimal range.
#[must_use]
pub fn required_qty(percentage: Decimal, total_qty: Decimal) -> Decimal {
    percentage.saturating_mul(total_qty) / Decimal::ONE_HUNDRED
}

/// Compute what one order needs of each constituent, in isolation.
#[must_use]
pub fn calculate(order: &Order, overrides: Option<&RawCottonOverrides>) -> OrderRequirements {
    let conversion = yield_conversion::convert(order);
    let total_qty = conversion.total_qty();

    let lines = if total_qty.is_zero() {
        Vec::new()
    } else {
        resolver::resolve(&order.shade, overrides)
            .into_iter()
            .map(|constituent| Requirement {
                required_qty: required_qty(constituent.percentage, total_qty),
                constituent,
            })
            .collect()
    };

    OrderRequirements {
        order_id: order.id,
        order_number: order.order_number.clone(),
        status: order.status,
        delivery_date: order.delivery_date,
        conversion,
        lines,
    }
}
