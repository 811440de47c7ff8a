//! Conversion from ordered yarn quantity to raw-material quantity.
//!
//! Spinning loses material, so producing `quantity_kg` of yarn at a
//! realisation of `R` % consumes `quantity_kg / (R / 100)` kg of fibre.
//! Realisations above 100 are accepted as-is.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::model::Order;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Total raw-material quantity for one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "total_qty", rename_all = "snake_case")]
pub enum YieldConversion {
    /// Realisation is positive; the quantity is known.
    Computed(Decimal),
    /// Realisation is missing, non-numeric, or not positive.
    NotComputable,
}

impl YieldConversion {
    /// The quantity, or zero when not computable.
    #[must_use]
    pub fn total_qty(self) -> Decimal {
        match self {
            Self::Computed(qty) => qty,
            Self::NotComputable => Decimal::ZERO,
        }
    }

    /// The quantity, if computable.
    #[must_use]
    pub const fn value(self) -> Option<Decimal> {
        match self {
            Self::Computed(qty) => Some(qty),
            Self::NotComputable => None,
        }
    }

    #[must_use]
    pub const fn is_computable(self) -> bool {
        matches!(self, Self::Computed(_))
    }
}

/// Convert an order's yarn quantity to raw-material quantity.
///
/// Evaluated fresh on every call; realisation can change between passes.
#[must_use]
pub fn convert(order: &Order) -> YieldConversion {
    let Some(realisation) = order.realisation.value() else {
        return YieldConversion::NotComputable;
    };
    total_qty(order.quantity_kg, realisation)
}

/// `quantity_kg / (realisation / 100)` for a positive realisation.
#[must_use]
pub fn total_qty(quantity_kg: Decimal, realisation: Decimal) -> YieldConversion {
    if realisation <= Decimal::ZERO {
        return YieldConversion::NotComputable;
    }

    // Multiply first so 100 / R rounding never enters the result.
    match quantity_kg
        .checked_mul(HUNDRED)
        .and_then(|scaled| scaled.checked_div(realisation))
    {
        Some(qty) => YieldConversion::Computed(qty),
        None => {
            warn!(%quantity_kg, %realisation, "Raw-material quantity out of range");
            YieldConversion::NotComputable
        }
    }
}
