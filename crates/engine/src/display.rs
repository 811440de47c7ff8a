//! Rounding and placeholders for presented quantities.
//!
//! Only output is rounded. The ledger keeps full precision so rounding never
//! compounds across orders.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places shown for quantities and percentages.
pub const DISPLAY_DP: u32 = 2;

/// Shown in place of a quantity that cannot be computed yet.
pub const NOT_COMPUTABLE: &str = "\u{2014}";

/// Round a quantity to two decimal places, halves away from zero.
#[must_use]
pub fn round_qty(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DISPLAY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a quantity with exactly two decimals, or the placeholder.
#[must_use]
pub fn format_qty(value: Option<Decimal>) -> String {
    value.map_or_else(
        || NOT_COMPUTABLE.to_string(),
        |v| format!("{:.2}", round_qty(v)),
    )
}
