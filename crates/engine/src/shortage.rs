//! Dashboard summary of fibre demand across all open orders.
//!
//! Unlike the [ledger](crate::ledger), requirements here are summed without
//! depletion and compared once against the snapshot stock. A fibre can show
//! no shortfall here while a low-priority order using it is flagged short in
//! the ledger.
//!
//! Every fibre named by an open order is listed, including fibres of orders
//! whose realisation is not computable. Those contribute a requirement of
//! zero.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use millboard_core::FibreId;

use crate::model::{FibreComposition, Order, UNKNOWN_FIBRE_LABEL};
use crate::requirement;
use crate::yield_conversion;

/// One fibre's total open demand against its stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingFiberEntry {
    pub fibre_id: FibreId,
    pub fibre_code: String,
    pub fibre_name: String,
    /// Snapshot stock from the first composition that carries the fibre's
    /// stock record, or zero if none does.
    pub available: Decimal,
    /// Sum of every open order's requirement, unrounded.
    pub required: Decimal,
    /// `max(0, required - available)`.
    pub shortfall: Decimal,
    pub category: String,
}

impl PendingFiberEntry {
    fn first_seen(composition: &FibreComposition) -> Self {
        let fibre = composition.fibre.as_ref();
        Self {
            fibre_id: composition.fibre_id,
            fibre_code: composition.label().to_string(),
            fibre_name: fibre
                .and_then(|f| f.fibre_name.clone())
                .unwrap_or_else(|| UNKNOWN_FIBRE_LABEL.to_string()),
            available: composition.stock_kg(),
            required: Decimal::ZERO,
            shortfall: Decimal::ZERO,
            category: composition.category().to_string(),
        }
    }

    /// Take labels and stock from a later composition when the first one
    /// arrived without a fibre record.
    fn fill_snapshot(&mut self, composition: &FibreComposition) {
        *self = Self {
            required: self.required,
            ..Self::first_seen(composition)
        };
    }

    #[must_use]
    pub fn is_short(&self) -> bool {
        self.shortfall > Decimal::ZERO
    }

    fn recompute_shortfall(&mut self) {
        self.shortfall = self
            .required
            .saturating_sub(self.available)
            .max(Decimal::ZERO);
    }
}

/// Sum requirements per fibre over every pending or in-progress order.
///
/// Raw cotton is not included. Entries are returned in the order their fibre
/// first appears.
#[must_use]
pub fn aggregate_pending_fibres(orders: &[Order]) -> Vec<PendingFiberEntry> {
    let mut entries: Vec<PendingFiberEntry> = Vec::new();
    // Position in `entries`, and whether that entry has seen a fibre record.
    let mut index: HashMap<FibreId, (usize, bool)> = HashMap::new();

    for order in orders.iter().filter(|o| o.status.is_open()) {
        let total_qty = yield_conversion::convert(order).total_qty();

        for composition in &order.shade.blend_composition {
            let has_snapshot = composition.fibre.is_some();
            let (position, seen_snapshot) =
                index.entry(composition.fibre_id).or_insert_with(|| {
                    entries.push(PendingFiberEntry::first_seen(composition));
                    (entries.len() - 1, has_snapshot)
                });
            let Some(entry) = entries.get_mut(*position) else {
                continue;
            };

            if has_snapshot && !*seen_snapshot {
                entry.fill_snapshot(composition);
                *seen_snapshot = true;
            }

            let required = requirement::required_qty(composition.percentage, total_qty);
            entry.required = entry.required.saturating_add(required);
            entry.recompute_shortfall();
        }
    }

    debug!(
        fibres = entries.len(),
        short = entries.iter().filter(|e| e.is_short()).count(),
        "Aggregated pending fibre demand"
    );

    entries
}
