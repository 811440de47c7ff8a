//! Single entry point computing every view of a snapshot.

use serde::Serialize;
use tracing::{info_span, instrument};

use crate::breakdown::OrderBreakdown;
use crate::ledger::{self, LedgerReport};
use crate::model::Order;
use crate::overlay::{self, ManualStockOverlay, RawCottonUpdatePayload};
use crate::shortage::{self, PendingFiberEntry};

/// Ledger, dashboard summary and per-order breakdowns for one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FibrePlan {
    pub ledger: LedgerReport,
    pub pending_fibres: Vec<PendingFiberEntry>,
    /// One per input order, in input order.
    pub breakdowns: Vec<OrderBreakdown>,
}

impl FibrePlan {
    /// Breakdown of the order with this order number.
    #[must_use]
    pub fn breakdown(&self, order_number: &str) -> Option<&OrderBreakdown> {
        self.breakdowns
            .iter()
            .find(|b| b.order_number == order_number)
    }

    /// Fibres whose total open demand exceeds stock.
    pub fn short_fibres(&self) -> impl Iterator<Item = &PendingFiberEntry> {
        self.pending_fibres.iter().filter(|e| e.is_short())
    }
}

/// Compute the full plan from scratch.
///
/// Open orders get the ledger view; every other order gets an isolated
/// breakdown. Nothing is cached between calls.
#[must_use]
#[instrument(skip_all, fields(orders = orders.len()))]
pub fn compute_plan(orders: &[Order], overlay: Option<&ManualStockOverlay>) -> FibrePlan {
    let ledger = ledger::run(orders, overlay);
    let pending_fibres = shortage::aggregate_pending_fibres(orders);

    let breakdowns = {
        let _span = info_span!("breakdowns").entered();
        orders
            .iter()
            .map(|order| {
                let overrides = overlay.and_then(|o| o.for_order(order.id));
                ledger.allocation(order.id).map_or_else(
                    || OrderBreakdown::isolated(order, overrides),
                    |allocation| OrderBreakdown::from_allocation(order, allocation, overrides),
                )
            })
            .collect()
    };

    FibrePlan {
        ledger,
        pending_fibres,
        breakdowns,
    }
}

/// Find an order by its order number.
#[must_use]
pub fn find_order<'a>(orders: &'a [Order], order_number: &str) -> Option<&'a Order> {
    orders.iter().find(|o| o.order_number == order_number)
}

/// The `raw_cotton_updates` body for one order, empty without manual entries.
#[must_use]
pub fn updates_for(order: &Order, overlay: Option<&ManualStockOverlay>) -> RawCottonUpdatePayload {
    overlay
        .and_then(|o| o.for_order(order.id))
        .map(|overrides| overlay::raw_cotton_updates(&order.shade, overrides))
        .unwrap_or_default()
}
