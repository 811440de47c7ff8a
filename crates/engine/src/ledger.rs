//! Priority-ordered stock ledger.
//!
//! The same physical stock of a fibre is shared by every open order using it.
//! The ledger walks open orders earliest delivery first and, per constituent,
//! hands each order whatever the orders ahead of it left behind:
//!
//! - the first order touching a constituent starts from its reported stock;
//! - every later order starts from the previous order's closing balance;
//! - balances are never clamped, so a negative balance carries the shortage
//!   forward to the next order in line.
//!
//! Orders sharing a delivery date keep their input order. Orders without a
//! delivery date go last.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, instrument, trace};

use millboard_core::{OrderId, OrderStatus, UsageBand};

use crate::model::Order;
use crate::overlay::ManualStockOverlay;
use crate::requirement::{self, OrderRequirements, Requirement};
use crate::resolver::{ConstituentKey, ConstituentKind, ResolvedConstituent};
use crate::yield_conversion::YieldConversion;

/// Usage ratio above which a requirement is [`UsageBand::Warning`].
pub const WARNING_RATIO: Decimal = Decimal::from_parts(8, 0, 0, false, 1);

/// Usage ratio above which a requirement is [`UsageBand::Critical`].
pub const CRITICAL_RATIO: Decimal = Decimal::ONE;

/// Band a requirement falls in given the stock available to it.
///
/// `ratio = required / available`, with zero availability replaced by one.
/// Both cut-offs are strict.
#[must_use]
pub fn classify_usage(required_qty: Decimal, available_before: Decimal) -> UsageBand {
    let divisor = if available_before.is_zero() {
        Decimal::ONE
    } else {
        available_before
    };

    let Some(ratio) = required_qty.checked_div(divisor) else {
        return UsageBand::Critical;
    };

    if ratio > CRITICAL_RATIO {
        UsageBand::Critical
    } else if ratio > WARNING_RATIO {
        UsageBand::Warning
    } else {
        UsageBand::Ok
    }
}

/// One (order, constituent) step of the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    #[serde(flatten)]
    pub constituent: ResolvedConstituent,
    pub required_qty: Decimal,
    pub available_before: Decimal,
    pub available_after: Decimal,
    /// `available_before < required_qty`.
    pub shortage: bool,
    pub band: UsageBand,
}

/// Ledger result for one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderAllocation {
    pub order_id: OrderId,
    pub order_number: String,
    pub status: OrderStatus,
    pub delivery_date: Option<NaiveDate>,
    pub conversion: YieldConversion,
    /// 1-based position in the priority queue; `None` for an order
    /// evaluated on its own.
    pub priority: Option<usize>,
    pub fibres: Vec<LedgerEntry>,
    pub raw_cotton: Vec<LedgerEntry>,
}

impl OrderAllocation {
    /// All entries, fibres first.
    pub fn entries(&self) -> impl Iterator<Item = &LedgerEntry> {
        self.fibres.iter().chain(&self.raw_cotton)
    }

    /// Whether any constituent of this order runs short.
    #[must_use]
    pub fn has_shortage(&self) -> bool {
        self.entries().any(|e| e.shortage)
    }
}

/// Opening and closing balance of one tracked constituent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Balance {
    pub key: ConstituentKey,
    pub label: String,
    /// Stock the first consuming order started from.
    pub opening: Decimal,
    /// Balance after the last consuming order. May be negative.
    pub closing: Decimal,
}

/// Running balances for one computation pass.
///
/// Created empty for every pass and dropped with it.
#[derive(Debug, Default)]
pub struct StockLedger {
    balances: BTreeMap<ConstituentKey, Balance>,
}

impl StockLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current balance of a constituent, if any order has touched it.
    #[must_use]
    pub fn balance(&self, key: ConstituentKey) -> Option<Decimal> {
        self.balances.get(&key).map(|b| b.closing)
    }

    /// Draw one requirement from its constituent's running balance.
    pub fn allocate(&mut self, requirement: Requirement) -> LedgerEntry {
        let Requirement {
            constituent,
            required_qty,
        } = requirement;

        let balance = self
            .balances
            .entry(constituent.key)
            .or_insert_with(|| Balance {
                key: constituent.key,
                label: constituent.label.clone(),
                opening: constituent.stock_source,
                closing: constituent.stock_source,
            });

        let available_before = balance.closing;
        let available_after = available_before.saturating_sub(required_qty);
        balance.closing = available_after;

        let entry = LedgerEntry {
            required_qty,
            available_before,
            available_after,
            shortage: available_before < required_qty,
            band: classify_usage(required_qty, available_before),
            constituent,
        };

        trace!(
            label = %entry.constituent.label,
            required = %entry.required_qty,
            before = %entry.available_before,
            after = %entry.available_after,
            shortage = entry.shortage,
            "Ledger step"
        );

        entry
    }

    /// Draw every requirement of one order, in recipe order.
    pub fn allocate_order(
        &mut self,
        requirements: OrderRequirements,
        priority: Option<usize>,
    ) -> OrderAllocation {
        let mut fibres = Vec::new();
        let mut raw_cotton = Vec::new();

        for requirement in requirements.lines {
            let kind = requirement.kind();
            let entry = self.allocate(requirement);
            match kind {
                ConstituentKind::Fibre => fibres.push(entry),
                ConstituentKind::RawCotton => raw_cotton.push(entry),
            }
        }

        OrderAllocation {
            order_id: requirements.order_id,
            order_number: requirements.order_number,
            status: requirements.status,
            delivery_date: requirements.delivery_date,
            conversion: requirements.conversion,
            priority,
            fibres,
            raw_cotton,
        }
    }

    /// Balances of every tracked constituent, in key order.
    #[must_use]
    pub fn into_balances(self) -> Vec<Balance> {
        self.balances.into_values().collect()
    }
}

/// Result of one ledger pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LedgerReport {
    /// Open orders in priority order.
    pub allocations: Vec<OrderAllocation>,
    /// One entry per constituent any open order uses.
    pub balances: Vec<Balance>,
}

impl LedgerReport {
    /// Allocation of one order, if it competed for stock.
    #[must_use]
    pub fn allocation(&self, order_id: OrderId) -> Option<&OrderAllocation> {
        self.allocations.iter().find(|a| a.order_id == order_id)
    }

    /// Closing balance of one constituent, if tracked.
    #[must_use]
    pub fn closing_balance(&self, key: ConstituentKey) -> Option<Decimal> {
        self.balances
            .iter()
            .find(|b| b.key == key)
            .map(|b| b.closing)
    }

    /// Orders with at least one short constituent.
    pub fn short_orders(&self) -> impl Iterator<Item = &OrderAllocation> {
        self.allocations.iter().filter(|a| a.has_shortage())
    }
}

/// Open orders in the order they draw on stock.
///
/// Ascending delivery date; stable for ties; undated orders last.
#[must_use]
pub fn prioritise(orders: &[Order]) -> Vec<&Order> {
    let mut queue: Vec<&Order> = orders.iter().filter(|o| o.status.is_open()).collect();
    queue.sort_by_key(|o| (o.delivery_date.is_none(), o.delivery_date));
    queue
}

/// Run the ledger over a snapshot.
#[must_use]
#[instrument(skip_all, fields(orders = orders.len()))]
pub fn run(orders: &[Order], overlay: Option<&ManualStockOverlay>) -> LedgerReport {
    let mut ledger = StockLedger::new();

    let allocations: Vec<OrderAllocation> = prioritise(orders)
        .into_iter()
        .enumerate()
        .map(|(index, order)| {
            let overrides = overlay.and_then(|o| o.for_order(order.id));
            ledger.allocate_order(requirement::calculate(order, overrides), Some(index + 1))
        })
        .collect();

    let report = LedgerReport {
        allocations,
        balances: ledger.into_balances(),
    };

    debug!(
        open_orders = report.allocations.len(),
        tracked = report.balances.len(),
        short_orders = report.short_orders().count(),
        "Ledger pass complete"
    );

    report
}
