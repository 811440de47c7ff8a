//! Per-order fibre breakdown for the status and realisation views.
//!
//! Quantities here are rounded for display; the unrounded figures stay in the
//! [`LedgerEntry`] values they are built from.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use millboard_core::{FibreId, OrderId, OrderStatus, RawCottonId, UsageBand};

use crate::display::{format_qty, round_qty};
use crate::ledger::{LedgerEntry, OrderAllocation, StockLedger};
use crate::model::Order;
use crate::overlay::{RawCottonKey, RawCottonOverrides};
use crate::requirement;
use crate::resolver::{ConstituentKey, StockOrigin};

/// Which stock figure availability was compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownView {
    /// Stock left after every higher-priority open order.
    Ledger,
    /// Snapshot stock, ignoring other orders.
    Isolated,
}

/// One ordinary-fibre line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FibreBreakdownLine {
    pub fibre_id: FibreId,
    pub fibre_code: String,
    pub category: String,
    pub percentage: Decimal,
    pub required_qty: Decimal,
    pub available_stock: Decimal,
    pub available_after: Decimal,
    pub shortage: bool,
    pub band: UsageBand,
}

/// One raw-cotton line with lot details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawCottonBreakdownLine {
    pub raw_cotton_id: RawCottonId,
    pub label: String,
    pub lot_number: Option<String>,
    pub grade: Option<String>,
    pub source: Option<String>,
    pub notes: Option<String>,
    pub percentage: Decimal,
    pub required_qty: Decimal,
    pub available_stock: Decimal,
    pub available_after: Decimal,
    pub shortage: bool,
    pub band: UsageBand,
    pub stock_origin: StockOrigin,
}

/// Everything the per-order views show about one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderBreakdown {
    pub order_id: OrderId,
    pub order_number: String,
    pub shade_code: String,
    pub status: OrderStatus,
    pub delivery_date: Option<NaiveDate>,
    pub view: BreakdownView,
    pub priority: Option<usize>,
    pub quantity_kg: Decimal,
    pub realisation: Option<Decimal>,
    /// Raw-material quantity; `None` until realisation is known.
    pub total_qty: Option<Decimal>,
    pub fibres: Vec<FibreBreakdownLine>,
    pub raw_cotton: Vec<RawCottonBreakdownLine>,
    /// Manual entries that match no raw-cotton lot of the shade.
    pub unmatched_overrides: Vec<RawCottonKey>,
}

impl OrderBreakdown {
    /// Breakdown of an order that competed for stock in the ledger.
    #[must_use]
    pub fn from_allocation(
        order: &Order,
        allocation: &OrderAllocation,
        overrides: Option<&RawCottonOverrides>,
    ) -> Self {
        Self::build(order, allocation, overrides, BreakdownView::Ledger)
    }

    /// Breakdown of an order measured against snapshot stock alone.
    ///
    /// Used for orders outside the priority queue, such as completed orders
    /// opened from the status view.
    #[must_use]
    pub fn isolated(order: &Order, overrides: Option<&RawCottonOverrides>) -> Self {
        let allocation =
            StockLedger::new().allocate_order(requirement::calculate(order, overrides), None);
        Self::build(order, &allocation, overrides, BreakdownView::Isolated)
    }

    fn build(
        order: &Order,
        allocation: &OrderAllocation,
        overrides: Option<&RawCottonOverrides>,
        view: BreakdownView,
    ) -> Self {
        let fibres = allocation
            .fibres
            .iter()
            .filter_map(fibre_line)
            .collect();

        let raw_cotton = allocation
            .raw_cotton
            .iter()
            .filter_map(|entry| raw_cotton_line(order, entry, overrides))
            .collect();

        Self {
            order_id: order.id,
            order_number: order.order_number.clone(),
            shade_code: order.shade.shade_code.clone(),
            status: order.status,
            delivery_date: order.delivery_date,
            view,
            priority: allocation.priority,
            quantity_kg: round_qty(order.quantity_kg),
            realisation: order.realisation.value().map(round_qty),
            total_qty: allocation.conversion.value().map(round_qty),
            fibres,
            raw_cotton,
            unmatched_overrides: overrides
                .map(|o| o.unmatched(&order.shade))
                .unwrap_or_default(),
        }
    }

    /// Raw-material quantity as shown, or the placeholder.
    #[must_use]
    pub fn display_total(&self) -> String {
        format_qty(self.total_qty)
    }

    #[must_use]
    pub fn has_shortage(&self) -> bool {
        self.fibres.iter().any(|l| l.shortage) || self.raw_cotton.iter().any(|l| l.shortage)
    }
}

fn fibre_line(entry: &LedgerEntry) -> Option<FibreBreakdownLine> {
    let ConstituentKey::Fibre(fibre_id) = entry.constituent.key else {
        return None;
    };
    Some(FibreBreakdownLine {
        fibre_id,
        fibre_code: entry.constituent.label.clone(),
        category: entry.constituent.category.clone(),
        percentage: round_qty(entry.constituent.percentage),
        required_qty: round_qty(entry.required_qty),
        available_stock: round_qty(entry.available_before),
        available_after: round_qty(entry.available_after),
        shortage: entry.shortage,
        band: entry.band,
    })
}

fn raw_cotton_line(
    order: &Order,
    entry: &LedgerEntry,
    overrides: Option<&RawCottonOverrides>,
) -> Option<RawCottonBreakdownLine> {
    let ConstituentKey::RawCotton(raw_cotton_id) = entry.constituent.key else {
        return None;
    };
    let lot = order
        .shade
        .raw_cotton_compositions
        .iter()
        .find(|c| c.id == raw_cotton_id);
    let manual = overrides.and_then(|o| o.get(raw_cotton_id));

    Some(RawCottonBreakdownLine {
        raw_cotton_id,
        label: entry.constituent.label.clone(),
        lot_number: detail(
            lot.and_then(|c| c.lot_number.as_ref()),
            manual.and_then(|m| m.lot_number.as_ref()),
        ),
        grade: detail(
            lot.and_then(|c| c.grade.as_ref()),
            manual.and_then(|m| m.grade.as_ref()),
        ),
        source: detail(
            lot.and_then(|c| c.source.as_ref()),
            manual.and_then(|m| m.source.as_ref()),
        ),
        notes: detail(
            lot.and_then(|c| c.notes.as_ref()),
            manual.and_then(|m| m.notes.as_ref()),
        ),
        percentage: round_qty(entry.constituent.percentage),
        required_qty: round_qty(entry.required_qty),
        available_stock: round_qty(entry.available_before),
        available_after: round_qty(entry.available_after),
        shortage: entry.shortage,
        band: entry.band,
        stock_origin: entry.constituent.stock_origin,
    })
}

/// Backend value first, then whatever the user typed in.
fn detail(backend: Option<&String>, typed: Option<&String>) -> Option<String> {
    backend.or(typed).cloned()
}
