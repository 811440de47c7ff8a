//! Millboard Engine - Fibre requirement and stock allocation.
//!
//! Given a snapshot of sales orders and the blend of each order's shade, the
//! engine works out how much of every fibre the open orders need, depletes a
//! running stock ledger in delivery-date order, and flags which orders and
//! fibres run short.
//!
//! # Architecture
//!
//! Pure and synchronous: no I/O, no global state, nothing cached between
//! calls. Every entry point re-derives its result from the snapshot passed
//! in.
//!
//! # Modules
//!
//! - [`payload`] - Boundary parsing from order-listing JSON
//! - [`model`] - Typed order, shade and fibre snapshot
//! - [`overlay`] - Manual raw-cotton stock entries and update payloads
//! - [`resolver`] - Blend constituents with their shares and stock
//! - [`yield_conversion`] - Yarn quantity to raw-material quantity
//! - [`requirement`] - Per-order constituent requirements
//! - [`ledger`] - Priority-ordered stock depletion
//! - [`shortage`] - Undepleted dashboard summary per fibre
//! - [`breakdown`] - Per-order view rounded for display
//! - [`plan`] - All of the above in one pass
//!
//! # Example
//!
//! ```rust
//! use millboard_engine::{compute_plan, parse_orders};
//!
//! let orders = parse_orders(r#"[{
//!     "id": 1,
//!     "order_number": "SO-1",
//!     "quantity_kg": "1000",
//!     "realisation": 80,
//!     "delivery_date": "2024-06-01",
//!     "status": "pending",
//!     "shade": {
//!         "id": 1,
//!         "shade_code": "ECRU",
//!         "blend_composition": [
//!             {"fibre_id": 1, "percentage": 100,
//!              "fibre": {"id": 1, "fibre_code": "CT", "stock_kg": 900}}
//!         ]
//!     }
//! }]"#)?;
//!
//! let plan = compute_plan(&orders, None);
//! assert!(plan.ledger.allocations[0].has_shortage());
//! # Ok::<(), millboard_engine::PayloadError>(())
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod breakdown;
pub mod display;
pub mod error;
pub mod ledger;
pub mod model;
pub mod overlay;
pub mod payload;
pub mod plan;
pub mod requirement;
pub mod resolver;
pub mod shortage;
pub mod yield_conversion;

#[cfg(test)]
mod fixtures;

pub use breakdown::{BreakdownView, OrderBreakdown};
pub use error::PayloadError;
pub use ledger::{LedgerReport, OrderAllocation};
pub use model::Order;
pub use overlay::{ManualStockOverlay, RawCottonOverride, RawCottonOverrides};
pub use payload::parse_orders;
pub use plan::{FibrePlan, compute_plan};
pub use shortage::{PendingFiberEntry, aggregate_pending_fibres};
