//! Typed order snapshot consumed by the engine.
//!
//! These records are produced by [`crate::payload`] and are read-only for the
//! duration of one computation pass.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use millboard_core::{FibreId, Lenient, OrderId, OrderStatus, RawCottonId, ShadeId};

/// Label used when a fibre carries neither a code nor a name.
pub const UNKNOWN_FIBRE_LABEL: &str = "Unknown";

/// Category reported for fibres without one.
pub const UNCATEGORISED: &str = "NA";

/// Label and category used for raw-cotton constituents.
pub const RAW_COTTON_LABEL: &str = "Raw Cotton";

/// A fibre with its current stock, as embedded in a blend composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fibre {
    /// Fibre ID.
    pub id: FibreId,
    /// Short fibre code (e.g. "CT-30").
    pub fibre_code: Option<String>,
    /// Human-readable fibre name.
    pub fibre_name: Option<String>,
    /// Stock on hand at snapshot time. Zero when missing or invalid.
    pub stock_kg: Decimal,
    /// Fibre category (e.g. "Cotton", "Synthetic").
    pub category: Option<String>,
}

impl Fibre {
    /// Display label: code, then name, then `"Unknown"`.
    #[must_use]
    pub fn label(&self) -> &str {
        self.fibre_code
            .as_deref()
            .or(self.fibre_name.as_deref())
            .unwrap_or(UNKNOWN_FIBRE_LABEL)
    }

    /// Category, or `"NA"` when the fibre has none.
    #[must_use]
    pub fn category_or_default(&self) -> &str {
        self.category.as_deref().unwrap_or(UNCATEGORISED)
    }
}

/// One ordinary fibre in a shade's blend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FibreComposition {
    /// Fibre this constituent draws on.
    pub fibre_id: FibreId,
    /// Share of the blend, 0-100. Zero when missing or invalid.
    pub percentage: Decimal,
    /// Stock snapshot of the fibre. `None` when the payload omitted it.
    pub fibre: Option<Fibre>,
}

impl FibreComposition {
    /// Display label of the constituent's fibre.
    #[must_use]
    pub fn label(&self) -> &str {
        self.fibre.as_ref().map_or(UNKNOWN_FIBRE_LABEL, Fibre::label)
    }

    /// Reported stock of the constituent's fibre, zero when unknown.
    #[must_use]
    pub fn stock_kg(&self) -> Decimal {
        self.fibre.as_ref().map_or(Decimal::ZERO, |f| f.stock_kg)
    }

    /// Category of the constituent's fibre, `"NA"` when unknown.
    #[must_use]
    pub fn category(&self) -> &str {
        self.fibre
            .as_ref()
            .map_or(UNCATEGORISED, Fibre::category_or_default)
    }
}

/// A raw-cotton lot used in a shade's blend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawCottonComposition {
    /// Composition ID; manual overrides are keyed by it.
    pub id: RawCottonId,
    /// Supplier lot number.
    pub lot_number: Option<String>,
    /// Share of the blend, 0-100. Zero when missing or invalid.
    pub percentage: Decimal,
    /// Cotton grade.
    pub grade: Option<String>,
    /// Where the lot came from.
    pub source: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Stock recorded by the backend. `None` when absent or unparseable.
    pub stock_kg: Option<Decimal>,
}

impl RawCottonComposition {
    /// Display label: lot number, then `"Raw Cotton"`.
    #[must_use]
    pub fn label(&self) -> &str {
        self.lot_number.as_deref().unwrap_or(RAW_COTTON_LABEL)
    }

    /// Backend stock if it is recorded and positive.
    #[must_use]
    pub fn recorded_stock(&self) -> Option<Decimal> {
        self.stock_kg.filter(|kg| *kg > Decimal::ZERO)
    }
}

/// A shade (colour recipe) and its blend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shade {
    /// Shade ID.
    pub id: ShadeId,
    /// Shade code shown to users.
    pub shade_code: String,
    /// Ordinary fibre constituents, in recipe order.
    pub blend_composition: Vec<FibreComposition>,
    /// Raw-cotton constituents, in recipe order.
    pub raw_cotton_compositions: Vec<RawCottonComposition>,
}

/// A sales order snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Order ID.
    pub id: OrderId,
    /// Order number shown to users.
    pub order_number: String,
    /// Yarn quantity ordered. Zero when missing or invalid.
    pub quantity_kg: Decimal,
    /// Realisation (yield) percentage as parsed from the payload.
    pub realisation: Lenient,
    /// Promised delivery date. `None` when missing or unparseable.
    pub delivery_date: Option<NaiveDate>,
    /// Production status.
    pub status: OrderStatus,
    /// Shade with its blend and current fibre stock.
    pub shade: Shade,
}
