//! Raw order-listing records as the order API sends them.
//!
//! Ids, codes, numbers and dates are kept as untyped JSON values here. The
//! API sends ids and codes as either numbers or strings, so the conversion
//! functions in [`super::conversions`] resolve all of them leniently.

use serde::Deserialize;
use serde_json::Value;

/// One order from the order-listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RawOrder {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub order_number: Option<Value>,
    #[serde(default)]
    pub quantity_kg: Option<Value>,
    #[serde(default)]
    pub realisation: Option<Value>,
    #[serde(default)]
    pub delivery_date: Option<Value>,
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub shade: Option<RawShade>,
}

/// A shade embedded in an order.
#[derive(Debug, Clone, Deserialize)]
pub struct RawShade {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub shade_code: Option<Value>,
    #[serde(default)]
    pub blend_composition: Vec<RawFibreComposition>,
    /// Newer payloads send a list of raw-cotton lots.
    #[serde(default)]
    pub raw_cotton_compositions: Vec<RawCottonEntry>,
    /// Older payloads send a single raw-cotton lot.
    #[serde(default)]
    pub raw_cotton_composition: Option<RawCottonEntry>,
}

/// One blend constituent.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFibreComposition {
    #[serde(default)]
    pub fibre_id: Option<Value>,
    #[serde(default)]
    pub percentage: Option<Value>,
    #[serde(default)]
    pub fibre: Option<RawFibre>,
}

/// Fibre stock snapshot embedded in a blend constituent.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFibre {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub fibre_code: Option<Value>,
    #[serde(default)]
    pub fibre_name: Option<Value>,
    #[serde(default)]
    pub stock_kg: Option<Value>,
    #[serde(default)]
    pub category: Option<Value>,
}

/// One raw-cotton lot in a shade.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCottonEntry {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub lot_number: Option<Value>,
    #[serde(default)]
    pub percentage: Option<Value>,
    #[serde(default)]
    pub grade: Option<Value>,
    #[serde(default)]
    pub source: Option<Value>,
    #[serde(default)]
    pub notes: Option<Value>,
    #[serde(default)]
    pub stock_kg: Option<Value>,
}
