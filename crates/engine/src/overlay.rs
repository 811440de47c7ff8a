//! Manual raw-cotton stock overlay.
//!
//! When the backend has no stock figure for a raw-cotton lot, the status and
//! realisation views let a user type one in per order, together with lot
//! metadata. Those entries form a side-table keyed by order and then by
//! raw-cotton composition ID. The engine reads the table as an optional input
//! and never stores it.
//!
//! Entries can exist before the backend knows the lot (a user adding a new
//! lot). Such draft entries have no composition ID; they are kept, reported
//! as unmatched, and sent back in the `raw_cotton_updates` payload without an
//! `id` so the order-update endpoint can create them.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use millboard_core::{OrderId, RawCottonId};

use crate::model::Shade;
use crate::payload::lenient_decimal;

/// Key of a manual entry: a backend composition ID, or a draft label.
///
/// Serialised as a string; numeric strings are composition IDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RawCottonKey {
    /// Matches a `RawCottonComposition::id` from the backend.
    Id(RawCottonId),
    /// A user-entered lot with no backend ID yet.
    Draft(String),
}

impl RawCottonKey {
    /// The composition ID, if the key has one.
    #[must_use]
    pub const fn id(&self) -> Option<RawCottonId> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Draft(_) => None,
        }
    }
}

impl From<String> for RawCottonKey {
    fn from(key: String) -> Self {
        key.trim()
            .parse::<i32>()
            .map_or(Self::Draft(key), |id| Self::Id(RawCottonId::new(id)))
    }
}

impl From<RawCottonKey> for String {
    fn from(key: RawCottonKey) -> Self {
        match key {
            RawCottonKey::Id(id) => id.to_string(),
            RawCottonKey::Draft(label) => label,
        }
    }
}

impl From<RawCottonId> for RawCottonKey {
    fn from(id: RawCottonId) -> Self {
        Self::Id(id)
    }
}

impl std::fmt::Display for RawCottonKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Draft(label) => write!(f, "{label}"),
        }
    }
}

/// A manually entered raw-cotton stock figure and lot details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawOverrideEntry")]
pub struct RawCottonOverride {
    /// Stock the user says is available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_kg: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl RawCottonOverride {
    /// An override carrying only a stock figure.
    #[must_use]
    pub fn with_stock(stock_kg: Decimal) -> Self {
        Self {
            stock_kg: Some(stock_kg),
            ..Self::default()
        }
    }
}

/// Form values as typed by the user; stock may be text.
#[derive(Deserialize)]
struct RawOverrideEntry {
    #[serde(default)]
    stock_kg: Option<Value>,
    #[serde(default)]
    lot_number: Option<String>,
    #[serde(default)]
    grade: Option<String>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

impl From<RawOverrideEntry> for RawCottonOverride {
    fn from(raw: RawOverrideEntry) -> Self {
        Self {
            stock_kg: lenient_decimal(raw.stock_kg.as_ref()),
            lot_number: raw.lot_number,
            grade: raw.grade,
            source: raw.source,
            notes: raw.notes,
        }
    }
}

/// Manual entries for one order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawCottonOverrides(BTreeMap<RawCottonKey, RawCottonOverride>);

impl RawCottonOverrides {
    /// An empty set of entries.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, key: impl Into<RawCottonKey>, entry: RawCottonOverride) {
        self.0.insert(key.into(), entry);
    }

    /// The entry for a backend composition, if any.
    #[must_use]
    pub fn get(&self, id: RawCottonId) -> Option<&RawCottonOverride> {
        self.0.get(&RawCottonKey::Id(id))
    }

    /// All entries in key order (IDs first, then drafts).
    pub fn iter(&self) -> impl Iterator<Item = (&RawCottonKey, &RawCottonOverride)> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys that do not match any raw-cotton composition of `shade`.
    #[must_use]
    pub fn unmatched(&self, shade: &Shade) -> Vec<RawCottonKey> {
        self.0
            .keys()
            .filter(|key| {
                key.id().is_none_or(|id| {
                    !shade.raw_cotton_compositions.iter().any(|c| c.id == id)
                })
            })
            .cloned()
            .collect()
    }
}

/// Manual raw-cotton entries for every order in a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManualStockOverlay(BTreeMap<OrderId, RawCottonOverrides>);

impl ManualStockOverlay {
    /// An empty overlay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace one entry for an order.
    pub fn insert(
        &mut self,
        order_id: OrderId,
        key: impl Into<RawCottonKey>,
        entry: RawCottonOverride,
    ) {
        self.0.entry(order_id).or_default().insert(key, entry);
    }

    /// Entries for an order, if it has any.
    #[must_use]
    pub fn for_order(&self, order_id: OrderId) -> Option<&RawCottonOverrides> {
        self.0.get(&order_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(RawCottonOverrides::is_empty)
    }
}

/// One element of the order-update `raw_cotton_updates` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawCottonUpdate {
    /// Composition to update; `None` asks the backend to create a lot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RawCottonId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_kg: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl RawCottonUpdate {
    fn from_entry(id: Option<RawCottonId>, entry: &RawCottonOverride) -> Self {
        Self {
            id,
            stock_kg: entry.stock_kg,
            lot_number: entry.lot_number.clone(),
            grade: entry.grade.clone(),
            source: entry.source.clone(),
            notes: entry.notes.clone(),
        }
    }
}

/// Body fragment sent to the order-update endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawCottonUpdatePayload {
    pub raw_cotton_updates: Vec<RawCottonUpdate>,
}

/// Build the `raw_cotton_updates` list for one order.
///
/// Entries matching a composition of the shade come first, in recipe order.
/// Every other entry follows in key order: drafts without an `id`, and
/// entries naming a composition the shade does not have with that `id` kept.
#[must_use]
pub fn raw_cotton_updates(shade: &Shade, overrides: &RawCottonOverrides) -> RawCottonUpdatePayload {
    let mut updates: Vec<RawCottonUpdate> = shade
        .raw_cotton_compositions
        .iter()
        .filter_map(|c| {
            overrides
                .get(c.id)
                .map(|entry| RawCottonUpdate::from_entry(Some(c.id), entry))
        })
        .collect();

    for key in overrides.unmatched(shade) {
        if let RawCottonKey::Id(id) = &key {
            warn!(
                shade_code = %shade.shade_code,
                raw_cotton_id = %id,
                "Manual raw-cotton entry names a lot the shade does not use"
            );
        }
        if let Some(entry) = overrides.0.get(&key) {
            updates.push(RawCottonUpdate::from_entry(key.id(), entry));
        }
    }

    RawCottonUpdatePayload {
        raw_cotton_updates: updates,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;
    use serde_json::json;

    use millboard_core::ShadeId;

    use super::*;
    use crate::model::RawCottonComposition;

    fn shade_with_cotton(ids: &[i32]) -> Shade {
        Shade {
            id: ShadeId::new(1),
            shade_code: "ECRU".to_string(),
            blend_composition: Vec::new(),
            raw_cotton_compositions: ids
                .iter()
                .map(|id| RawCottonComposition {
                    id: RawCottonId::new(*id),
                    lot_number: None,
                    percentage: dec!(50),
                    grade: None,
                    source: None,
                    notes: None,
                    stock_kg: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_key_parsing() {
        assert_eq!(
            RawCottonKey::from("12".to_string()),
            RawCottonKey::Id(RawCottonId::new(12))
        );
        assert_eq!(
            RawCottonKey::from("new-lot".to_string()),
            RawCottonKey::Draft("new-lot".to_string())
        );
        assert_eq!(String::from(RawCottonKey::Id(RawCottonId::new(3))), "3");
    }

    #[test]
    fn test_overlay_deserializes_nested_maps() {
        let overlay: ManualStockOverlay = serde_json::from_value(json!({
            "5": {
                "12": { "stock_kg": "150.5", "lot_number": "L-1" },
                "draft-1": { "stock_kg": 40, "grade": "A" }
            }
        }))
        .unwrap();

        let entries = overlay.for_order(OrderId::new(5)).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries.get(RawCottonId::new(12)).unwrap().stock_kg,
            Some(dec!(150.5))
        );
        assert!(overlay.for_order(OrderId::new(6)).is_none());
    }

    #[test]
    fn test_unparseable_manual_stock_is_dropped_not_the_entry() {
        let entry: RawCottonOverride =
            serde_json::from_value(json!({ "stock_kg": "abc", "lot_number": "L-9" })).unwrap();
        assert_eq!(entry.stock_kg, None);
        assert_eq!(entry.lot_number.as_deref(), Some("L-9"));
    }

    #[test]
    fn test_unmatched_keys() {
        let shade = shade_with_cotton(&[1]);
        let mut overrides = RawCottonOverrides::new();
        overrides.insert(RawCottonId::new(1), RawCottonOverride::with_stock(dec!(10)));
        overrides.insert(RawCottonId::new(2), RawCottonOverride::with_stock(dec!(20)));
        overrides.insert(
            RawCottonKey::Draft("new".into()),
            RawCottonOverride::with_stock(dec!(30)),
        );

        let unmatched = overrides.unmatched(&shade);
        assert_eq!(
            unmatched,
            vec![
                RawCottonKey::Id(RawCottonId::new(2)),
                RawCottonKey::Draft("new".into())
            ]
        );
    }

    #[test]
    fn test_updates_keep_matched_and_unmatched_entries() {
        let shade = shade_with_cotton(&[7, 3]);
        let mut overrides = RawCottonOverrides::new();
        overrides.insert(RawCottonId::new(3), RawCottonOverride::with_stock(dec!(5)));
        overrides.insert(RawCottonId::new(7), RawCottonOverride::with_stock(dec!(9)));
        overrides.insert(
            RawCottonKey::Draft("lot-x".into()),
            RawCottonOverride {
                stock_kg: Some(dec!(100)),
                lot_number: Some("LX".into()),
                ..RawCottonOverride::default()
            },
        );

        let payload = raw_cotton_updates(&shade, &overrides);
        let ids: Vec<Option<i32>> = payload
            .raw_cotton_updates
            .iter()
            .map(|u| u.id.map(|id| id.as_i32()))
            .collect();

        // Recipe order for matched lots, then the draft.
        assert_eq!(ids, vec![Some(7), Some(3), None]);
    }

    #[test]
    fn test_update_payload_omits_empty_fields() {
        let shade = shade_with_cotton(&[1]);
        let mut overrides = RawCottonOverrides::new();
        overrides.insert(RawCottonId::new(1), RawCottonOverride::with_stock(dec!(12.5)));

        let json = serde_json::to_value(raw_cotton_updates(&shade, &overrides)).unwrap();
        assert_eq!(
            json,
            json!({ "raw_cotton_updates": [ { "id": 1, "stock_kg": "12.5" } ] })
        );
    }

    #[test]
    fn test_empty_overlay() {
        let mut overlay = ManualStockOverlay::new();
        assert!(overlay.is_empty());
        overlay.insert(
            OrderId::new(1),
            RawCottonId::new(1),
            RawCottonOverride::default(),
        );
        assert!(!overlay.is_empty());
    }
}
