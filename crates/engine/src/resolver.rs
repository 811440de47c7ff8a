//! Percentage resolution for a shade's blend.
//!
//! Flattens ordinary fibres and raw-cotton lots into one list of
//! constituents, each with a share of the blend and the stock figure the
//! ledger should start from.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use millboard_core::{FibreId, RawCottonId};

use crate::model::{RAW_COTTON_LABEL, Shade};
use crate::overlay::RawCottonOverrides;

/// Whether a constituent is an ordinary fibre or a raw-cotton lot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstituentKind {
    Fibre,
    RawCotton,
}

/// Stock identity of a constituent. The ledger keeps one balance per key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ConstituentKey {
    Fibre(FibreId),
    RawCotton(RawCottonId),
}

impl ConstituentKey {
    #[must_use]
    pub const fn kind(self) -> ConstituentKind {
        match self {
            Self::Fibre(_) => ConstituentKind::Fibre,
            Self::RawCotton(_) => ConstituentKind::RawCotton,
        }
    }
}

/// Where a constituent's starting stock figure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StockOrigin {
    /// Reported by the backend.
    Recorded,
    /// Typed in by a user for this order.
    Manual,
    /// Nothing known; treated as zero.
    Missing,
}

/// One blend constituent with its share and starting stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConstituent {
    pub key: ConstituentKey,
    /// Fibre code or lot label shown to users.
    pub label: String,
    pub category: String,
    /// Share of the blend, 0-100.
    pub percentage: Decimal,
    /// Stock the ledger is seeded from when this constituent is first seen.
    pub stock_source: Decimal,
    pub stock_origin: StockOrigin,
}

impl ResolvedConstituent {
    #[must_use]
    pub const fn kind(&self) -> ConstituentKind {
        self.key.kind()
    }
}

/// Resolve a shade into its constituents.
///
/// Fibres keep their recipe position and are never dropped, even at 0 %.
/// Raw-cotton lots with a share of zero or less are dropped. A lot's stock is
/// its recorded figure when positive, else the manual entry for it in
/// `overrides`, else zero.
#[must_use]
pub fn resolve(shade: &Shade, overrides: Option<&RawCottonOverrides>) -> Vec<ResolvedConstituent> {
    let fibres = shade.blend_composition.iter().map(|c| {
        let stock_origin = if c.fibre.is_some() {
            StockOrigin::Recorded
        } else {
            StockOrigin::Missing
        };
        ResolvedConstituent {
            key: ConstituentKey::Fibre(c.fibre_id),
            label: c.label().to_string(),
            category: c.category().to_string(),
            percentage: c.percentage,
            stock_source: c.stock_kg(),
            stock_origin,
        }
    });

    let raw_cotton = shade
        .raw_cotton_compositions
        .iter()
        .filter(|c| {
            let keep = c.percentage > Decimal::ZERO;
            if !keep {
                debug!(
                    shade_code = %shade.shade_code,
                    raw_cotton_id = %c.id,
                    percentage = %c.percentage,
                    "Dropping raw-cotton lot without a positive share"
                );
            }
            keep
        })
        .map(|c| {
            let manual = overrides
                .and_then(|o| o.get(c.id))
                .and_then(|entry| entry.stock_kg);
            let (stock_source, stock_origin) = match (c.recorded_stock(), manual) {
                (Some(kg), _) => (kg, StockOrigin::Recorded),
                (None, Some(kg)) => (kg, StockOrigin::Manual),
                (None, None) => (Decimal::ZERO, StockOrigin::Missing),
            };
            ResolvedConstituent {
                key: ConstituentKey::RawCotton(c.id),
                label: c.label().to_string(),
                category: RAW_COTTON_LABEL.to_string(),
                percentage: c.percentage,
                stock_source,
                stock_origin,
            }
        });

    fibres.chain(raw_cotton).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::fixtures::{cotton_line, fibre_line, shade};
    use crate::model::FibreComposition;
    use crate::overlay::RawCottonOverride;

    #[test]
    fn test_resolves_fibres_then_raw_cotton() {
        let shade = shade(
            vec![fibre_line(1, "CT", dec!(60), dec!(900))],
            vec![cotton_line(2, dec!(40), Some(dec!(300)))],
        );

        let resolved = resolve(&shade, None);
        assert_eq!(resolved.len(), 2);

        assert_eq!(resolved[0].key, ConstituentKey::Fibre(FibreId::new(1)));
        assert_eq!(resolved[0].label, "CT");
        assert_eq!(resolved[0].stock_source, dec!(900));
        assert_eq!(resolved[0].kind(), ConstituentKind::Fibre);

        assert_eq!(resolved[1].key, ConstituentKey::RawCotton(RawCottonId::new(2)));
        assert_eq!(resolved[1].label, "LOT-2");
        assert_eq!(resolved[1].category, "Raw Cotton");
        assert_eq!(resolved[1].stock_origin, StockOrigin::Recorded);
    }

    #[test]
    fn test_zero_percent_fibre_is_kept() {
        let shade = shade(vec![fibre_line(1, "CT", dec!(0), dec!(5))], Vec::new());
        assert_eq!(resolve(&shade, None).len(), 1);
    }

    #[test]
    fn test_nonpositive_raw_cotton_is_dropped() {
        let shade = shade(
            Vec::new(),
            vec![
                cotton_line(1, dec!(0), Some(dec!(10))),
                cotton_line(2, dec!(-5), Some(dec!(10))),
                cotton_line(3, dec!(15), Some(dec!(10))),
            ],
        );

        let resolved = resolve(&shade, None);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].key, ConstituentKey::RawCotton(RawCottonId::new(3)));
    }

    #[test]
    fn test_manual_stock_used_when_backend_has_none() {
        let shade = shade(
            Vec::new(),
            vec![cotton_line(1, dec!(30), None), cotton_line(2, dec!(30), Some(dec!(0)))],
        );
        let mut overrides = RawCottonOverrides::new();
        overrides.insert(RawCottonId::new(1), RawCottonOverride::with_stock(dec!(250)));
        overrides.insert(RawCottonId::new(2), RawCottonOverride::with_stock(dec!(75)));

        let resolved = resolve(&shade, Some(&overrides));
        assert_eq!(resolved[0].stock_source, dec!(250));
        assert_eq!(resolved[0].stock_origin, StockOrigin::Manual);
        assert_eq!(resolved[1].stock_source, dec!(75));
        assert_eq!(resolved[1].stock_origin, StockOrigin::Manual);
    }

    #[test]
    fn test_recorded_stock_wins_over_manual() {
        let shade = shade(Vec::new(), vec![cotton_line(1, dec!(30), Some(dec!(500)))]);
        let mut overrides = RawCottonOverrides::new();
        overrides.insert(RawCottonId::new(1), RawCottonOverride::with_stock(dec!(1)));

        let resolved = resolve(&shade, Some(&overrides));
        assert_eq!(resolved[0].stock_source, dec!(500));
        assert_eq!(resolved[0].stock_origin, StockOrigin::Recorded);
    }

    #[test]
    fn test_missing_stock_resolves_to_zero() {
        let shade = shade(
            vec![FibreComposition {
                fibre_id: FibreId::new(9),
                percentage: dec!(100),
                fibre: None,
            }],
            vec![cotton_line(1, dec!(10), None)],
        );

        let resolved = resolve(&shade, None);
        assert_eq!(resolved[0].label, "Unknown");
        assert_eq!(resolved[0].stock_source, Decimal::ZERO);
        assert_eq!(resolved[0].stock_origin, StockOrigin::Missing);
        assert_eq!(resolved[1].stock_source, Decimal::ZERO);
        assert_eq!(resolved[1].stock_origin, StockOrigin::Missing);
    }
}
