//! Snapshot builders shared by unit tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use millboard_core::{FibreId, Lenient, OrderId, OrderStatus, RawCottonId, ShadeId};

use crate::model::{Fibre, FibreComposition, Order, RawCottonComposition, Shade};

pub fn fibre_line(id: i32, code: &str, percentage: Decimal, stock: Decimal) -> FibreComposition {
    FibreComposition {
        fibre_id: FibreId::new(id),
        percentage,
        fibre: Some(Fibre {
            id: FibreId::new(id),
            fibre_code: Some(code.to_string()),
            fibre_name: Some(format!("{code} fibre")),
            stock_kg: stock,
            category: Some("Natural".to_string()),
        }),
    }
}

pub fn cotton_line(id: i32, percentage: Decimal, stock: Option<Decimal>) -> RawCottonComposition {
    RawCottonComposition {
        id: RawCottonId::new(id),
        lot_number: Some(format!("LOT-{id}")),
        percentage,
        grade: Some("A".to_string()),
        source: None,
        notes: None,
        stock_kg: stock,
    }
}

pub fn shade(fibres: Vec<FibreComposition>, cotton: Vec<RawCottonComposition>) -> Shade {
    Shade {
        id: ShadeId::new(1),
        shade_code: "MEL-01".to_string(),
        blend_composition: fibres,
        raw_cotton_compositions: cotton,
    }
}

pub fn date(day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2024, 6, day)
}

/// A pending order with an 80 % realisation.
pub fn order(id: i32, quantity_kg: Decimal, delivery: Option<NaiveDate>, shade: Shade) -> Order {
    Order {
        id: OrderId::new(id),
        order_number: format!("SO-{id:03}"),
        quantity_kg,
        realisation: Lenient::Parsed(Decimal::from(80)),
        delivery_date: delivery,
        status: OrderStatus::Pending,
        shade,
    }
}
