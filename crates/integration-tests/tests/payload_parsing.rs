//! Boundary parsing of loosely typed order-listing payloads.

#![allow(clippy::unwrap_used)]

use millboard_core::{FibreId, Lenient, OrderStatus};
use millboard_engine::payload::orders_from_value;
use millboard_engine::resolver::StockOrigin;
use millboard_engine::{PayloadError, compute_plan, parse_orders};
use millboard_integration_tests::{fibre, order, raw_cotton, shade};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

// =============================================================================
// Top-level Shapes
// =============================================================================

#[test]
fn test_paginated_page_is_accepted() {
    let blend = shade(1, "ECRU", vec![fibre(1, "CT", json!(100), json!(10))], Vec::new());
    let page = json!({
        "count": 1,
        "next": null,
        "results": [order(1, json!(10), json!(80), "2024-06-01", "pending", &blend)],
    });

    let orders = orders_from_value(page).unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].order_number, "SO-0001");
}

#[test]
fn test_non_list_payloads_are_rejected() {
    assert!(matches!(
        parse_orders(r#"{"detail": "Not found."}"#),
        Err(PayloadError::NotAnOrderList)
    ));
    assert!(matches!(parse_orders("42"), Err(PayloadError::NotAnOrderList)));
    assert!(matches!(parse_orders("{not json"), Err(PayloadError::Json(_))));
}

#[test]
fn test_malformed_sibling_does_not_hide_good_orders() {
    let blend = shade(1, "ECRU", vec![fibre(1, "CT", json!(100), json!(900))], Vec::new());
    let good = order(1, json!(600), json!(80), "2024-06-01", "pending", &blend);
    let siblings = [
        json!({"id": 5, "shade": {"id": 1, "blend_composition": [{"percentage": 100}]}}),
        json!({"id": 6, "shade": {"id": 1, "raw_cotton_compositions": [{"percentage": 40}]}}),
        json!({"order_number": "SO-0007", "shade": {"id": 1}}),
        json!({"id": 8, "quantity_kg": 100}),
        json!("not an order"),
    ];

    for sibling in siblings {
        let text = json!([good, sibling]).to_string();
        let orders = parse_orders(&text).unwrap();
        assert_eq!(orders.len(), 1, "sibling {sibling} should be skipped");

        let plan = compute_plan(&orders, None);
        assert_eq!(plan.breakdowns.len(), 1);
        assert_eq!(plan.pending_fibres[0].required, dec!(750));
    }
}

#[test]
fn test_ids_and_codes_sent_as_numbers_or_strings() {
    let text = json!([{
        "id": "12",
        "order_number": 1042,
        "quantity_kg": 80,
        "realisation": 80,
        "status": "pending",
        "shade": {
            "id": "3",
            "shade_code": 500,
            "blend_composition": [
                {"fibre_id": "7", "percentage": 100,
                 "fibre": {"id": "7", "fibre_code": "CT", "stock_kg": 50}}
            ],
            "raw_cotton_compositions": [{"id": "4", "percentage": 0}]
        }
    }])
    .to_string();

    let orders = parse_orders(&text).unwrap();
    assert_eq!(orders[0].order_number, "1042");
    assert_eq!(orders[0].shade.shade_code, "500");

    let plan = compute_plan(&orders, None);
    let entry = &plan.pending_fibres[0];
    assert_eq!(entry.fibre_id, FibreId::new(7));
    assert_eq!(entry.fibre_code, "CT");
    assert_eq!(entry.shortfall, dec!(50));
}

// =============================================================================
// Lenient Numbers
// =============================================================================

#[test]
fn test_malformed_numbers_degrade_to_zero() {
    let blend = shade(
        1,
        "ECRU",
        vec![
            fibre(1, "CT", json!("60%"), json!("n/a")),
            fibre(2, "PES", json!("abc"), json!(null)),
        ],
        Vec::new(),
    );
    let text = json!([order(1, json!("1000 kg"), json!(" 80"), "2024-06-01", "pending", &blend)])
        .to_string();

    let orders = parse_orders(&text).unwrap();
    let o = &orders[0];
    assert_eq!(o.quantity_kg, dec!(1000));
    assert_eq!(o.realisation, Lenient::Parsed(dec!(80)));
    assert_eq!(o.shade.blend_composition[0].percentage, dec!(60));
    assert_eq!(o.shade.blend_composition[0].stock_kg(), Decimal::ZERO);
    assert_eq!(o.shade.blend_composition[1].percentage, Decimal::ZERO);

    // Zero stock surfaces as a shortage rather than an error.
    let plan = compute_plan(&orders, None);
    let lines = &plan.breakdown("SO-0001").unwrap().fibres;
    assert!(lines[0].shortage);
    assert_eq!(lines[1].required_qty, Decimal::ZERO);
    assert!(!lines[1].shortage);
}

#[test]
fn test_bad_realisation_is_not_computable() {
    let blend = shade(1, "ECRU", vec![fibre(1, "CT", json!(100), json!(10))], Vec::new());
    for realisation in [json!(null), json!("pending"), json!(0), json!(-5), json!({})] {
        let text = json!([order(1, json!(100), realisation, "2024-06-01", "pending", &blend)])
            .to_string();
        let orders = parse_orders(&text).unwrap();
        let plan = compute_plan(&orders, None);

        let b = plan.breakdown("SO-0001").unwrap();
        assert_eq!(b.total_qty, None);
        assert!(b.fibres.is_empty());
        // The fibre is still listed, with nothing required of it.
        assert_eq!(plan.pending_fibres.len(), 1);
        assert_eq!(plan.pending_fibres[0].required, Decimal::ZERO);
        assert_eq!(plan.short_fibres().count(), 0);
    }
}

// =============================================================================
// Labels and Defaults
// =============================================================================

#[test]
fn test_missing_codes_fall_back() {
    let text = json!([{
        "id": 9,
        "order_number": "",
        "quantity_kg": 80,
        "realisation": 80,
        "status": "PENDING",
        "shade": {
            "id": 4,
            "blend_composition": [
                {"fibre_id": 1, "percentage": 50,
                 "fibre": {"id": 1, "fibre_code": "", "fibre_name": "Viscose", "stock_kg": 100}},
                {"fibre_id": 2, "percentage": 50}
            ]
        }
    }])
    .to_string();

    let orders = parse_orders(&text).unwrap();
    let o = &orders[0];
    assert_eq!(o.order_number, "9");
    assert_eq!(o.status, OrderStatus::Pending);
    assert_eq!(o.delivery_date, None);
    assert_eq!(o.shade.shade_code, "4");

    let plan = compute_plan(&orders, None);
    let codes: Vec<&str> = plan.pending_fibres.iter().map(|e| e.fibre_code.as_str()).collect();
    assert_eq!(codes, vec!["Viscose", "Unknown"]);
    assert_eq!(plan.pending_fibres[1].category, "NA");
}

#[test]
fn test_single_raw_cotton_lot_field() {
    let text = json!([{
        "id": 1,
        "quantity_kg": 80,
        "realisation": 80,
        "status": "pending",
        "shade": {
            "id": 1,
            "raw_cotton_composition": {"id": 3, "percentage": "100", "stock_kg": ""}
        }
    }])
    .to_string();

    let orders = parse_orders(&text).unwrap();
    let plan = compute_plan(&orders, None);
    let line = &plan.breakdowns[0].raw_cotton[0];
    assert_eq!(line.label, "Raw Cotton");
    assert_eq!(line.required_qty, dec!(100));
    assert_eq!(line.stock_origin, StockOrigin::Missing);
    assert!(line.shortage);
}

#[test]
fn test_raw_cotton_list_wins_over_single_lot() {
    let mut blend = shade(
        1,
        "ECRU",
        Vec::new(),
        vec![raw_cotton(3, "RC-3", json!(100), json!(500))],
    );
    blend["raw_cotton_composition"] = json!({"id": 4, "percentage": 100});
    let text = json!([order(1, json!(80), json!(80), "2024-06-01", "pending", &blend)]).to_string();

    let orders = parse_orders(&text).unwrap();
    assert_eq!(orders[0].shade.raw_cotton_compositions.len(), 1);
    assert_eq!(orders[0].shade.raw_cotton_compositions[0].label(), "RC-3");
}
