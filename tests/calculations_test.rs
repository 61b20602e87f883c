use assert_float_eq::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use stock_reorder_rs::models::{CurrentStockSnapshot, OrderRequest};
use stock_reorder_rs::planner::{
    compute_recommendation, explain_recommendation, total_stock_pounds, OrderRecommendationEngine,
    ROUNDING_STEP_POUNDS,
};

fn maybe_value(rng: &mut StdRng) -> Option<f64> {
    if rng.gen_bool(0.5) {
        Some(rng.gen_range(-50.0..500.0))
    } else {
        None
    }
}

fn random_snapshot(rng: &mut StdRng) -> CurrentStockSnapshot {
    CurrentStockSnapshot {
        weight_in_pounds: maybe_value(rng),
        trays: maybe_value(rng),
        tray_weight: maybe_value(rng),
        boxes: maybe_value(rng),
        box_weight: maybe_value(rng),
        pieces: maybe_value(rng),
        pieces_per_box: if rng.gen_bool(0.2) { Some(0.0) } else { maybe_value(rng) },
    }
}

fn random_request(rng: &mut StdRng) -> OrderRequest {
    OrderRequest::new(
        rng.gen_range(-20.0..200.0),
        rng.gen_range(-2.0..30.0),
        rng.gen_range(-0.5..1.5),
        random_snapshot(rng),
    )
}

#[test]
fn test_default_form_scenario() {
    let request = OrderRequest::new(
        42.0,
        2.0,
        0.2,
        CurrentStockSnapshot {
            weight_in_pounds: Some(10.0),
            trays: Some(3.0),
            tray_weight: Some(14.0),
            ..Default::default()
        },
    );

    let breakdown = explain_recommendation(&request);
    assert_float_absolute_eq!(breakdown.total_stock, 52.0, 1e-9);
    assert_float_absolute_eq!(breakdown.backup_stock, 8.4, 1e-9);
    assert_float_absolute_eq!(breakdown.recommendation.exact_order, 40.4, 1e-9);
    assert_eq!(breakdown.recommendation.rounded_order, 40.0);
}

#[test]
fn test_stock_exceeds_demand_scenario() {
    let request = OrderRequest::new(
        10.0,
        1.0,
        0.0,
        CurrentStockSnapshot {
            weight_in_pounds: Some(100.0),
            ..Default::default()
        },
    );

    let rec = compute_recommendation(&request);
    assert_eq!(rec.exact_order, 0.0);
    assert_eq!(rec.rounded_order, 0.0);
}

#[test]
fn test_no_stock_fields_scenario() {
    let request = OrderRequest::new(20.0, 3.0, 0.1, CurrentStockSnapshot::empty());

    let rec = compute_recommendation(&request);
    assert_float_absolute_eq!(rec.exact_order, 62.0, 1e-9);
    assert_eq!(rec.rounded_order, 60.0);
}

#[test]
fn test_request_from_json() {
    let json = r#"{
        "dailyUsage": 42,
        "daysUntilNextDelivery": 2,
        "backupMultiplier": 0.2,
        "currentStock": {"weightInPounds": 10, "trays": 3, "trayWeight": 14}
    }"#;
    let request: OrderRequest = serde_json::from_str(json).unwrap();
    assert_eq!(compute_recommendation(&request).rounded_order, 40.0);

    // currentStock may be left out entirely
    let json = r#"{"dailyUsage": 20, "daysUntilNextDelivery": 3, "backupMultiplier": 0.1}"#;
    let request: OrderRequest = serde_json::from_str(json).unwrap();
    assert!(request.current_stock.is_empty());

    let out = serde_json::to_value(compute_recommendation(&request)).unwrap();
    assert_eq!(out["roundedOrder"], 60.0);
}

#[test]
fn test_pieces_per_box_zero_matches_absent() {
    let with_zero = CurrentStockSnapshot {
        pieces: Some(10.0),
        pieces_per_box: Some(0.0),
        ..Default::default()
    };
    let without = CurrentStockSnapshot {
        pieces: Some(10.0),
        ..Default::default()
    };

    assert_eq!(total_stock_pounds(&with_zero), 10.0);
    assert_eq!(total_stock_pounds(&without), 10.0);

    let a = compute_recommendation(&OrderRequest::new(30.0, 2.0, 0.5, with_zero));
    let b = compute_recommendation(&OrderRequest::new(30.0, 2.0, 0.5, without));
    assert_eq!(a, b);
}

#[test]
fn test_outputs_never_negative() {
    let mut rng = StdRng::seed_from_u64(123);
    for _ in 0..5000 {
        let rec = compute_recommendation(&random_request(&mut rng));
        assert!(rec.exact_order >= 0.0, "negative exact order: {:?}", rec);
        assert!(rec.rounded_order >= 0.0, "negative rounded order: {:?}", rec);
    }
}

#[test]
fn test_rounded_order_is_multiple_of_five() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..5000 {
        let rec = compute_recommendation(&random_request(&mut rng));
        assert_eq!(rec.rounded_order % ROUNDING_STEP_POUNDS, 0.0, "{:?}", rec);
        assert!((rec.rounded_order - rec.exact_order).abs() <= ROUNDING_STEP_POUNDS / 2.0 + 1e-9);
    }
}

#[test]
fn test_zero_stock_baseline() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..1000 {
        let daily_usage = rng.gen_range(0.0..200.0);
        let days = rng.gen_range(0.0..30.0);
        let backup = rng.gen_range(0.0..1.0);

        let request = OrderRequest::new(daily_usage, days, backup, CurrentStockSnapshot::empty());
        let exact = compute_recommendation(&request).exact_order;
        assert_float_absolute_eq!(exact, daily_usage * (days + backup), 1e-6);
    }
}

#[test]
fn test_zero_stock_single_day_matches_flat_multiplier() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..1000 {
        let daily_usage = rng.gen_range(0.0..200.0);
        let backup = rng.gen_range(0.0..1.0);

        let request = OrderRequest::new(daily_usage, 1.0, backup, CurrentStockSnapshot::empty());
        let exact = compute_recommendation(&request).exact_order;
        assert_float_absolute_eq!(exact, daily_usage * 1.0 * (1.0 + backup), 1e-6);
    }
}

#[test]
fn test_engine_is_shareable_across_threads() {
    let engine = OrderRecommendationEngine::new();
    let request = OrderRequest::new(20.0, 3.0, 0.1, CurrentStockSnapshot::empty());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let request = request.clone();
            std::thread::spawn(move || engine.compute(&request))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().rounded_order, 60.0);
    }
}
