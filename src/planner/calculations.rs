use crate::models::{CurrentStockSnapshot, OrderBreakdown, OrderRecommendation, OrderRequest};
use crate::planner::constants::ROUNDING_STEP_POUNDS;

/// Normalize every stock representation to one total in pounds.
///
/// total = weight + trays * tray_weight + boxes * box_weight + pieces / pieces_per_box
pub fn total_stock_pounds(stock: &CurrentStockSnapshot) -> f64 {
    stock.components().iter().map(|c| c.pounds()).sum()
}

/// Safety buffer: one day of usage scaled by the backup multiplier.
#[inline]
pub fn backup_stock(daily_usage: f64, backup_multiplier: f64) -> f64 {
    daily_usage * backup_multiplier
}

/// Floor a value at zero. NaN and negative zero both come out as `0.0`.
#[inline]
pub fn clamp_non_negative(value: f64) -> f64 {
    if value > 0.0 { value } else { 0.0 }
}

/// Round to the nearest multiple of `step`, halves away from zero.
#[inline]
pub fn round_to_nearest(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}

/// Compute the recommendation together with every intermediate value.
///
/// Inputs are not sign-checked; only the outputs are floored at zero.
pub fn explain_recommendation(request: &OrderRequest) -> OrderBreakdown {
    let total_stock = total_stock_pounds(&request.current_stock);
    let forecast_demand = request.daily_usage * request.days_until_next_delivery;
    let backup = backup_stock(request.daily_usage, request.backup_multiplier);

    let raw_order = forecast_demand - total_stock + backup;
    let exact_order = clamp_non_negative(raw_order);
    let rounded_order = clamp_non_negative(round_to_nearest(exact_order, ROUNDING_STEP_POUNDS));

    OrderBreakdown {
        total_stock,
        forecast_demand,
        backup_stock: backup,
        raw_order,
        recommendation: OrderRecommendation {
            exact_order,
            rounded_order,
        },
    }
}

/// Compute the recommended order for a request.
pub fn compute_recommendation(request: &OrderRequest) -> OrderRecommendation {
    explain_recommendation(request).recommendation
}

/// Stateless front for the order calculation.
///
/// Holds no data, so a single value can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderRecommendationEngine;

impl OrderRecommendationEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn compute(&self, request: &OrderRequest) -> OrderRecommendation {
        compute_recommendation(request)
    }

    pub fn explain(&self, request: &OrderRequest) -> OrderBreakdown {
        explain_recommendation(request)
    }
}
