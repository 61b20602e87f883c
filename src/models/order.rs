use serde::{Deserialize, Serialize};

use crate::models::CurrentStockSnapshot;

/// Usage forecast plus what is currently on hand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Consumption rate in pounds per day.
    pub daily_usage: f64,

    /// Days until the next delivery arrives. May be fractional.
    pub days_until_next_delivery: f64,

    /// Safety factor applied to one day of usage.
    pub backup_multiplier: f64,

    #[serde(default)]
    pub current_stock: CurrentStockSnapshot,
}

impl OrderRequest {
    pub fn new(
        daily_usage: f64,
        days_until_next_delivery: f64,
        backup_multiplier: f64,
        current_stock: CurrentStockSnapshot,
    ) -> Self {
        Self {
            daily_usage,
            days_until_next_delivery,
            backup_multiplier,
            current_stock,
        }
    }
}

/// Recommended reorder quantity in pounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecommendation {
    /// Unrounded quantity, never negative.
    pub exact_order: f64,

    /// Quantity rounded to the nearest multiple of five, never negative.
    pub rounded_order: f64,
}

/// Every intermediate value behind a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBreakdown {
    /// On-hand stock normalized to pounds.
    pub total_stock: f64,

    /// Usage expected before the next delivery.
    pub forecast_demand: f64,

    /// Safety buffer on top of the forecast.
    pub backup_stock: f64,

    /// Order before the non-negativity clamp.
    pub raw_order: f64,

    pub recommendation: OrderRecommendation,
}
