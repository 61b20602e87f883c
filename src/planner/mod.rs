pub mod calculations;
pub mod constants;

pub use calculations::{
    backup_stock, clamp_non_negative, compute_recommendation, explain_recommendation,
    round_to_nearest, total_stock_pounds, OrderRecommendationEngine,
};
pub use constants::*;
