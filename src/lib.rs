pub mod auth;
pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod interface;
pub mod logging;
pub mod models;
pub mod planner;
pub mod state;

pub use config::ReorderConfig;
pub use error::{ReorderError, Result};
pub use models::{CurrentStockSnapshot, OrderBreakdown, OrderRecommendation, OrderRequest};
pub use planner::{compute_recommendation, OrderRecommendationEngine};
