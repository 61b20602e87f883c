pub mod order;
pub mod stock;
pub mod user;

pub use order::{OrderBreakdown, OrderRecommendation, OrderRequest};
pub use stock::{effective_pieces_per_box, CurrentStockSnapshot, StockComponent};
pub use user::User;
