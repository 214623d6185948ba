pub mod connection;
pub mod insights;
pub mod submissions;

pub use connection::{init_db, Database};
pub use insights::{market_insights, MarketInsights};
