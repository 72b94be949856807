pub mod candle;

// Re-export for convenient access (e.g. `use crate::market_data::Candle`).
pub use candle::{load_records, parse_klines, Candle};
