// =============================================================================
// Indicator Engine
// =============================================================================
//
// Stateless technical-indicator calculations over loosely typed price records.
//
//   registry    symbol lookup and dispatch
//   indicators  one type per indicator, all implementing `Indicator`
//   window      validation + chronological copy of the input
//   math, smoothing
//               shared numeric building blocks
//   market_data Binance kline adapter
// =============================================================================

pub mod error;
pub mod indicator;
pub mod indicators;
pub mod market_data;
pub mod math;
pub mod options;
pub mod registry;
pub mod smoothing;
pub mod types;
pub mod validation;
pub mod window;

pub use error::{ErrorKind, IndicatorError, Result};
pub use indicator::{Calculation, CalculationOutput, Indicator};
pub use market_data::{load_records, parse_klines, Candle};
pub use options::Options;
pub use registry::Registry;
pub use types::{IndicatorValue, PriceRecord, Technicals};
