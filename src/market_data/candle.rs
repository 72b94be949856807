use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::types::{fields, PriceRecord};

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// A single OHLCV candle from the Binance kline REST endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open_time: i64,
    pub close_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub quote_volume: f64,
    pub trades_count: u64,
    pub taker_buy_volume: f64,
    pub taker_buy_quote_volume: f64,
}

impl Candle {
    /// Price record carrying every candle field under its own name.
    pub fn into_record(self) -> PriceRecord {
        PriceRecord::new()
            .with(fields::OPEN_TIME, self.open_time)
            .with(fields::CLOSE_TIME, self.close_time)
            .with(fields::OPEN, self.open)
            .with(fields::HIGH, self.high)
            .with(fields::LOW, self.low)
            .with(fields::CLOSE, self.close)
            .with(fields::VOLUME, self.volume)
            .with("quote_volume", self.quote_volume)
            .with("trades_count", self.trades_count)
            .with("taker_buy_volume", self.taker_buy_volume)
            .with("taker_buy_quote_volume", self.taker_buy_quote_volume)
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a `GET /api/v3/klines` payload.
///
/// Expected shape, one array per candle:
/// ```json
/// [[1669361400000, "16500.1", "16520.0", "16490.5", "16510.2", "12.5",
///   1669363199999, "206377.5", 812, "6.1", "100712.3", "0"]]
/// ```
pub fn parse_klines(text: &str) -> Result<Vec<Candle>> {
    let root: Value = serde_json::from_str(text).context("failed to parse kline JSON")?;
    let rows = root.as_array().context("kline payload is not an array")?;

    let candles = rows
        .iter()
        .enumerate()
        .map(|(i, row)| parse_kline_row(row).with_context(|| format!("kline #{i}")))
        .collect::<Result<Vec<_>>>()?;

    debug!(count = candles.len(), "klines parsed");
    Ok(candles)
}

/// Load price records from either a kline payload or a plain array of JSON
/// objects.
pub fn load_records(text: &str) -> Result<Vec<PriceRecord>> {
    let root: Value = serde_json::from_str(text).context("failed to parse price data JSON")?;
    let rows = root.as_array().context("price data is not an array")?;

    if rows.first().is_some_and(Value::is_array) {
        return Ok(parse_klines(text)?.into_iter().map(Candle::into_record).collect());
    }

    rows.iter()
        .enumerate()
        .map(|(i, row)| match row {
            Value::Object(map) => Ok(PriceRecord::from(map.clone())),
            _ => bail!("price record #{i} is not a JSON object"),
        })
        .collect()
}

fn parse_kline_row(row: &Value) -> Result<Candle> {
    let k = row.as_array().context("kline is not an array")?;
    if k.len() < 11 {
        bail!("kline has {} fields, expected at least 11", k.len());
    }

    Ok(Candle {
        open_time: k[0].as_i64().context("missing open time")?,
        open: parse_string_f64(&k[1], "open")?,
        high: parse_string_f64(&k[2], "high")?,
        low: parse_string_f64(&k[3], "low")?,
        close: parse_string_f64(&k[4], "close")?,
        volume: parse_string_f64(&k[5], "volume")?,
        close_time: k[6].as_i64().context("missing close time")?,
        quote_volume: parse_string_f64(&k[7], "quote_volume")?,
        trades_count: k[8].as_u64().context("missing trades count")?,
        taker_buy_volume: parse_string_f64(&k[9], "taker_buy_volume")?,
        taker_buy_quote_volume: parse_string_f64(&k[10], "taker_buy_quote_volume")?,
    })
}

/// Helper: Binance sends numeric values as JSON strings inside klines.
fn parse_string_f64(val: &Value, name: &str) -> Result<f64> {
    match val {
        Value::String(s) => s
            .parse::<f64>()
            .with_context(|| format!("failed to parse {name} as f64: {s}")),
        Value::Number(n) => n
            .as_f64()
            .with_context(|| format!("field {name} is not a valid f64")),
        _ => bail!("field {name} has unexpected JSON type"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
