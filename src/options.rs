// =============================================================================
// Indicator options
// =============================================================================
//
// Options arrive as a loose JSON map (from callers or from the batch config).
// Typed accessors apply the indicator's default when a key is absent and
// reject values outside the option's domain.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{IndicatorError, Result};
use crate::types::fields;

pub const PERIOD: &str = "period";
pub const PRICE_KEY: &str = "price_key";
pub const DATE_TIME_KEY: &str = "date_time_key";
pub const PRECISION: &str = "precision";

pub const DEFAULT_PRECISION: u32 = 2;

/// Upper bound for every period option. Indicators add and multiply periods
/// to size their windows; this keeps that arithmetic far from overflow.
pub const MAX_PERIOD: u64 = 10_000_000;

/// Upper bound for `precision`; `10^p` must stay exact in an `f64`.
const MAX_PRECISION: u32 = 15;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options(Map<String, Value>);

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A positive integer option (window lengths, smoothing periods), at most
    /// `MAX_PERIOD`.
    ///
    /// Accepts JSON integers, integral floats and integer strings.
    pub fn period(&self, key: &str, default: usize) -> Result<usize> {
        let Some(value) = self.0.get(key) else {
            return Ok(default);
        };
        let parsed = match value {
            Value::Number(n) => n.as_u64().or_else(|| {
                n.as_f64()
                    .filter(|v| v.is_finite() && v.fract() == 0.0 && *v >= 0.0)
                    .map(|v| v as u64)
            }),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        parsed
            .filter(|period| (1..=MAX_PERIOD).contains(period))
            .and_then(|period| usize::try_from(period).ok())
            .ok_or_else(|| {
                IndicatorError::invalid_option(
                    key,
                    format!("expected an integer between 1 and {MAX_PERIOD}, got {value}"),
                )
            })
    }

    /// A finite real-valued option (multipliers, constants, weights).
    pub fn real(&self, key: &str, default: f64) -> Result<f64> {
        let Some(value) = self.0.get(key) else {
            return Ok(default);
        };
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed.filter(|v| v.is_finite()).ok_or_else(|| {
            IndicatorError::invalid_option(key, format!("expected a finite number, got {value}"))
        })
    }

    /// A record field name.
    pub fn field(&self, key: &str, default: &str) -> Result<String> {
        match self.0.get(key) {
            None => Ok(default.to_string()),
            Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
            Some(other) => Err(IndicatorError::invalid_option(
                key,
                format!("expected a field name, got {other}"),
            )),
        }
    }

    pub fn price_key(&self) -> Result<String> {
        self.field(PRICE_KEY, fields::CLOSE)
    }

    pub fn date_time_key(&self) -> Result<String> {
        self.field(DATE_TIME_KEY, fields::OPEN_TIME)
    }

    /// Decimal places results are rounded to.
    pub fn precision(&self) -> Result<u32> {
        let Some(value) = self.0.get(PRECISION) else {
            return Ok(DEFAULT_PRECISION);
        };
        value
            .as_u64()
            .filter(|p| *p <= u64::from(MAX_PRECISION))
            .map(|p| p as u32)
            .ok_or_else(|| {
                IndicatorError::invalid_option(
                    PRECISION,
                    format!("expected an integer between 0 and {MAX_PRECISION}, got {value}"),
                )
            })
    }
}

impl From<Map<String, Value>> for Options {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
