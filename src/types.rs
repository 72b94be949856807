// =============================================================================
// Shared types used across the indicator engine
// =============================================================================

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::math::round_to;

/// Field names of a Binance kline once converted into a [`PriceRecord`].
pub mod fields {
    pub const OPEN_TIME: &str = "open_time";
    pub const CLOSE_TIME: &str = "close_time";
    pub const OPEN: &str = "open";
    pub const HIGH: &str = "high";
    pub const LOW: &str = "low";
    pub const CLOSE: &str = "close";
    pub const VOLUME: &str = "volume";
}

// =============================================================================
// PriceRecord
// =============================================================================

/// One observation handed to the engine: a map from field name to value.
///
/// Indicators only read records. A field counts as numeric when it holds a
/// JSON number representable as a finite `f64`; a timestamp must be an
/// integral number of milliseconds since the epoch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceRecord(Map<String, Value>);

impl PriceRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.0.insert(field.to_string(), value.into());
        self
    }

    pub fn insert(&mut self, field: &str, value: impl Into<Value>) {
        self.0.insert(field.to_string(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// The field as a finite `f64`, or `None` if it is absent or not a number.
    pub fn number(&self, field: &str) -> Option<f64> {
        self.0
            .get(field)
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
    }

    /// The field as integral epoch milliseconds.
    pub fn timestamp(&self, field: &str) -> Option<i64> {
        match self.0.get(field)? {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|v| v.is_finite() && v.fract() == 0.0)
                    .map(|v| v as i64)
            }),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for PriceRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Render epoch milliseconds as `YYYY-MM-DD HH:MM:SS UTC`.
pub fn format_timestamp(millis: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
}

// =============================================================================
// IndicatorValue
// =============================================================================

/// A single computed result: the timestamp it belongs to plus one or more
/// named values, already rounded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorValue {
    timestamp: i64,
    date_time: String,
    #[serde(flatten)]
    values: BTreeMap<&'static str, f64>,
}

impl IndicatorValue {
    /// Build a result, rounding every value to `precision` decimal places.
    pub fn new(timestamp: i64, precision: u32, values: &[(&'static str, f64)]) -> Self {
        Self {
            timestamp,
            date_time: format_timestamp(timestamp).unwrap_or_default(),
            values: values
                .iter()
                .map(|&(name, v)| (name, round_to(v, precision)))
                .collect(),
        }
    }

    /// Epoch milliseconds of the record this value was computed for.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn date_time(&self) -> &str {
        &self.date_time
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn values(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }
}

// =============================================================================
// Technicals
// =============================================================================

/// Output of an indicator calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Technicals {
    /// Every eligible timestamp, newest first.
    Series(Vec<IndicatorValue>),
    /// The newest eligible window and the one before it, each evaluated on
    /// its own. `previous` is `None` when only one full window fits.
    Pair {
        current: IndicatorValue,
        previous: Option<IndicatorValue>,
    },
}

impl Technicals {
    /// The most recent value.
    pub fn latest(&self) -> Option<&IndicatorValue> {
        match self {
            Self::Series(values) => values.first(),
            Self::Pair { current, .. } => Some(current),
        }
    }

    pub fn as_series(&self) -> Option<&[IndicatorValue]> {
        match self {
            Self::Series(values) => Some(values),
            Self::Pair { .. } => None,
        }
    }

    /// Flatten into a newest-first vector.
    pub fn into_values(self) -> Vec<IndicatorValue> {
        match self {
            Self::Series(values) => values,
            Self::Pair { current, previous } => std::iter::once(current).chain(previous).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Series(values) => values.len(),
            Self::Pair { previous, .. } => 1 + usize::from(previous.is_some()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
