// =============================================================================
// Runtime Configuration: batch of indicator requests
// =============================================================================
//
// Describes one batch run: where the price data lives and which indicator
// calculations to run on it. All optional fields carry `#[serde(default)]`
// so a minimal file only names the data and the symbols.
//
// =============================================================================

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use indicator_engine::{Calculation, Options};

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_data_path() -> PathBuf {
    PathBuf::from("price_data.json")
}

// =============================================================================
// IndicatorRequest
// =============================================================================

/// One calculation to run against the loaded price data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorRequest {
    /// Registry symbol, e.g. `"rsi"`.
    pub symbol: String,

    /// Operation to run; technicals unless stated otherwise.
    #[serde(default)]
    pub calculation: Calculation,

    #[serde(default)]
    pub options: Options,
}

// =============================================================================
// IndicatorConfig
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// JSON file holding either a Binance kline payload or an array of price
    /// records.
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    #[serde(default)]
    pub requests: Vec<IndicatorRequest>,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            requests: Vec::new(),
        }
    }
}

impl IndicatorConfig {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read indicator config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse indicator config from {}", path.display()))?;

        info!(
            path = %path.display(),
            data_path = %config.data_path.display(),
            requests = config.requests.len(),
            "indicator config loaded"
        );

        Ok(config)
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_empty_json_uses_defaults() {
        let cfg: IndicatorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.data_path, PathBuf::from("price_data.json"));
        assert!(cfg.requests.is_empty());
    }

    #[test]
    fn request_defaults_to_technicals() {
        let json = r#"{
            "data_path": "btc.json",
            "requests": [
                { "symbol": "rsi" },
                { "symbol": "sma", "calculation": "min_data_size", "options": { "period": 50 } }
            ]
        }"#;
        let cfg: IndicatorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.data_path, PathBuf::from("btc.json"));
        assert_eq!(cfg.requests[0].calculation, Calculation::Technicals);
        assert!(cfg.requests[0].options.is_empty());
        assert_eq!(cfg.requests[1].calculation, Calculation::MinDataSize);
        assert_eq!(cfg.requests[1].options.period("period", 30).unwrap(), 50);
    }

    #[test]
    fn unknown_calculation_fails_to_parse() {
        let json = r#"{ "requests": [ { "symbol": "rsi", "calculation": "fly" } ] }"#;
        assert!(serde_json::from_str::<IndicatorConfig>(json).is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = IndicatorConfig::load("does/not/exist.json").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
