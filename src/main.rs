// =============================================================================
// Indicator Engine: batch runner
// =============================================================================
//
// Loads price data and a list of indicator requests, runs each request
// through the registry and prints one JSON document per request on stdout.
// Logs go to stderr.
// =============================================================================

mod runtime_config;

use anyhow::Context;
use serde_json::json;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use indicator_engine::{load_records, Registry};

use crate::runtime_config::IndicatorConfig;

const DEFAULT_CONFIG_PATH: &str = "indicator_config.json";

fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("INDICATOR_CONFIG").ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = IndicatorConfig::load(&config_path)?;

    // ── 2. Price data ────────────────────────────────────────────────────
    let text = std::fs::read_to_string(&config.data_path).with_context(|| {
        format!("failed to read price data from {}", config.data_path.display())
    })?;
    let records = load_records(&text)
        .with_context(|| format!("failed to load price data from {}", config.data_path.display()))?;
    info!(records = records.len(), path = %config.data_path.display(), "price data loaded");

    // ── 3. Run requests ──────────────────────────────────────────────────
    let registry = Registry::standard()?;

    let mut failures = 0usize;
    for request in &config.requests {
        match registry.calculate(&request.symbol, &records, request.calculation, &request.options) {
            Ok(output) => {
                let document = json!({
                    "symbol": request.symbol,
                    "calculation": request.calculation,
                    "output": output,
                });
                println!("{}", serde_json::to_string_pretty(&document)?);
            }
            Err(e) => {
                failures += 1;
                error!(
                    symbol = %request.symbol,
                    calculation = %request.calculation,
                    kind = ?e.kind(),
                    error = %e,
                    "indicator request failed"
                );
            }
        }
    }

    info!(requests = config.requests.len(), failures, "batch complete");
    if failures > 0 {
        anyhow::bail!("{failures} of {} indicator requests failed", config.requests.len());
    }
    Ok(())
}
