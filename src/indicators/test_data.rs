// Fixtures shared by the indicator unit tests.

use crate::options::{Options, PRECISION};
use crate::types::{fields, PriceRecord, Technicals};

/// 2022-11-25 07:30:00 UTC, 30-minute bars.
pub const START: i64 = 1_669_361_400_000;
pub const STEP: i64 = 1_800_000;

pub fn time(i: usize) -> i64 {
    START + i as i64 * STEP
}

/// Records carrying only a timestamp and a close.
pub fn closes(values: &[f64]) -> Vec<PriceRecord> {
    values
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            PriceRecord::new()
                .with(fields::OPEN_TIME, time(i))
                .with(fields::CLOSE, close)
        })
        .collect()
}

/// Records from `(high, low, close, volume)` tuples; open equals close.
pub fn bars(rows: &[(f64, f64, f64, f64)]) -> Vec<PriceRecord> {
    rows.iter()
        .enumerate()
        .map(|(i, &(high, low, close, volume))| {
            PriceRecord::new()
                .with(fields::OPEN_TIME, time(i))
                .with(fields::CLOSE_TIME, time(i) + STEP - 1)
                .with(fields::OPEN, close)
                .with(fields::HIGH, high)
                .with(fields::LOW, low)
                .with(fields::CLOSE, close)
                .with(fields::VOLUME, volume)
        })
        .collect()
}

/// A wavy, drifting OHLCV series long enough for every default period.
pub fn sample(n: usize) -> Vec<PriceRecord> {
    let rows: Vec<(f64, f64, f64, f64)> = (0..n)
        .map(|i| {
            let x = i as f64;
            let close = 100.0 + (x * 0.3).sin() * 10.0 + x * 0.2;
            let high = close + 1.0 + (i % 3) as f64;
            let low = close - 1.0 - (i % 2) as f64;
            let volume = 1_000.0 + 37.0 * (i % 7) as f64;
            (high, low, close, volume)
        })
        .collect();
    bars(&rows)
}

/// Options asking for enough decimals to compare against hand calculations.
pub fn precise() -> Options {
    Options::new().with(PRECISION, 10)
}

/// Values of `name` in output order (newest first).
pub fn field(technicals: &Technicals, name: &str) -> Vec<f64> {
    technicals
        .clone()
        .into_values()
        .iter()
        .map(|v| v.get(name).unwrap_or(f64::NAN))
        .collect()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-8,
        "got {actual}, expected {expected}"
    );
}
