// =============================================================================
// Numeric helpers
// =============================================================================
//
// Stateless statistics over slices. Callers only pass full windows, so the
// empty-slice results (0.0) exist to keep the functions total, not as values
// that indicators emit.

pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Arithmetic mean.
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    sum(values) / values.len() as f64
}

/// Mean of absolute deviations from the mean.
pub fn mean_absolute_deviation(values: &[f64]) -> f64 {
    let mean = average(values);
    values.iter().map(|v| (v - mean).abs()).sum::<f64>() / values.len().max(1) as f64
}

/// Population standard deviation (divides by `n`).
pub fn standard_deviation(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = average(values);
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

pub fn min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Round half away from zero to `precision` decimal places.
pub fn round_to(value: f64, precision: u32) -> f64 {
    let scale = 10_f64.powi(precision as i32);
    let rounded = (value * scale).round() / scale;
    // Avoid emitting -0.0 for tiny negative values.
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// `numerator / denominator`, or `fallback` when the denominator is zero.
pub fn ratio_or(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    if denominator == 0.0 {
        fallback
    } else {
        numerator / denominator
    }
}

/// Percentage change from `base` to `value`; a zero base yields 0.
pub fn percent_change(base: f64, value: f64) -> f64 {
    if base == 0.0 {
        0.0
    } else {
        (value - base) / base * 100.0
    }
}

/// (high + low + close) / 3
pub fn typical_price(high: f64, low: f64, close: f64) -> f64 {
    (high + low + close) / 3.0
}

/// (high + low) / 2
pub fn median_price(high: f64, low: f64) -> f64 {
    (high + low) / 2.0
}

/// TR = max(H - L, |H - prevClose|, |L - prevClose|)
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    (high - low)
        .max((high - prev_close).abs())
        .max((low - prev_close).abs())
}
