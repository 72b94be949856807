// =============================================================================
// Recursive smoothing
// =============================================================================
//
// Exponential moving average:
//   multiplier = 2 / (period + 1)
//   EMA_t      = multiplier * (x_t - EMA_{t-1}) + EMA_{t-1}
//
// Wilder smoothing (RSI, ATR, ADX):
//   W_t = (W_{t-1} * (period - 1) + x_t) / period
//
// Both are seeded with the plain average of the first `period` values. The
// previous smoothed value is a local accumulator of each call.
// =============================================================================

use crate::math::{average, sum};

/// Weighting factor of an EMA with the given period.
pub fn multiplier(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

/// EMA series of `values`.
///
/// Element `k` of the result corresponds to `values[period - 1 + k]`. Returns
/// an empty vec when `period` is zero or longer than the input.
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    let k = multiplier(period);
    seeded(values, period, average, |prev, x| k * (x - prev) + prev)
}

/// Wilder-smoothed average series, aligned like [`ema`].
pub fn wilder(values: &[f64], period: usize) -> Vec<f64> {
    let n = period as f64;
    seeded(values, period, average, |prev, x| (prev * (n - 1.0) + x) / n)
}

/// Wilder-smoothed running total, seeded with the sum of the first window.
pub fn wilder_sum(values: &[f64], period: usize) -> Vec<f64> {
    let n = period as f64;
    seeded(values, period, sum, |prev, x| prev - prev / n + x)
}

fn seeded(
    values: &[f64],
    period: usize,
    seed: impl Fn(&[f64]) -> f64,
    step: impl Fn(f64, f64) -> f64,
) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    let first = seed(&values[..period]);
    let mut result = Vec::with_capacity(values.len() - period + 1);
    result.push(first);
    result.extend(values[period..].iter().scan(first, |prev, &x| {
        *prev = step(*prev, x);
        Some(*prev)
    }));
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ema_empty_and_short_input() {
        assert!(ema(&[], 5).is_empty());
        assert!(ema(&[1.0, 2.0], 5).is_empty());
        assert!(ema(&[1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn ema_seed_is_window_average() {
        let series = ema(&[2.0, 4.0, 6.0], 3);
        assert_eq!(series.len(), 1);
        assert!((series[0] - 4.0).abs() < 1e-10);
    }

    #[test]
    fn ema_second_emission_follows_recurrence() {
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        let series = ema(&values, 5);
        assert_eq!(series.len(), 6);

        let seed = 3.0;
        let k = 2.0 / 6.0;
        assert!((series[0] - seed).abs() < 1e-10);
        assert!((series[1] - (k * (6.0 - seed) + seed)).abs() < 1e-10);

        let mut expected = seed;
        for (i, &x) in values[5..].iter().enumerate() {
            expected = k * (x - expected) + expected;
            assert!((series[i + 1] - expected).abs() < 1e-10);
        }
    }

    #[test]
    fn ema_of_constant_is_constant() {
        for v in ema(&[7.0; 20], 4) {
            assert!((v - 7.0).abs() < 1e-10);
        }
    }

    #[test]
    fn wilder_folds_previous_average() {
        // seed = 2, next = (2 * 2 + 6) / 3 = 10/3
        let series = wilder(&[1.0, 2.0, 3.0, 6.0], 3);
        assert_eq!(series.len(), 2);
        assert!((series[0] - 2.0).abs() < 1e-10);
        assert!((series[1] - 10.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn wilder_sum_keeps_running_total() {
        // seed = 6, next = 6 - 6/3 + 6 = 10
        let series = wilder_sum(&[1.0, 2.0, 3.0, 6.0], 3);
        assert!((series[0] - 6.0).abs() < 1e-10);
        assert!((series[1] - 10.0).abs() < 1e-10);
    }
}
