// =============================================================================
// True Strength Index (TSI)
// =============================================================================
//
//   m   = price - prev price
//   TSI = 100 * EMA_low(EMA_high(m)) / EMA_low(EMA_high(|m|))
//
// A series with no movement has a zero denominator and reads 0.
// =============================================================================

use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::Common;
use crate::math::ratio_or;
use crate::options::{Options, DATE_TIME_KEY, PRECISION, PRICE_KEY};
use crate::smoothing::ema;
use crate::types::{PriceRecord, Technicals};
use crate::window::{newest_first, Frame};

pub const DEFAULT_LOW_PERIOD: usize = 13;
pub const DEFAULT_HIGH_PERIOD: usize = 25;

const LOW_PERIOD: &str = "low_period";
const HIGH_PERIOD: &str = "high_period";

pub struct Tsi;

impl Tsi {
    fn periods(&self, options: &Options) -> Result<(usize, usize)> {
        self.validate_options(options)?;
        Ok((
            options.period(LOW_PERIOD, DEFAULT_LOW_PERIOD)?,
            options.period(HIGH_PERIOD, DEFAULT_HIGH_PERIOD)?,
        ))
    }
}

impl Indicator for Tsi {
    fn symbol(&self) -> &'static str {
        "tsi"
    }

    fn name(&self) -> &'static str {
        "True Strength Index"
    }

    fn valid_options(&self) -> &'static [&'static str] {
        &[LOW_PERIOD, HIGH_PERIOD, PRICE_KEY, DATE_TIME_KEY, PRECISION]
    }

    fn min_data_size(&self, options: &Options) -> Result<usize> {
        let (low, high) = self.periods(options)?;
        Ok(low + high)
    }

    fn calculate(&self, data: &[PriceRecord], options: &Options) -> Result<Technicals> {
        let (low, high) = self.periods(options)?;
        let price_key = options.price_key()?;
        let common = Common::read(options)?;

        let frame = Frame::load(data, &common.date_time_key, &[price_key.as_str()], low + high)?;

        // Momentum; element j belongs to row j + 1.
        let momentum: Vec<f64> = frame.column(&price_key).windows(2).map(|w| w[1] - w[0]).collect();
        let magnitude: Vec<f64> = momentum.iter().map(|m| m.abs()).collect();

        let double_smoothed = ema(&ema(&momentum, high), low);
        let double_smoothed_abs = ema(&ema(&magnitude, high), low);

        // Element s belongs to row high + low - 1 + s.
        let values = double_smoothed
            .iter()
            .zip(&double_smoothed_abs)
            .enumerate()
            .map(|(s, (&num, &den))| {
                let tsi = 100.0 * ratio_or(num, den, 0.0);
                frame.value(high + low - 1 + s, common.precision, &[("tsi", tsi)])
            })
            .collect();

        Ok(Technicals::Series(newest_first(values)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_data::{closes, field, time};

    fn small() -> Options {
        Options::new().with(LOW_PERIOD, 2).with(HIGH_PERIOD, 3)
    }

    #[test]
    fn steady_rise_is_fully_positive() {
        let prices: Vec<f64> = (0..10).map(|x| x as f64 * 2.0).collect();
        let result = Tsi.calculate(&closes(&prices), &small()).unwrap();
        // 9 changes, 7 after EMA(3), 6 after EMA(2)
        assert_eq!(result.len(), 6);
        assert_eq!(field(&result, "tsi"), vec![100.0; 6]);
        assert_eq!(result.latest().unwrap().timestamp(), time(9));
    }

    #[test]
    fn steady_fall_is_fully_negative() {
        let prices: Vec<f64> = (0..10).rev().map(|x| x as f64).collect();
        let result = Tsi.calculate(&closes(&prices), &small()).unwrap();
        assert_eq!(field(&result, "tsi"), vec![-100.0; 6]);
    }

    #[test]
    fn flat_series_reads_zero() {
        let result = Tsi.calculate(&closes(&[5.0; 38]), &Options::new()).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(field(&result, "tsi"), vec![0.0]);
    }
}
