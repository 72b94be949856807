// =============================================================================
// Average True Range (ATR), Wilder's smoothing method
// =============================================================================
//
// ATR measures market volatility by decomposing the entire range of a bar.
//
// True Range (TR) for each bar after the first:
//   TR = max(H - L, |H - prevClose|, |L - prevClose|)
//
// ATR is then the smoothed average of TR using Wilder's method:
//   ATR_0   = mean of the first `period` TR values
//   ATR_t   = (ATR_{t-1} * (period - 1) + TR_t) / period
//
// Default period: 14
// =============================================================================

use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::Common;
use crate::math::true_range;
use crate::options::{Options, DATE_TIME_KEY, PERIOD, PRECISION};
use crate::smoothing::wilder;
use crate::types::{fields, PriceRecord, Technicals};
use crate::window::{newest_first, Frame};

pub const DEFAULT_PERIOD: usize = 14;

/// True range of every row after the first; element `j` belongs to row `j + 1`.
pub(crate) fn true_ranges(frame: &Frame) -> Vec<f64> {
    let (high, low, close) = (
        frame.column(fields::HIGH),
        frame.column(fields::LOW),
        frame.column(fields::CLOSE),
    );
    (1..frame.len())
        .map(|i| true_range(high[i], low[i], close[i - 1]))
        .collect()
}

pub struct Atr;

impl Indicator for Atr {
    fn symbol(&self) -> &'static str {
        "atr"
    }

    fn name(&self) -> &'static str {
        "Average True Range"
    }

    fn valid_options(&self) -> &'static [&'static str] {
        &[PERIOD, DATE_TIME_KEY, PRECISION]
    }

    fn min_data_size(&self, options: &Options) -> Result<usize> {
        self.validate_options(options)?;
        Ok(options.period(PERIOD, DEFAULT_PERIOD)? + 1)
    }

    fn calculate(&self, data: &[PriceRecord], options: &Options) -> Result<Technicals> {
        let min_size = self.min_data_size(options)?;
        let period = min_size - 1;
        let common = Common::read(options)?;

        let frame = Frame::load(
            data,
            &common.date_time_key,
            &[fields::HIGH, fields::LOW, fields::CLOSE],
            min_size,
        )?;

        let values = wilder(&true_ranges(&frame), period)
            .into_iter()
            .enumerate()
            .map(|(k, atr)| frame.value(period + k, common.precision, &[("atr", atr)]))
            .collect();

        Ok(Technicals::Series(newest_first(values)))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::indicators::test_data::{assert_close, bars, field, precise, sample};

    #[test]
    fn atr_insufficient_data() {
        // Need period + 1 = 15 bars for period=14, only have 10.
        let data = bars(&[(105.0, 95.0, 102.0, 1.0); 10]);
        let err = Atr.calculate(&data, &Options::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Data);
    }

    #[test]
    fn atr_exact_minimum_data() {
        let data = bars(&[
            (102.0, 98.0, 101.0, 1.0),
            (104.0, 99.0, 103.0, 1.0),
            (106.0, 100.0, 105.0, 1.0),
            (108.0, 102.0, 107.0, 1.0),
        ]);
        let result = Atr.calculate(&data, &precise().with(PERIOD, 3)).unwrap();
        assert_eq!(result.len(), 1);
        // TRs: 5, 6, 6
        assert_close(field(&result, "atr")[0], 17.0 / 3.0);
    }

    #[test]
    fn atr_wilder_step() {
        let data = bars(&[
            (10.0, 8.0, 9.0, 1.0),
            (11.0, 9.0, 10.0, 1.0),
            (12.0, 10.0, 11.0, 1.0),
            (15.0, 11.0, 14.0, 1.0),
        ]);
        let result = Atr.calculate(&data, &precise().with(PERIOD, 2)).unwrap();
        // TRs: 2, 2, 4 => seed 2, then (2 + 4) / 2
        assert_eq!(field(&result, "atr"), vec![3.0, 2.0]);
    }

    #[test]
    fn atr_true_range_uses_prev_close() {
        // Gap up: |115 - 95| = 20 > 115 - 108 = 7
        let data = bars(&[
            (105.0, 95.0, 95.0, 1.0),
            (115.0, 108.0, 112.0, 1.0),
            (118.0, 110.0, 115.0, 1.0),
            (120.0, 113.0, 118.0, 1.0),
        ]);
        let result = Atr.calculate(&data, &Options::new().with(PERIOD, 3)).unwrap();
        assert!(field(&result, "atr")[0] > 7.0);
    }

    #[test]
    fn atr_result_is_positive() {
        let result = Atr.calculate(&sample(50), &Options::new()).unwrap();
        assert_eq!(result.len(), 36);
        assert!(field(&result, "atr").iter().all(|&v| v > 0.0));
    }
}
