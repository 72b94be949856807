// =============================================================================
// Mass Index (MI)
// =============================================================================
//
//   range  = high - low
//   ratio  = EMA(range, ema_period) / EMA(EMA(range, ema_period), ema_period)
//   MI     = sum of the last `sum_period` ratios
//
// A bar set with no range at all has a ratio of 1, the same as any
// steady range.
// =============================================================================

use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::Common;
use crate::math::{ratio_or, sum};
use crate::options::{Options, DATE_TIME_KEY, PRECISION};
use crate::smoothing::ema;
use crate::types::{fields, PriceRecord, Technicals};
use crate::window::{newest_first, rolling, Frame};

pub const DEFAULT_EMA_PERIOD: usize = 9;
pub const DEFAULT_SUM_PERIOD: usize = 25;

const EMA_PERIOD: &str = "ema_period";
const SUM_PERIOD: &str = "sum_period";

pub struct Mi;

impl Indicator for Mi {
    fn symbol(&self) -> &'static str {
        "mi"
    }

    fn name(&self) -> &'static str {
        "Mass Index"
    }

    fn valid_options(&self) -> &'static [&'static str] {
        &[EMA_PERIOD, SUM_PERIOD, DATE_TIME_KEY, PRECISION]
    }

    fn min_data_size(&self, options: &Options) -> Result<usize> {
        self.validate_options(options)?;
        let ema_period = options.period(EMA_PERIOD, DEFAULT_EMA_PERIOD)?;
        let sum_period = options.period(SUM_PERIOD, DEFAULT_SUM_PERIOD)?;
        Ok(2 * ema_period + sum_period - 2)
    }

    fn calculate(&self, data: &[PriceRecord], options: &Options) -> Result<Technicals> {
        let min_size = self.min_data_size(options)?;
        let ema_period = options.period(EMA_PERIOD, DEFAULT_EMA_PERIOD)?;
        let sum_period = options.period(SUM_PERIOD, DEFAULT_SUM_PERIOD)?;
        let common = Common::read(options)?;

        let frame = Frame::load(
            data,
            &common.date_time_key,
            &[fields::HIGH, fields::LOW],
            min_size,
        )?;
        let ranges: Vec<f64> = frame
            .column(fields::HIGH)
            .iter()
            .zip(frame.column(fields::LOW))
            .map(|(high, low)| high - low)
            .collect();

        // Single EMA element k belongs to row ema_period - 1 + k; double EMA
        // (and ratio) element k to row 2 * ema_period - 2 + k.
        let single = ema(&ranges, ema_period);
        let double = ema(&single, ema_period);
        let ratios: Vec<f64> = double
            .iter()
            .zip(&single[ema_period - 1..])
            .map(|(&double, &single)| ratio_or(single, double, 1.0))
            .collect();

        let values = rolling(&ratios, sum_period, sum)
            .map(|(k, mi)| frame.value(2 * ema_period - 2 + k, common.precision, &[("mi", mi)]))
            .collect();

        Ok(Technicals::Series(newest_first(values)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_data::{assert_close, bars, field, precise, sample, time};

    #[test]
    fn steady_range_sums_to_period() {
        let data = bars(&[(11.0, 9.0, 10.0, 1.0); 12]);
        let options = Options::new().with(EMA_PERIOD, 3).with(SUM_PERIOD, 4);
        let result = Mi.calculate(&data, &options).unwrap();
        // min size 2 * 3 + 4 - 2 = 8: rows 7..=11
        assert_eq!(result.len(), 5);
        assert!(field(&result, "mi").iter().all(|&v| v == 4.0));
        assert_eq!(result.latest().unwrap().timestamp(), time(11));
    }

    #[test]
    fn zero_range_is_neutral() {
        let data = bars(&[(10.0, 10.0, 10.0, 1.0); 45]);
        let result = Mi.calculate(&data, &Options::new()).unwrap();
        assert!(field(&result, "mi").iter().all(|&v| v == 25.0));
    }

    #[test]
    fn period_one_ratios_are_one() {
        // With ema_period 1 both EMAs equal the raw range.
        let data = bars(&[
            (11.0, 9.0, 10.0, 1.0),
            (14.0, 9.0, 12.0, 1.0),
            (13.0, 12.0, 12.5, 1.0),
        ]);
        let options = precise().with(EMA_PERIOD, 1).with(SUM_PERIOD, 2);
        let result = Mi.calculate(&data, &options).unwrap();
        let mi = field(&result, "mi");
        assert_eq!(mi.len(), 2);
        assert_close(mi[0], 2.0);
        assert_close(mi[1], 2.0);
    }

    #[test]
    fn expanding_ranges_push_above_baseline() {
        let mut rows: Vec<(f64, f64, f64, f64)> = vec![(101.0, 99.0, 100.0, 1.0); 30];
        rows.extend((1..=15).map(|i| (100.0 + 2.0 * i as f64, 100.0 - 2.0 * i as f64, 100.0, 1.0)));
        let result = Mi.calculate(&bars(&rows), &Options::new()).unwrap();
        assert!(result.latest().unwrap().get("mi").unwrap() > 25.0);
        assert_eq!(Mi.min_data_size(&Options::new()).unwrap(), 41);
        assert!(Mi.calculate(&sample(41), &Options::new()).is_ok());
    }
}
