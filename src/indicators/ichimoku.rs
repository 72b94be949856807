// =============================================================================
// Ichimoku Kinko Hyo
// =============================================================================
//
// Every line is a channel midpoint, (highest high + lowest low) / 2, over some
// window. With L, M, H the low, medium and high periods and `lagged` the row
// M - 1 bars back:
//
//   tenkan_sen     midpoint over L at this row
//   kijun_sen      midpoint over M at this row
//   senkou_span_a  (midpoint over L + midpoint over M) / 2 at `lagged`
//   senkou_span_b  midpoint over H at `lagged`
//   chikou_span    close at `lagged`
// =============================================================================

use crate::error::{IndicatorError, Result};
use crate::indicator::Indicator;
use crate::indicators::Common;
use crate::math::{max, min};
use crate::options::{Options, DATE_TIME_KEY, PRECISION};
use crate::types::{fields, PriceRecord, Technicals};
use crate::window::{newest_first, Frame};

pub const DEFAULT_LOW_PERIOD: usize = 9;
pub const DEFAULT_MEDIUM_PERIOD: usize = 26;
pub const DEFAULT_HIGH_PERIOD: usize = 52;

const LOW_PERIOD: &str = "low_period";
const MEDIUM_PERIOD: &str = "medium_period";
const HIGH_PERIOD: &str = "high_period";

pub struct Ichimoku;

impl Ichimoku {
    /// `(low, medium, high)` periods, checked to be non-decreasing.
    fn periods(&self, options: &Options) -> Result<(usize, usize, usize)> {
        self.validate_options(options)?;
        let low = options.period(LOW_PERIOD, DEFAULT_LOW_PERIOD)?;
        let medium = options.period(MEDIUM_PERIOD, DEFAULT_MEDIUM_PERIOD)?;
        let high = options.period(HIGH_PERIOD, DEFAULT_HIGH_PERIOD)?;
        if low > medium {
            return Err(IndicatorError::invalid_option(
                LOW_PERIOD,
                format!("must not exceed {MEDIUM_PERIOD} ({medium})"),
            ));
        }
        if medium > high {
            return Err(IndicatorError::invalid_option(
                MEDIUM_PERIOD,
                format!("must not exceed {HIGH_PERIOD} ({high})"),
            ));
        }
        Ok((low, medium, high))
    }
}

impl Indicator for Ichimoku {
    fn symbol(&self) -> &'static str {
        "ichimoku"
    }

    fn name(&self) -> &'static str {
        "Ichimoku Kinko Hyo"
    }

    fn valid_options(&self) -> &'static [&'static str] {
        &[LOW_PERIOD, MEDIUM_PERIOD, HIGH_PERIOD, DATE_TIME_KEY, PRECISION]
    }

    fn min_data_size(&self, options: &Options) -> Result<usize> {
        let (_, medium, high) = self.periods(options)?;
        Ok(high + medium - 1)
    }

    fn calculate(&self, data: &[PriceRecord], options: &Options) -> Result<Technicals> {
        let (low_period, medium, high_period) = self.periods(options)?;
        let min_size = high_period + medium - 1;
        let common = Common::read(options)?;

        let frame = Frame::load(
            data,
            &common.date_time_key,
            &[fields::HIGH, fields::LOW, fields::CLOSE],
            min_size,
        )?;
        let (high, low, close) = (
            frame.column(fields::HIGH),
            frame.column(fields::LOW),
            frame.column(fields::CLOSE),
        );

        // Channel midpoint of the `period` rows ending at `end`.
        let midpoint = |end: usize, period: usize| {
            let window = end + 1 - period..end + 1;
            (max(&high[window.clone()]) + min(&low[window])) / 2.0
        };

        let values = (min_size - 1..frame.len())
            .map(|i| {
                let lagged = i + 1 - medium;
                frame.value(
                    i,
                    common.precision,
                    &[
                        ("tenkan_sen", midpoint(i, low_period)),
                        ("kijun_sen", midpoint(i, medium)),
                        (
                            "senkou_span_a",
                            (midpoint(lagged, low_period) + midpoint(lagged, medium)) / 2.0,
                        ),
                        ("senkou_span_b", midpoint(lagged, high_period)),
                        ("chikou_span", close[lagged]),
                    ],
                )
            })
            .collect();

        Ok(Technicals::Series(newest_first(values)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::indicators::test_data::{assert_close, bars, field, precise, sample, time};

    fn small() -> Options {
        precise()
            .with(LOW_PERIOD, 1)
            .with(MEDIUM_PERIOD, 2)
            .with(HIGH_PERIOD, 3)
    }

    #[test]
    fn lines_from_channel_midpoints() {
        let data = bars(&[
            (10.0, 8.0, 9.0, 1.0),
            (12.0, 9.0, 11.0, 1.0),
            (14.0, 10.0, 13.0, 1.0),
            (13.0, 11.0, 12.0, 1.0),
            (16.0, 12.0, 15.0, 1.0),
        ]);
        let result = Ichimoku.calculate(&data, &small()).unwrap();
        // min size 3 + 2 - 1 = 4: rows 3 and 4.
        assert_eq!(result.len(), 2);
        let latest = result.latest().unwrap();
        assert_eq!(latest.timestamp(), time(4));
        // row 4, lagged row 3
        assert_close(latest.get("tenkan_sen").unwrap(), (16.0 + 12.0) / 2.0);
        assert_close(latest.get("kijun_sen").unwrap(), (16.0 + 11.0) / 2.0);
        let span_a = ((13.0 + 11.0) / 2.0 + (14.0 + 10.0) / 2.0) / 2.0;
        assert_close(latest.get("senkou_span_a").unwrap(), span_a);
        assert_close(latest.get("senkou_span_b").unwrap(), (14.0 + 9.0) / 2.0);
        assert_close(latest.get("chikou_span").unwrap(), 12.0);
    }

    #[test]
    fn default_series_length() {
        let result = Ichimoku.calculate(&sample(80), &Options::new()).unwrap();
        assert_eq!(Ichimoku.min_data_size(&Options::new()).unwrap(), 77);
        assert_eq!(result.len(), 4);
        let tenkan = field(&result, "tenkan_sen");
        assert!(tenkan.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn periods_must_ascend() {
        let options = Options::new().with(LOW_PERIOD, 30);
        assert_eq!(Ichimoku.min_data_size(&options).unwrap_err().kind(), ErrorKind::Option);
        let options = Options::new().with(MEDIUM_PERIOD, 60);
        assert_eq!(Ichimoku.min_data_size(&options).unwrap_err().kind(), ErrorKind::Option);
    }
}
