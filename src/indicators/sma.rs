// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// SMA = mean of the last `period` prices.
//
// Reported as a current/previous pair: the newest window and the window that
// ends one bar earlier, each averaged on its own.
// =============================================================================

use std::ops::Range;

use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::Common;
use crate::math::average;
use crate::options::{Options, DATE_TIME_KEY, PERIOD, PRECISION, PRICE_KEY};
use crate::types::{PriceRecord, Technicals};
use crate::window::{latest_windows, Frame};

pub const DEFAULT_PERIOD: usize = 30;

pub struct Sma;

impl Indicator for Sma {
    fn symbol(&self) -> &'static str {
        "sma"
    }

    fn name(&self) -> &'static str {
        "Simple Moving Average"
    }

    fn valid_options(&self) -> &'static [&'static str] {
        &[PERIOD, PRICE_KEY, DATE_TIME_KEY, PRECISION]
    }

    fn min_data_size(&self, options: &Options) -> Result<usize> {
        self.validate_options(options)?;
        options.period(PERIOD, DEFAULT_PERIOD)
    }

    fn calculate(&self, data: &[PriceRecord], options: &Options) -> Result<Technicals> {
        let period = self.min_data_size(options)?;
        let price_key = options.price_key()?;
        let common = Common::read(options)?;

        let frame = Frame::load(data, &common.date_time_key, &[price_key.as_str()], period)?;
        let prices = frame.column(&price_key);

        let evaluate = |window: Range<usize>| {
            let value = average(&prices[window.clone()]);
            frame.value(window.end - 1, common.precision, &[("value", value)])
        };

        let (current, previous) = latest_windows(frame.len(), period);
        Ok(Technicals::Pair {
            current: evaluate(current),
            previous: previous.map(evaluate),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::indicators::test_data::{assert_close, closes, precise, time};

    fn period(p: usize) -> Options {
        precise().with(PERIOD, p)
    }

    #[test]
    fn pair_of_latest_windows() {
        let data = closes(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let Technicals::Pair { current, previous } = Sma.calculate(&data, &period(3)).unwrap()
        else {
            panic!("sma reports a pair");
        };
        assert_close(current.get("value").unwrap(), 4.0);
        assert_eq!(current.timestamp(), time(4));

        let previous = previous.expect("five records cover two windows");
        assert_close(previous.get("value").unwrap(), 3.0);
        assert_eq!(previous.timestamp(), time(3));
    }

    #[test]
    fn no_previous_on_exact_window() {
        let data = closes(&[2.0, 4.0, 6.0]);
        let result = Sma.calculate(&data, &period(3)).unwrap();
        assert_eq!(result.len(), 1);
        assert_close(result.latest().unwrap().get("value").unwrap(), 4.0);
    }

    #[test]
    fn constant_series_averages_to_constant() {
        let data = closes(&[42.0; 40]);
        let result = Sma.calculate(&data, &Options::new()).unwrap();
        for value in result.into_values() {
            assert_eq!(value.get("value"), Some(42.0));
        }
    }

    #[test]
    fn reads_alternate_price_key() {
        let data: Vec<PriceRecord> = closes(&[1.0, 2.0])
            .into_iter()
            .map(|r| r.with("open", 10.0))
            .collect();
        let options = Options::new().with(PERIOD, 2).with(PRICE_KEY, "open");
        let result = Sma.calculate(&data, &options).unwrap();
        assert_eq!(result.latest().unwrap().get("value"), Some(10.0));
    }

    #[test]
    fn default_period_needs_thirty_records() {
        assert_eq!(Sma.min_data_size(&Options::new()).unwrap(), 30);
        let err = Sma.calculate(&closes(&[1.0; 29]), &Options::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Data);
    }

    #[test]
    fn rejects_unknown_option() {
        let options = Options::new().with(PERIOD, 2).with("standard_deviations", 2);
        let err = Sma.calculate(&closes(&[1.0, 2.0]), &options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Option);
    }
}
