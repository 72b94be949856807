// =============================================================================
// Triple Exponential Average (TRIX)
// =============================================================================
//
//   E3   = EMA(EMA(EMA(price, period), period), period)
//   TRIX = percent change of E3 from one bar to the next
// =============================================================================

use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::Common;
use crate::math::percent_change;
use crate::options::{Options, DATE_TIME_KEY, PERIOD, PRECISION, PRICE_KEY};
use crate::smoothing::ema;
use crate::types::{PriceRecord, Technicals};
use crate::window::{newest_first, Frame};

pub const DEFAULT_PERIOD: usize = 15;

pub struct Trix;

impl Indicator for Trix {
    fn symbol(&self) -> &'static str {
        "trix"
    }

    fn name(&self) -> &'static str {
        "Triple Exponential Average"
    }

    fn valid_options(&self) -> &'static [&'static str] {
        &[PERIOD, PRICE_KEY, DATE_TIME_KEY, PRECISION]
    }

    fn min_data_size(&self, options: &Options) -> Result<usize> {
        self.validate_options(options)?;
        Ok(options.period(PERIOD, DEFAULT_PERIOD)? * 3 - 1)
    }

    fn calculate(&self, data: &[PriceRecord], options: &Options) -> Result<Technicals> {
        let min_size = self.min_data_size(options)?;
        let period = (min_size + 1) / 3;
        let price_key = options.price_key()?;
        let common = Common::read(options)?;

        let frame = Frame::load(data, &common.date_time_key, &[price_key.as_str()], min_size)?;

        // Element k of the triple EMA belongs to row 3 * (period - 1) + k.
        let triple = ema(&ema(&ema(frame.column(&price_key), period), period), period);

        let values = triple
            .windows(2)
            .enumerate()
            .map(|(k, pair)| {
                let trix = percent_change(pair[0], pair[1]);
                frame.value(3 * period - 2 + k, common.precision, &[("trix", trix)])
            })
            .collect();

        Ok(Technicals::Series(newest_first(values)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_data::{assert_close, closes, field, precise, time};

    #[test]
    fn period_one_is_plain_percent_change() {
        let data = closes(&[100.0, 110.0, 99.0]);
        let result = Trix.calculate(&data, &precise().with(PERIOD, 1)).unwrap();
        let trix = field(&result, "trix");
        assert_eq!(trix.len(), 2);
        assert_close(trix[1], 10.0);
        assert_close(trix[0], -10.0);
    }

    #[test]
    fn minimum_size_yields_one_value() {
        let prices: Vec<f64> = (1..=5).map(|x| x as f64).collect();
        let result = Trix.calculate(&closes(&prices), &Options::new().with(PERIOD, 2)).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.latest().unwrap().timestamp(), time(4));
    }

    #[test]
    fn default_minimum() {
        assert_eq!(Trix.min_data_size(&Options::new()).unwrap(), 44);
    }
}
