// =============================================================================
// Donchian Channel (DC)
// =============================================================================
//
// Upper bound = highest price of the window, lower bound = lowest price.
// Both bounds are always set on every emitted value.

use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::Common;
use crate::math::{max, min};
use crate::options::{Options, DATE_TIME_KEY, PERIOD, PRECISION, PRICE_KEY};
use crate::types::{PriceRecord, Technicals};
use crate::window::{newest_first, rolling, Frame};

pub const DEFAULT_PERIOD: usize = 20;

pub struct Dc;

impl Indicator for Dc {
    fn symbol(&self) -> &'static str {
        "dc"
    }

    fn name(&self) -> &'static str {
        "Donchian Channel"
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

        let values = rolling(frame.column(&price_key), period, |w| (max(w), min(w)))
            .map(|(i, (upper, lower))| {
                frame.value(
                    i,
                    common.precision,
                    &[("upper_bound", upper), ("lower_bound", lower)],
                )
            })
            .collect();

        Ok(Technicals::Series(newest_first(values)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_data::{closes, field};

    #[test]
    fn tracks_window_extremes() {
        let data = closes(&[3.0, 1.0, 4.0, 1.0, 5.0, 9.0]);
        let result = Dc.calculate(&data, &Options::new().with(PERIOD, 3)).unwrap();
        // Windows (oldest first): [3,1,4] [1,4,1] [4,1,5] [1,5,9]
        assert_eq!(field(&result, "upper_bound"), vec![9.0, 5.0, 4.0, 4.0]);
        assert_eq!(field(&result, "lower_bound"), vec![1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn constant_series_bounds_equal_constant() {
        let data = closes(&[7.25; 25]);
        let result = Dc.calculate(&data, &Options::new()).unwrap();
        assert_eq!(result.len(), 6);
        for value in result.into_values() {
            assert_eq!(value.get("upper_bound"), Some(7.25));
            assert_eq!(value.get("lower_bound"), Some(7.25));
        }
    }
}
