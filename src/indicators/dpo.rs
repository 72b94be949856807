// =============================================================================
// Detrended Price Oscillator (DPO)
// =============================================================================
//
//   DPO = price (period / 2 + 1) bars ago - SMA(price, period)
//
// The shifted price sits in the middle of the averaging window, so the moving
// average's trend cancels out and only the cycle is left.
// =============================================================================

use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::Common;
use crate::math::average;
use crate::options::{Options, DATE_TIME_KEY, PERIOD, PRECISION, PRICE_KEY};
use crate::types::{PriceRecord, Technicals};
use crate::window::{newest_first, rolling, Frame};

pub const DEFAULT_PERIOD: usize = 20;

pub struct Dpo;

/// How many bars back the detrended price is taken from.
fn lag(period: usize) -> usize {
    period / 2 + 1
}

impl Indicator for Dpo {
    fn symbol(&self) -> &'static str {
        "dpo"
    }

    fn name(&self) -> &'static str {
        "Detrended Price Oscillator"
    }

    fn valid_options(&self) -> &'static [&'static str] {
        &[PERIOD, PRICE_KEY, DATE_TIME_KEY, PRECISION]
    }

    /// `period + period / 2`, and never less than one row past the lag.
    fn min_data_size(&self, options: &Options) -> Result<usize> {
        self.validate_options(options)?;
        let period = options.period(PERIOD, DEFAULT_PERIOD)?;
        Ok((period + period / 2).max(lag(period) + 1))
    }

    fn calculate(&self, data: &[PriceRecord], options: &Options) -> Result<Technicals> {
        let min_size = self.min_data_size(options)?;
        let period = options.period(PERIOD, DEFAULT_PERIOD)?;
        let price_key = options.price_key()?;
        let common = Common::read(options)?;

        let frame = Frame::load(data, &common.date_time_key, &[price_key.as_str()], min_size)?;
        let prices = frame.column(&price_key);
        let lag = lag(period);

        let values = rolling(prices, period, average)
            .filter(|&(i, _)| i + 1 >= min_size)
            .map(|(i, sma)| frame.value(i, common.precision, &[("dpo", prices[i - lag] - sma)]))
            .collect();

        Ok(Technicals::Series(newest_first(values)))
    }
}
