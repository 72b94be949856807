// =============================================================================
// On-balance Volume Mean
// =============================================================================
//
// Simple moving average of the on-balance volume running total.
// =============================================================================

use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::{obv::balance, Common};
use crate::math::average;
use crate::options::{Options, DATE_TIME_KEY, PERIOD, PRECISION};
use crate::types::{fields, PriceRecord, Technicals};
use crate::window::{newest_first, rolling, Frame};

pub const DEFAULT_PERIOD: usize = 10;

pub struct ObvMean;

impl Indicator for ObvMean {
    fn symbol(&self) -> &'static str {
        "obv_mean"
    }

    fn name(&self) -> &'static str {
        "On-balance Volume Mean"
    }

    fn valid_options(&self) -> &'static [&'static str] {
        &[PERIOD, DATE_TIME_KEY, PRECISION]
    }

    fn min_data_size(&self, options: &Options) -> Result<usize> {
        self.validate_options(options)?;
        options.period(PERIOD, DEFAULT_PERIOD)
    }

    fn calculate(&self, data: &[PriceRecord], options: &Options) -> Result<Technicals> {
        let period = self.min_data_size(options)?;
        let common = Common::read(options)?;

        let frame = Frame::load(
            data,
            &common.date_time_key,
            &[fields::CLOSE, fields::VOLUME],
            period,
        )?;
        let obv = balance(frame.column(fields::CLOSE), frame.column(fields::VOLUME));

        let values = rolling(&obv, period, average)
            .map(|(i, mean)| frame.value(i, common.precision, &[("obv_mean", mean)]))
            .collect();

        Ok(Technicals::Series(newest_first(values)))
    }
}
