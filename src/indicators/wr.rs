// =============================================================================
// Williams %R (WR)
// =============================================================================
//
//   %R = (highest high - close) / (highest high - lowest low) * -100
//
// Ranges from -100 (close at the low) to 0 (close at the high). A window with
// no range reads -50.
// =============================================================================

use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::Common;
use crate::math::{max, min};
use crate::options::{Options, DATE_TIME_KEY, PERIOD, PRECISION};
use crate::types::{fields, PriceRecord, Technicals};
use crate::window::{newest_first, Frame};

pub const DEFAULT_PERIOD: usize = 14;

pub struct Wr;

impl Indicator for Wr {
    fn symbol(&self) -> &'static str {
        "wr"
    }

    fn name(&self) -> &'static str {
        "Williams %R"
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
            &[fields::HIGH, fields::LOW, fields::CLOSE],
            period,
        )?;
        let (high, low, close) = (
            frame.column(fields::HIGH),
            frame.column(fields::LOW),
            frame.column(fields::CLOSE),
        );

        let values = (period - 1..frame.len())
            .map(|i| {
                let window = i + 1 - period..i + 1;
                let highest = max(&high[window.clone()]);
                let lowest = min(&low[window]);
                let wr = if highest == lowest {
                    -50.0
                } else {
                    (highest - close[i]) / (highest - lowest) * -100.0
                };
                frame.value(i, common.precision, &[("wr", wr)])
            })
            .collect();

        Ok(Technicals::Series(newest_first(values)))
    }
}
