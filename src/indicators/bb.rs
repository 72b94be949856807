// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band (SMA + k*σ),
// and a lower band (SMA - k*σ), with σ the population standard deviation of
// the window.
//
// Like the SMA, reported as the newest window plus the window one bar back.

use std::ops::Range;

use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::Common;
use crate::math::{average, standard_deviation};
use crate::options::{Options, DATE_TIME_KEY, PERIOD, PRECISION, PRICE_KEY};
use crate::types::{PriceRecord, Technicals};
use crate::window::{latest_windows, Frame};

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_STANDARD_DEVIATIONS: f64 = 2.0;

const STANDARD_DEVIATIONS: &str = "standard_deviations";

pub struct Bb;

impl Indicator for Bb {
    fn symbol(&self) -> &'static str {
        "bb"
    }

    fn name(&self) -> &'static str {
        "Bollinger Bands"
    }

    fn valid_options(&self) -> &'static [&'static str] {
        &[PERIOD, STANDARD_DEVIATIONS, PRICE_KEY, DATE_TIME_KEY, PRECISION]
    }

    fn min_data_size(&self, options: &Options) -> Result<usize> {
        self.validate_options(options)?;
        options.period(PERIOD, DEFAULT_PERIOD)
    }

    fn calculate(&self, data: &[PriceRecord], options: &Options) -> Result<Technicals> {
        let period = self.min_data_size(options)?;
        let num_std = options.real(STANDARD_DEVIATIONS, DEFAULT_STANDARD_DEVIATIONS)?;
        let price_key = options.price_key()?;
        let common = Common::read(options)?;

        let frame = Frame::load(data, &common.date_time_key, &[price_key.as_str()], period)?;
        let prices = frame.column(&price_key);

        let evaluate = |window: Range<usize>| {
            let values = &prices[window.clone()];
            let middle = average(values);
            let std_dev = standard_deviation(values);
            frame.value(
                window.end - 1,
                common.precision,
                &[
                    ("lower_band", middle - num_std * std_dev),
                    ("middle_band", middle),
                    ("upper_band", middle + num_std * std_dev),
                ],
            )
        };

        let (current, previous) = latest_windows(frame.len(), period);
        Ok(Technicals::Pair {
            current: evaluate(current),
            previous: previous.map(evaluate),
        })
    }
}
