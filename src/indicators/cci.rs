// =============================================================================
// Commodity Channel Index (CCI)
// =============================================================================
//
//   TP  = (high + low + close) / 3
//   CCI = (TP - SMA(TP)) / (constant * mean deviation of TP)
//
// The constant (0.015 by default) puts roughly 70-80% of values within
// [-100, +100]. A window with zero mean deviation yields 0.
// =============================================================================

use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::Common;
use crate::math::{average, mean_absolute_deviation, ratio_or, typical_price};
use crate::options::{Options, DATE_TIME_KEY, PERIOD, PRECISION};
use crate::types::{fields, PriceRecord, Technicals};
use crate::window::{newest_first, rolling, Frame};

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_CONSTANT: f64 = 0.015;

const CONSTANT: &str = "constant";

pub struct Cci;

impl Indicator for Cci {
    fn symbol(&self) -> &'static str {
        "cci"
    }

    fn name(&self) -> &'static str {
        "Commodity Channel Index"
    }

    fn valid_options(&self) -> &'static [&'static str] {
        &[PERIOD, CONSTANT, DATE_TIME_KEY, PRECISION]
    }

    fn min_data_size(&self, options: &Options) -> Result<usize> {
        self.validate_options(options)?;
        options.period(PERIOD, DEFAULT_PERIOD)
    }

    fn calculate(&self, data: &[PriceRecord], options: &Options) -> Result<Technicals> {
        let period = self.min_data_size(options)?;
        let constant = options.real(CONSTANT, DEFAULT_CONSTANT)?;
        let common = Common::read(options)?;

        let frame = Frame::load(
            data,
            &common.date_time_key,
            &[fields::HIGH, fields::LOW, fields::CLOSE],
            period,
        )?;
        let typical: Vec<f64> = frame
            .column(fields::HIGH)
            .iter()
            .zip(frame.column(fields::LOW))
            .zip(frame.column(fields::CLOSE))
            .map(|((&h, &l), &c)| typical_price(h, l, c))
            .collect();

        let values = rolling(&typical, period, |window| {
            let sma = average(window);
            let latest = window[window.len() - 1];
            ratio_or(latest - sma, constant * mean_absolute_deviation(window), 0.0)
        })
        .map(|(i, cci)| frame.value(i, common.precision, &[("cci", cci)]))
        .collect();

        Ok(Technicals::Series(newest_first(values)))
    }
}
