// =============================================================================
// Chaikin Money Flow (CMF)
// =============================================================================
//
//   CLV = ((close - low) - (high - close)) / (high - low)    (0 if high == low)
//   CMF = sum(CLV * volume) / sum(volume)                     over the window
//
// A window without volume yields 0.
// =============================================================================

use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::Common;
use crate::math::{ratio_or, sum};
use crate::options::{Options, DATE_TIME_KEY, PERIOD, PRECISION};
use crate::types::{fields, PriceRecord, Technicals};
use crate::window::{newest_first, Frame};

pub const DEFAULT_PERIOD: usize = 20;

/// Close location value: where the close sits within the bar's range.
pub(crate) fn close_location_value(high: f64, low: f64, close: f64) -> f64 {
    ratio_or((close - low) - (high - close), high - low, 0.0)
}

pub struct Cmf;

impl Indicator for Cmf {
    fn symbol(&self) -> &'static str {
        "cmf"
    }

    fn name(&self) -> &'static str {
        "Chaikin Money Flow"
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
            &[fields::HIGH, fields::LOW, fields::CLOSE, fields::VOLUME],
            period,
        )?;
        let (high, low, close, volume) = (
            frame.column(fields::HIGH),
            frame.column(fields::LOW),
            frame.column(fields::CLOSE),
            frame.column(fields::VOLUME),
        );
        let flow_volume: Vec<f64> = (0..frame.len())
            .map(|i| close_location_value(high[i], low[i], close[i]) * volume[i])
            .collect();

        let values = (period - 1..frame.len())
            .map(|i| {
                let window = i + 1 - period..i + 1;
                let cmf = ratio_or(sum(&flow_volume[window.clone()]), sum(&volume[window]), 0.0);
                frame.value(i, common.precision, &[("cmf", cmf)])
            })
            .collect();

        Ok(Technicals::Series(newest_first(values)))
    }
}
