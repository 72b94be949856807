// =============================================================================
// Volume-price Trend (VPT)
// =============================================================================
//
//   VPT += volume * (close - prev close) / prev close
//
// Starts from the second record; a zero previous close adds nothing.
// =============================================================================

use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::Common;
use crate::math::percent_change;
use crate::options::{Options, DATE_TIME_KEY, PRECISION};
use crate::types::{fields, PriceRecord, Technicals};
use crate::window::{newest_first, Frame};

pub struct Vpt;

impl Indicator for Vpt {
    fn symbol(&self) -> &'static str {
        "vpt"
    }

    fn name(&self) -> &'static str {
        "Volume-price Trend"
    }

    fn valid_options(&self) -> &'static [&'static str] {
        &[DATE_TIME_KEY, PRECISION]
    }

    fn min_data_size(&self, options: &Options) -> Result<usize> {
        self.validate_options(options)?;
        Ok(2)
    }

    fn calculate(&self, data: &[PriceRecord], options: &Options) -> Result<Technicals> {
        let min_size = self.min_data_size(options)?;
        let common = Common::read(options)?;

        let frame = Frame::load(
            data,
            &common.date_time_key,
            &[fields::CLOSE, fields::VOLUME],
            min_size,
        )?;
        let (close, volume) = (frame.column(fields::CLOSE), frame.column(fields::VOLUME));

        let mut vpt = 0.0;
        let values = (1..frame.len())
            .map(|i| {
                vpt += volume[i] * percent_change(close[i - 1], close[i]) / 100.0;
                frame.value(i, common.precision, &[("vpt", vpt)])
            })
            .collect();

        Ok(Technicals::Series(newest_first(values)))
    }
}
