// =============================================================================
// Accumulation/Distribution Index (ADI)
// =============================================================================
//
//   ADI = running sum of CLV * volume
//
// See `cmf` for the close location value.
// =============================================================================

use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::cmf::close_location_value;
use crate::indicators::Common;
use crate::options::{Options, DATE_TIME_KEY, PRECISION};
use crate::types::{fields, PriceRecord, Technicals};
use crate::window::{newest_first, Frame};

pub struct Adi;

impl Indicator for Adi {
    fn symbol(&self) -> &'static str {
        "adi"
    }

    fn name(&self) -> &'static str {
        "Accumulation/Distribution Index"
    }

    fn valid_options(&self) -> &'static [&'static str] {
        &[DATE_TIME_KEY, PRECISION]
    }

    fn min_data_size(&self, options: &Options) -> Result<usize> {
        self.validate_options(options)?;
        Ok(1)
    }

    fn calculate(&self, data: &[PriceRecord], options: &Options) -> Result<Technicals> {
        let min_size = self.min_data_size(options)?;
        let common = Common::read(options)?;

        let frame = Frame::load(
            data,
            &common.date_time_key,
            &[fields::HIGH, fields::LOW, fields::CLOSE, fields::VOLUME],
            min_size,
        )?;
        let (high, low, close, volume) = (
            frame.column(fields::HIGH),
            frame.column(fields::LOW),
            frame.column(fields::CLOSE),
            frame.column(fields::VOLUME),
        );

        let mut adi = 0.0;
        let values = (0..frame.len())
            .map(|i| {
                adi += close_location_value(high[i], low[i], close[i]) * volume[i];
                frame.value(i, common.precision, &[("adi", adi)])
            })
            .collect();

        Ok(Technicals::Series(newest_first(values)))
    }
}
