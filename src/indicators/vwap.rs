// =============================================================================
// Volume Weighted Average Price (VWAP)
// =============================================================================
//
//   VWAP = cumulative(typical price * volume) / cumulative(volume)
//
// Until any volume has traded the typical price itself is reported.
// =============================================================================

use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::Common;
use crate::math::{ratio_or, typical_price};
use crate::options::{Options, DATE_TIME_KEY, PRECISION};
use crate::types::{fields, PriceRecord, Technicals};
use crate::window::{newest_first, Frame};

pub struct Vwap;

impl Indicator for Vwap {
    fn symbol(&self) -> &'static str {
        "vwap"
    }

    fn name(&self) -> &'static str {
        "Volume Weighted Average Price"
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

        let (mut price_volume, mut total_volume) = (0.0, 0.0);
        let values = (0..frame.len())
            .map(|i| {
                let typical = typical_price(high[i], low[i], close[i]);
                price_volume += typical * volume[i];
                total_volume += volume[i];
                let vwap = ratio_or(price_volume, total_volume, typical);
                frame.value(i, common.precision, &[("vwap", vwap)])
            })
            .collect();

        Ok(Technicals::Series(newest_first(values)))
    }
}
