// =============================================================================
// Cumulative Return (CR)
// =============================================================================
//
//   CR = price / first price - 1
//
// Measured against the oldest record, so every record gets a value. A zero
// starting price yields 0 throughout.
// =============================================================================

use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::Common;
use crate::math::ratio_or;
use crate::options::{Options, DATE_TIME_KEY, PRECISION, PRICE_KEY};
use crate::types::{PriceRecord, Technicals};
use crate::window::{newest_first, Frame};

pub struct Cr;

impl Indicator for Cr {
    fn symbol(&self) -> &'static str {
        "cr"
    }

    fn name(&self) -> &'static str {
        "Cumulative Return"
    }

    fn valid_options(&self) -> &'static [&'static str] {
        &[PRICE_KEY, DATE_TIME_KEY, PRECISION]
    }

    fn min_data_size(&self, options: &Options) -> Result<usize> {
        self.validate_options(options)?;
        Ok(1)
    }

    fn calculate(&self, data: &[PriceRecord], options: &Options) -> Result<Technicals> {
        let min_size = self.min_data_size(options)?;
        let price_key = options.price_key()?;
        let common = Common::read(options)?;

        let frame = Frame::load(data, &common.date_time_key, &[price_key.as_str()], min_size)?;
        let prices = frame.column(&price_key);
        let start = prices[0];

        let values = prices
            .iter()
            .enumerate()
            .map(|(i, &price)| {
                let cr = ratio_or(price - start, start, 0.0);
                frame.value(i, common.precision, &[("cr", cr)])
            })
            .collect();

        Ok(Technicals::Series(newest_first(values)))
    }
}
