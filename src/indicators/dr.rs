// =============================================================================
// Daily Return (DR)
// =============================================================================
//
//   DR = price / prev price - 1
//
// One value per record after the first. A zero previous price yields 0.
// =============================================================================

use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::Common;
use crate::options::{Options, DATE_TIME_KEY, PRECISION, PRICE_KEY};
use crate::types::{PriceRecord, Technicals};
use crate::window::{newest_first, Frame};

pub struct Dr;

impl Indicator for Dr {
    fn symbol(&self) -> &'static str {
        "dr"
    }

    fn name(&self) -> &'static str {
        "Daily Return"
    }

    fn valid_options(&self) -> &'static [&'static str] {
        &[PRICE_KEY, DATE_TIME_KEY, PRECISION]
    }

    fn min_data_size(&self, options: &Options) -> Result<usize> {
        self.validate_options(options)?;
        Ok(2)
    }

    fn calculate(&self, data: &[PriceRecord], options: &Options) -> Result<Technicals> {
        let min_size = self.min_data_size(options)?;
        let price_key = options.price_key()?;
        let common = Common::read(options)?;

        let frame = Frame::load(data, &common.date_time_key, &[price_key.as_str()], min_size)?;
        let prices = frame.column(&price_key);

        let values = (1..frame.len())
            .map(|i| {
                let prev = prices[i - 1];
                let dr = if prev == 0.0 { 0.0 } else { prices[i] / prev - 1.0 };
                frame.value(i, common.precision, &[("dr", dr)])
            })
            .collect();

        Ok(Technicals::Series(newest_first(values)))
    }
}
