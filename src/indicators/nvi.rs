// =============================================================================
// Negative Volume Index (NVI)
// =============================================================================
//
// Starts at 1000 and only moves on bars whose volume fell:
//   NVI += (close - prev close) / prev close * NVI
// =============================================================================

use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::Common;
use crate::math::percent_change;
use crate::options::{Options, DATE_TIME_KEY, PRECISION};
use crate::types::{fields, PriceRecord, Technicals};
use crate::window::{newest_first, Frame};

pub const START_VALUE: f64 = 1_000.0;

pub struct Nvi;

impl Indicator for Nvi {
    fn symbol(&self) -> &'static str {
        "nvi"
    }

    fn name(&self) -> &'static str {
        "Negative Volume Index"
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
            &[fields::CLOSE, fields::VOLUME],
            min_size,
        )?;
        let (close, volume) = (frame.column(fields::CLOSE), frame.column(fields::VOLUME));

        let mut nvi = START_VALUE;
        let values = (0..frame.len())
            .map(|i| {
                if i > 0 && volume[i] < volume[i - 1] {
                    nvi += percent_change(close[i - 1], close[i]) / 100.0 * nvi;
                }
                frame.value(i, common.precision, &[("nvi", nvi)])
            })
            .collect();

        Ok(Technicals::Series(newest_first(values)))
    }
}
