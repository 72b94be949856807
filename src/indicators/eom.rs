// =============================================================================
// Ease of Movement (EoM)
// =============================================================================
//
//   distance = (high + low) / 2 - (prev high + prev low) / 2
//   box      = volume / 100_000_000 / (high - low)
//   EMV      = distance / box
//   EoM      = SMA(EMV, period)
//
// A bar with no range or no volume contributes an EMV of 0.
// =============================================================================

use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::Common;
use crate::math::{average, median_price};
use crate::options::{Options, DATE_TIME_KEY, PERIOD, PRECISION};
use crate::types::{fields, PriceRecord, Technicals};
use crate::window::{newest_first, rolling, Frame};

pub const DEFAULT_PERIOD: usize = 14;

const VOLUME_SCALE: f64 = 100_000_000.0;

pub struct Eom;

impl Indicator for Eom {
    fn symbol(&self) -> &'static str {
        "eom"
    }

    fn name(&self) -> &'static str {
        "Ease of Movement"
    }

    fn valid_options(&self) -> &'static [&'static str] {
        &[PERIOD, DATE_TIME_KEY, PRECISION]
    }

    fn min_data_size(&self, options: &Options) -> Result<usize> {
        self.validate_options(options)?;
        Ok(options.period(PERIOD, DEFAULT_PERIOD)? + 1)
    }

    fn calculate(&self, data: &[PriceRecord], options: &Options) -> Result<Technicals> {
        let min_size = self.min_data_size(options)?;
        let period = min_size - 1;
        let common = Common::read(options)?;

        let frame = Frame::load(
            data,
            &common.date_time_key,
            &[fields::HIGH, fields::LOW, fields::VOLUME],
            min_size,
        )?;
        let (high, low, volume) = (
            frame.column(fields::HIGH),
            frame.column(fields::LOW),
            frame.column(fields::VOLUME),
        );

        // emv[j] belongs to row j + 1.
        let emv: Vec<f64> = (1..frame.len())
            .map(|i| {
                let range = high[i] - low[i];
                if range == 0.0 || volume[i] == 0.0 {
                    return 0.0;
                }
                let distance = median_price(high[i], low[i]) - median_price(high[i - 1], low[i - 1]);
                distance * range * VOLUME_SCALE / volume[i]
            })
            .collect();

        let values = rolling(&emv, period, average)
            .map(|(j, eom)| frame.value(j + 1, common.precision, &[("eom", eom)]))
            .collect();

        Ok(Technicals::Series(newest_first(values)))
    }
}
