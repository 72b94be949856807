// =============================================================================
// Keltner Channel (KC)
// =============================================================================
//
// Chester Keltner's classic channel, built from three averaged prices:
//   lower  = SMA((-2 * high + 4 * low + close) / 3)
//   middle = SMA((high + low + close) / 3)
//   upper  = SMA((4 * high - 2 * low + close) / 3)
// =============================================================================

use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::Common;
use crate::math::{average, typical_price};
use crate::options::{Options, DATE_TIME_KEY, PERIOD, PRECISION};
use crate::types::{fields, PriceRecord, Technicals};
use crate::window::{newest_first, Frame};

pub const DEFAULT_PERIOD: usize = 10;

pub struct Kc;

impl Indicator for Kc {
    fn symbol(&self) -> &'static str {
        "kc"
    }

    fn name(&self) -> &'static str {
        "Keltner Channel"
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
            &[fields::HIGH, fields::LOW, fields::CLOSE],
            period,
        )?;
        let (high, low, close) = (
            frame.column(fields::HIGH),
            frame.column(fields::LOW),
            frame.column(fields::CLOSE),
        );

        let mut lower = Vec::with_capacity(frame.len());
        let mut middle = Vec::with_capacity(frame.len());
        let mut upper = Vec::with_capacity(frame.len());
        for i in 0..frame.len() {
            lower.push((-2.0 * high[i] + 4.0 * low[i] + close[i]) / 3.0);
            middle.push(typical_price(high[i], low[i], close[i]));
            upper.push((4.0 * high[i] - 2.0 * low[i] + close[i]) / 3.0);
        }

        let values = (period - 1..frame.len())
            .map(|i| {
                let window = i + 1 - period..i + 1;
                frame.value(
                    i,
                    common.precision,
                    &[
                        ("lower_band", average(&lower[window.clone()])),
                        ("middle_band", average(&middle[window.clone()])),
                        ("upper_band", average(&upper[window])),
                    ],
                )
            })
            .collect();

        Ok(Technicals::Series(newest_first(values)))
    }
}
