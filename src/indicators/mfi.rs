// =============================================================================
// Money Flow Index (MFI)
// =============================================================================
//
// A volume-weighted RSI over typical price:
//
//   raw flow = typical price * volume
//   positive when the typical price rose, negative when it fell
//   MFI      = 100 - 100 / (1 + positive flow / negative flow)
//
// With no negative flow in the window MFI saturates at 100.
// =============================================================================

use std::cmp::Ordering;

use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::Common;
use crate::math::{sum, typical_price};
use crate::options::{Options, DATE_TIME_KEY, PERIOD, PRECISION};
use crate::types::{fields, PriceRecord, Technicals};
use crate::window::{newest_first, Frame};

pub const DEFAULT_PERIOD: usize = 14;

pub struct Mfi;

impl Indicator for Mfi {
    fn symbol(&self) -> &'static str {
        "mfi"
    }

    fn name(&self) -> &'static str {
        "Money Flow Index"
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
            &[fields::HIGH, fields::LOW, fields::CLOSE, fields::VOLUME],
            min_size,
        )?;
        let (high, low, close, volume) = (
            frame.column(fields::HIGH),
            frame.column(fields::LOW),
            frame.column(fields::CLOSE),
            frame.column(fields::VOLUME),
        );
        let typical: Vec<f64> = (0..frame.len())
            .map(|i| typical_price(high[i], low[i], close[i]))
            .collect();

        // Element j belongs to row j + 1.
        let (positive, negative): (Vec<f64>, Vec<f64>) = (1..frame.len())
            .map(|i| {
                let flow = typical[i] * volume[i];
                match typical[i].partial_cmp(&typical[i - 1]) {
                    Some(Ordering::Greater) => (flow, 0.0),
                    Some(Ordering::Less) => (0.0, flow),
                    _ => (0.0, 0.0),
                }
            })
            .unzip();

        let values = (period - 1..positive.len())
            .map(|j| {
                let window = j + 1 - period..j + 1;
                let positive_flow = sum(&positive[window.clone()]);
                let negative_flow = sum(&negative[window]);
                let mfi = if negative_flow == 0.0 {
                    100.0
                } else {
                    100.0 - 100.0 / (1.0 + positive_flow / negative_flow)
                };
                frame.value(j + 1, common.precision, &[("mfi", mfi)])
            })
            .collect();

        Ok(Technicals::Series(newest_first(values)))
    }
}
