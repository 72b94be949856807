// =============================================================================
// On-balance Volume (OBV)
// =============================================================================
//
// Running volume total: added on up closes, subtracted on down closes,
// unchanged on flat closes. Starts at 0.
// =============================================================================

use std::cmp::Ordering;

use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::Common;
use crate::options::{Options, DATE_TIME_KEY, PRECISION};
use crate::types::{fields, PriceRecord, Technicals};
use crate::window::{newest_first, Frame};

pub struct Obv;

impl Indicator for Obv {
    fn symbol(&self) -> &'static str {
        "obv"
    }

    fn name(&self) -> &'static str {
        "On-balance Volume"
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

        let values = balance(close, volume)
            .into_iter()
            .enumerate()
            .map(|(i, obv)| frame.value(i, common.precision, &[("obv", obv)]))
            .collect();

        Ok(Technicals::Series(newest_first(values)))
    }
}

/// Running OBV total, one element per row, starting at 0.
pub(crate) fn balance(close: &[f64], volume: &[f64]) -> Vec<f64> {
    let mut obv = 0.0;
    close
        .iter()
        .enumerate()
        .map(|(i, price)| {
            if i > 0 {
                match price.partial_cmp(&close[i - 1]) {
                    Some(Ordering::Greater) => obv += volume[i],
                    Some(Ordering::Less) => obv -= volume[i],
                    _ => {}
                }
            }
            obv
        })
        .collect()
}
