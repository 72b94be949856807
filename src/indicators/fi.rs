// =============================================================================
// Force Index (FI)
// =============================================================================
//
//   force = (close - prev close) * volume
//   FI    = EMA(force, period)
// =============================================================================

use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::Common;
use crate::options::{Options, DATE_TIME_KEY, PERIOD, PRECISION};
use crate::smoothing::ema;
use crate::types::{fields, PriceRecord, Technicals};
use crate::window::{newest_first, Frame};

pub const DEFAULT_PERIOD: usize = 13;

pub struct Fi;

impl Indicator for Fi {
    fn symbol(&self) -> &'static str {
        "fi"
    }

    fn name(&self) -> &'static str {
        "Force Index"
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
            &[fields::CLOSE, fields::VOLUME],
            min_size,
        )?;
        let (close, volume) = (frame.column(fields::CLOSE), frame.column(fields::VOLUME));

        let force: Vec<f64> = (1..frame.len())
            .map(|i| (close[i] - close[i - 1]) * volume[i])
            .collect();

        let values = ema(&force, period)
            .into_iter()
            .enumerate()
            .map(|(k, fi)| frame.value(period + k, common.precision, &[("fi", fi)]))
            .collect();

        Ok(Technicals::Series(newest_first(values)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_data::{assert_close, bars, field, precise};

    #[test]
    fn smoothed_force() {
        let data = bars(&[
            (0.0, 0.0, 10.0, 1.0),
            (0.0, 0.0, 11.0, 100.0),
            (0.0, 0.0, 10.0, 50.0),
            (0.0, 0.0, 12.0, 10.0),
        ]);
        let result = Fi.calculate(&data, &precise().with(PERIOD, 2)).unwrap();
        let fi = field(&result, "fi");
        // Force: 100, -50, 20 => seed 25, then 25 + 2/3 * (20 - 25)
        assert_eq!(fi.len(), 2);
        assert_close(fi[1], 25.0);
        assert_close(fi[0], 25.0 - 10.0 / 3.0);
    }

    #[test]
    fn needs_period_plus_one() {
        assert_eq!(Fi.min_data_size(&Options::new()).unwrap(), 14);
    }
}
