// =============================================================================
// Awesome Oscillator (AO)
// =============================================================================
//
//   median = (high + low) / 2
//   AO     = SMA(median, short_period) - SMA(median, long_period)
// =============================================================================

use crate::error::{IndicatorError, Result};
use crate::indicator::Indicator;
use crate::indicators::Common;
use crate::math::{average, median_price};
use crate::options::{Options, DATE_TIME_KEY, PRECISION};
use crate::types::{fields, PriceRecord, Technicals};
use crate::window::{newest_first, Frame};

pub const DEFAULT_SHORT_PERIOD: usize = 5;
pub const DEFAULT_LONG_PERIOD: usize = 34;

const SHORT_PERIOD: &str = "short_period";
const LONG_PERIOD: &str = "long_period";

pub struct Ao;

impl Ao {
    fn periods(&self, options: &Options) -> Result<(usize, usize)> {
        self.validate_options(options)?;
        let short = options.period(SHORT_PERIOD, DEFAULT_SHORT_PERIOD)?;
        let long = options.period(LONG_PERIOD, DEFAULT_LONG_PERIOD)?;
        if short > long {
            return Err(IndicatorError::invalid_option(
                SHORT_PERIOD,
                format!("must not exceed {LONG_PERIOD} ({long})"),
            ));
        }
        Ok((short, long))
    }
}

impl Indicator for Ao {
    fn symbol(&self) -> &'static str {
        "ao"
    }

    fn name(&self) -> &'static str {
        "Awesome Oscillator"
    }

    fn valid_options(&self) -> &'static [&'static str] {
        &[SHORT_PERIOD, LONG_PERIOD, DATE_TIME_KEY, PRECISION]
    }

    fn min_data_size(&self, options: &Options) -> Result<usize> {
        let (_, long) = self.periods(options)?;
        Ok(long)
    }

    fn calculate(&self, data: &[PriceRecord], options: &Options) -> Result<Technicals> {
        let (short, long) = self.periods(options)?;
        let common = Common::read(options)?;

        let frame = Frame::load(data, &common.date_time_key, &[fields::HIGH, fields::LOW], long)?;
        let medians: Vec<f64> = frame
            .column(fields::HIGH)
            .iter()
            .zip(frame.column(fields::LOW))
            .map(|(&h, &l)| median_price(h, l))
            .collect();

        let values = (long - 1..frame.len())
            .map(|i| {
                let fast = average(&medians[i + 1 - short..=i]);
                let slow = average(&medians[i + 1 - long..=i]);
                frame.value(i, common.precision, &[("ao", fast - slow)])
            })
            .collect();

        Ok(Technicals::Series(newest_first(values)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::indicators::test_data::{assert_close, bars, field, precise};

    #[test]
    fn difference_of_median_averages() {
        // Medians: 1, 2, 3, 4
        let data = bars(&[
            (1.5, 0.5, 1.0, 1.0),
            (2.5, 1.5, 2.0, 1.0),
            (3.5, 2.5, 3.0, 1.0),
            (4.5, 3.5, 4.0, 1.0),
        ]);
        let options = precise().with(SHORT_PERIOD, 2).with(LONG_PERIOD, 4);
        let result = Ao.calculate(&data, &options).unwrap();
        let ao = field(&result, "ao");
        assert_eq!(ao.len(), 1);
        // 3.5 - 2.5
        assert_close(ao[0], 1.0);
    }

    #[test]
    fn short_longer_than_long_is_rejected() {
        let options = Options::new().with(SHORT_PERIOD, 10).with(LONG_PERIOD, 5);
        assert_eq!(Ao.min_data_size(&options).unwrap_err().kind(), ErrorKind::Option);
    }

    #[test]
    fn min_data_size_is_long_period() {
        assert_eq!(Ao.min_data_size(&Options::new()).unwrap(), 34);
    }
}
