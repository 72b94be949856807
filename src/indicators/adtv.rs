// =============================================================================
// Average Daily Trading Volume (ADTV)
// =============================================================================
//
// Mean traded volume over the window.

use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::Common;
use crate::math::average;
use crate::options::{Options, DATE_TIME_KEY, PERIOD, PRECISION};
use crate::types::{fields, PriceRecord, Technicals};
use crate::window::{newest_first, rolling, Frame};

pub const DEFAULT_PERIOD: usize = 22;

const VOLUME_KEY: &str = "volume_key";

pub struct Adtv;

impl Indicator for Adtv {
    fn symbol(&self) -> &'static str {
        "adtv"
    }

    fn name(&self) -> &'static str {
        "Average Daily Trading Volume"
    }

    fn valid_options(&self) -> &'static [&'static str] {
        &[PERIOD, VOLUME_KEY, DATE_TIME_KEY, PRECISION]
    }

    fn min_data_size(&self, options: &Options) -> Result<usize> {
        self.validate_options(options)?;
        options.period(PERIOD, DEFAULT_PERIOD)
    }

    fn calculate(&self, data: &[PriceRecord], options: &Options) -> Result<Technicals> {
        let period = self.min_data_size(options)?;
        let volume_key = options.field(VOLUME_KEY, fields::VOLUME)?;
        let common = Common::read(options)?;

        let frame = Frame::load(data, &common.date_time_key, &[volume_key.as_str()], period)?;

        let values = rolling(frame.column(&volume_key), period, average)
            .map(|(i, adtv)| frame.value(i, common.precision, &[("adtv", adtv)]))
            .collect();

        Ok(Technicals::Series(newest_first(values)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_data::{bars, field};

    #[test]
    fn averages_volume() {
        let data = bars(&[
            (1.0, 1.0, 1.0, 100.0),
            (1.0, 1.0, 1.0, 200.0),
            (1.0, 1.0, 1.0, 600.0),
        ]);
        let result = Adtv.calculate(&data, &Options::new().with(PERIOD, 2)).unwrap();
        assert_eq!(field(&result, "adtv"), vec![400.0, 150.0]);
    }

    #[test]
    fn custom_volume_key() {
        let data: Vec<PriceRecord> = bars(&[(1.0, 1.0, 1.0, 0.0); 2])
            .into_iter()
            .map(|r| r.with("quote_volume", 50.0))
            .collect();
        let options = Options::new().with(PERIOD, 2).with(VOLUME_KEY, "quote_volume");
        let result = Adtv.calculate(&data, &options).unwrap();
        assert_eq!(field(&result, "adtv"), vec![50.0]);
    }
}
