// =============================================================================
// Ultimate Oscillator (UO)
// =============================================================================
//
//   buying pressure  BP = close - min(low, prev close)
//   true range       TR = max(high, prev close) - min(low, prev close)
//   average_n           = sum(BP, n) / sum(TR, n)                (0 if no range)
//   UO = 100 * (w_s * avg_short + w_m * avg_medium + w_l * avg_long)
//            / (w_s + w_m + w_l)
// =============================================================================

use crate::error::{IndicatorError, Result};
use crate::indicator::Indicator;
use crate::indicators::Common;
use crate::math::{ratio_or, sum};
use crate::options::{Options, DATE_TIME_KEY, PRECISION};
use crate::types::{fields, PriceRecord, Technicals};
use crate::window::{newest_first, Frame};

pub const DEFAULT_SHORT_PERIOD: usize = 7;
pub const DEFAULT_MEDIUM_PERIOD: usize = 14;
pub const DEFAULT_LONG_PERIOD: usize = 28;
pub const DEFAULT_SHORT_WEIGHT: f64 = 4.0;
pub const DEFAULT_MEDIUM_WEIGHT: f64 = 2.0;
pub const DEFAULT_LONG_WEIGHT: f64 = 1.0;

const SHORT_PERIOD: &str = "short_period";
const MEDIUM_PERIOD: &str = "medium_period";
const LONG_PERIOD: &str = "long_period";
const SHORT_WEIGHT: &str = "short_weight";
const MEDIUM_WEIGHT: &str = "medium_weight";
const LONG_WEIGHT: &str = "long_weight";

pub struct Uo;

impl Uo {
    /// `(period, weight)` for the short, medium and long legs.
    fn legs(&self, options: &Options) -> Result<[(usize, f64); 3]> {
        self.validate_options(options)?;
        let short = options.period(SHORT_PERIOD, DEFAULT_SHORT_PERIOD)?;
        let medium = options.period(MEDIUM_PERIOD, DEFAULT_MEDIUM_PERIOD)?;
        let long = options.period(LONG_PERIOD, DEFAULT_LONG_PERIOD)?;
        if short > medium {
            return Err(IndicatorError::invalid_option(
                SHORT_PERIOD,
                format!("must not exceed {MEDIUM_PERIOD} ({medium})"),
            ));
        }
        if medium > long {
            return Err(IndicatorError::invalid_option(
                MEDIUM_PERIOD,
                format!("must not exceed {LONG_PERIOD} ({long})"),
            ));
        }

        let legs = [
            (short, options.real(SHORT_WEIGHT, DEFAULT_SHORT_WEIGHT)?),
            (medium, options.real(MEDIUM_WEIGHT, DEFAULT_MEDIUM_WEIGHT)?),
            (long, options.real(LONG_WEIGHT, DEFAULT_LONG_WEIGHT)?),
        ];
        if legs.iter().map(|&(_, weight)| weight).sum::<f64>() == 0.0 {
            return Err(IndicatorError::invalid_option(LONG_WEIGHT, "weights must not sum to zero"));
        }
        Ok(legs)
    }
}

impl Indicator for Uo {
    fn symbol(&self) -> &'static str {
        "uo"
    }

    fn name(&self) -> &'static str {
        "Ultimate Oscillator"
    }

    fn valid_options(&self) -> &'static [&'static str] {
        &[
            SHORT_PERIOD,
            MEDIUM_PERIOD,
            LONG_PERIOD,
            SHORT_WEIGHT,
            MEDIUM_WEIGHT,
            LONG_WEIGHT,
            DATE_TIME_KEY,
            PRECISION,
        ]
    }

    fn min_data_size(&self, options: &Options) -> Result<usize> {
        let [_, _, (long, _)] = self.legs(options)?;
        Ok(long + 1)
    }

    fn calculate(&self, data: &[PriceRecord], options: &Options) -> Result<Technicals> {
        let legs = self.legs(options)?;
        let long = legs[2].0;
        let common = Common::read(options)?;

        let frame = Frame::load(
            data,
            &common.date_time_key,
            &[fields::HIGH, fields::LOW, fields::CLOSE],
            long + 1,
        )?;
        let (high, low, close) = (
            frame.column(fields::HIGH),
            frame.column(fields::LOW),
            frame.column(fields::CLOSE),
        );

        // Element j belongs to row j + 1.
        let (pressure, ranges): (Vec<f64>, Vec<f64>) = (1..frame.len())
            .map(|i| {
                let floor = low[i].min(close[i - 1]);
                let ceiling = high[i].max(close[i - 1]);
                (close[i] - floor, ceiling - floor)
            })
            .unzip();
        let total_weight: f64 = legs.iter().map(|&(_, weight)| weight).sum();

        let values = (long - 1..pressure.len())
            .map(|j| {
                let weighted: f64 = legs
                    .iter()
                    .map(|&(period, weight)| {
                        let window = j + 1 - period..j + 1;
                        weight * ratio_or(sum(&pressure[window.clone()]), sum(&ranges[window]), 0.0)
                    })
                    .sum();
                let uo = 100.0 * weighted / total_weight;
                frame.value(j + 1, common.precision, &[("uo", uo)])
            })
            .collect();

        Ok(Technicals::Series(newest_first(values)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::indicators::test_data::{bars, field, sample};

    fn small() -> Options {
        Options::new()
            .with(SHORT_PERIOD, 1)
            .with(MEDIUM_PERIOD, 2)
            .with(LONG_PERIOD, 3)
    }

    #[test]
    fn closes_at_highs_read_hundred() {
        let data = bars(&[
            (10.0, 8.0, 10.0, 1.0),
            (12.0, 9.0, 12.0, 1.0),
            (13.0, 11.0, 13.0, 1.0),
            (15.0, 12.0, 15.0, 1.0),
        ]);
        let result = Uo.calculate(&data, &small()).unwrap();
        assert_eq!(field(&result, "uo"), vec![100.0]);
    }

    #[test]
    fn closes_at_lows_read_zero() {
        let data = bars(&[
            (15.0, 12.0, 12.0, 1.0),
            (13.0, 11.0, 11.0, 1.0),
            (12.0, 9.0, 9.0, 1.0),
            (10.0, 8.0, 8.0, 1.0),
        ]);
        let result = Uo.calculate(&data, &small()).unwrap();
        assert_eq!(field(&result, "uo"), vec![0.0]);
    }

    #[test]
    fn periods_must_ascend() {
        let options = Options::new().with(SHORT_PERIOD, 20).with(MEDIUM_PERIOD, 14);
        assert_eq!(Uo.min_data_size(&options).unwrap_err().kind(), ErrorKind::Option);
        let options = Options::new().with(MEDIUM_PERIOD, 30);
        assert_eq!(Uo.min_data_size(&options).unwrap_err().kind(), ErrorKind::Option);
    }

    #[test]
    fn bounded_on_regular_data() {
        let result = Uo.calculate(&sample(40), &Options::new()).unwrap();
        assert_eq!(result.len(), 12);
        for v in field(&result, "uo") {
            assert!((0.0..=100.0).contains(&v));
        }
    }
}
