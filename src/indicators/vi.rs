// =============================================================================
// Vortex Indicator (VI)
// =============================================================================
//
//   VM+ = |high - prev low|
//   VM- = |low - prev high|
//   VI+ = sum(VM+, period) / sum(TR, period)
//   VI- = sum(VM-, period) / sum(TR, period)
//
// A window whose true ranges sum to zero reads 0 on both lines.
// =============================================================================

use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::atr::true_ranges;
use crate::indicators::Common;
use crate::math::{ratio_or, sum};
use crate::options::{Options, DATE_TIME_KEY, PERIOD, PRECISION};
use crate::types::{fields, PriceRecord, Technicals};
use crate::window::{newest_first, Frame};

pub const DEFAULT_PERIOD: usize = 14;

pub struct Vi;

impl Indicator for Vi {
    fn symbol(&self) -> &'static str {
        "vi"
    }

    fn name(&self) -> &'static str {
        "Vortex Indicator"
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
            &[fields::HIGH, fields::LOW, fields::CLOSE],
            min_size,
        )?;
        let (high, low) = (frame.column(fields::HIGH), frame.column(fields::LOW));

        // Element j belongs to row j + 1.
        let ranges = true_ranges(&frame);
        let (plus, minus): (Vec<f64>, Vec<f64>) = (1..frame.len())
            .map(|i| ((high[i] - low[i - 1]).abs(), (low[i] - high[i - 1]).abs()))
            .unzip();

        let values = (period - 1..ranges.len())
            .map(|j| {
                let window = j + 1 - period..j + 1;
                let total_range = sum(&ranges[window.clone()]);
                frame.value(
                    j + 1,
                    common.precision,
                    &[
                        ("positive_vi", ratio_or(sum(&plus[window.clone()]), total_range, 0.0)),
                        ("negative_vi", ratio_or(sum(&minus[window]), total_range, 0.0)),
                    ],
                )
            })
            .collect();

        Ok(Technicals::Series(newest_first(values)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_data::{assert_close, bars, precise, time};

    #[test]
    fn vortex_movement_over_true_range() {
        let data = bars(&[
            (10.0, 8.0, 9.0, 1.0),
            (12.0, 9.0, 11.0, 1.0),
            (13.0, 10.0, 12.0, 1.0),
        ]);
        let result = Vi.calculate(&data, &precise().with(PERIOD, 2)).unwrap();
        let vi = result.latest().unwrap();
        // VM+: 4, 4; VM-: 1, 2; TR: 3, 3
        assert_close(vi.get("positive_vi").unwrap(), 8.0 / 6.0);
        assert_close(vi.get("negative_vi").unwrap(), 3.0 / 6.0);
        assert_eq!(vi.timestamp(), time(2));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn zero_range_reads_zero() {
        let data = bars(&[(5.0, 5.0, 5.0, 1.0); 4]);
        let result = Vi.calculate(&data, &Options::new().with(PERIOD, 3)).unwrap();
        let vi = result.latest().unwrap();
        assert_eq!(vi.get("positive_vi"), Some(0.0));
        assert_eq!(vi.get("negative_vi"), Some(0.0));
    }
}
