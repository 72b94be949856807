// =============================================================================
// Daily Log Return (DLR)
// =============================================================================
//
//   DLR = ln(price / prev price)
//
// Undefined for non-positive prices; those steps read 0.
// =============================================================================

use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::Common;
use crate::options::{Options, DATE_TIME_KEY, PRECISION, PRICE_KEY};
use crate::types::{PriceRecord, Technicals};
use crate::window::{newest_first, Frame};

pub struct Dlr;

impl Indicator for Dlr {
    fn symbol(&self) -> &'static str {
        "dlr"
    }

    fn name(&self) -> &'static str {
        "Daily Log Return"
    }

    fn valid_options(&self) -> &'static [&'static str] {
        &[PRICE_KEY, DATE_TIME_KEY, PRECISION]
    }

    fn min_data_size(&self, options: &Options) -> Result<usize> {
        self.validate_options(options)?;
        Ok(2)
    }

    fn calculate(&self, data: &[PriceRecord], options: &Options) -> Result<Technicals> {
        let min_size = self.min_data_size(options)?;
        let price_key = options.price_key()?;
        let common = Common::read(options)?;

        let frame = Frame::load(data, &common.date_time_key, &[price_key.as_str()], min_size)?;
        let prices = frame.column(&price_key);

        let values = prices
            .windows(2)
            .enumerate()
            .map(|(k, pair)| {
                let dlr = if pair[0] > 0.0 && pair[1] > 0.0 {
                    (pair[1] / pair[0]).ln()
                } else {
                    0.0
                };
                frame.value(k + 1, common.precision, &[("dlr", dlr)])
            })
            .collect();

        Ok(Technicals::Series(newest_first(values)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_data::{assert_close, closes, field, precise};

    #[test]
    fn log_returns_sum_to_total_log_return() {
        let prices = [100.0, 105.0, 98.0, 120.0];
        let result = Dlr.calculate(&closes(&prices), &precise()).unwrap();
        let dlr = field(&result, "dlr");
        assert_eq!(dlr.len(), 3);
        assert_close(dlr[2], (105.0_f64 / 100.0).ln());
        assert_close(dlr.iter().sum::<f64>(), (120.0_f64 / 100.0).ln());
    }

    #[test]
    fn non_positive_prices_read_zero() {
        let result = Dlr.calculate(&closes(&[0.0, 5.0, -1.0]), &Options::new()).unwrap();
        assert_eq!(field(&result, "dlr"), vec![0.0, 0.0]);
    }
}
