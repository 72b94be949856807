// =============================================================================
// Relative Strength Index (RSI), Wilder's smoothing
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes to evaluate
// whether an asset is overbought or oversold.
//
// Step 1: Compute price changes from consecutive prices and split them into
//         gains and losses.
// Step 2: Seed average gain / average loss with the mean of the first
//         `period` gains / losses.
// Step 3: Apply Wilder's smoothing:
//           avg_gain = (prev_avg_gain * (period - 1) + current_gain) / period
//           avg_loss = (prev_avg_loss * (period - 1) + current_loss) / period
// Step 4: RS  = avg_gain / avg_loss
//         RSI = 100 - 100 / (1 + RS)
//
// With no losses in the window RSI saturates at 100.
// =============================================================================

use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::Common;
use crate::options::{Options, DATE_TIME_KEY, PERIOD, PRECISION, PRICE_KEY};
use crate::smoothing::wilder;
use crate::types::{PriceRecord, Technicals};
use crate::window::{newest_first, Frame};

pub const DEFAULT_PERIOD: usize = 14;

pub struct Rsi;

impl Indicator for Rsi {
    fn symbol(&self) -> &'static str {
        "rsi"
    }

    fn name(&self) -> &'static str {
        "Relative Strength Index"
    }

    fn valid_options(&self) -> &'static [&'static str] {
        &[PERIOD, PRICE_KEY, DATE_TIME_KEY, PRECISION]
    }

    fn min_data_size(&self, options: &Options) -> Result<usize> {
        self.validate_options(options)?;
        Ok(options.period(PERIOD, DEFAULT_PERIOD)? + 1)
    }

    fn calculate(&self, data: &[PriceRecord], options: &Options) -> Result<Technicals> {
        let min_size = self.min_data_size(options)?;
        let period = min_size - 1;
        let price_key = options.price_key()?;
        let common = Common::read(options)?;

        let frame = Frame::load(data, &common.date_time_key, &[price_key.as_str()], min_size)?;

        // --- Gains and losses ----------------------------------------------
        let (gains, losses): (Vec<f64>, Vec<f64>) = frame
            .column(&price_key)
            .windows(2)
            .map(|w| {
                let delta = w[1] - w[0];
                (delta.max(0.0), (-delta).max(0.0))
            })
            .unzip();

        // --- Wilder's smoothing; element k belongs to row period + k ---------
        let values = wilder(&gains, period)
            .into_iter()
            .zip(wilder(&losses, period))
            .enumerate()
            .map(|(k, (avg_gain, avg_loss))| {
                let rsi = rsi_from_averages(avg_gain, avg_loss);
                frame.value(period + k, common.precision, &[("rsi", rsi)])
            })
            .collect();

        Ok(Technicals::Series(newest_first(values)))
    }
}

/// Convert average gain / average loss into an RSI value in [0, 100].
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}
