// =============================================================================
// Stochastic Oscillator (SR)
// =============================================================================
//
//   %K     = (close - lowest low) / (highest high - lowest low) * 100
//   signal = SMA(%K, signal_period)
//
// A window with no range reads 50.
// =============================================================================

use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::Common;
use crate::math::{average, max, min};
use crate::options::{Options, DATE_TIME_KEY, PERIOD, PRECISION};
use crate::types::{fields, PriceRecord, Technicals};
use crate::window::{newest_first, rolling, Frame};

pub const DEFAULT_PERIOD: usize = 14;
pub const DEFAULT_SIGNAL_PERIOD: usize = 3;

const SIGNAL_PERIOD: &str = "signal_period";

pub struct Sr;

impl Sr {
    fn periods(&self, options: &Options) -> Result<(usize, usize)> {
        self.validate_options(options)?;
        Ok((
            options.period(PERIOD, DEFAULT_PERIOD)?,
            options.period(SIGNAL_PERIOD, DEFAULT_SIGNAL_PERIOD)?,
        ))
    }
}

impl Indicator for Sr {
    fn symbol(&self) -> &'static str {
        "sr"
    }

    fn name(&self) -> &'static str {
        "Stochastic Oscillator"
    }

    fn valid_options(&self) -> &'static [&'static str] {
        &[PERIOD, SIGNAL_PERIOD, DATE_TIME_KEY, PRECISION]
    }

    fn min_data_size(&self, options: &Options) -> Result<usize> {
        let (period, signal) = self.periods(options)?;
        Ok(period + signal - 1)
    }

    fn calculate(&self, data: &[PriceRecord], options: &Options) -> Result<Technicals> {
        let (period, signal) = self.periods(options)?;
        let common = Common::read(options)?;

        let frame = Frame::load(
            data,
            &common.date_time_key,
            &[fields::HIGH, fields::LOW, fields::CLOSE],
            period + signal - 1,
        )?;
        let (high, low, close) = (
            frame.column(fields::HIGH),
            frame.column(fields::LOW),
            frame.column(fields::CLOSE),
        );

        // %K; element k belongs to row period - 1 + k.
        let stochastic: Vec<f64> = (period - 1..frame.len())
            .map(|i| {
                let window = i + 1 - period..i + 1;
                let highest = max(&high[window.clone()]);
                let lowest = min(&low[window]);
                if highest == lowest {
                    50.0
                } else {
                    (close[i] - lowest) / (highest - lowest) * 100.0
                }
            })
            .collect();

        let values = rolling(&stochastic, signal, average)
            .map(|(k, sr_signal)| {
                frame.value(
                    period - 1 + k,
                    common.precision,
                    &[("sr", stochastic[k]), ("sr_signal", sr_signal)],
                )
            })
            .collect();

        Ok(Technicals::Series(newest_first(values)))
    }
}
