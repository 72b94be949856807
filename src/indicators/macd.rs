// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
//   MACD line   = EMA(price, fast_period) - EMA(price, slow_period)
//   Signal line = EMA(MACD line, signal_period)
//   Histogram   = MACD line - Signal line
//
// Reported as a pair: the newest record and the one before it, when the
// signal line already exists there.
// =============================================================================

use crate::error::{IndicatorError, Result};
use crate::indicator::Indicator;
use crate::indicators::Common;
use crate::options::{Options, DATE_TIME_KEY, PRECISION, PRICE_KEY};
use crate::smoothing::ema;
use crate::types::{PriceRecord, Technicals};
use crate::window::Frame;

pub const DEFAULT_FAST_PERIOD: usize = 12;
pub const DEFAULT_SLOW_PERIOD: usize = 26;
pub const DEFAULT_SIGNAL_PERIOD: usize = 9;

const FAST_PERIOD: &str = "fast_period";
const SLOW_PERIOD: &str = "slow_period";
const SIGNAL_PERIOD: &str = "signal_period";

struct Periods {
    fast: usize,
    slow: usize,
    signal: usize,
}

pub struct Macd;

impl Macd {
    fn periods(&self, options: &Options) -> Result<Periods> {
        self.validate_options(options)?;
        let periods = Periods {
            fast: options.period(FAST_PERIOD, DEFAULT_FAST_PERIOD)?,
            slow: options.period(SLOW_PERIOD, DEFAULT_SLOW_PERIOD)?,
            signal: options.period(SIGNAL_PERIOD, DEFAULT_SIGNAL_PERIOD)?,
        };
        if periods.fast > periods.slow {
            return Err(IndicatorError::invalid_option(
                FAST_PERIOD,
                format!("must not exceed {SLOW_PERIOD} ({})", periods.slow),
            ));
        }
        Ok(periods)
    }
}

impl Indicator for Macd {
    fn symbol(&self) -> &'static str {
        "macd"
    }

    fn name(&self) -> &'static str {
        "Moving Average Convergence Divergence"
    }

    fn valid_options(&self) -> &'static [&'static str] {
        &[
            FAST_PERIOD,
            SLOW_PERIOD,
            SIGNAL_PERIOD,
            PRICE_KEY,
            DATE_TIME_KEY,
            PRECISION,
        ]
    }

    fn min_data_size(&self, options: &Options) -> Result<usize> {
        let Periods { slow, signal, .. } = self.periods(options)?;
        Ok(slow + signal - 1)
    }

    fn calculate(&self, data: &[PriceRecord], options: &Options) -> Result<Technicals> {
        let Periods { fast, slow, signal } = self.periods(options)?;
        let price_key = options.price_key()?;
        let common = Common::read(options)?;

        let frame = Frame::load(
            data,
            &common.date_time_key,
            &[price_key.as_str()],
            slow + signal - 1,
        )?;
        let prices = frame.column(&price_key);

        // Both EMAs aligned on the slow one: element k belongs to row slow - 1 + k.
        let fast_ema = ema(prices, fast);
        let slow_ema = ema(prices, slow);
        let macd_line: Vec<f64> = slow_ema
            .iter()
            .enumerate()
            .map(|(k, slow_value)| fast_ema[k + slow - fast] - slow_value)
            .collect();

        // Element s belongs to row slow + signal - 2 + s.
        let signal_line = ema(&macd_line, signal);

        let evaluate = |s: usize| {
            let macd = macd_line[signal - 1 + s];
            let signal_value = signal_line[s];
            frame.value(
                slow + signal - 2 + s,
                common.precision,
                &[
                    ("macd_line", macd),
                    ("signal_line", signal_value),
                    ("macd_histogram", macd - signal_value),
                ],
            )
        };

        let newest = signal_line.len() - 1;
        Ok(Technicals::Pair {
            current: evaluate(newest),
            previous: newest.checked_sub(1).map(evaluate),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::indicators::test_data::{assert_close, closes, precise, time};

    fn small() -> Options {
        precise()
            .with(FAST_PERIOD, 2)
            .with(SLOW_PERIOD, 3)
            .with(SIGNAL_PERIOD, 2)
    }

    #[test]
    fn hand_computed_lines() {
        let data = closes(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let Technicals::Pair { current, previous } = Macd.calculate(&data, &small()).unwrap()
        else {
            panic!("macd reports a pair");
        };
        // fast EMA(2): 1.5, 2.5, 3.5, 4.5; slow EMA(3): 2, 3, 4
        // MACD line: 0.5, 0.5, 0.5; signal EMA(2): 0.5, 0.5
        assert_close(current.get("macd_line").unwrap(), 0.5);
        assert_close(current.get("signal_line").unwrap(), 0.5);
        assert_close(current.get("macd_histogram").unwrap(), 0.0);
        assert_eq!(current.timestamp(), time(4));

        let previous = previous.expect("two signal values");
        assert_eq!(previous.timestamp(), time(3));
    }

    #[test]
    fn no_previous_at_minimum_size() {
        let data = closes(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(Macd.min_data_size(&small()).unwrap(), 4);
        let result = Macd.calculate(&data, &small()).unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn constant_prices_have_flat_lines() {
        let result = Macd.calculate(&closes(&[50.0; 40]), &Options::new()).unwrap();
        for value in result.into_values() {
            assert_eq!(value.get("macd_line"), Some(0.0));
            assert_eq!(value.get("signal_line"), Some(0.0));
        }
    }

    #[test]
    fn fast_above_slow_is_rejected() {
        let options = Options::new().with(FAST_PERIOD, 30).with(SLOW_PERIOD, 26);
        let err = Macd.calculate(&closes(&[1.0; 40]), &options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Option);
    }

    #[test]
    fn default_minimum_is_thirty_four() {
        assert_eq!(Macd.min_data_size(&Options::new()).unwrap(), 34);
    }
}
