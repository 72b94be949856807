// =============================================================================
// Average Directional Index (ADX)
// =============================================================================
//
// Emits `adx` together with the two directional indices it is built from.
//
//   +DM, -DM  directional moves between consecutive bars (the larger one
//             wins, the other is zeroed)
//   TR        true range against the previous close
//   +DI, -DI  100 * wilder_sum(DM) / wilder_sum(TR)      (0 if no range)
//   DX        100 * |+DI - -DI| / (+DI + -DI)            (0 if both are 0)
//   ADX       wilder(DX), first at row 2 * period - 1
// =============================================================================

use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::Common;
use crate::math::{ratio_or, true_range};
use crate::options::{Options, DATE_TIME_KEY, PERIOD, PRECISION};
use crate::smoothing::{wilder, wilder_sum};
use crate::types::{fields, PriceRecord, Technicals};
use crate::window::{newest_first, Frame};

pub const DEFAULT_PERIOD: usize = 14;

pub struct Adx;

impl Indicator for Adx {
    fn symbol(&self) -> &'static str {
        "adx"
    }

    fn name(&self) -> &'static str {
        "Average Directional Index"
    }

    fn valid_options(&self) -> &'static [&'static str] {
        &[PERIOD, DATE_TIME_KEY, PRECISION]
    }

    /// `period` bars seed the directional smoothing and another `period` DX
    /// values seed the ADX average.
    fn min_data_size(&self, options: &Options) -> Result<usize> {
        self.validate_options(options)?;
        Ok(options.period(PERIOD, DEFAULT_PERIOD)? * 2)
    }

    fn calculate(&self, data: &[PriceRecord], options: &Options) -> Result<Technicals> {
        let min_size = self.min_data_size(options)?;
        let period = min_size / 2;
        let common = Common::read(options)?;

        let frame = Frame::load(
            data,
            &common.date_time_key,
            &[fields::HIGH, fields::LOW, fields::CLOSE],
            min_size,
        )?;
        let (high, low, close) = (
            frame.column(fields::HIGH),
            frame.column(fields::LOW),
            frame.column(fields::CLOSE),
        );

        // ------------------------------------------------------------------
        // Raw +DM, -DM and TR; element j belongs to row j + 1
        // ------------------------------------------------------------------
        let mut plus_dm = Vec::with_capacity(frame.len());
        let mut minus_dm = Vec::with_capacity(frame.len());
        let mut tr_vals = Vec::with_capacity(frame.len());
        for i in 1..frame.len() {
            let up_move = high[i] - high[i - 1];
            let down_move = low[i - 1] - low[i];

            plus_dm.push(if up_move > down_move && up_move > 0.0 { up_move } else { 0.0 });
            minus_dm.push(if down_move > up_move && down_move > 0.0 { down_move } else { 0.0 });
            tr_vals.push(true_range(high[i], low[i], close[i - 1]));
        }

        // ------------------------------------------------------------------
        // Smoothed totals, DI and DX; element k belongs to row
        // period + k
        // ------------------------------------------------------------------
        let smooth_plus = wilder_sum(&plus_dm, period);
        let smooth_minus = wilder_sum(&minus_dm, period);
        let smooth_tr = wilder_sum(&tr_vals, period);

        let directional: Vec<(f64, f64)> = smooth_tr
            .iter()
            .zip(smooth_plus.iter().zip(&smooth_minus))
            .map(|(&tr, (&plus, &minus))| {
                (100.0 * ratio_or(plus, tr, 0.0), 100.0 * ratio_or(minus, tr, 0.0))
            })
            .collect();
        let dx: Vec<f64> = directional
            .iter()
            .map(|&(plus_di, minus_di)| {
                100.0 * ratio_or((plus_di - minus_di).abs(), plus_di + minus_di, 0.0)
            })
            .collect();

        // ------------------------------------------------------------------
        // ADX; element q belongs to row 2 * period - 1 + q
        // ------------------------------------------------------------------
        let values = wilder(&dx, period)
            .into_iter()
            .enumerate()
            .map(|(q, adx)| {
                let (di_pos, di_neg) = directional[period - 1 + q];
                frame.value(
                    2 * period - 1 + q,
                    common.precision,
                    &[("adx", adx), ("di_pos", di_pos), ("di_neg", di_neg)],
                )
            })
            .collect();

        Ok(Technicals::Series(newest_first(values)))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::indicators::test_data::{bars, field, sample, time};

    #[test]
    fn adx_insufficient_data() {
        let data = bars(&[(2.0, 0.5, 1.5, 1.0); 27]);
        let err = Adx.calculate(&data, &Options::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Data);
    }

    #[test]
    fn adx_strong_uptrend() {
        // Consecutive higher highs and higher lows.
        let rows: Vec<(f64, f64, f64, f64)> = (0..60)
            .map(|i| {
                let base = 100.0 + i as f64 * 2.0;
                (base + 1.5, base - 0.5, base + 1.0, 1.0)
            })
            .collect();
        let result = Adx.calculate(&bars(&rows), &Options::new()).unwrap();
        let latest = result.latest().unwrap();
        assert!(latest.get("adx").unwrap() > 25.0);
        assert!(latest.get("di_pos").unwrap() > latest.get("di_neg").unwrap());
    }

    #[test]
    fn adx_flat_market() {
        // Identical bars: no directional movement at all.
        let result = Adx.calculate(&bars(&[(101.0, 99.0, 100.0, 1.0); 60]), &Options::new()).unwrap();
        for adx in field(&result, "adx") {
            assert_eq!(adx, 0.0);
        }
    }

    #[test]
    fn adx_result_range() {
        let result = Adx.calculate(&sample(100), &Options::new()).unwrap();
        for value in result.into_values() {
            for name in ["adx", "di_pos", "di_neg"] {
                let v = value.get(name).unwrap();
                assert!((0.0..=100.0).contains(&v), "{name} {v} out of [0,100] range");
            }
        }
    }

    #[test]
    fn adx_minimum_bars_exact() {
        let period = 5;
        let rows: Vec<(f64, f64, f64, f64)> = (0..2 * period)
            .map(|i| {
                let base = 100.0 + i as f64;
                (base + 1.0, base - 0.5, base + 0.5, 1.0)
            })
            .collect();
        let options = Options::new().with(PERIOD, period);
        let result = Adx.calculate(&bars(&rows), &options).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.latest().unwrap().timestamp(), time(2 * period - 1));

        // One fewer should fail.
        assert!(Adx.calculate(&bars(&rows[..2 * period - 1]), &options).is_err());
    }
}
