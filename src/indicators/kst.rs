// =============================================================================
// Know Sure Thing (KST)
// =============================================================================
//
// Four rate-of-change stages, each smoothed by its own SMA and weighted 1..4:
//
//   ROC_i(j)  = percent change across the roc_i records ending at j
//   RCMA_i    = SMA(ROC_i, sma_i)
//   KST       = RCMA_1 + 2 * RCMA_2 + 3 * RCMA_3 + 4 * RCMA_4
// =============================================================================

use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::Common;
use crate::math::{average, percent_change};
use crate::options::{Options, DATE_TIME_KEY, PRECISION, PRICE_KEY};
use crate::types::{PriceRecord, Technicals};
use crate::window::{newest_first, Frame};

const ROC_KEYS: [&str; 4] = ["roc1", "roc2", "roc3", "roc4"];
const SMA_KEYS: [&str; 4] = ["sma1", "sma2", "sma3", "sma4"];

pub const DEFAULT_ROC_PERIODS: [usize; 4] = [10, 15, 20, 30];
pub const DEFAULT_SMA_PERIODS: [usize; 4] = [10, 10, 10, 15];

#[derive(Debug, Clone, Copy)]
struct Stage {
    roc: usize,
    sma: usize,
}

impl Stage {
    fn span(&self) -> usize {
        self.roc + self.sma - 1
    }

    /// Smoothed rate of change for the window ending at row `i`.
    fn rcma(&self, prices: &[f64], i: usize) -> f64 {
        let rates: Vec<f64> = (i + 1 - self.sma..=i)
            .map(|j| percent_change(prices[j + 1 - self.roc], prices[j]))
            .collect();
        average(&rates)
    }
}

pub struct Kst;

impl Kst {
    fn stages(&self, options: &Options) -> Result<[Stage; 4]> {
        self.validate_options(options)?;
        let mut stages = [Stage { roc: 1, sma: 1 }; 4];
        for (n, stage) in stages.iter_mut().enumerate() {
            stage.roc = options.period(ROC_KEYS[n], DEFAULT_ROC_PERIODS[n])?;
            stage.sma = options.period(SMA_KEYS[n], DEFAULT_SMA_PERIODS[n])?;
        }
        Ok(stages)
    }
}

impl Indicator for Kst {
    fn symbol(&self) -> &'static str {
        "kst"
    }

    fn name(&self) -> &'static str {
        "Know Sure Thing"
    }

    fn valid_options(&self) -> &'static [&'static str] {
        &[
            "roc1",
            "roc2",
            "roc3",
            "roc4",
            "sma1",
            "sma2",
            "sma3",
            "sma4",
            PRICE_KEY,
            DATE_TIME_KEY,
            PRECISION,
        ]
    }

    fn min_data_size(&self, options: &Options) -> Result<usize> {
        let stages = self.stages(options)?;
        Ok(stages.iter().map(Stage::span).max().unwrap_or(1))
    }

    fn calculate(&self, data: &[PriceRecord], options: &Options) -> Result<Technicals> {
        let stages = self.stages(options)?;
        let min_size = stages.iter().map(Stage::span).max().unwrap_or(1);
        let price_key = options.price_key()?;
        let common = Common::read(options)?;

        let frame = Frame::load(data, &common.date_time_key, &[price_key.as_str()], min_size)?;
        let prices = frame.column(&price_key);

        let values = (min_size - 1..frame.len())
            .map(|i| {
                let kst = stages
                    .iter()
                    .enumerate()
                    .map(|(n, stage)| (n + 1) as f64 * stage.rcma(prices, i))
                    .sum::<f64>();
                frame.value(i, common.precision, &[("kst", kst)])
            })
            .collect();

        Ok(Technicals::Series(newest_first(values)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_data::{assert_close, closes, field, precise};

    fn unit_stages() -> Options {
        ROC_KEYS
            .iter()
            .chain(SMA_KEYS.iter())
            .fold(precise(), |options, key| options.with(key, 2))
    }

    #[test]
    fn default_minimum_is_longest_stage() {
        assert_eq!(Kst.min_data_size(&Options::new()).unwrap(), 44);
    }

    #[test]
    fn weighted_sum_of_identical_stages() {
        // Every stage: rate over 2 records, averaged over 2 rates.
        let data = closes(&[100.0, 110.0, 121.0]);
        let result = Kst.calculate(&data, &unit_stages()).unwrap();
        let kst = field(&result, "kst");
        assert_eq!(kst.len(), 1);
        // Both rates are 10% => each RCMA is 10, weights sum to 10.
        assert_close(kst[0], 100.0);
    }

    #[test]
    fn flat_prices_read_zero() {
        let result = Kst.calculate(&closes(&[7.0; 50]), &Options::new()).unwrap();
        assert_eq!(result.len(), 7);
        assert!(field(&result, "kst").iter().all(|&v| v == 0.0));
    }
}
