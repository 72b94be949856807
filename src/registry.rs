// =============================================================================
// Indicator registry
// =============================================================================
//
// Symbol -> indicator lookup plus a single dispatch entry point. Built once,
// never mutated afterwards, so a shared `&Registry` is safe across threads.
// =============================================================================

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::error::{IndicatorError, Result};
use crate::indicator::{Calculation, CalculationOutput, Indicator};
use crate::indicators;
use crate::options::Options;
use crate::types::PriceRecord;

pub struct Registry {
    indicators: BTreeMap<&'static str, Box<dyn Indicator>>,
}

impl Registry {
    /// Build a registry from `roster`. Symbols must be unique.
    pub fn new(roster: Vec<Box<dyn Indicator>>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for indicator in roster {
            let symbol = indicator.symbol();
            if map.insert(symbol, indicator).is_some() {
                return Err(IndicatorError::DuplicateSymbol(symbol.to_string()));
            }
        }
        info!(count = map.len(), "indicator registry ready");
        Ok(Self { indicators: map })
    }

    /// Registry holding every built-in indicator.
    pub fn standard() -> Result<Self> {
        Self::new(indicators::roster())
    }

    pub fn find(&self, symbol: &str) -> Option<&dyn Indicator> {
        self.indicators.get(symbol).map(|indicator| &**indicator)
    }

    /// Registered symbols in ascending order.
    pub fn symbols(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.indicators.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    /// Route `calculation` to the indicator registered under `symbol`.
    pub fn calculate(
        &self,
        symbol: &str,
        data: &[PriceRecord],
        calculation: Calculation,
        options: &Options,
    ) -> Result<CalculationOutput> {
        let indicator = self
            .find(symbol)
            .ok_or_else(|| IndicatorError::UnknownIndicator(symbol.to_string()))?;
        debug!(symbol, %calculation, records = data.len(), "dispatching calculation");

        let output = match calculation {
            Calculation::IndicatorName => CalculationOutput::Name(indicator.name()),
            Calculation::IndicatorSymbol => CalculationOutput::Symbol(indicator.symbol()),
            Calculation::MinDataSize => {
                CalculationOutput::MinDataSize(indicator.min_data_size(options)?)
            }
            Calculation::Technicals => {
                CalculationOutput::Technicals(indicator.calculate(data, options)?)
            }
            Calculation::ValidOptions => CalculationOutput::ValidOptions(indicator.valid_options()),
            Calculation::ValidateOptions => {
                indicator.validate_options(options)?;
                CalculationOutput::Validated(true)
            }
        };
        Ok(output)
    }

    /// Like [`Registry::calculate`], with the operation given by name. An
    /// unrecognised name yields `Ok(None)`.
    pub fn calculate_named(
        &self,
        symbol: &str,
        data: &[PriceRecord],
        calculation: &str,
        options: &Options,
    ) -> Result<Option<CalculationOutput>> {
        match Calculation::parse(calculation) {
            Some(calculation) => self.calculate(symbol, data, calculation, options).map(Some),
            None => {
                debug!(symbol, calculation, "unrecognised calculation");
                Ok(None)
            }
        }
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.indicators.keys()).finish()
    }
}
