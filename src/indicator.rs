// =============================================================================
// Indicator contract
// =============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{IndicatorError, Result};
use crate::options::Options;
use crate::types::{PriceRecord, Technicals};
use crate::validation;

/// The capability set every indicator exposes to the registry.
///
/// Implementations are stateless: everything a calculation needs comes in
/// through `data` and `options`, so one instance serves concurrent callers.
pub trait Indicator: Send + Sync {
    /// Unique lowercase registry key, e.g. `"rsi"`.
    fn symbol(&self) -> &'static str;

    /// Display name, e.g. `"Relative Strength Index"`.
    fn name(&self) -> &'static str;

    /// Option names this indicator recognises.
    fn valid_options(&self) -> &'static [&'static str];

    fn validate_options(&self, options: &Options) -> Result<()> {
        validation::validate_options(options, self.valid_options())
    }

    /// Minimum number of records `calculate` needs with these options.
    fn min_data_size(&self, options: &Options) -> Result<usize>;

    fn calculate(&self, data: &[PriceRecord], options: &Options) -> Result<Technicals>;
}

impl fmt::Debug for dyn Indicator + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Indicator")
            .field("symbol", &self.symbol())
            .field("name", &self.name())
            .finish()
    }
}

// =============================================================================
// Dispatchable operations
// =============================================================================

/// Operations the registry can route to an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Calculation {
    IndicatorName,
    IndicatorSymbol,
    MinDataSize,
    Technicals,
    ValidOptions,
    ValidateOptions,
}

impl Calculation {
    pub const ALL: [Calculation; 6] = [
        Self::IndicatorName,
        Self::IndicatorSymbol,
        Self::MinDataSize,
        Self::Technicals,
        Self::ValidOptions,
        Self::ValidateOptions,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::IndicatorName => "indicator_name",
            Self::IndicatorSymbol => "indicator_symbol",
            Self::MinDataSize => "min_data_size",
            Self::Technicals => "technicals",
            Self::ValidOptions => "valid_options",
            Self::ValidateOptions => "validate_options",
        }
    }

    /// Look up an operation by name; `None` means "not applicable".
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl Default for Calculation {
    fn default() -> Self {
        Self::Technicals
    }
}

impl fmt::Display for Calculation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Calculation {
    type Err = IndicatorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| IndicatorError::UnknownCalculation(s.to_string()))
    }
}

/// Result of a dispatched [`Calculation`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CalculationOutput {
    Name(&'static str),
    Symbol(&'static str),
    MinDataSize(usize),
    Technicals(Technicals),
    ValidOptions(&'static [&'static str]),
    /// Options passed validation.
    Validated(bool),
}

impl CalculationOutput {
    pub fn technicals(&self) -> Option<&Technicals> {
        match self {
            Self::Technicals(t) => Some(t),
            _ => None,
        }
    }

    pub fn into_technicals(self) -> Option<Technicals> {
        match self {
            Self::Technicals(t) => Some(t),
            _ => None,
        }
    }
}
