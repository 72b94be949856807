// =============================================================================
// Engine errors
// =============================================================================
//
// Every failure is raised synchronously where it is detected. Callers get the
// full error or the full result, never a partial series.

use thiserror::Error;

/// Coarse grouping of [`IndicatorError`] variants, used by callers that
/// present errors to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unrecognised or out-of-domain option.
    Option,
    /// Missing/non-numeric fields, too few records, missing timestamps.
    Data,
    /// Unknown indicator symbol or calculation name.
    Lookup,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("unknown option `{key}`; valid options are: {}", .valid.join(", "))]
    UnknownOption { key: String, valid: Vec<String> },

    #[error("invalid value for option `{key}`: {reason}")]
    InvalidOption { key: String, reason: String },

    #[error("record {index} is missing field `{field}`")]
    MissingField { index: usize, field: String },

    #[error("record {index} has a non-numeric `{field}`")]
    NonNumericField { index: usize, field: String },

    #[error("insufficient data: required {required}, got {got}")]
    InsufficientData { required: usize, got: usize },

    #[error("record {index} has no usable timestamp in `{field}`")]
    MissingTimestamp { index: usize, field: String },

    #[error("indicator not found: {0}")]
    UnknownIndicator(String),

    #[error("unknown calculation: {0}")]
    UnknownCalculation(String),

    #[error("duplicate indicator symbol in roster: {0}")]
    DuplicateSymbol(String),
}

impl IndicatorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownOption { .. } | Self::InvalidOption { .. } => ErrorKind::Option,
            Self::MissingField { .. }
            | Self::NonNumericField { .. }
            | Self::InsufficientData { .. }
            | Self::MissingTimestamp { .. } => ErrorKind::Data,
            Self::UnknownIndicator(_)
            | Self::UnknownCalculation(_)
            | Self::DuplicateSymbol(_) => ErrorKind::Lookup,
        }
    }

    pub(crate) fn invalid_option(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IndicatorError>;
