// =============================================================================
// Input validation
// =============================================================================
//
// Pure checks run before any numeric work. The first violation is returned;
// nothing is computed for invalid input.

use crate::error::{IndicatorError, Result};
use crate::options::Options;
use crate::types::{format_timestamp, PriceRecord};

/// Reject any option key outside `allowed`. Missing keys are fine.
pub fn validate_options(options: &Options, allowed: &[&str]) -> Result<()> {
    match options.keys().find(|key| !allowed.contains(key)) {
        Some(key) => Err(IndicatorError::UnknownOption {
            key: key.to_string(),
            valid: allowed.iter().map(|k| k.to_string()).collect(),
        }),
        None => Ok(()),
    }
}

/// Every record must carry every field in `required` as a finite number.
pub fn validate_numeric_data(data: &[PriceRecord], required: &[&str]) -> Result<()> {
    for (index, record) in data.iter().enumerate() {
        for &field in required {
            if !record.contains(field) {
                return Err(IndicatorError::MissingField {
                    index,
                    field: field.to_string(),
                });
            }
            if record.number(field).is_none() {
                return Err(IndicatorError::NonNumericField {
                    index,
                    field: field.to_string(),
                });
            }
        }
    }
    Ok(())
}

pub fn validate_length(data: &[PriceRecord], min_size: usize) -> Result<()> {
    if data.len() < min_size {
        return Err(IndicatorError::InsufficientData {
            required: min_size,
            got: data.len(),
        });
    }
    Ok(())
}

/// Every record must carry a renderable millisecond timestamp under `key`.
pub fn validate_temporal_key(data: &[PriceRecord], key: &str) -> Result<()> {
    for (index, record) in data.iter().enumerate() {
        let usable = record
            .timestamp(key)
            .and_then(format_timestamp)
            .is_some();
        if !usable {
            return Err(IndicatorError::MissingTimestamp {
                index,
                field: key.to_string(),
            });
        }
    }
    Ok(())
}
