// =============================================================================
// Windowing and ordering
// =============================================================================
//
// Indicators never read the caller's records directly. `Frame::load` runs the
// data validation and copies the requested fields into columns sorted
// oldest-first (stable on equal timestamps). Recurrences walk those columns
// in order; results are handed back newest-first.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::ops::Range;

use crate::error::Result;
use crate::types::{IndicatorValue, PriceRecord};
use crate::validation::{validate_length, validate_numeric_data, validate_temporal_key};

/// Chronologically ordered, validated copy of the fields an indicator reads.
#[derive(Debug, Clone)]
pub struct Frame {
    times: Vec<i64>,
    columns: BTreeMap<String, Vec<f64>>,
}

impl Frame {
    /// Validate `data` (numeric fields, length, timestamps, in that order) and
    /// build the sorted frame.
    pub fn load(
        data: &[PriceRecord],
        date_time_key: &str,
        fields: &[&str],
        min_size: usize,
    ) -> Result<Self> {
        validate_numeric_data(data, fields)?;
        validate_length(data, min_size)?;
        validate_temporal_key(data, date_time_key)?;

        let mut rows: Vec<(i64, &PriceRecord)> = data
            .iter()
            .map(|record| (record.timestamp(date_time_key).unwrap_or_default(), record))
            .collect();
        // `sort_by_key` is stable: equal timestamps keep their input order.
        rows.sort_by_key(|(time, _)| *time);

        let columns = fields
            .iter()
            .map(|&field| {
                let column = rows
                    .iter()
                    .map(|(_, record)| record.number(field).unwrap_or_default())
                    .collect();
                (field.to_string(), column)
            })
            .collect();

        Ok(Self {
            times: rows.into_iter().map(|(time, _)| time).collect(),
            columns,
        })
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn time(&self, index: usize) -> i64 {
        self.times[index]
    }

    /// Column for `field`, oldest first. Empty if the field was not loaded.
    pub fn column(&self, field: &str) -> &[f64] {
        self.columns.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Build a result stamped with the timestamp of row `index`.
    pub fn value(&self, index: usize, precision: u32, values: &[(&'static str, f64)]) -> IndicatorValue {
        IndicatorValue::new(self.time(index), precision, values)
    }
}

/// Apply `f` to every full window of `period` values, advancing one value at
/// a time. Yields `(index of the newest value, f(window))`.
pub fn rolling<'a, T: 'a>(
    values: &'a [f64],
    period: usize,
    mut f: impl FnMut(&[f64]) -> T + 'a,
) -> impl Iterator<Item = (usize, T)> + 'a {
    let period = period.max(1);
    values
        .windows(period)
        .enumerate()
        .map(move |(start, window)| (start + period - 1, f(window)))
}

/// Index ranges of the newest full window and of the full window ending one
/// row earlier, if the data is long enough for it.
pub fn latest_windows(len: usize, period: usize) -> (Range<usize>, Option<Range<usize>>) {
    let current = len.saturating_sub(period)..len;
    let previous = (len > period).then(|| len - period - 1..len - 1);
    (current, previous)
}

/// Turn chronologically built results into the newest-first output order.
/// Stable: results sharing a timestamp keep the order they were built in.
pub fn newest_first(mut values: Vec<IndicatorValue>) -> Vec<IndicatorValue> {
    values.sort_by_key(|value| Reverse(value.timestamp()));
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, IndicatorError};

    fn record(t: i64, close: f64) -> PriceRecord {
        PriceRecord::new().with("open_time", t).with("close", close)
    }

    #[test]
    fn load_sorts_oldest_first() {
        let data = vec![record(3, 30.0), record(1, 10.0), record(2, 20.0)];
        let frame = Frame::load(&data, "open_time", &["close"], 1).unwrap();
        assert_eq!(frame.column("close"), &[10.0, 20.0, 30.0]);
        assert_eq!(frame.time(0), 1);
        assert_eq!(frame.len(), 3);
        // The caller's slice is untouched.
        assert_eq!(data[0].number("close"), Some(30.0));
    }

    #[test]
    fn load_keeps_input_order_for_equal_timestamps() {
        let data = vec![record(2, 1.0), record(1, 2.0), record(2, 3.0), record(2, 4.0)];
        let frame = Frame::load(&data, "open_time", &["close"], 1).unwrap();
        assert_eq!(frame.column("close"), &[2.0, 1.0, 3.0, 4.0]);
    }

    #[test]
    fn load_validates_before_sorting() {
        let data = vec![record(1, 1.0)];
        assert_eq!(
            Frame::load(&data, "open_time", &["close"], 2).unwrap_err(),
            IndicatorError::InsufficientData { required: 2, got: 1 }
        );
        let err = Frame::load(&data, "open_time", &["volume"], 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Data);
        let err = Frame::load(&data, "start_time", &["close"], 1).unwrap_err();
        assert!(matches!(err, IndicatorError::MissingTimestamp { .. }));
    }

    #[test]
    fn unknown_column_is_empty() {
        let frame = Frame::load(&[record(1, 1.0)], "open_time", &["close"], 1).unwrap();
        assert!(frame.column("high").is_empty());
    }

    #[test]
    fn rolling_emits_only_full_windows() {
        let values = [1.0, 2.0, 3.0, 4.0];
        let sums: Vec<(usize, f64)> = rolling(&values, 3, |w| w.iter().sum()).collect();
        assert_eq!(sums, vec![(2, 6.0), (3, 9.0)]);
        assert_eq!(rolling(&values, 5, |w| w.len()).count(), 0);
    }

    #[test]
    fn latest_windows_ranges() {
        assert_eq!(latest_windows(5, 3), (2..5, Some(1..4)));
        assert_eq!(latest_windows(3, 3), (0..3, None));
    }

    #[test]
    fn newest_first_sorts_descending() {
        let values = vec![
            IndicatorValue::new(1, 2, &[("v", 1.0)]),
            IndicatorValue::new(2, 2, &[("v", 2.0)]),
        ];
        let ordered = newest_first(values);
        assert_eq!(ordered[0].timestamp(), 2);
        assert_eq!(ordered[1].timestamp(), 1);
    }

    #[test]
    fn newest_first_keeps_build_order_on_equal_timestamps() {
        let values = vec![
            IndicatorValue::new(1, 2, &[("v", 1.0)]),
            IndicatorValue::new(2, 2, &[("v", 2.0)]),
            IndicatorValue::new(2, 2, &[("v", 3.0)]),
            IndicatorValue::new(3, 2, &[("v", 4.0)]),
        ];
        let order: Vec<f64> = newest_first(values)
            .iter()
            .map(|v| v.get("v").unwrap())
            .collect();
        assert_eq!(order, vec![4.0, 2.0, 3.0, 1.0]);
    }
}
