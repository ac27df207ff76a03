//! Area stacker
//!
//! Orders the stacked series by when they first "turn on" and accumulates
//! them into baseline/top pairs per record.

use std::collections::HashSet;

use curve_core::{InvalidInput, Result, SeriesAccessor, SeriesKey};

/// A series counts as active once its value exceeds this
pub const DEFAULT_ACTIVATION_THRESHOLD: f64 = 0.1;

/// Read one series value, turning an absent field into an input error
pub(crate) fn read_value<R, A>(accessor: &A, record: &R, key: &SeriesKey, index: usize) -> Result<f64>
where
    A: SeriesAccessor<R> + ?Sized,
{
    accessor
        .value(record, key)
        .ok_or_else(|| InvalidInput::MissingSeriesValue {
            key: key.to_string(),
            index,
        })
}

/// Reject an empty key set and repeated keys
pub fn validate_keys(keys: &[SeriesKey]) -> Result<()> {
    if keys.is_empty() {
        return Err(InvalidInput::NoSeriesKeys);
    }
    let mut seen = HashSet::with_capacity(keys.len());
    for key in keys {
        if !seen.insert(key) {
            return Err(InvalidInput::DuplicateSeriesKey(key.to_string()));
        }
    }
    Ok(())
}

/// One `(baseline, top)` pair; `top - baseline` is the record's own value
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StackPoint {
    pub baseline: f64,
    pub top: f64,
}

impl StackPoint {
    pub fn value(&self) -> f64 {
        self.top - self.baseline
    }
}

/// Stacked output for a single key, one point per record
#[derive(Debug, Clone, PartialEq)]
pub struct StackedSeries {
    pub key: SeriesKey,
    pub points: Vec<StackPoint>,
}

/// All stacked series, bottom layer first
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stack {
    pub series: Vec<StackedSeries>,
}

impl Stack {
    /// Keys in stacking order
    pub fn order(&self) -> impl Iterator<Item = &SeriesKey> + '_ {
        self.series.iter().map(|s| &s.key)
    }

    /// Stacked total per record (top of the last layer)
    pub fn totals(&self) -> Vec<f64> {
        self.series
            .last()
            .map(|s| s.points.iter().map(|p| p.top).collect())
            .unwrap_or_default()
    }

    pub fn total_at(&self, index: usize) -> Option<f64> {
        self.series.last()?.points.get(index).map(|p| p.top)
    }
}

/// Configurable stacker; the threshold decides when a series activates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaStacker {
    pub activation_threshold: f64,
}

impl Default for AreaStacker {
    fn default() -> Self {
        Self {
            activation_threshold: DEFAULT_ACTIVATION_THRESHOLD,
        }
    }
}

impl AreaStacker {
    pub fn new(activation_threshold: f64) -> Self {
        Self { activation_threshold }
    }

    /// First record index whose value for `key` exceeds the threshold
    pub fn activation_index<R, A>(&self, records: &[R], key: &SeriesKey, accessor: &A) -> Result<Option<usize>>
    where
        A: SeriesAccessor<R> + ?Sized,
    {
        for (index, record) in records.iter().enumerate() {
            if read_value(accessor, record, key, index)? > self.activation_threshold {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    /// Keys sorted ascending by activation index.
    ///
    /// Never-activating keys go last. The sort is stable, so keys with equal
    /// activation (including two that never activate) keep the caller's order.
    pub fn order_keys<R, A>(&self, records: &[R], keys: &[SeriesKey], accessor: &A) -> Result<Vec<SeriesKey>>
    where
        A: SeriesAccessor<R> + ?Sized,
    {
        let mut ranked = Vec::with_capacity(keys.len());
        for key in keys {
            ranked.push((self.activation_index(records, key, accessor)?, key));
        }

        ranked.sort_by_key(|(activation, _)| activation.unwrap_or(usize::MAX));

        Ok(ranked.into_iter().map(|(_, key)| key.clone()).collect())
    }

    /// Order the keys, then accumulate each record's values bottom-up
    pub fn stack<R, A>(&self, records: &[R], keys: &[SeriesKey], accessor: &A) -> Result<Stack>
    where
        A: SeriesAccessor<R> + ?Sized,
    {
        validate_keys(keys)?;
        let order = self.order_keys(records, keys, accessor)?;

        let mut running = vec![0.0_f64; records.len()];
        let mut series = Vec::with_capacity(order.len());

        for key in order {
            let mut points = Vec::with_capacity(records.len());
            for (index, record) in records.iter().enumerate() {
                let value = read_value(accessor, record, &key, index)?;
                let baseline = running[index];
                let top = baseline + value;
                running[index] = top;
                points.push(StackPoint { baseline, top });
            }
            series.push(StackedSeries { key, points });
        }

        tracing::debug!(
            series = series.len(),
            records = records.len(),
            "stacked area series"
        );

        Ok(Stack { series })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curve_core::series_keys;

    #[derive(Debug, Clone)]
    struct Row {
        time: f64,
        category1: f64,
        category2: f64,
        category3: f64,
    }

    fn row(time: f64, c1: f64, c2: f64, c3: f64) -> Row {
        Row {
            time,
            category1: c1,
            category2: c2,
            category3: c3,
        }
    }

    fn field(r: &Row, key: &SeriesKey) -> Option<f64> {
        match key.as_str() {
            "category1" => Some(r.category1),
            "category2" => Some(r.category2),
            "category3" => Some(r.category3),
            _ => None,
        }
    }

    fn sample() -> Vec<Row> {
        vec![
            row(0.0, 2.0, 3.0, 5.0),
            row(1.0, 3.0, 4.0, 7.0),
            row(2.0, 4.0, 5.0, 9.0),
            row(3.0, 5.0, 6.0, 11.0),
            row(4.0, 6.0, 7.0, 13.0),
        ]
    }

    #[test]
    fn test_activation_index() {
        let rows = vec![row(0.0, 0.0, 0.05, 0.0), row(1.0, 0.0, 0.2, 0.0), row(2.0, 1.0, 0.3, 0.0)];
        let stacker = AreaStacker::default();
        assert_eq!(stacker.activation_index(&rows, &"category1".into(), &field).unwrap(), Some(2));
        assert_eq!(stacker.activation_index(&rows, &"category2".into(), &field).unwrap(), Some(1));
        assert_eq!(stacker.activation_index(&rows, &"category3".into(), &field).unwrap(), None);
    }

    #[test]
    fn test_order_by_activation() {
        // category1 activates at 2, category2 at 0, category3 at 1
        let rows = vec![
            row(0.0, 0.0, 1.0, 0.0),
            row(1.0, 0.0, 1.0, 1.0),
            row(2.0, 1.0, 1.0, 1.0),
        ];
        let keys = series_keys(&["category1", "category2", "category3"]);
        let order = AreaStacker::default().order_keys(&rows, &keys, &field).unwrap();
        assert_eq!(order, series_keys(&["category2", "category3", "category1"]));
    }

    #[test]
    fn test_never_active_keys_keep_insertion_order_last() {
        let rows = vec![row(0.0, 0.0, 0.0, 0.0), row(1.0, 0.0, 0.0, 5.0)];
        let keys = series_keys(&["category2", "category1", "category3"]);
        let order = AreaStacker::default().order_keys(&rows, &keys, &field).unwrap();
        assert_eq!(order, series_keys(&["category3", "category2", "category1"]));
    }

    #[test]
    fn test_stacking_is_lossless() {
        let rows = sample();
        let keys = series_keys(&["category1", "category2", "category3"]);
        let stack = AreaStacker::default().stack(&rows, &keys, &field).unwrap();

        for (i, r) in rows.iter().enumerate() {
            let sum = r.category1 + r.category2 + r.category3;
            assert_eq!(stack.total_at(i), Some(sum));
        }
        assert_eq!(stack.totals(), vec![10.0, 14.0, 18.0, 22.0, 26.0]);
    }

    #[test]
    fn test_baselines_accumulate() {
        let rows = sample();
        let keys = series_keys(&["category1", "category2", "category3"]);
        let stack = AreaStacker::default().stack(&rows, &keys, &field).unwrap();

        // all three activate at index 0, so the caller's order stands
        let order: Vec<_> = stack.order().cloned().collect();
        assert_eq!(order, keys);

        let third = &stack.series[2].points[2];
        assert_eq!(third.baseline, 4.0 + 5.0);
        assert_eq!(third.top, 18.0);
        assert_eq!(third.value(), 9.0);
        assert_eq!(stack.series[0].points[0].baseline, 0.0);
        assert_eq!(rows[2].time, 2.0);
    }

    #[test]
    fn test_invalid_keys() {
        let rows = sample();
        let stacker = AreaStacker::default();

        assert_eq!(stacker.stack(&rows, &[], &field).unwrap_err(), InvalidInput::NoSeriesKeys);
        assert_eq!(
            stacker.stack(&rows, &series_keys(&["category1", "category1"]), &field).unwrap_err(),
            InvalidInput::DuplicateSeriesKey("category1".into())
        );
        assert_eq!(
            stacker.stack(&rows, &series_keys(&["category4"]), &field).unwrap_err(),
            InvalidInput::MissingSeriesValue { key: "category4".into(), index: 0 }
        );
    }
}
