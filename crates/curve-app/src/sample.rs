//! Embedded demo dataset

use std::collections::BTreeMap;

use curve_core::{ChartAxes, KeyAccessor, LinePoint, SeriesKey, XAccessor};
use serde::{Deserialize, Serialize};

const SAMPLE_JSON: &str = include_str!("../data/sample.json");

/// One stacked-area record: its X position plus one value per category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaRecord {
    pub time: f64,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

impl AreaRecord {
    pub fn accessor() -> KeyAccessor<Self> {
        KeyAccessor::new(|record: &Self, key: &SeriesKey| record.values.get(key.as_str()).copied())
    }

    pub fn x_accessor() -> XAccessor<Self> {
        XAccessor::new(|record: &Self| record.time)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SampleData {
    pub line: Vec<LinePoint>,
    pub area: Vec<AreaRecord>,
    pub keys: Vec<SeriesKey>,
    pub axes: ChartAxes,
}

impl SampleData {
    pub fn load() -> serde_json::Result<Self> {
        serde_json::from_str(SAMPLE_JSON)
    }
}

/// Drop the last slice from both series, keeping at least one.
///
/// Returns the remaining length.
pub fn trim_last_slice(line: &mut Vec<LinePoint>, area: &mut Vec<AreaRecord>) -> usize {
    if line.len() > 1 && area.len() > 1 {
        line.pop();
        area.pop();
    }
    line.len().min(area.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use curve_core::SeriesAccessor;

    #[test]
    fn test_sample_parses() {
        let sample = SampleData::load().unwrap();
        assert_eq!(sample.line.len(), 5);
        assert_eq!(sample.area.len(), 5);
        assert_eq!(sample.keys.len(), 3);
        assert_eq!(sample.axes.x.title(), "Time (s)");
        assert_eq!(sample.axes.stack.indicator_key, "stackYAxis");
    }

    #[test]
    fn test_accessors() {
        let sample = SampleData::load().unwrap();
        let accessor = AreaRecord::accessor();
        let record = &sample.area[2];

        assert_eq!(accessor.value(record, &"category3".into()), Some(9.0));
        assert_eq!(accessor.value(record, &"missing".into()), None);
        assert_eq!(AreaRecord::x_accessor().x(record), 2.0);
    }

    #[test]
    fn test_trim_keeps_one_slice() {
        let sample = SampleData::load().unwrap();
        let (mut line, mut area) = (sample.line, sample.area);

        assert_eq!(trim_last_slice(&mut line, &mut area), 4);
        assert_eq!(line.last().map(|p| p.x), Some(3.0));
        assert_eq!(area.last().map(|r| r.time), Some(3.0));

        for _ in 0..10 {
            trim_last_slice(&mut line, &mut area);
        }
        assert_eq!(line.len(), 1);
        assert_eq!(area.len(), 1);
    }
}
