//! Series identification and record access
//!
//! Area records are opaque to the chart. The host tells the chart how to
//! read them through an explicit accessor per series key, and separately how
//! to read each record's X position.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Name of one stacked area series
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesKey(pub String);

impl SeriesKey {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SeriesKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for SeriesKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Build a key list from string slices
pub fn series_keys(names: &[&str]) -> Vec<SeriesKey> {
    names.iter().copied().map(SeriesKey::from).collect()
}

// ============================================================================
// STRATEGY PATTERN: Series Accessor
// ============================================================================

/// Strategy trait for reading a series value out of an area record.
///
/// `None` means the record has no value for `key`, which the chart rejects.
pub trait SeriesAccessor<R> {
    fn value(&self, record: &R, key: &SeriesKey) -> Option<f64>;
}

impl<R, F> SeriesAccessor<R> for F
where
    F: Fn(&R, &SeriesKey) -> Option<f64>,
{
    fn value(&self, record: &R, key: &SeriesKey) -> Option<f64> {
        self(record, key)
    }
}

/// Cloneable, type-erased series accessor that can live in component props
pub struct KeyAccessor<R>(Arc<dyn Fn(&R, &SeriesKey) -> Option<f64> + Send + Sync>);

impl<R> KeyAccessor<R> {
    pub fn new(f: impl Fn(&R, &SeriesKey) -> Option<f64> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }
}

impl<R> Clone for KeyAccessor<R> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<R> SeriesAccessor<R> for KeyAccessor<R> {
    fn value(&self, record: &R, key: &SeriesKey) -> Option<f64> {
        (self.0)(record, key)
    }
}

/// Cloneable accessor for an area record's X position
pub struct XAccessor<R>(Arc<dyn Fn(&R) -> f64 + Send + Sync>);

impl<R> XAccessor<R> {
    pub fn new(f: impl Fn(&R) -> f64 + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn x(&self, record: &R) -> f64 {
        (self.0)(record)
    }
}

impl<R> Clone for XAccessor<R> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        time: f64,
        a: f64,
    }

    #[test]
    fn test_key_display() {
        let key = SeriesKey::from("category1");
        assert_eq!(key.to_string(), "category1");
        assert_eq!(key.as_str(), "category1");
        assert_eq!(series_keys(&["a", "b"]).len(), 2);
    }

    #[test]
    fn test_closure_accessor() {
        let accessor = |r: &Row, k: &SeriesKey| (k.as_str() == "a").then_some(r.a);
        let row = Row { time: 1.0, a: 3.0 };
        assert_eq!(accessor.value(&row, &"a".into()), Some(3.0));
        assert_eq!(accessor.value(&row, &"b".into()), None);
    }

    #[test]
    fn test_erased_accessors_clone() {
        let accessor = KeyAccessor::new(|r: &Row, _: &SeriesKey| Some(r.a));
        let x = XAccessor::new(|r: &Row| r.time);
        let row = Row { time: 4.0, a: 6.0 };

        assert_eq!(accessor.clone().value(&row, &"a".into()), Some(6.0));
        assert_eq!(x.clone().x(&row), 4.0);
    }
}
