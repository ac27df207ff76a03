//! Series colour legend

use crate::{colors, SeriesKey};

/// Strategy trait mapping a series key to its fill colour
pub trait Legend {
    fn color(&self, key: &SeriesKey) -> String;
}

impl<F> Legend for F
where
    F: Fn(&SeriesKey) -> String,
{
    fn color(&self, key: &SeriesKey) -> String {
        self(key)
    }
}

/// Ordinal legend: the i-th declared key takes the i-th palette colour,
/// wrapping around when there are more keys than colours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorLegend {
    keys: Vec<SeriesKey>,
    palette: Vec<String>,
}

impl ColorLegend {
    pub fn new(keys: Vec<SeriesKey>, palette: Vec<String>) -> Self {
        Self { keys, palette }
    }

    pub fn from_palette(keys: Vec<SeriesKey>, palette: &[&str]) -> Self {
        Self::new(keys, palette.iter().map(|c| c.to_string()).collect())
    }

    pub fn keys(&self) -> &[SeriesKey] {
        &self.keys
    }

    /// Legend rows in declaration order
    pub fn entries(&self) -> impl Iterator<Item = (&SeriesKey, String)> + '_ {
        self.keys.iter().map(|k| (k, self.color(k)))
    }
}

impl Legend for ColorLegend {
    fn color(&self, key: &SeriesKey) -> String {
        if self.palette.is_empty() {
            return colors::NEUTRAL.to_string();
        }
        match self.keys.iter().position(|k| k == key) {
            Some(i) => self.palette[i % self.palette.len()].clone(),
            None => colors::NEUTRAL.to_string(),
        }
    }
}
