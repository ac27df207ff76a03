//! Tick generator
//!
//! Controls tick density only. Which values become ticks is decided by the
//! scale's round-number tick algorithm.

use crate::chartkit::{LinearScale, Scale, TickValues};

pub const DEFAULT_PIXELS_PER_TICK: f64 = 30.0;

/// One axis tick: a domain value and its pixel offset along the scale range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub offset: f64,
}

/// Tick density configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickGenerator {
    pub pixels_per_tick: f64,
}

impl Default for TickGenerator {
    fn default() -> Self {
        Self {
            pixels_per_tick: DEFAULT_PIXELS_PER_TICK,
        }
    }
}

impl TickGenerator {
    pub fn new(pixels_per_tick: f64) -> Self {
        Self { pixels_per_tick }
    }

    /// `max(1, floor(range_width / pixels_per_tick))`
    pub fn target_count(&self, range_width: f64) -> usize {
        let per_tick = if self.pixels_per_tick.is_finite() && self.pixels_per_tick > 0.0 {
            self.pixels_per_tick
        } else {
            DEFAULT_PIXELS_PER_TICK
        };
        (range_width / per_tick).floor().max(1.0) as usize
    }

    /// Lazily pair each tick value with its pixel offset
    pub fn ticks<'a>(&self, scale: &'a LinearScale) -> Ticks<'a> {
        let count = self.target_count(scale.range_width());
        Ticks {
            scale,
            values: scale.tick_values(count),
        }
    }
}

/// Iterator over the ticks of one scale
#[derive(Debug, Clone)]
pub struct Ticks<'a> {
    scale: &'a LinearScale,
    values: TickValues,
}

impl Iterator for Ticks<'_> {
    type Item = Tick;

    fn next(&mut self) -> Option<Tick> {
        let value = self.values.next()?;
        Some(Tick {
            value,
            offset: self.scale.scale(value),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl ExactSizeIterator for Ticks<'_> {}
