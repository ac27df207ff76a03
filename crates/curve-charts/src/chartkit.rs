//! # chartkit
//!
//! Core chart primitives: linear scale with round-number ticks, SVG path
//! builders. Implements Strategy pattern for scale and path behaviours.

use std::fmt::Write;

// ============================================================================
// STRATEGY PATTERN: Scale Trait
// ============================================================================

/// Strategy trait for scales (maps domain values to range values)
pub trait Scale: Send + Sync {
    /// Scale a value from domain to range
    fn scale(&self, value: f64) -> f64;

    /// Inverse scale (range to domain)
    fn invert(&self, value: f64) -> f64;

    /// Generate tick values for roughly `count` ticks
    fn ticks(&self, count: usize) -> Vec<f64>;
}

// ============================================================================
// LINEAR SCALE
// ============================================================================

/// Linear scale (D3-style continuous scale)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
    clamp: bool,
}

impl LinearScale {
    pub fn new() -> Self {
        Self {
            domain: (0.0, 1.0),
            range: (0.0, 1.0),
            clamp: false,
        }
    }

    pub fn domain(mut self, min: f64, max: f64) -> Self {
        self.domain = (min, max);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    pub fn clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// Get domain bounds
    pub fn domain_bounds(&self) -> (f64, f64) {
        self.domain
    }

    /// Get range bounds
    pub fn range_bounds(&self) -> (f64, f64) {
        self.range
    }

    /// Signed pixel extent of the range
    pub fn range_width(&self) -> f64 {
        self.range.1 - self.range.0
    }

    /// Lazily produce round-number tick values inside the domain.
    ///
    /// Steps are 1, 2, 5 or 10 times a power of ten, picked so that about
    /// `count` ticks cover the domain.
    pub fn tick_values(&self, count: usize) -> TickValues {
        let (start, stop) = self.domain;
        TickValues::new(start, stop, count as f64)
    }
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::new()
    }
}

impl Scale for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if (d_max - d_min).abs() < f64::EPSILON {
            return (r_min + r_max) / 2.0;
        }

        let mut normalized = (value - d_min) / (d_max - d_min);

        if self.clamp {
            normalized = normalized.clamp(0.0, 1.0);
        }

        r_min + normalized * (r_max - r_min)
    }

    fn invert(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if (r_max - r_min).abs() < f64::EPSILON {
            return (d_min + d_max) / 2.0;
        }

        let mut normalized = (value - r_min) / (r_max - r_min);

        if self.clamp {
            normalized = normalized.clamp(0.0, 1.0);
        }

        d_min + normalized * (d_max - d_min)
    }

    fn ticks(&self, count: usize) -> Vec<f64> {
        self.tick_values(count).collect()
    }
}

// ============================================================================
// TICK VALUES
// ============================================================================

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Half-way cases round toward positive infinity
fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// First/last tick multiplier and increment for `count` ticks over
/// `[start, stop]`. A negative increment means "divide by `-inc`", which
/// keeps sub-unit steps exact.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powi(power as i32);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let inv = 10f64.powi(-power as i32) / factor;
        i1 = round_half_up(start * inv);
        i2 = round_half_up(stop * inv);
        if i1 / inv < start {
            i1 += 1.0;
        }
        if i2 / inv > stop {
            i2 -= 1.0;
        }
        inc = -inv;
    } else {
        let step = 10f64.powi(power as i32) * factor;
        i1 = round_half_up(start / step);
        i2 = round_half_up(stop / step);
        if i1 * step < start {
            i1 += 1.0;
        }
        if i2 * step > stop {
            i2 -= 1.0;
        }
        inc = step;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }

    (i1, i2, inc)
}

/// Lazy sequence of round-number tick values, ascending in domain order
#[derive(Debug, Clone)]
pub struct TickValues {
    first: f64,
    inc: f64,
    reverse: bool,
    len: usize,
    pos: usize,
    single: Option<f64>,
}

impl TickValues {
    fn new(start: f64, stop: f64, count: f64) -> Self {
        let empty = Self {
            first: 0.0,
            inc: 1.0,
            reverse: false,
            len: 0,
            pos: 0,
            single: None,
        };

        if !(count > 0.0) || !start.is_finite() || !stop.is_finite() {
            return empty;
        }
        if start == stop {
            return Self {
                len: 1,
                single: Some(start),
                ..empty
            };
        }

        let reverse = stop < start;
        let (i1, i2, inc) = if reverse {
            tick_spec(stop, start, count)
        } else {
            tick_spec(start, stop, count)
        };
        if !(i2 >= i1) {
            return empty;
        }

        Self {
            first: if reverse { i2 } else { i1 },
            inc,
            reverse,
            len: (i2 - i1) as usize + 1,
            pos: 0,
            single: None,
        }
    }
}

impl Iterator for TickValues {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.pos >= self.len {
            return None;
        }
        let i = self.pos as f64;
        self.pos += 1;

        if let Some(v) = self.single {
            return Some(v);
        }

        let k = if self.reverse { self.first - i } else { self.first + i };
        Some(if self.inc < 0.0 { k / -self.inc } else { k * self.inc })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.len - self.pos;
        (left, Some(left))
    }
}

impl ExactSizeIterator for TickValues {}

// ============================================================================
// STRATEGY PATTERN: Path Generator Trait
// ============================================================================

/// Strategy trait for path generation
pub trait PathGenerator: Send + Sync {
    fn generate(&self, points: &[(f64, f64)]) -> String;
}

/// Straight-segment polyline generator
#[derive(Debug, Clone, Default)]
pub struct LinePath;

impl PathGenerator for LinePath {
    fn generate(&self, points: &[(f64, f64)]) -> String {
        let Some((&(x, y), rest)) = points.split_first() else {
            return String::new();
        };

        let mut builder = PathBuilder::new().move_to(x, y);
        for &(x, y) in rest {
            builder = builder.line_to(x, y);
        }
        builder.build()
    }
}

// ============================================================================
// PATH BUILDER (fluent API)
// ============================================================================

/// SVG path builder with fluent API
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    commands: String,
}

// Writing into a String cannot fail, so the fmt results are dropped.
impl PathBuilder {
    pub fn new() -> Self {
        Self {
            commands: String::with_capacity(256),
        }
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        let _ = write!(self.commands, "M{:.2},{:.2}", x, y);
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        let _ = write!(self.commands, "L{:.2},{:.2}", x, y);
        self
    }

    pub fn line_by(mut self, dx: f64, dy: f64) -> Self {
        let _ = write!(self.commands, "l{:.2},{:.2}", dx, dy);
        self
    }

    pub fn horizontal_to(mut self, x: f64) -> Self {
        let _ = write!(self.commands, "H{:.2}", x);
        self
    }

    pub fn horizontal_by(mut self, dx: f64) -> Self {
        let _ = write!(self.commands, "h{:.2}", dx);
        self
    }

    pub fn vertical_by(mut self, dy: f64) -> Self {
        let _ = write!(self.commands, "v{:.2}", dy);
        self
    }

    pub fn cubic_by(mut self, dx1: f64, dy1: f64, dx2: f64, dy2: f64, dx: f64, dy: f64) -> Self {
        let _ = write!(
            self.commands,
            "c{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}",
            dx1, dy1, dx2, dy2, dx, dy
        );
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push('Z');
        self
    }

    pub fn build(self) -> String {
        self.commands
    }
}

// ============================================================================
// AREA PATH GENERATOR
// ============================================================================

/// Closed band between a top polyline and a baseline polyline.
///
/// Both slices are in the same x order; the baseline is walked backwards so
/// the outline closes on itself.
pub fn band_path(top: &[(f64, f64)], baseline: &[(f64, f64)]) -> String {
    let Some((&(x, y), rest)) = top.split_first() else {
        return String::new();
    };

    let mut builder = PathBuilder::new().move_to(x, y);
    for &(x, y) in rest {
        builder = builder.line_to(x, y);
    }
    for &(x, y) in baseline.iter().rev() {
        builder = builder.line_to(x, y);
    }

    builder.close().build()
}

/// Generate line path (non-closed)
pub fn line_path(points: &[(f64, f64)]) -> String {
    LinePath.generate(points)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new()
            .domain(0.0, 100.0)
            .range(0.0, 500.0);

        assert_eq!(scale.scale(0.0), 0.0);
        assert_eq!(scale.scale(50.0), 250.0);
        assert_eq!(scale.scale(100.0), 500.0);
    }

    #[test]
    fn test_linear_scale_invert() {
        let scale = LinearScale::new()
            .domain(0.0, 100.0)
            .range(0.0, 500.0);

        assert_eq!(scale.invert(250.0), 50.0);
    }

    #[test]
    fn test_invert_round_trips_inside_domain() {
        let scale = LinearScale::new().domain(-3.5, 12.25).range(0.0, 640.0);
        for i in 0..=20 {
            let v = -3.5 + (12.25 + 3.5) * i as f64 / 20.0;
            assert!((scale.invert(scale.scale(v)) - v).abs() < 1e-9);
        }
    }

    #[test]
    fn test_degenerate_domain_maps_to_midpoint() {
        let scale = LinearScale::new().domain(2.0, 2.0).range(0.0, 300.0);
        assert_eq!(scale.scale(2.0), 150.0);
        assert_eq!(scale.invert(17.0), 2.0);

        let flat = LinearScale::new().domain(0.0, 10.0).range(0.0, 0.0);
        assert_eq!(flat.invert(0.0), 5.0);
    }

    #[test]
    fn test_clamp() {
        let scale = LinearScale::new().domain(0.0, 10.0).range(0.0, 100.0).clamp(true);
        assert_eq!(scale.scale(20.0), 100.0);
        assert_eq!(scale.invert(-50.0), 0.0);
    }

    #[test]
    fn test_round_ticks() {
        let scale = LinearScale::new().domain(0.0, 4.0).range(0.0, 400.0);
        assert_eq!(scale.ticks(5), vec![0.0, 1.0, 2.0, 3.0, 4.0]);

        let scale = LinearScale::new().domain(0.0, 100.0);
        assert_eq!(scale.ticks(10).len(), 11);
        assert_eq!(scale.ticks(5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);

        let scale = LinearScale::new().domain(10.0, 50.0);
        assert_eq!(scale.ticks(4), vec![10.0, 20.0, 30.0, 40.0, 50.0]);
    }

    #[test]
    fn test_fractional_ticks_are_exact() {
        let scale = LinearScale::new().domain(0.0, 1.0);
        let ticks = scale.ticks(5);
        assert_eq!(ticks, vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn test_tick_edge_cases() {
        assert_eq!(LinearScale::new().domain(3.0, 3.0).ticks(5), vec![3.0]);
        assert!(LinearScale::new().domain(0.0, 1.0).ticks(0).is_empty());
        assert!(LinearScale::new().domain(f64::NAN, 1.0).ticks(5).is_empty());

        let reversed = LinearScale::new().domain(4.0, 0.0).ticks(5);
        assert_eq!(reversed, vec![4.0, 3.0, 2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_tick_values_are_lazy_and_sized() {
        let mut ticks = LinearScale::new().domain(0.0, 100.0).tick_values(10);
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks.next(), Some(0.0));
        assert_eq!(ticks.len(), 10);
    }

    #[test]
    fn test_path_builder() {
        let path = PathBuilder::new()
            .move_to(0.0, 0.0)
            .line_to(100.0, 100.0)
            .close()
            .build();

        assert!(path.contains("M0.00,0.00"));
        assert!(path.contains("L100.00,100.00"));
        assert!(path.contains("Z"));
    }

    #[test]
    fn test_relative_commands() {
        let path = PathBuilder::new()
            .move_to(10.0, 200.0)
            .vertical_by(-50.0)
            .horizontal_by(5.0)
            .line_by(-3.0, 3.0)
            .build();
        assert_eq!(path, "M10.00,200.00v-50.00h5.00l-3.00,3.00");
    }

    #[test]
    fn test_line_path_generator() {
        let generator = LinePath;
        let path = generator.generate(&[(0.0, 0.0), (50.0, 50.0), (100.0, 0.0)]);

        assert!(path.starts_with("M0.00,0.00"));
        assert!(path.contains("L50.00,50.00"));
        assert!(line_path(&[]).is_empty());
    }

    #[test]
    fn test_band_path_closes_over_baseline() {
        let top = [(0.0, 10.0), (10.0, 5.0)];
        let base = [(0.0, 20.0), (10.0, 20.0)];
        assert_eq!(
            band_path(&top, &base),
            "M0.00,10.00L10.00,5.00L10.00,20.00L0.00,20.00Z"
        );
    }
}
