//! Nearest-point resolver
//!
//! Maps a pointer position to the closest data index and derives the pixel
//! geometry and label text for that index.

use curve_core::{decimal, human_readable, ChartAxes, LinePoint};

use crate::chartkit::Scale;
use crate::scales::ChartScales;

/// A position in plot-area pixels (origin top-left)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Index of the point whose `x` is closest to `value`.
///
/// On exact ties the lowest index wins. Returns `None` for an empty slice or
/// when no distance is comparable (NaN).
pub fn nearest_index_for_value(points: &[LinePoint], value: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, point) in points.iter().enumerate() {
        let diff = (point.x - value).abs();
        if diff.is_nan() {
            continue;
        }
        if best.is_none_or(|(_, d)| diff < d) {
            best = Some((i, diff));
        }
    }
    best.map(|(i, _)| i)
}

/// Index nearest to a pointer x (relative to the plot-area origin)
pub fn nearest_index<S: Scale + ?Sized>(points: &[LinePoint], x_scale: &S, pixel_x: f64) -> Option<usize> {
    nearest_index_for_value(points, x_scale.invert(pixel_x))
}

/// Pixel geometry of one resolved index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionGeometry {
    pub index: usize,
    /// Line marker position
    pub marker: ScreenPoint,
    /// Pixel y of the top of the stack
    pub area_top_y: f64,
    pub x_value: f64,
    pub line_value: f64,
    pub stack_value: f64,
}

/// The three text lines of the tooltip callout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalloutLabels {
    pub x: String,
    pub line: String,
    pub stack: String,
}

impl CalloutLabels {
    pub fn lines(&self) -> [&str; 3] {
        [&self.x, &self.line, &self.stack]
    }
}

/// Decimal places for a value shown in the callout
fn label_precision(value: f64) -> usize {
    if value < 1.0 { 3 } else { 2 }
}

/// Resolves pointer positions against one render pass
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    points: &'a [LinePoint],
    totals: &'a [f64],
    scales: &'a ChartScales,
    chart_height: f64,
}

impl<'a> Resolver<'a> {
    /// `totals` holds the stacked sum per index, aligned with `points`
    pub fn new(points: &'a [LinePoint], totals: &'a [f64], scales: &'a ChartScales, chart_height: f64) -> Self {
        Self {
            points,
            totals,
            scales,
            chart_height,
        }
    }

    /// Number of resolvable indices
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn resolve(&self, pixel_x: f64) -> Option<usize> {
        nearest_index(self.points, &self.scales.x, pixel_x)
    }

    pub fn geometry(&self, index: usize) -> Option<SelectionGeometry> {
        let point = self.points.get(index)?;
        let stack_value = *self.totals.get(index)?;

        Some(SelectionGeometry {
            index,
            marker: ScreenPoint::new(
                self.scales.x.scale(point.x),
                self.chart_height - self.scales.line_y.scale(point.y),
            ),
            area_top_y: self.chart_height - self.scales.area_y.scale(stack_value),
            x_value: point.x,
            line_value: point.y,
            stack_value,
        })
    }

    pub fn labels(&self, index: usize, axes: &ChartAxes) -> Option<CalloutLabels> {
        let geometry = self.geometry(index)?;
        let line = geometry.line_value;
        let stack = geometry.stack_value;

        Some(CalloutLabels {
            x: format!("{}: {}", axes.x.name, axes.x.with_units(&decimal(geometry.x_value))),
            line: format!(
                "{}: {}",
                axes.line.name,
                axes.line.with_units(&human_readable(line, label_precision(line)))
            ),
            stack: format!(
                "{}: {}",
                axes.stack.name,
                axes.stack.with_units(&human_readable(stack, label_precision(stack)))
            ),
        })
    }
}
