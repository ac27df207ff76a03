//! Chart composer
//!
//! Turns one data snapshot and one container size into a [`ChartLayout`]
//! (every path and tick the drawing layer needs), then the host's selected
//! index into a [`Selection`] on top of it. All positions are in the
//! plot-area coordinate frame.

use curve_core::{
    colors, ChartAxes, ContainerSize, InvalidInput, Legend, LinePoint, Result, SeriesAccessor, SeriesKey,
};

use crate::axis::AxisLayout;
use crate::chartkit::{band_path, line_path, PathBuilder, Scale};
use crate::resolver::{Resolver, SelectionGeometry};
use crate::scales::ChartScales;
use crate::stack::{read_value, validate_keys, AreaStacker, DEFAULT_ACTIVATION_THRESHOLD};
use crate::ticks::TickGenerator;
use crate::tooltip::{Callout, CalloutStyle};
use crate::{ChartDimensions, ChartMargin};

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Chart configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub margin: ChartMargin,
    pub x_pixels_per_tick: f64,
    pub y_pixels_per_tick: f64,
    pub activation_threshold: f64,
    pub show_reference_lines: bool,
    pub marker_radius: f64,
    pub callout: CalloutStyle,
    /// Used until the container has been measured
    pub fallback_size: ContainerSize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            margin: ChartMargin::default(),
            x_pixels_per_tick: 80.0,
            y_pixels_per_tick: 40.0,
            activation_threshold: DEFAULT_ACTIVATION_THRESHOLD,
            show_reference_lines: false,
            marker_radius: 7.0,
            callout: CalloutStyle::default(),
            fallback_size: ContainerSize::new(400.0, 400.0),
        }
    }
}

impl ChartConfig {
    pub fn with_margin(mut self, margin: ChartMargin) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_tick_density(mut self, x_pixels_per_tick: f64, y_pixels_per_tick: f64) -> Self {
        self.x_pixels_per_tick = x_pixels_per_tick;
        self.y_pixels_per_tick = y_pixels_per_tick;
        self
    }

    pub fn with_activation_threshold(mut self, threshold: f64) -> Self {
        self.activation_threshold = threshold;
        self
    }

    pub fn with_reference_lines(mut self, show: bool) -> Self {
        self.show_reference_lines = show;
        self
    }

    pub fn with_marker_radius(mut self, radius: f64) -> Self {
        self.marker_radius = radius;
        self
    }

    pub fn with_fallback_size(mut self, size: ContainerSize) -> Self {
        self.fallback_size = size;
        self
    }

    /// Chart dimensions for a measured container; an unmeasured (zero) size
    /// falls back to `fallback_size`
    pub fn dimensions(&self, size: ContainerSize) -> ChartDimensions {
        let size = if size.width > 0.0 && size.height > 0.0 {
            size
        } else {
            self.fallback_size
        };
        ChartDimensions::from_container(size).with_margin(self.margin)
    }

    fn x_ticks(&self) -> TickGenerator {
        TickGenerator::new(self.x_pixels_per_tick)
    }

    fn y_ticks(&self) -> TickGenerator {
        TickGenerator::new(self.y_pixels_per_tick)
    }

    fn stacker(&self) -> AreaStacker {
        AreaStacker::new(self.activation_threshold)
    }
}

// ============================================================================
// INPUT
// ============================================================================

/// Borrowed view of everything the host hands the chart for one pass
pub struct ChartInput<'a, R> {
    pub line: &'a [LinePoint],
    pub area: &'a [R],
    pub keys: &'a [SeriesKey],
    pub accessor: &'a dyn SeriesAccessor<R>,
    pub x_of: &'a dyn Fn(&R) -> f64,
    pub legend: &'a dyn Legend,
    pub axes: &'a ChartAxes,
}

impl<R> ChartInput<'_, R> {
    /// Reject data no render pass can be built from
    pub fn validate(&self) -> Result<()> {
        if self.line.is_empty() || self.area.is_empty() {
            return Err(InvalidInput::EmptyData);
        }
        if self.line.len() != self.area.len() {
            return Err(InvalidInput::LengthMismatch {
                line: self.line.len(),
                area: self.area.len(),
            });
        }
        validate_keys(self.keys)?;

        if let Some(index) = self.line.iter().position(|p| !p.is_finite()) {
            return Err(InvalidInput::NonFinite { what: "line point", index });
        }

        for (index, record) in self.area.iter().enumerate() {
            if !(self.x_of)(record).is_finite() {
                return Err(InvalidInput::NonFinite { what: "area record x", index });
            }
            for key in self.keys {
                if !read_value(self.accessor, record, key, index)?.is_finite() {
                    return Err(InvalidInput::NonFinite { what: "series value", index });
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// LAYOUT
// ============================================================================

/// One filled stacked layer
#[derive(Debug, Clone, PartialEq)]
pub struct AreaLayer {
    pub key: SeriesKey,
    pub color: String,
    pub path: String,
}

/// Data-dependent drawing of one pass: scales, paths and axes.
///
/// Independent of the selected index, so a selection change reuses it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub dims: ChartDimensions,
    pub scales: ChartScales,
    pub line_path: String,
    pub areas: Vec<AreaLayer>,
    pub x_axis: AxisLayout,
    pub line_axis: AxisLayout,
    pub stack_axis: AxisLayout,
    points: Vec<LinePoint>,
    totals: Vec<f64>,
    axes: ChartAxes,
    callout_style: CalloutStyle,
    marker_radius: f64,
    show_reference_lines: bool,
}

impl ChartLayout {
    pub fn width(&self) -> f64 {
        self.dims.inner_width()
    }

    pub fn height(&self) -> f64 {
        self.dims.inner_height()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Resolver bound to this pass's scales
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.points, &self.totals, &self.scales, self.height())
    }

    /// Hover callout for `index`
    pub fn callout(&self, index: usize) -> Option<Callout> {
        let resolver = self.resolver();
        let geometry = resolver.geometry(index)?;
        let labels = resolver.labels(index, &self.axes)?;
        Some(Callout::new(geometry.marker, &labels, &self.callout_style))
    }

    /// Marker and guides for the host's selected index.
    ///
    /// `selected` past the end is clamped to the last index.
    pub fn select(&self, selected: usize) -> Option<Selection> {
        let last = self.len().checked_sub(1)?;
        let index = if selected > last {
            tracing::warn!(selected, last, "selected index out of range, clamping");
            last
        } else {
            selected
        };

        let geometry = self.resolver().geometry(index)?;
        let height = self.height();

        let stack_line_path = PathBuilder::new()
            .move_to(geometry.marker.x, height)
            .vertical_by(-self.scales.area_y.scale(geometry.stack_value))
            .build();

        let reference_lines = self.show_reference_lines.then_some(ReferenceLines {
            line_y: geometry.marker.y,
            stack_y: geometry.area_top_y,
            width: self.width(),
            line_color: colors::LINE_REFERENCE,
            stack_color: colors::STACK_REFERENCE,
        });

        Some(Selection {
            marker: SelectionMarker {
                geometry,
                radius: self.marker_radius,
                stack_line_path,
            },
            reference_lines,
        })
    }
}

// ============================================================================
// SELECTION
// ============================================================================

/// The committed selection as drawn
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionMarker {
    pub geometry: SelectionGeometry,
    pub radius: f64,
    /// Vertical line from the plot bottom up to the stacked sum
    pub stack_line_path: String,
}

/// Horizontal guides at the selected line value and stacked sum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceLines {
    pub line_y: f64,
    pub stack_y: f64,
    pub width: f64,
    pub line_color: &'static str,
    pub stack_color: &'static str,
}

/// Selection-dependent drawing on top of a [`ChartLayout`]
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub marker: SelectionMarker,
    pub reference_lines: Option<ReferenceLines>,
}

/// Everything needed to draw one render pass
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub layout: ChartLayout,
    pub selection: Selection,
}

// ============================================================================
// COMPOSITION
// ============================================================================

/// Build the data-dependent layout for one data snapshot and container size
pub fn layout_chart<R>(config: &ChartConfig, dims: ChartDimensions, input: &ChartInput<'_, R>) -> Result<ChartLayout> {
    if let Err(err) = input.validate() {
        tracing::warn!(%err, "rejected chart input");
        return Err(err);
    }

    let width = dims.inner_width();
    let height = dims.inner_height();

    let scales = ChartScales::build(input.line, input.area, input.keys, input.accessor, width, height)?;
    let stack = config.stacker().stack(input.area, input.keys, input.accessor)?;
    let totals = stack.totals();

    // Areas and line share the x scale; y is flipped against the plot bottom
    let xs: Vec<f64> = input
        .area
        .iter()
        .map(|record| scales.x.scale((input.x_of)(record)))
        .collect();

    let areas = stack
        .series
        .iter()
        .map(|series| {
            let top: Vec<(f64, f64)> = xs
                .iter()
                .zip(&series.points)
                .map(|(&x, p)| (x, height - scales.area_y.scale(p.top)))
                .collect();
            let baseline: Vec<(f64, f64)> = xs
                .iter()
                .zip(&series.points)
                .map(|(&x, p)| (x, height - scales.area_y.scale(p.baseline)))
                .collect();
            AreaLayer {
                key: series.key.clone(),
                color: input.legend.color(&series.key),
                path: band_path(&top, &baseline),
            }
        })
        .collect();

    let line: Vec<(f64, f64)> = input
        .line
        .iter()
        .map(|p| (scales.x.scale(p.x), height - scales.line_y.scale(p.y)))
        .collect();

    let layout = ChartLayout {
        dims,
        x_axis: AxisLayout::bottom(&input.axes.x, &scales.x, &config.x_ticks(), height),
        line_axis: AxisLayout::left(&input.axes.line, &scales.line_y, &config.y_ticks()),
        stack_axis: AxisLayout::right(&input.axes.stack, &scales.area_y, &config.y_ticks(), width),
        scales,
        line_path: line_path(&line),
        areas,
        points: input.line.to_vec(),
        totals,
        axes: input.axes.clone(),
        callout_style: config.callout,
        marker_radius: config.marker_radius,
        show_reference_lines: config.show_reference_lines,
    };

    tracing::debug!(
        points = layout.len(),
        layers = layout.areas.len(),
        width,
        height,
        "laid out chart"
    );

    Ok(layout)
}

/// Build the layout and the selection for one render pass
pub fn compose<R>(
    config: &ChartConfig,
    dims: ChartDimensions,
    input: &ChartInput<'_, R>,
    selected: usize,
) -> Result<Scene> {
    let layout = layout_chart(config, dims, input)?;
    let selection = layout.select(selected).ok_or(InvalidInput::EmptyData)?;
    Ok(Scene { layout, selection })
}
