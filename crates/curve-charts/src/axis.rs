//! Axis layouts
//!
//! Precomputed geometry for the three axes: the domain line, tick marks with
//! their labels, and the title placement. Y axes are drawn with the value
//! origin at the bottom, so their tick offsets are flipped against the range
//! end.

use curve_core::{colors, human_readable, AxisDescriptor, AxisKind};

use crate::chartkit::{LinearScale, PathBuilder};
use crate::ticks::TickGenerator;

const TICK_SIZE: f64 = 6.0;
const X_TITLE_OFFSET: f64 = 50.0;
const LINE_TITLE_OFFSET: f64 = -50.0;
const STACK_TITLE_OFFSET: f64 = 65.0;

/// Y tick values up to this are printed as-is
const RAW_LABEL_LIMIT: f64 = 50.0;

/// Which edge of the plot area the axis hugs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSide {
    Bottom,
    Left,
    Right,
}

impl AxisSide {
    /// Outward direction of tick marks: +1 below/right of the domain line
    fn outward(&self) -> f64 {
        match self {
            Self::Bottom | Self::Right => 1.0,
            Self::Left => -1.0,
        }
    }
}

/// One labelled tick, offset along the axis in plot-area pixels
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub value: f64,
    pub offset: f64,
    pub label: String,
}

impl AxisTick {
    pub fn transform(&self, side: AxisSide) -> String {
        match side {
            AxisSide::Bottom => format!("translate({}, 0)", self.offset),
            AxisSide::Left | AxisSide::Right => format!("translate(0, {})", self.offset),
        }
    }
}

/// Fully laid out axis ready for drawing
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLayout {
    pub kind: AxisKind,
    pub side: AxisSide,
    /// Placement of the whole axis group inside the plot area
    pub transform: String,
    pub domain_path: String,
    pub ticks: Vec<AxisTick>,
    pub title: String,
    pub title_transform: String,
    pub editable: bool,
    pub indicator_key: String,
    pub color: &'static str,
}

impl AxisLayout {
    /// Bottom X axis across `width`, placed at the plot bottom
    pub fn bottom(descriptor: &AxisDescriptor, scale: &LinearScale, ticks: &TickGenerator, height: f64) -> Self {
        let (r0, r1) = scale.range_bounds();
        let domain_path = PathBuilder::new()
            .move_to(r0, TICK_SIZE)
            .vertical_by(-TICK_SIZE)
            .horizontal_to(r1)
            .vertical_by(TICK_SIZE)
            .build();

        let ticks = ticks
            .ticks(scale)
            .map(|t| AxisTick {
                value: t.value,
                offset: t.offset,
                label: human_readable(t.value, 2),
            })
            .collect();

        Self {
            kind: AxisKind::X,
            side: AxisSide::Bottom,
            transform: format!("translate(0, {})", height),
            domain_path,
            ticks,
            title: descriptor.title(),
            title_transform: format!("translate({}, {})", (r1 - r0).abs() / 2.0, X_TITLE_OFFSET),
            editable: descriptor.editable,
            indicator_key: descriptor.indicator_key.clone(),
            color: colors::AXIS,
        }
    }

    /// Left axis for the line series
    pub fn left(descriptor: &AxisDescriptor, scale: &LinearScale, ticks: &TickGenerator) -> Self {
        Self::vertical(
            AxisKind::Line,
            AxisSide::Left,
            descriptor,
            scale,
            ticks,
            String::new(),
            LINE_TITLE_OFFSET,
            colors::LINE,
        )
    }

    /// Right axis for the stacked sum, placed at the plot's right edge
    pub fn right(descriptor: &AxisDescriptor, scale: &LinearScale, ticks: &TickGenerator, width: f64) -> Self {
        Self::vertical(
            AxisKind::Stack,
            AxisSide::Right,
            descriptor,
            scale,
            ticks,
            format!("translate({}, 0)", width),
            STACK_TITLE_OFFSET,
            colors::AXIS,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn vertical(
        kind: AxisKind,
        side: AxisSide,
        descriptor: &AxisDescriptor,
        scale: &LinearScale,
        ticks: &TickGenerator,
        transform: String,
        title_offset: f64,
        color: &'static str,
    ) -> Self {
        let (_, r1) = scale.range_bounds();
        let mark = TICK_SIZE * side.outward();

        let domain_path = PathBuilder::new()
            .move_to(mark, 0.0)
            .horizontal_by(-mark)
            .vertical_by(r1)
            .horizontal_by(mark)
            .build();

        let ticks = ticks
            .ticks(scale)
            .map(|t| AxisTick {
                value: t.value,
                offset: r1 - t.offset,
                label: y_tick_label(t.value),
            })
            .collect();

        Self {
            kind,
            side,
            transform,
            domain_path,
            ticks,
            title: descriptor.title(),
            title_transform: format!("translate({}, {}) rotate(-90)", title_offset, r1 / 2.0),
            editable: descriptor.editable,
            indicator_key: descriptor.indicator_key.clone(),
            color,
        }
    }

    /// End point of a tick mark relative to the tick position
    pub fn tick_mark(&self) -> (f64, f64) {
        match self.side {
            AxisSide::Bottom => (0.0, TICK_SIZE),
            side => (TICK_SIZE * side.outward(), 0.0),
        }
    }

    /// Label anchor relative to the tick position, and its `text-anchor`
    pub fn label_anchor(&self) -> (f64, f64, &'static str) {
        match self.side {
            AxisSide::Bottom => (0.0, TICK_SIZE + 12.0, "middle"),
            AxisSide::Left => (-(TICK_SIZE + 3.0), 4.0, "end"),
            AxisSide::Right => (TICK_SIZE + 3.0, 4.0, "start"),
        }
    }
}

/// Small values keep full precision, larger ones are abbreviated
pub fn y_tick_label(value: f64) -> String {
    if value > RAW_LABEL_LIMIT {
        human_readable(value, 2)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x_scale() -> LinearScale {
        LinearScale::new().domain(0.0, 4.0).range(0.0, 400.0)
    }

    fn y_scale() -> LinearScale {
        LinearScale::new().domain(0.0, 100.0).range(0.0, 200.0)
    }

    #[test]
    fn test_y_tick_label() {
        assert_eq!(y_tick_label(10.0), "10");
        assert_eq!(y_tick_label(0.2), "0.2");
        assert_eq!(y_tick_label(50.0), "50");
        assert_eq!(y_tick_label(1500.0), "1.5K");
    }

    #[test]
    fn test_bottom_axis() {
        let descriptor = AxisDescriptor::new("Time", "timeAxis").units("s");
        let axis = AxisLayout::bottom(&descriptor, &x_scale(), &TickGenerator::new(80.0), 250.0);

        assert_eq!(axis.transform, "translate(0, 250)");
        assert_eq!(axis.title, "Time (s)");
        assert_eq!(axis.title_transform, "translate(200, 50)");
        assert_eq!(axis.ticks.len(), 5);
        assert_eq!(axis.ticks[1].label, "1");
        assert_eq!(axis.ticks[1].transform(axis.side), "translate(100, 0)");
        assert_eq!(axis.domain_path, "M0.00,6.00v-6.00H400.00v6.00");
    }

    #[test]
    fn test_vertical_ticks_are_flipped() {
        let descriptor = AxisDescriptor::new("Value", "lineYAxis");
        let axis = AxisLayout::left(&descriptor, &y_scale(), &TickGenerator::new(40.0));

        let zero = axis.ticks.iter().find(|t| t.value == 0.0).unwrap();
        assert_eq!(zero.offset, 200.0);
        let top = axis.ticks.iter().find(|t| t.value == 100.0).unwrap();
        assert_eq!(top.offset, 0.0);
        assert_eq!(top.label, "100");
        assert_eq!(axis.color, colors::LINE);
        assert_eq!(axis.title_transform, "translate(-50, 100) rotate(-90)");
    }

    #[test]
    fn test_right_axis_placement() {
        let descriptor = AxisDescriptor::new("Stacked", "stackYAxis").editable(true);
        let axis = AxisLayout::right(&descriptor, &y_scale(), &TickGenerator::new(40.0), 300.0);

        assert_eq!(axis.transform, "translate(300, 0)");
        assert_eq!(axis.title_transform, "translate(65, 100) rotate(-90)");
        assert_eq!(axis.domain_path, "M6.00,0.00h-6.00v200.00h6.00");
        assert_eq!(axis.tick_mark(), (6.0, 0.0));
        assert!(axis.editable);
        assert_eq!(axis.indicator_key, "stackYAxis");
    }

    #[test]
    fn test_left_domain_ticks_point_outward() {
        let descriptor = AxisDescriptor::new("Value", "lineYAxis");
        let axis = AxisLayout::left(&descriptor, &y_scale(), &TickGenerator::new(40.0));
        assert_eq!(axis.domain_path, "M-6.00,0.00h6.00v200.00h-6.00");
        assert_eq!(axis.tick_mark(), (-6.0, 0.0));
        assert_eq!(axis.label_anchor().2, "end");
    }
}
