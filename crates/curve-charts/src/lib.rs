//! # curve-charts
//!
//! D3.js-style SVG line-over-stacked-area chart built with Leptos.
//! A single line series is drawn over a stacked area chart that shares its
//! X axis, with independent left (line) and right (stack) Y axes, a
//! selection marker and a hover callout.
//!
//! ## Architecture
//!
//! Uses Strategy pattern for:
//! - Scale computation (`Scale`)
//! - Path generation (`PathGenerator`)
//! - Series access and coloring (`SeriesAccessor`, `Legend` from curve-core)
//!
//! Everything except `chart` and `dimensions` is plain geometry and can be
//! exercised without a DOM.
//!
//! ## Modules
//!
//! - `chartkit` - Core primitives: linear scale, ticks, SVG paths
//! - `scales` - Builds the X, line-Y and area-Y scales from data
//! - `stack` - Activation-ordered area stacking
//! - `ticks` - Tick density
//! - `resolver` - Nearest data index for a pointer position
//! - `axis` - Axis layouts and tick labels
//! - `tooltip` - Callout geometry
//! - `interaction` - Hover and commit state
//! - `composer` - Lays out one data snapshot and places the selection on it
//! - `dimensions` - Container size observation
//! - `chart` - The `OptimizationCurve` component

pub mod axis;
pub mod chart;
pub mod chartkit;
pub mod composer;
pub mod dimensions;
pub mod interaction;
pub mod resolver;
pub mod scales;
pub mod stack;
pub mod ticks;
pub mod tooltip;

pub use axis::*;
pub use chart::*;
pub use chartkit::*;
pub use composer::*;
pub use dimensions::*;
pub use interaction::*;
pub use resolver::*;
pub use scales::*;
pub use stack::*;
pub use ticks::*;
pub use tooltip::*;

// Re-export colors from curve-core for convenience
pub use curve_core::colors;

use curve_core::ContainerSize;

/// Chart margin configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ChartMargin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    pub const fn uniform(margin: f64) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    /// Room for axis titles on both sides and the callout above the plot
    pub const fn optimization_curve() -> Self {
        Self::new(70.0, 92.0, 80.0, 88.0)
    }
}

impl Default for ChartMargin {
    fn default() -> Self {
        Self::optimization_curve()
    }
}

/// Chart dimensions with margin handling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartDimensions {
    pub width: f64,
    pub height: f64,
    pub margin: ChartMargin,
}

impl ChartDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin: ChartMargin::default(),
        }
    }

    pub fn from_container(size: ContainerSize) -> Self {
        Self::new(size.width, size.height)
    }

    pub fn with_margin(mut self, margin: ChartMargin) -> Self {
        self.margin = margin;
        self
    }

    /// Inner width (excluding margins)
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    /// Inner height (excluding margins)
    pub fn inner_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }

    /// SVG transform for inner chart area
    pub fn inner_transform(&self) -> String {
        format!("translate({}, {})", self.margin.left, self.margin.top)
    }

    /// ViewBox string for SVG
    pub fn viewbox(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}

impl Default for ChartDimensions {
    fn default() -> Self {
        Self::new(400.0, 400.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_area() {
        let dims = ChartDimensions::new(700.0, 450.0);
        assert_eq!(dims.inner_width(), 700.0 - 88.0 - 92.0);
        assert_eq!(dims.inner_height(), 450.0 - 70.0 - 80.0);
        assert_eq!(dims.inner_transform(), "translate(88, 70)");
        assert_eq!(dims.viewbox(), "0 0 700 450");
    }

    #[test]
    fn test_small_container_clamps_to_zero() {
        let dims = ChartDimensions::from_container(ContainerSize::new(100.0, 100.0));
        assert_eq!(dims.inner_width(), 0.0);
        assert_eq!(dims.inner_height(), 0.0);

        let dims = dims.with_margin(ChartMargin::uniform(10.0));
        assert_eq!(dims.inner_width(), 80.0);
    }
}
