//! # curve-core
//!
//! Core domain types for the optimization curve chart.
//! Implements Strategy pattern for number formatting, series access and
//! legend colouring.

pub mod axis;
pub mod error;
pub mod format;
pub mod legend;
pub mod series;

pub use axis::*;
pub use error::*;
pub use format::*;
pub use legend::*;
pub use series::*;

use serde::{Deserialize, Serialize};

// ============================================================================
// CORE VALUE TYPES
// ============================================================================

/// One point of the line series.
///
/// Sequences of points are expected to be ascending by `x`; nothing
/// enforces it, but nearest-point search and line rendering assume it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LinePoint {
    pub x: f64,
    pub y: f64,
}

impl LinePoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for LinePoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Measured size of the element hosting the chart
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl ContainerSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

// ============================================================================
// COLOR CONSTANTS
// ============================================================================

pub mod colors {
    pub const LINE: &str = "red";
    pub const AREA_STROKE: &str = "grey";
    pub const MARKER_STROKE: &str = "black";
    pub const LINE_REFERENCE: &str = "blue";
    pub const STACK_REFERENCE: &str = "green";
    pub const CALLOUT_TEXT: &str = "#2080C2";
    pub const CALLOUT_BG: &str = "white";
    pub const AXIS: &str = "black";
    pub const NEUTRAL: &str = "#888888";

    /// Palette used by the demo legend
    pub const AREA_PALETTE: [&str; 3] = ["#ff9999", "#66b3ff", "#99ff99"];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_point_from_tuple() {
        let p: LinePoint = (2.0, 30.0).into();
        assert_eq!(p, LinePoint::new(2.0, 30.0));
        assert!(p.is_finite());
        assert!(!LinePoint::new(f64::NAN, 1.0).is_finite());
    }

    #[test]
    fn test_line_points_from_json() {
        let points: Vec<LinePoint> =
            serde_json::from_str(r#"[{"x":0,"y":10},{"x":1,"y":20}]"#).unwrap();
        assert_eq!(points, vec![LinePoint::new(0.0, 10.0), LinePoint::new(1.0, 20.0)]);
    }
}
