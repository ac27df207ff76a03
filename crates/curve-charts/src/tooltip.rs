//! Tooltip callout geometry
//!
//! A speech-bubble box sitting above the hovered marker with a small notch
//! pointing down at it. Text width is estimated from the glyph count since
//! the geometry is computed before anything is laid out.

use crate::chartkit::PathBuilder;
use crate::resolver::{CalloutLabels, ScreenPoint};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalloutStyle {
    pub height: f64,
    /// Average advance of one bold 1rem glyph
    pub glyph_width: f64,
    pub padding: f64,
    pub line_spacing: f64,
    pub first_line_offset: f64,
}

impl Default for CalloutStyle {
    fn default() -> Self {
        Self {
            height: 64.0,
            glyph_width: 9.0,
            padding: 16.0,
            line_spacing: 17.0,
            first_line_offset: -63.7,
        }
    }
}

/// One positioned text line inside the callout
#[derive(Debug, Clone, PartialEq)]
pub struct CalloutLine {
    pub text: String,
    pub offset_y: f64,
}

/// Callout drawn relative to `anchor` (the group is translated there)
#[derive(Debug, Clone, PartialEq)]
pub struct Callout {
    pub anchor: ScreenPoint,
    pub width: f64,
    pub path: String,
    pub lines: Vec<CalloutLine>,
}

impl Callout {
    pub fn new(anchor: ScreenPoint, labels: &CalloutLabels, style: &CalloutStyle) -> Self {
        let longest = labels
            .lines()
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);
        let width = longest as f64 * style.glyph_width + style.padding;

        let lines = labels
            .lines()
            .iter()
            .enumerate()
            .map(|(i, text)| CalloutLine {
                text: text.to_string(),
                offset_y: style.first_line_offset + style.line_spacing * i as f64,
            })
            .collect();

        Self {
            anchor,
            width,
            path: callout_path(width, style.height),
            lines,
        }
    }

    pub fn transform(&self) -> String {
        format!("translate({}, {})", self.anchor.x, self.anchor.y)
    }
}

/// Bubble outline centred on x = 0, notch tip at (0, -17)
pub fn callout_path(width: f64, height: f64) -> String {
    let half = width / 2.0;
    PathBuilder::new()
        .move_to(half, -25.0)
        .cubic_by(0.0, 3.0, -2.0, 5.0, -5.0, 5.0)
        .horizontal_by(-(half - 8.0))
        .line_by(-3.0, 3.0)
        .line_by(-3.0, -3.0)
        .horizontal_by(-(half - 8.0))
        .cubic_by(-3.0, 0.0, -5.0, -2.0, -5.0, -5.0)
        .vertical_by(-(height - 10.0))
        .cubic_by(0.0, -3.0, 2.0, -5.0, 5.0, -5.0)
        .horizontal_by(width - 10.0)
        .cubic_by(3.0, 0.0, 5.0, 2.0, 5.0, 5.0)
        .close()
        .build()
}
