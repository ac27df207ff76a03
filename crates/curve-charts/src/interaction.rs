//! Pointer interaction over the plot area
//!
//! Hovering only moves the local callout. The authoritative selection lives
//! with the host and changes only when a press is committed through the
//! host's callback.

use crate::resolver::{Resolver, ScreenPoint};

/// Where the callout currently points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverState {
    pub index: usize,
    /// Marker position of the hovered index (line point in pixels)
    pub anchor: ScreenPoint,
}

/// Local hover/callout state of the interaction rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerInteraction {
    hover: Option<HoverState>,
    inside: bool,
}

impl PointerInteraction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer entered the plot area
    pub fn enter(&mut self) {
        self.inside = true;
    }

    /// Pointer left the plot area
    pub fn leave(&mut self) {
        self.inside = false;
    }

    /// Resolve the nearest index for a pointer x in plot-area pixels
    pub fn move_to(&mut self, resolver: &Resolver<'_>, pixel_x: f64) -> Option<HoverState> {
        let index = resolver.resolve(pixel_x)?;
        let geometry = resolver.geometry(index)?;
        let hover = HoverState {
            index,
            anchor: geometry.marker,
        };
        self.hover = Some(hover);
        Some(hover)
    }

    /// Index to commit on a pointer press against data of length `len`.
    ///
    /// `None` until the pointer has moved, or when the hover was resolved
    /// against data that has since shrunk below it.
    pub fn press(&self, len: usize) -> Option<usize> {
        self.hover.map(|h| h.index).filter(|&index| index < len)
    }

    /// Commit the hovered index through the host's selection callback
    pub fn commit(&self, len: usize, on_select: impl FnOnce(usize)) -> bool {
        match self.press(len) {
            Some(index) => {
                tracing::debug!(index, "selection committed");
                on_select(index);
                true
            }
            None => {
                if let Some(hover) = self.hover {
                    tracing::debug!(index = hover.index, len, "dropping stale hover on press");
                }
                false
            }
        }
    }

    /// Re-resolve `pixel_x` against the current pass, then commit
    pub fn commit_at(&mut self, resolver: &Resolver<'_>, pixel_x: f64, on_select: impl FnOnce(usize)) -> bool {
        self.move_to(resolver, pixel_x);
        self.commit(resolver.len(), on_select)
    }

    pub fn hover(&self) -> Option<HoverState> {
        self.hover
    }

    /// Callout is drawn while the pointer is inside and resolved somewhere
    pub fn callout_visible(&self) -> bool {
        self.inside && self.hover.is_some()
    }

    /// Forget the hover, e.g. after the data changed underneath it
    pub fn reset(&mut self) {
        self.hover = None;
    }
}
