//! # curve-state
//!
//! Host-side reactive state for the optimization curve.
//! The selected slice index lives here and nowhere else: the chart gets a
//! read-only signal plus a callback that writes back into it.

use leptos::prelude::*;

// ============================================================================
// SELECTION
// ============================================================================

/// Keep `index` inside a dataset of `len` entries
pub fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

/// The single authoritative selected index
#[derive(Debug, Clone, Copy)]
pub struct SelectionState {
    index: RwSignal<usize>,
}

impl SelectionState {
    pub fn new(initial: usize) -> Self {
        Self {
            index: RwSignal::new(initial),
        }
    }

    /// Current index (tracked)
    pub fn get(&self) -> usize {
        self.index.get()
    }

    pub fn select(&self, index: usize) {
        if self.index.get_untracked() != index {
            tracing::debug!(index, "selected slice changed");
            self.index.set(index);
        }
    }

    /// Pull the index back in range after the dataset shrank
    pub fn clamp_to(&self, len: usize) {
        let current = self.index.get_untracked();
        let clamped = clamp_index(current, len);
        if clamped != current {
            tracing::warn!(current, len, "selection outside dataset, clamping");
            self.index.set(clamped);
        }
    }

    /// Read-only view handed to the chart
    pub fn signal(&self) -> Signal<usize> {
        self.index.into()
    }

    /// Write-intent callback handed to the chart
    pub fn callback(&self) -> Callback<usize> {
        let state = *self;
        Callback::new(move |index| state.select(index))
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(0)
    }
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Global chart host state
#[derive(Debug, Clone, Copy)]
pub struct CurveState {
    pub selection: SelectionState,
    /// Indicator key of the axis the user last asked to edit
    pub editing_axis: RwSignal<Option<String>>,
}

impl CurveState {
    pub fn new(initial_selection: usize) -> Self {
        Self {
            selection: SelectionState::new(initial_selection),
            editing_axis: RwSignal::new(None),
        }
    }

    /// Callback for the chart's axis edit affordance
    pub fn edit_axis_callback(&self) -> Callback<String> {
        let editing = self.editing_axis;
        Callback::new(move |key: String| {
            tracing::debug!(key = %key, "axis edit requested");
            editing.set(Some(key));
        })
    }

    pub fn finish_editing(&self) {
        self.editing_axis.set(None);
    }
}

impl Default for CurveState {
    fn default() -> Self {
        Self::new(0)
    }
}

// ============================================================================
// CONTEXT HELPERS
// ============================================================================

/// Provide curve state context to component tree
pub fn provide_curve_state(initial_selection: usize) -> CurveState {
    let state = CurveState::new(initial_selection);
    provide_context(state);
    state
}

/// Use curve state from context
pub fn use_curve_state() -> CurveState {
    expect_context::<CurveState>()
}
