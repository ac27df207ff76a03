//! # curve-app
//!
//! WASM demo mounting the optimization curve with an embedded dataset.

mod sample;

use curve_charts::{ChartConfig, OptimizationCurve};
use curve_core::{colors, ColorLegend};
use curve_state::{provide_curve_state, use_curve_state};
use leptos::prelude::*;

use crate::sample::{trim_last_slice, AreaRecord, SampleData};

#[component]
fn App() -> impl IntoView {
    let state = provide_curve_state(0);

    let sample = match SampleData::load() {
        Ok(sample) => sample,
        Err(err) => {
            tracing::error!(%err, "embedded sample data is malformed");
            return view! { <p class="error">"Sample data could not be loaded."</p> }.into_any();
        }
    };

    let legend = ColorLegend::from_palette(sample.keys.clone(), &colors::AREA_PALETTE);
    let config = ChartConfig::default().with_reference_lines(true);
    let line = RwSignal::new(sample.line.clone());
    let area = RwSignal::new(sample.area.clone());
    let original = StoredValue::new((sample.line, sample.area));

    // The host owns the index, so it pulls it back in range itself
    Effect::new(move |_| {
        state.selection.clamp_to(line.with(Vec::len));
    });

    let trim = move |_| {
        let mut remaining = 0;
        line.update(|line| area.update(|area| remaining = trim_last_slice(line, area)));
        tracing::info!(remaining, "trimmed last slice");
    };

    let reset = move |_| {
        let (line_data, area_data) = original.get_value();
        line.set(line_data);
        area.set(area_data);
    };

    view! {
        <div class="App">
            <h2>"Optimization Curve Example"</h2>
            <OptimizationCurve
                line_data=line
                area_data=area
                keys=sample.keys
                accessor=AreaRecord::accessor()
                x_accessor=AreaRecord::x_accessor()
                selected=state.selection.signal()
                on_select=state.selection.callback()
                legend=legend
                x_axis=sample.axes.x
                line_axis=sample.axes.line
                stack_axis=sample.axes.stack
                on_edit_axis=state.edit_axis_callback()
                config=config
                width=800.0
                height=400.0
            />
            <div class="controls">
                <button on:click=trim>"Trim last slice"</button>
                <button on:click=reset>"Reset data"</button>
            </div>
            <SelectionReadout />
        </div>
    }
    .into_any()
}

/// Selected index and the axis being edited, read from context
#[component]
fn SelectionReadout() -> impl IntoView {
    let state = use_curve_state();

    view! {
        <p>"Selected slice index: " {move || state.selection.get()}</p>
        {move || state.editing_axis.get().map(|key| view! {
            <p class="axis-edit">
                "Editing axis: " {key} " "
                <button on:click=move |_| state.finish_editing()>"Done"</button>
            </p>
        })}
    }
}

fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    tracing::info!("starting optimization curve demo");
    mount_to_body(App);
}
