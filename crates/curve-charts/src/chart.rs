//! Optimization curve component
//!
//! Renders a [`ChartLayout`] and the host's [`Selection`] as SVG and routes
//! pointer events through a transparent rectangle over the plot area. The
//! selected index is owned by the host: the component reads it and reports
//! presses through `on_select`.

use curve_core::{
    colors, AxisDescriptor, ChartAxes, ColorLegend, ContainerSize, KeyAccessor, LinePoint, SeriesKey, XAccessor,
};
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::MouseEvent;

use crate::axis::AxisLayout;
use crate::composer::{layout_chart, ChartConfig, ChartInput, ChartLayout, Selection};
use crate::dimensions::use_dimensions;
use crate::interaction::PointerInteraction;

/// Pointer x relative to the element the handler is attached to
fn local_x(ev: &MouseEvent) -> Option<f64> {
    let target = ev.current_target()?.dyn_into::<web_sys::Element>().ok()?;
    Some(ev.client_x() as f64 - target.get_bounding_client_rect().left())
}

/// Line series over a stacked area chart with a shared X axis
#[component]
pub fn OptimizationCurve<R>(
    #[prop(into)] line_data: Signal<Vec<LinePoint>>,
    #[prop(into)] area_data: Signal<Vec<R>>,
    #[prop(into)] keys: Signal<Vec<SeriesKey>>,
    accessor: KeyAccessor<R>,
    x_accessor: XAccessor<R>,
    #[prop(into)] selected: Signal<usize>,
    #[prop(into)] on_select: Callback<usize>,
    legend: ColorLegend,
    x_axis: AxisDescriptor,
    line_axis: AxisDescriptor,
    stack_axis: AxisDescriptor,
    #[prop(optional)] on_edit_axis: Option<Callback<String>>,
    #[prop(optional)] config: Option<ChartConfig>,
    /// Fixed width instead of the measured container width
    #[prop(optional)]
    width: Option<f64>,
    /// Fixed height instead of the measured container height
    #[prop(optional)]
    height: Option<f64>,
) -> impl IntoView
where
    R: Clone + Send + Sync + 'static,
{
    let config = config.unwrap_or_default();
    let axes = ChartAxes::new(x_axis, line_axis, stack_axis);
    let (container_ref, container_size) = use_dimensions();

    let dims = {
        let config = config.clone();
        Memo::new(move |_| {
            let measured = container_size.get();
            config.dimensions(ContainerSize::new(
                width.unwrap_or(measured.width),
                height.unwrap_or(measured.height),
            ))
        })
    };

    // A failed pass keeps the previous layout on screen
    let layout = Memo::new(move |previous: Option<&Option<ChartLayout>>| {
        let dims = dims.get();
        let x_of = |record: &R| x_accessor.x(record);

        let result = line_data.with(|line| {
            area_data.with(|area| {
                keys.with(|keys| {
                    let input = ChartInput {
                        line,
                        area,
                        keys,
                        accessor: &accessor,
                        x_of: &x_of,
                        legend: &legend,
                        axes: &axes,
                    };
                    layout_chart(&config, dims, &input)
                })
            })
        });

        match result {
            Ok(layout) => Some(layout),
            Err(err) => {
                tracing::warn!(%err, "keeping previous chart layout");
                previous.cloned().flatten()
            }
        }
    });

    // Selection changes only move the marker
    let selection = Memo::new(move |_| {
        let selected = selected.get();
        layout.with(|layout| layout.as_ref().and_then(|layout| layout.select(selected)))
    });

    let pointer = RwSignal::new(PointerInteraction::new());

    // A hover resolved against an old layout must not outlive it
    Effect::new(move |_| {
        layout.track();
        pointer.update(|p| p.reset());
    });

    let on_mouse_move = move |ev: MouseEvent| {
        let Some(x) = local_x(&ev) else {
            return;
        };
        layout.with_untracked(|layout| {
            if let Some(layout) = layout {
                pointer.update(|p| {
                    p.move_to(&layout.resolver(), x);
                });
            }
        });
    };

    let on_mouse_down = move |ev: MouseEvent| {
        let Some(x) = local_x(&ev) else {
            return;
        };
        // Re-resolved against the current layout; a stale hover is never committed
        let committed = layout.with_untracked(|layout| {
            let layout = layout.as_ref()?;
            let mut committed = None;
            pointer.update(|p| {
                p.commit_at(&layout.resolver(), x, |index| committed = Some(index));
            });
            committed
        });
        if let Some(index) = committed {
            on_select.run(index);
        }
    };

    let view_box = move || dims.get().viewbox();
    let svg_width = move || dims.get().width;
    let svg_height = move || dims.get().height;
    let inner_transform = move || dims.get().inner_transform();

    view! {
        <div node_ref=container_ref class="optimization-curve" style="width: 100%; height: 100%;">
            <svg
                width=svg_width
                height=svg_height
                viewBox=view_box
                style="display: block;"
            >
                <g transform=inner_transform>
                    {move || layout.get().map(|layout| view! { <LayoutLayers layout=layout on_edit_axis=on_edit_axis /> })}
                    {move || selection.get().map(|selection| view! { <SelectionLayer selection=selection /> })}

                    // Callout
                    {move || {
                        let p = pointer.get();
                        let hover = p.hover().filter(|_| p.callout_visible())?;
                        let callout = layout.with(|l| l.as_ref().and_then(|l| l.callout(hover.index)))?;
                        let transform = callout.transform();
                        Some(view! {
                            <g transform=transform pointer-events="none">
                                <path d=callout.path fill=colors::CALLOUT_BG stroke=colors::MARKER_STROKE />
                                {callout
                                    .lines
                                    .into_iter()
                                    .map(|line| view! {
                                        <text
                                            transform=format!("translate(0, {})", line.offset_y)
                                            text-anchor="middle"
                                            font-size="1rem"
                                            font-weight="bold"
                                            fill=colors::CALLOUT_TEXT
                                        >
                                            {line.text}
                                        </text>
                                    })
                                    .collect_view()}
                            </g>
                        })
                    }}

                    // Interaction rect
                    <rect
                        width=move || dims.get().inner_width()
                        height=move || dims.get().inner_height()
                        fill="none"
                        pointer-events="all"
                        on:mouseover=move |_| pointer.update(|p| p.enter())
                        on:mouseleave=move |_| pointer.update(|p| p.leave())
                        on:mousemove=on_mouse_move
                        on:mousedown=on_mouse_down
                    />
                </g>
            </svg>
        </div>
    }
}

/// Data-dependent drawing of one pass: areas, line and axes
#[component]
fn LayoutLayers(layout: ChartLayout, on_edit_axis: Option<Callback<String>>) -> impl IntoView {
    view! {
        <g class="areas">
            {layout
                .areas
                .into_iter()
                .map(|area| view! {
                    <path d=area.path fill=area.color stroke=colors::AREA_STROKE />
                })
                .collect_view()}
        </g>

        <path d=layout.line_path fill="none" stroke=colors::LINE stroke-width="1.5" />

        <AxisView layout=layout.x_axis on_edit=on_edit_axis />
        <AxisView layout=layout.line_axis on_edit=on_edit_axis />
        <AxisView layout=layout.stack_axis on_edit=on_edit_axis />
    }
}

/// Marker, stacked-sum line and optional guides for the selected index
#[component]
fn SelectionLayer(selection: Selection) -> impl IntoView {
    let marker = selection.marker.geometry.marker;
    let radius = selection.marker.radius;

    view! {
        {selection.reference_lines.map(|refs| view! {
            <g class="reference-lines">
                <line
                    x1="0" x2=refs.width
                    y1=refs.line_y y2=refs.line_y
                    stroke=refs.line_color
                    stroke-dasharray="4"
                />
                <line
                    x1="0" x2=refs.width
                    y1=refs.stack_y y2=refs.stack_y
                    stroke=refs.stack_color
                    stroke-dasharray="4"
                />
            </g>
        })}

        <g class="selection">
            <path d=selection.marker.stack_line_path stroke=colors::LINE />
            <circle
                cx=marker.x
                cy=marker.y
                r=radius
                fill=colors::LINE
                stroke=colors::MARKER_STROKE
            />
        </g>
    }
}

/// One axis with its ticks and (optionally editable) title
#[component]
fn AxisView(layout: AxisLayout, on_edit: Option<Callback<String>>) -> impl IntoView {
    let (mark_x, mark_y) = layout.tick_mark();
    let (label_x, label_y, anchor) = layout.label_anchor();
    let side = layout.side;
    let color = layout.color;
    let class = format!("axis axis-{}", layout.kind.label());

    let edit = on_edit.filter(|_| layout.editable).map(|callback| {
        let key = layout.indicator_key.clone();
        view! {
            <tspan
                style="cursor: pointer;"
                on:click=move |_| {
                    tracing::debug!(key = %key, "axis edit requested");
                    callback.run(key.clone());
                }
            >
                " \u{270F}\u{FE0F}"
            </tspan>
        }
    });

    view! {
        <g class=class transform=layout.transform>
            <path d=layout.domain_path fill="none" stroke=color stroke-width="1" />
            {layout
                .ticks
                .into_iter()
                .map(|tick| {
                    let transform = tick.transform(side);
                    view! {
                        <g class="tick" transform=transform>
                            <line x2=mark_x y2=mark_y stroke=color />
                            <text x=label_x y=label_y text-anchor=anchor font-size="14px" fill=color>
                                {tick.label}
                            </text>
                        </g>
                    }
                })
                .collect_view()}
            <text transform=layout.title_transform text-anchor="middle" font-size="20px" fill=color>
                {layout.title}
                {edit}
            </text>
        </g>
    }
}
