//! Container size observation

use curve_core::ContainerSize;
use leptos::{html, prelude::*};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Element, ResizeObserver};

fn measure(element: &Element) -> ContainerSize {
    let rect = element.get_bounding_client_rect();
    ContainerSize::new(rect.width(), rect.height())
}

type ResizeCallback = Closure<dyn FnMut(js_sys::Array)>;

/// Live observer together with the callback it invokes
struct Observation {
    observer: ResizeObserver,
    _on_resize: ResizeCallback,
}

impl Observation {
    fn disconnect(self) {
        self.observer.disconnect();
    }
}

/// Track the size of the element bound to the returned `NodeRef`.
///
/// The size is read once on mount, then again on every resize reported by a
/// `ResizeObserver`. Re-binding the node disconnects the previous observer,
/// and the owner's cleanup disconnects the last one and drops its callback.
/// Until the element mounts the size is zero.
pub fn use_dimensions() -> (NodeRef<html::Div>, Signal<ContainerSize>) {
    let node_ref = NodeRef::<html::Div>::new();
    let size = RwSignal::new(ContainerSize::default());
    let observation = StoredValue::new_local(None::<Observation>);

    Effect::new(move |_| {
        let Some(div) = node_ref.get() else {
            return;
        };
        let element: Element = div.unchecked_into();
        size.set(measure(&element));

        if let Some(previous) = observation.try_update_value(Option::take).flatten() {
            previous.disconnect();
        }

        let target = element.clone();
        let on_resize: ResizeCallback = Closure::new(move |_entries: js_sys::Array| {
            let measured = measure(&target);
            if size.get_untracked() != measured {
                tracing::debug!(width = measured.width, height = measured.height, "chart container resized");
                size.set(measured);
            }
        });

        match ResizeObserver::new(on_resize.as_ref().unchecked_ref()) {
            Ok(observer) => {
                observer.observe(&element);
                observation.set_value(Some(Observation {
                    observer,
                    _on_resize: on_resize,
                }));
            }
            Err(err) => tracing::warn!(?err, "ResizeObserver unavailable, size fixed at mount"),
        }
    });

    on_cleanup(move || {
        if let Some(current) = observation.try_update_value(Option::take).flatten() {
            current.disconnect();
        }
    });

    (node_ref, size.into())
}
