use crate::core::dispatch::{parse_slider_value, Trigger, BINDINGS};
use crate::core::{DispatchTable, StressState};
use crate::{dom, ui};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Hook every bound control up to its handler. Missing elements are logged
/// and skipped; the rest of the page keeps working.
pub fn wire_controls(document: &web::Document, state: Rc<RefCell<StressState>>) {
    let table = Rc::new(DispatchTable::new());
    for binding in BINDINGS.iter().copied() {
        let table_cb = table.clone();
        let state_cb = state.clone();
        let doc_cb = document.clone();
        let id = binding.element_id;
        let wired = dom::add_listener(document, id, binding.trigger.event_name(), move |ev| {
            let value = match binding.trigger {
                Trigger::Input => parse_slider_value(&dom::input_value(&ev)),
                Trigger::Click => 0.0,
            };
            let updates = table_cb.dispatch(&mut state_cb.borrow_mut(), id, value);
            if let Some(updates) = updates {
                ui::apply_updates(&doc_cb, updates.iter());
            }
        });
        if !wired {
            log::warn!("[ui] #{id} not found, control disabled");
        }
    }
}

fn on_canvas<E: FromWasmAbi + 'static>(
    canvas: &web::HtmlCanvasElement,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    _ = canvas.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Drag to orbit, wheel to zoom.
pub fn wire_orbit_pointer(canvas: &web::HtmlCanvasElement, state: Rc<RefCell<StressState>>) {
    {
        let state = state.clone();
        let canvas_cb = canvas.clone();
        on_canvas(canvas, "pointerdown", move |ev: web::PointerEvent| {
            _ = canvas_cb.set_pointer_capture(ev.pointer_id());
            state
                .borrow_mut()
                .orbit
                .pointer_down(ev.client_x() as f32, ev.client_y() as f32);
        });
    }
    {
        let state = state.clone();
        let canvas_cb = canvas.clone();
        on_canvas(canvas, "pointermove", move |ev: web::PointerEvent| {
            let h = canvas_cb.client_height() as f32;
            state
                .borrow_mut()
                .orbit
                .pointer_move(ev.client_x() as f32, ev.client_y() as f32, h);
        });
    }
    for name in ["pointerup", "pointercancel"] {
        let state = state.clone();
        on_canvas(canvas, name, move |_: web::PointerEvent| {
            state.borrow_mut().orbit.pointer_up();
        });
    }
    on_canvas(canvas, "wheel", move |ev: web::WheelEvent| {
        ev.prevent_default();
        state.borrow_mut().orbit.wheel(ev.delta_y() as f32);
    });
}

/// Keep the canvas backing store at CSS size times devicePixelRatio.
/// The frame loop notices the new size and reconfigures the surface.
pub fn wire_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}
