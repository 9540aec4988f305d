use crate::core::stats::bytes_to_mb;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Attach `handler` to `event` on the element with `element_id`.
/// Returns false when the element is missing so callers can log it.
pub fn add_listener(
    document: &web::Document,
    element_id: &str,
    event: &str,
    mut handler: impl FnMut(web::Event) + 'static,
) -> bool {
    let Some(el) = document.get_element_by_id(element_id) else {
        return false;
    };
    let closure = Closure::wrap(Box::new(move |ev: web::Event| handler(ev)) as Box<dyn FnMut(web::Event)>);
    let ok = el
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .is_ok();
    closure.forget();
    ok
}

pub fn set_text(document: &web::Document, element_id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        el.set_text_content(Some(text));
    }
}

pub fn set_active(document: &web::Document, element_id: &str, active: bool) {
    if let Some(el) = document.get_element_by_id(element_id) {
        _ = el.set_attribute("data-active", if active { "true" } else { "false" });
    }
}

/// Current value of an `<input>`; empty when the event target is something else.
pub fn input_value(ev: &web::Event) -> String {
    ev.target()
        .and_then(|t| t.dyn_into::<web::HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// `performance.memory.usedJSHeapSize` in MB, 0 where the browser hides it.
pub fn heap_used_mb(window: &web::Window) -> u32 {
    let Some(perf) = window.performance() else {
        return 0;
    };
    let memory = js_sys::Reflect::get(&perf, &JsValue::from_str("memory")).unwrap_or(JsValue::UNDEFINED);
    if memory.is_undefined() || memory.is_null() {
        return 0;
    }
    js_sys::Reflect::get(&memory, &JsValue::from_str("usedJSHeapSize"))
        .ok()
        .and_then(|v| v.as_f64())
        .map(bytes_to_mb)
        .unwrap_or(0)
}

/// Find the render canvas, or create a full-window one and append it to `<body>`.
pub fn ensure_canvas(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    if let Some(el) = document.get_element_by_id(id) {
        return el
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| anyhow::anyhow!(format!("#{id} is not a canvas: {:?}", e)));
    }
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    canvas.set_id(id);
    _ = canvas.set_attribute("style", "display:block;width:100vw;height:100vh");
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no body"))?;
    body.append_child(&canvas)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    log::info!("created #{id}");
    Ok(canvas)
}
