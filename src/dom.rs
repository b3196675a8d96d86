use crate::core::MAX_PIXEL_RATIO;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Window inner size in CSS pixels, `(0, 0)` if unavailable.
pub fn viewport_size(window: &web::Window) -> (f64, f64) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (w, h)
}

/// Device pixel ratio capped to bound fill-rate on dense displays.
#[inline]
pub fn pixel_ratio(window: &web::Window) -> f64 {
    window.device_pixel_ratio().min(MAX_PIXEL_RATIO)
}

/// Match the canvas backing store to the viewport size times the capped
/// pixel ratio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = pixel_ratio(&w);
        let (vw, vh) = viewport_size(&w);
        canvas.set_width(((vw * dpr) as u32).max(1));
        canvas.set_height(((vh * dpr) as u32).max(1));
    }
}

/// All elements matching `selector` that are `HtmlElement`s.
pub fn query_all(document: &web::Document, selector: &str) -> Vec<web::HtmlElement> {
    let Ok(list) = document.query_selector_all(selector) else {
        log::warn!("[dom] bad selector {}", selector);
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::HtmlElement>().ok())
        .collect()
}

pub fn set_body_class(document: &web::Document, class: &str, on: bool) {
    if let Some(body) = document.body() {
        _ = body.class_list().toggle_with_force(class, on);
    }
}
