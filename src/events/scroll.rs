use super::{Handles, Listener, Session};
use crate::core::ScrollResponse;
use crate::dom;
use web_sys as web;

/// Scroll drives point-light hue/intensity, camera depth and a torus nudge.
/// Runs on every event; nothing is cached between calls.
pub fn wire_scroll(session: &mut Session, window: &web::Window, document: &web::Document, h: &Handles) {
    let h = h.clone();
    let wnd = window.clone();
    session.listen(Listener::new(document, "scroll", move |_: web::Event| {
        let y = wnd.scroll_y().unwrap_or(0.0) as f32;
        ScrollResponse::from_offset(y).apply(&mut h.scene.borrow_mut());
    }));
}

/// Keep the camera aspect and the canvas backing store in step with the
/// viewport. The renderer picks up the new canvas size on its next frame.
pub fn wire_resize(session: &mut Session, window: &web::Window, canvas: &web::HtmlCanvasElement, h: &Handles) {
    let h = h.clone();
    let wnd = window.clone();
    let canvas = canvas.clone();
    session.listen(Listener::new(window, "resize", move |_: web::Event| {
        let (vw, vh) = dom::viewport_size(&wnd);
        h.scene
            .borrow_mut()
            .camera
            .set_viewport(vw as f32, vh as f32);
        dom::sync_canvas_backing_size(&canvas);
    }));
}
