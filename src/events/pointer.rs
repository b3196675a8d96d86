use super::{Handles, Listener, Session};
use crate::core::interaction::handle_click;
use crate::core::Pointer;
use crate::dom;
use web_sys as web;

pub fn wire_pointer_handlers(session: &mut Session, window: &web::Window, h: &Handles) {
    session.listen(wire_mousemove(window, h));
    session.listen(wire_click(window, h));
}

fn wire_mousemove(window: &web::Window, h: &Handles) -> Listener {
    let h = h.clone();
    let wnd = window.clone();
    Listener::new(window, "mousemove", move |ev: web::MouseEvent| {
        let (vw, vh) = dom::viewport_size(&wnd);
        h.state.borrow_mut().pointer =
            Pointer::from_client(ev.client_x() as f32, ev.client_y() as f32, vw as f32, vh as f32);
    })
}

fn wire_click(window: &web::Window, h: &Handles) -> Listener {
    let h = h.clone();
    let wnd = window.clone();
    Listener::new(window, "click", move |ev: web::MouseEvent| {
        // clicks arrive without a preceding move on touch screens
        let (vw, vh) = dom::viewport_size(&wnd);
        let pointer =
            Pointer::from_client(ev.client_x() as f32, ev.client_y() as f32, vw as f32, vh as f32);
        h.state.borrow_mut().pointer = pointer;

        let mut scene = h.scene.borrow_mut();
        let mut tweener = h.tweener.borrow_mut();
        let mut rng = h.rng.borrow_mut();
        if handle_click(&mut scene, &mut tweener, pointer, &mut *rng).is_none() {
            log::debug!("[click] miss at ({:.2}, {:.2})", pointer.x, pointer.y);
        }
    })
}
