use crate::constants::{FX_BUTTON_ID, NOFX_CLASS, REDUCED_MOTION_QUERY};
use crate::core::state::apply_reduced_motion;
use crate::core::widgets::fx_label;
use crate::dom;
use crate::events::{Handles, Listener, Session};
use web_sys as web;

/// Wire the FX toggle button, if the page has one.
pub fn wire_fx_toggle(session: &mut Session, document: &web::Document, h: &Handles) {
    let Some(button) = document.get_element_by_id(FX_BUTTON_ID) else {
        return;
    };
    let h = h.clone();
    let doc = document.clone();
    let label = button.clone();
    session.listen(Listener::new(&button, "click", move |ev: web::MouseEvent| {
        ev.prevent_default();
        let on = {
            let mut state = h.state.borrow_mut();
            state.fx.toggle(&mut h.scene.borrow_mut())
        };
        dom::set_body_class(&doc, NOFX_CLASS, !on);
        label.set_text_content(Some(fx_label(on)));
        log::debug!("[fx] {}", fx_label(on));
    }));
}

/// Honor a reduced-motion preference at load: mark the page and hide the
/// gated layers. Returns whether the preference was set.
pub fn apply_motion_preference(window: &web::Window, document: &web::Document, h: &Handles) -> bool {
    let prefers_reduced = window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .map(|mq| mq.matches())
        .unwrap_or(false);
    if apply_reduced_motion(&mut h.scene.borrow_mut(), prefers_reduced) {
        dom::set_body_class(document, NOFX_CLASS, true);
        log::info!("[fx] reduced motion preferred; secondary layers hidden");
    }
    prefers_reduced
}
