use crate::constants::*;
use crate::core::widgets;
use crate::dom;
use crate::events::{Listener, Session};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Wire the stateless DOM microinteractions. Each one is skipped when its
/// elements are absent.
pub fn wire_microinteractions(session: &mut Session, document: &web::Document) {
    wire_smooth_nav(session, document);
    wire_horizontal_scroll(session, document);
    wire_tilt(session, document);
    wire_section_tint(session, document);
}

fn wire_smooth_nav(session: &mut Session, document: &web::Document) {
    for selector in [NAV_SELECTOR, CTA_NAV_SELECTOR] {
        let is_cta = selector == CTA_NAV_SELECTOR;
        for el in dom::query_all(document, selector) {
            // call-to-action links get a single handler, from the second pass
            if !is_cta && el.class_list().contains(CTA_CLASS) {
                continue;
            }
            let doc = document.clone();
            let link = el.clone();
            session.listen(Listener::new(&el, "click", move |ev: web::MouseEvent| {
                ev.prevent_default();
                let href = link.get_attribute("href");
                let data_go = link.get_attribute(NAV_ATTR);
                let Some(target) = widgets::nav_target(href.as_deref(), data_go.as_deref(), is_cta)
                else {
                    return;
                };
                match doc.query_selector(target) {
                    Ok(Some(dest)) => {
                        let opts = web::ScrollIntoViewOptions::new();
                        opts.set_behavior(web::ScrollBehavior::Smooth);
                        dest.scroll_into_view_with_scroll_into_view_options(&opts);
                    }
                    _ => log::debug!("[nav] no element for {}", target),
                }
            }));
        }
    }
}

fn wire_horizontal_scroll(session: &mut Session, document: &web::Document) {
    let Some(container) = document.get_element_by_id(HSCROLL_ID) else {
        return;
    };
    let strip = container.clone();
    let mut carry = widgets::ScrollCarry::default();
    session.listen(Listener::non_passive(&container, "wheel", move |ev: web::WheelEvent| {
        if let Some(dx) = widgets::wheel_remap(ev.delta_x(), ev.delta_y()) {
            ev.prevent_default();
            let step = carry.take(dx);
            if step != 0 {
                strip.set_scroll_left(strip.scroll_left() + step);
            }
        }
    }));
}

fn wire_tilt(session: &mut Session, document: &web::Document) {
    for el in dom::query_all(document, TILT_SELECTOR) {
        let card = el.clone();
        session.listen(Listener::new(&el, "pointermove", move |ev: web::PointerEvent| {
            let rect = card.get_bounding_client_rect();
            let (x, y) = widgets::tilt_offset(
                ev.client_x() as f64,
                ev.client_y() as f64,
                rect.left(),
                rect.top(),
                rect.width(),
                rect.height(),
            );
            _ = card
                .style()
                .set_property("transform", &widgets::tilt_transform(x, y));
        }));
        let card = el.clone();
        session.listen(Listener::new(&el, "pointerleave", move |_: web::PointerEvent| {
            _ = card.style().remove_property("transform");
        }));
    }
}

fn wire_section_tint(session: &mut Session, document: &web::Document) {
    let cards = dom::query_all(document, TINT_SELECTOR);
    if cards.is_empty() {
        return;
    }
    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, _obs: web::IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                if let Ok(card) = entry.target().dyn_into::<web::HtmlElement>() {
                    flash_accent(&card);
                }
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

    let init = web::IntersectionObserverInit::new();
    init.set_threshold(&wasm_bindgen::JsValue::from_f64(TINT_THRESHOLD));
    let observer =
        match web::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(o) => o,
            Err(e) => {
                log::warn!("[tint] IntersectionObserver unavailable: {:?}", e);
                return;
            }
        };
    for card in &cards {
        observer.observe(card);
    }
    session.observe(observer, callback);
}

fn flash_accent(card: &web::HtmlElement) {
    let hue = widgets::card_hue(card.dataset().get(TINT_HUE_KEY).as_deref());
    let style = card.style();
    _ = style.set_property(ACCENT_PROPERTY, &widgets::accent_color(hue));
    _ = style.set_property("box-shadow", &widgets::accent_shadow(hue));

    let card = card.clone();
    let clear = Closure::once_into_js(move || {
        _ = card.style().set_property("box-shadow", "");
    });
    if let Some(w) = web::window() {
        _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(
            clear.unchecked_ref(),
            widgets::TINT_CLEAR_MS,
        );
    }
}
