#![cfg(target_arch = "wasm32")]
use crate::constants::CANVAS_SELECTOR;
use crate::core::state::PageHide;
use crate::core::{AppState, Scene, Tweener};
use crate::events::{Handles, Listener, Session};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod fx;
mod render;
mod ui;

thread_local! {
    // the live page session; taken and dropped on pagehide
    static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("backdrop-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        log::warn!("init called twice; ignoring");
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let (vw, vh) = dom::viewport_size(&window);
    let mut rng = StdRng::from_entropy();
    let scene = Scene::build(vw as f32, vh as f32, &mut rng);
    let handles = Handles {
        scene: Rc::new(RefCell::new(scene)),
        tweener: Rc::new(RefCell::new(Tweener::new())),
        state: Rc::new(RefCell::new(AppState::default())),
        rng: Rc::new(RefCell::new(rng)),
    };

    let mut session = Session::new();
    events::pointer::wire_pointer_handlers(&mut session, &window, &handles);
    events::scroll::wire_scroll(&mut session, &window, &document, &handles);
    ui::wire_microinteractions(&mut session, &document);
    fx::wire_fx_toggle(&mut session, &document, &handles);
    fx::apply_motion_preference(&window, &document, &handles);

    let canvas = document
        .query_selector(CANVAS_SELECTOR)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .ok_or_else(|| anyhow::anyhow!("missing {}", CANVAS_SELECTOR))
        .and_then(|el| {
            el.dyn_into::<web::HtmlCanvasElement>()
                .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
        });
    let canvas = match canvas {
        Ok(c) => c,
        Err(e) => {
            // page widgets keep working without the backdrop
            install_session(&window, session);
            return Err(e);
        }
    };
    dom::sync_canvas_backing_size(&canvas);
    events::scroll::wire_resize(&mut session, &window, &canvas, &handles);

    let gpu = frame::init_gpu(&canvas, &handles.scene).await;
    if gpu.is_none() {
        install_session(&window, session);
        return Err(anyhow::anyhow!("WebGPU unavailable; backdrop disabled"));
    }
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        handles,
        canvas,
        gpu,
        session.running(),
    )));
    frame::start_loop(frame_ctx);
    install_session(&window, session);
    Ok(())
}

/// Park the session for the page's lifetime and drop it when the page is
/// unloaded. A page entering the back/forward cache keeps its session.
fn install_session(window: &web::Window, session: Session) {
    log::info!("[session] {} listeners wired", session.listener_count());
    SESSION.with(|s| *s.borrow_mut() = Some(session));
    // lives as long as the page; dropping it would unsubscribe the teardown itself
    std::mem::forget(Listener::new(window, "pagehide", |ev: web::PageTransitionEvent| {
        let hide = PageHide::from_persisted(ev.persisted());
        if !hide.ends_session() {
            log::debug!("[session] page cached; keeping listeners");
            return;
        }
        let session = SESSION.with(|s| s.borrow_mut().take());
        drop(session);
    }));
}
