use crate::core::parallax_step;
use crate::events::Handles;
use crate::render;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Longest step fed to tweens; a backgrounded tab resumes with one big gap.
const MAX_FRAME_DT: f32 = 0.1;

pub struct FrameContext<'a> {
    pub handles: Handles,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub clock: Instant,
    pub last_instant: Instant,
    pub running: Rc<Cell<bool>>,
}

impl<'a> FrameContext<'a> {
    pub fn new(
        handles: Handles,
        canvas: web::HtmlCanvasElement,
        gpu: Option<render::GpuState<'a>>,
        running: Rc<Cell<bool>>,
    ) -> Self {
        let now = Instant::now();
        Self {
            handles,
            canvas,
            gpu,
            clock: now,
            last_instant: now,
            running,
        }
    }

    /// One tick: tweens, then per-object motion, then parallax, then draw.
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT);
        self.last_instant = now;
        let t = (now - self.clock).as_secs_f32();

        let h = &self.handles;
        let pointer = h.state.borrow().pointer;
        let mut scene = h.scene.borrow_mut();
        {
            let mut tweener = h.tweener.borrow_mut();
            tweener.advance(dt_sec, t, &mut scene);
            scene.animate(t, &tweener);
        }
        parallax_step(&mut scene, pointer);

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            match g.render(&mut scene) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::warn!("[frame] surface lost; reconfiguring");
                    g.reconfigure();
                }
                Err(e) => log::error!("render error: {:?}", e),
            }
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    scene: &RefCell<crate::core::Scene>,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, scene).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Drive `frame` from requestAnimationFrame until the context's `running`
/// flag is cleared.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !frame_ctx_tick.borrow().running.get() {
            log::info!("[frame] loop stopped");
            return;
        }
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
