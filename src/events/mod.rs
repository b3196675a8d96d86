pub mod pointer;
pub mod scroll;

use crate::constants::PASSIVE_EVENTS;
use crate::core::{AppState, Scene, Tweener};
use rand::rngs::StdRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Shared state handed to every handler and to the frame tick.
#[derive(Clone)]
pub struct Handles {
    pub scene: Rc<RefCell<Scene>>,
    pub tweener: Rc<RefCell<Tweener>>,
    pub state: Rc<RefCell<AppState>>,
    pub rng: Rc<RefCell<StdRng>>,
}

/// An event listener that is removed from its target when dropped.
pub struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    /// Subscribe `handler` to `kind` events on `target`. Events that are not
    /// an `E` are ignored. Kinds in `PASSIVE_EVENTS` are registered passive;
    /// the rest use the browser defaults and may be cancelled.
    pub fn new<E>(target: &web::EventTarget, kind: &'static str, handler: impl FnMut(E) + 'static) -> Self
    where
        E: JsCast + 'static,
    {
        let passive = PASSIVE_EVENTS.contains(&kind).then_some(true);
        Self::register(target, kind, passive, handler)
    }

    /// Like `new`, but always registered with `passive: false`. Wheel and
    /// touch listeners on window/document default to passive in browsers.
    pub fn non_passive<E>(target: &web::EventTarget, kind: &'static str, handler: impl FnMut(E) + 'static) -> Self
    where
        E: JsCast + 'static,
    {
        Self::register(target, kind, Some(false), handler)
    }

    fn register<E>(
        target: &web::EventTarget,
        kind: &'static str,
        passive: Option<bool>,
        mut handler: impl FnMut(E) + 'static,
    ) -> Self
    where
        E: JsCast + 'static,
    {
        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            if let Ok(ev) = ev.dyn_into::<E>() {
                handler(ev);
            }
        }) as Box<dyn FnMut(web::Event)>);
        match passive {
            Some(passive) => {
                let opts = web::AddEventListenerOptions::new();
                opts.set_passive(passive);
                _ = target.add_event_listener_with_callback_and_add_event_listener_options(
                    kind,
                    closure.as_ref().unchecked_ref(),
                    &opts,
                );
            }
            None => {
                _ = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            }
        }
        Self {
            target: target.clone(),
            kind,
            closure,
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// Everything the page wires up, scoped to one page lifetime.
///
/// Dropping the session unsubscribes every listener, disconnects the
/// observers and stops the frame loop from rescheduling itself.
pub struct Session {
    listeners: Vec<Listener>,
    observers: Vec<web::IntersectionObserver>,
    // observer callbacks must outlive the observers that call them
    observer_callbacks: Vec<Closure<dyn FnMut(js_sys::Array, web::IntersectionObserver)>>,
    running: Rc<Cell<bool>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            observers: Vec::new(),
            observer_callbacks: Vec::new(),
            running: Rc::new(Cell::new(true)),
        }
    }

    pub fn listen(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    pub fn observe(
        &mut self,
        observer: web::IntersectionObserver,
        callback: Closure<dyn FnMut(js_sys::Array, web::IntersectionObserver)>,
    ) {
        self.observers.push(observer);
        self.observer_callbacks.push(callback);
    }

    /// Shared flag the frame loop checks before requesting another frame.
    pub fn running(&self) -> Rc<Cell<bool>> {
        self.running.clone()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.running.set(false);
        for obs in &self.observers {
            obs.disconnect();
        }
        self.observer_callbacks.clear();
        log::info!(
            "[session] teardown: {} listeners, {} observers",
            self.listeners.len(),
            self.observers.len()
        );
        // listeners unsubscribe in their own Drop
    }
}
