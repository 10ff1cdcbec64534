use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

struct LoopState {
    request_id: Cell<Option<i32>>,
    stopped: Cell<bool>,
    tick: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl LoopState {
    fn schedule(&self) {
        let Some(w) = web::window() else {
            return;
        };
        if let Some(tick) = self.tick.borrow().as_ref() {
            match w.request_animation_frame(tick.as_ref().unchecked_ref()) {
                Ok(id) => self.request_id.set(Some(id)),
                Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
            }
        }
    }
}

/// Self-rescheduling requestAnimationFrame loop. The callback receives the
/// time since the previous frame. Dropping or cancelling the handle
/// guarantees no further frame runs.
pub struct RafLoop {
    state: Rc<LoopState>,
}

impl RafLoop {
    pub fn start<F>(mut on_frame: F) -> Self
    where
        F: FnMut(Duration) -> LoopControl + 'static,
    {
        let state = Rc::new(LoopState {
            request_id: Cell::new(None),
            stopped: Cell::new(false),
            tick: RefCell::new(None),
        });
        let weak: Weak<LoopState> = Rc::downgrade(&state);
        let mut last_instant = Instant::now();
        *state.tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let Some(state) = weak.upgrade() else {
                return;
            };
            state.request_id.set(None);
            if state.stopped.get() {
                return;
            }
            let now = Instant::now();
            let dt = now - last_instant;
            last_instant = now;
            match on_frame(dt) {
                LoopControl::Continue => state.schedule(),
                LoopControl::Stop => state.stopped.set(true),
            }
        }) as Box<dyn FnMut()>));
        state.schedule();
        Self { state }
    }

    /// Idempotent.
    pub fn cancel(&self) {
        self.state.stopped.set(true);
        if let Some(id) = self.state.request_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
    }
}

impl Drop for RafLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}
