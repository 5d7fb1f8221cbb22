// Frame loop on top of requestAnimationFrame. The callback re-schedules itself
// while the running flag is set; stop() clears the flag, cancels the pending
// frame and drops the callback.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::console;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn request_animation_frame(callback: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
    web_sys::window()
        .ok_or("no global `window` exists")?
        .request_animation_frame(callback.as_ref().unchecked_ref())
}

#[derive(Default)]
pub struct AnimationLoop {
    running: Rc<Cell<bool>>,
    pending: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl AnimationLoop {
    pub fn new() -> Self {
        AnimationLoop::default()
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Calls `tick` once per display frame until `stop` is called. Does
    /// nothing when the loop is already running.
    pub fn start<F>(&mut self, mut tick: F) -> Result<(), JsValue>
    where
        F: FnMut() + 'static,
    {
        if self.running.get() {
            return Ok(());
        }

        let running = self.running.clone();
        let pending = self.pending.clone();
        let next_frame = self.callback.clone();
        *self.callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending.set(None);
            if !running.get() {
                return;
            }
            tick();
            if !running.get() {
                return;
            }
            if let Some(callback) = next_frame.borrow().as_ref() {
                match request_animation_frame(callback) {
                    Ok(handle) => pending.set(Some(handle)),
                    Err(err) => {
                        console::error_2(&"failed to schedule next frame:".into(), &err);
                        running.set(false);
                    }
                }
            }
        }) as Box<dyn FnMut()>));

        let handle = match self.callback.borrow().as_ref() {
            Some(callback) => request_animation_frame(callback)?,
            None => return Ok(()),
        };
        self.pending.set(Some(handle));
        self.running.set(true);
        Ok(())
    }

    pub fn stop(&mut self) {
        self.running.set(false);
        if let Some(handle) = self.pending.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(handle);
            }
        }
        // Breaks the callback's reference to itself
        self.callback.borrow_mut().take();
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
