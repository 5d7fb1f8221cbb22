// Input handling: DOM events are turned into `InputEvent`s and handed to whoever
// owns the scene. Listener closures are kept alive here and detached on drop.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{EventTarget, MouseEvent, Window};

use crate::log;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer moved, in surface pixels.
    PointerMoved { x: f64, y: f64 },
    /// Pointer left the tracked region.
    PointerLeft,
    Resized { width: f64, height: f64 },
}

/// A set of event listeners attached to DOM targets. Dropping it detaches them all.
#[derive(Default)]
pub struct Listeners {
    attached: Vec<(EventTarget, &'static str, Closure<dyn FnMut(web_sys::Event)>)>,
}

impl Listeners {
    pub fn new() -> Self {
        Listeners::default()
    }

    pub fn add<F>(&mut self, target: &EventTarget, event_type: &'static str, handler: F) -> Result<(), JsValue>
    where
        F: FnMut(web_sys::Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
        target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
        self.attached.push((target.clone(), event_type, closure));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.attached.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }

    pub fn clear(&mut self) {
        for (target, event_type, closure) in self.attached.drain(..) {
            // Only fails for a callback that was never a function, which can't happen here
            let _ = target.remove_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Reads the viewport size, `None` outside a browser window.
pub fn viewport_size(window: &Window) -> Option<(f64, f64)> {
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some((width, height))
}

/// Window-level input adapter for the particle background.
pub struct WindowInput {
    _listeners: Listeners,
}

impl WindowInput {
    pub fn listen(window: &Window, sink: Rc<dyn Fn(InputEvent)>) -> Result<WindowInput, JsValue> {
        let mut listeners = Listeners::new();
        let target: &EventTarget = window.as_ref();

        let on_move = sink.clone();
        listeners.add(target, "mousemove", move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                on_move(InputEvent::PointerMoved {
                    x: event.client_x() as f64,
                    y: event.client_y() as f64,
                });
            }
        })?;

        // mouseout also fires between elements, only a null related target means the window was left
        let on_out = sink.clone();
        listeners.add(target, "mouseout", move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                if event.related_target().is_none() {
                    on_out(InputEvent::PointerLeft);
                }
            }
        })?;

        let on_resize = sink;
        let resized_window = window.clone();
        listeners.add(target, "resize", move |_| {
            if let Some((width, height)) = viewport_size(&resized_window) {
                log!("particle surface resized to {}x{}", width, height);
                on_resize(InputEvent::Resized { width, height });
            }
        })?;

        Ok(WindowInput {
            _listeners: listeners,
        })
    }
}
