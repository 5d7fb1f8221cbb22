// Custom cursor: an inner dot and an outer ring that chase the pointer, each
// closing a fixed fraction of the gap every frame so the ring trails the dot.

use std::cell::RefCell;
use std::rc::Rc;

use cgmath::Vector2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Document, Element, EventTarget, HtmlElement, MouseEvent};

use crate::animation::AnimationLoop;
use crate::config::CursorConfig;
use crate::input::Listeners;
use crate::log;

const STYLESHEET: &str = r#"
.custom-cursor {
  pointer-events: none;
  position: fixed;
  top: 0;
  left: 0;
  z-index: 9999;
  mix-blend-mode: difference;
}
.cursor-inner {
  position: fixed;
  width: 8px;
  height: 8px;
  background: #fff;
  border-radius: 50%;
  pointer-events: none;
  transform: translate(-50%, -50%);
  transition: width 0.2s, height 0.2s, background 0.2s;
}
.cursor-outer {
  position: fixed;
  width: 40px;
  height: 40px;
  border: 1px solid rgba(255, 255, 255, 0.5);
  border-radius: 50%;
  pointer-events: none;
  transform: translate(-50%, -50%);
  transition: width 0.3s, height 0.3s, border 0.3s;
}
.custom-cursor.hover .cursor-inner {
  width: 12px;
  height: 12px;
  background: #4f8cff;
}
.custom-cursor.hover .cursor-outer {
  width: 60px;
  height: 60px;
  border-color: #4f8cff;
}
.custom-cursor.click .cursor-inner {
  transform: translate(-50%, -50%) scale(0.8);
}
.custom-cursor.click .cursor-outer {
  transform: translate(-50%, -50%) scale(0.9);
}
body {
  cursor: none !important;
}
a, button, input, textarea, select, [role="button"] {
  cursor: none !important;
}
@media (max-width: 1024px) {
  .custom-cursor {
    display: none;
  }
  body, a, button, input, textarea, select {
    cursor: auto !important;
  }
}
"#;

/// Eased positions of the two cursor parts.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CursorFollower {
    pub target: Vector2<f64>,
    pub inner: Vector2<f64>,
    pub outer: Vector2<f64>,
    inner_ease: f64,
    outer_ease: f64,
}

impl CursorFollower {
    pub fn new(inner_ease: f64, outer_ease: f64) -> Self {
        let origin = Vector2::new(0.0, 0.0);
        CursorFollower {
            target: origin,
            inner: origin,
            outer: origin,
            inner_ease,
            outer_ease,
        }
    }

    pub fn track(&mut self, x: f64, y: f64) {
        self.target = Vector2::new(x, y);
    }

    pub fn advance(&mut self) {
        self.inner += (self.target - self.inner) * self.inner_ease;
        self.outer += (self.target - self.outer) * self.outer_ease;
    }
}

impl Default for CursorFollower {
    fn default() -> Self {
        CursorFollower::new(CursorConfig::INNER_EASE, CursorConfig::OUTER_EASE)
    }
}

fn place(element: &HtmlElement, pos: Vector2<f64>) -> Result<(), JsValue> {
    let style = element.style();
    style.set_property("left", &format!("{}px", pos.x))?;
    style.set_property("top", &format!("{}px", pos.y))
}

fn div(document: &Document, class_name: &str) -> Result<HtmlElement, JsValue> {
    let element = document.create_element("div")?.dyn_into::<HtmlElement>()?;
    element.set_class_name(class_name);
    Ok(element)
}

#[wasm_bindgen]
pub struct CustomCursor {
    document: Document,
    root: HtmlElement,
    inner: HtmlElement,
    outer: HtmlElement,
    stylesheet: Element,
    follower: Rc<RefCell<CursorFollower>>,
    config: CursorConfig,
    animation: AnimationLoop,
    listeners: Listeners,
}

#[wasm_bindgen]
impl CustomCursor {
    /// Adds the cursor elements to the page. Returns `undefined` on touch
    /// devices, where the native cursor is left alone.
    pub fn attach() -> Option<CustomCursor> {
        let window = web_sys::window()?;
        if js_sys::Reflect::has(&window, &JsValue::from_str("ontouchstart")).unwrap_or(false) {
            return None;
        }
        let document = window.document()?;
        match CustomCursor::build(document, CursorConfig::default()) {
            Ok(cursor) => {
                log!("custom cursor attached");
                Some(cursor)
            }
            Err(err) => {
                console::error_2(&"failed to create custom cursor:".into(), &err);
                None
            }
        }
    }

    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.animation.is_running() {
            return Ok(());
        }
        self.listeners.clear();
        let target: EventTarget = self.document.clone().into();
        let target = &target;

        let follower = self.follower.clone();
        self.listeners.add(target, "mousemove", move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                follower
                    .borrow_mut()
                    .track(event.client_x() as f64, event.client_y() as f64);
            }
        })?;

        self.toggle_class_on(target, "mousedown", "mouseup", "click")?;

        let root = self.root.clone();
        self.listeners.add(target, "mouseleave", move |_| {
            let _ = root.style().set_property("opacity", "0");
        })?;
        let root = self.root.clone();
        self.listeners.add(target, "mouseenter", move |_| {
            let _ = root.style().set_property("opacity", "1");
        })?;

        let interactive = self.document.query_selector_all(&self.config.interactive_selector)?;
        for i in 0..interactive.length() {
            if let Some(node) = interactive.get(i) {
                let element: EventTarget = node.into();
                self.toggle_class_on(&element, "mouseenter", "mouseleave", "hover")?;
            }
        }

        let follower = self.follower.clone();
        let inner = self.inner.clone();
        let outer = self.outer.clone();
        self.animation.start(move || {
            let (inner_pos, outer_pos) = {
                let mut follower = follower.borrow_mut();
                follower.advance();
                (follower.inner, follower.outer)
            };
            if let Err(err) = place(&inner, inner_pos).and_then(|_| place(&outer, outer_pos)) {
                console::error_2(&"failed to move cursor:".into(), &err);
            }
        })
    }

    pub fn stop(&mut self) {
        self.animation.stop();
        self.listeners.clear();
    }

    pub fn is_running(&self) -> bool {
        self.animation.is_running()
    }
}

impl CustomCursor {
    fn build(document: Document, config: CursorConfig) -> Result<CustomCursor, JsValue> {
        let root = div(&document, "custom-cursor")?;
        let inner = div(&document, "cursor-inner")?;
        let outer = div(&document, "cursor-outer")?;
        root.append_child(&inner)?;
        root.append_child(&outer)?;
        document.body().ok_or("document has no body")?.append_child(&root)?;

        let stylesheet = document.create_element("style")?;
        stylesheet.set_text_content(Some(STYLESHEET));
        document.head().ok_or("document has no head")?.append_child(&stylesheet)?;

        Ok(CustomCursor {
            document,
            root,
            inner,
            outer,
            stylesheet,
            follower: Rc::new(RefCell::new(CursorFollower::new(config.inner_ease, config.outer_ease))),
            config,
            animation: AnimationLoop::new(),
            listeners: Listeners::new(),
        })
    }

    fn toggle_class_on(
        &mut self,
        target: &EventTarget,
        on: &'static str,
        off: &'static str,
        class: &'static str,
    ) -> Result<(), JsValue> {
        let root = self.root.clone();
        self.listeners.add(target, on, move |_| {
            let _ = root.class_list().add_1(class);
        })?;
        let root = self.root.clone();
        self.listeners.add(target, off, move |_| {
            let _ = root.class_list().remove_1(class);
        })
    }
}

impl Drop for CustomCursor {
    fn drop(&mut self) {
        self.stop();
        self.root.remove();
        self.stylesheet.remove();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts_close_their_share_of_the_gap() {
        let mut follower = CursorFollower::default();
        follower.track(100.0, 50.0);
        follower.advance();

        assert!((follower.inner.x - 20.0).abs() < 1e-12);
        assert!((follower.inner.y - 10.0).abs() < 1e-12);
        assert!((follower.outer.x - 10.0).abs() < 1e-12);
        assert!((follower.outer.y - 5.0).abs() < 1e-12);

        follower.advance();
        assert!((follower.inner.x - 36.0).abs() < 1e-12);
        assert!((follower.outer.x - 19.0).abs() < 1e-12);
    }

    #[test]
    fn converges_on_target_with_ring_behind() {
        let mut follower = CursorFollower::default();
        follower.track(300.0, 200.0);
        for _ in 0..20 {
            follower.advance();
            assert!(follower.outer.x < follower.inner.x);
        }
        for _ in 0..400 {
            follower.advance();
        }
        assert!((follower.inner.x - 300.0).abs() < 1e-6);
        assert!((follower.outer.y - 200.0).abs() < 1e-6);
    }

    #[test]
    fn idle_at_target_stays_put() {
        let mut follower = CursorFollower::default();
        follower.advance();
        assert_eq!(follower.inner, Vector2::new(0.0, 0.0));
        assert_eq!(follower.outer, Vector2::new(0.0, 0.0));
    }
}
