// The particle background as seen from JS: attach to a canvas, then start and
// stop the frame loop and input listeners explicitly.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, CanvasRenderingContext2d, HtmlCanvasElement};

use crate::animation::AnimationLoop;
use crate::config::ParticleConfig;
use crate::input::{self, InputEvent, WindowInput};
use crate::log;
use crate::scene::Scene;

pub const CANVAS_ID: &str = "particles-canvas";

#[wasm_bindgen]
pub struct ParticleBackground {
    scene: Rc<RefCell<Scene<CanvasRenderingContext2d>>>,
    animation: AnimationLoop,
    input: Option<WindowInput>,
}

#[wasm_bindgen]
impl ParticleBackground {
    /// Builds a background on the canvas with id `canvas_id`. Returns
    /// `undefined` when there is no such canvas or it has no 2D context.
    pub fn attach(canvas_id: &str) -> Option<ParticleBackground> {
        ParticleBackground::attach_with_config(canvas_id, ParticleConfig::default())
    }

    #[wasm_bindgen(js_name = attachDefault)]
    pub fn attach_default() -> Option<ParticleBackground> {
        ParticleBackground::attach(CANVAS_ID)
    }

    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.animation.is_running() {
            return Ok(());
        }
        let window = web_sys::window().ok_or("no global `window` exists")?;

        // The viewport may have changed while stopped
        if let Some((width, height)) = input::viewport_size(&window) {
            let current = {
                let scene = self.scene.borrow();
                (scene.field().width(), scene.field().height())
            };
            if current != (width, height) {
                self.scene.borrow_mut().handle(InputEvent::Resized { width, height });
            }
        }

        let sink_scene = self.scene.clone();
        let sink = Rc::new(move |event: InputEvent| sink_scene.borrow_mut().handle(event));
        self.input = Some(WindowInput::listen(&window, sink)?);

        let frame_scene = self.scene.clone();
        self.animation.start(move || {
            if let Err(err) = frame_scene.borrow_mut().frame() {
                console::error_2(&"particle frame failed:".into(), &err);
            }
        })?;

        log!("particle background started with {} particles", self.particle_count());
        Ok(())
    }

    pub fn stop(&mut self) {
        if !self.animation.is_running() && self.input.is_none() {
            return;
        }
        self.animation.stop();
        self.input = None;
        log!("particle background stopped");
    }

    pub fn is_running(&self) -> bool {
        self.animation.is_running()
    }

    pub fn particle_count(&self) -> usize {
        self.scene.borrow().field().len()
    }
}

impl ParticleBackground {
    pub fn attach_with_config(canvas_id: &str, config: ParticleConfig) -> Option<ParticleBackground> {
        let window = web_sys::window()?;
        let canvas = window
            .document()?
            .get_element_by_id(canvas_id)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;
        let context = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        let (width, height) = input::viewport_size(&window)?;

        Some(ParticleBackground {
            scene: Rc::new(RefCell::new(Scene::new(context, width, height, config))),
            animation: AnimationLoop::new(),
            input: None,
        })
    }
}
