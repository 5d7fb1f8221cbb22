// A scene ties the particle field, the pointer and the renderer together and
// runs them one frame at a time. It knows nothing about the DOM beyond the
// `Surface` it draws on, so it runs the same in the browser and in unit tests.

use wasm_bindgen::JsValue;

use crate::config::ParticleConfig;
use crate::field::ParticleField;
use crate::input::InputEvent;
use crate::renderer::{Renderer, Surface};
use crate::simulation;
use crate::Timer;

pub struct Scene<S: Surface> {
    field: ParticleField,
    pointer: Option<[f64; 2]>,
    renderer: Renderer<S>,
    config: ParticleConfig,
}

impl<S: Surface> Scene<S> {
    pub fn new(mut surface: S, width: f64, height: f64, config: ParticleConfig) -> Self {
        surface.resize(width, height);
        let field = ParticleField::generate(&config, width, height, &mut rand::thread_rng());
        Scene {
            field,
            pointer: None,
            renderer: Renderer::new(surface, config.clone()),
            config,
        }
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMoved { x, y } => self.pointer = Some([x, y]),
            InputEvent::PointerLeft => self.pointer = None,
            InputEvent::Resized { width, height } => self.resize(width, height),
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.renderer.surface.resize(width, height);
        self.field = ParticleField::generate(&self.config, width, height, &mut rand::thread_rng());
    }

    /// Advances the simulation one step and draws the result.
    pub fn frame(&mut self) -> Result<(), JsValue> {
        {
            let _timer = self.config.trace_frames.then(|| Timer::new("Scene::step"));
            simulation::step(&mut self.field, self.pointer, &self.config);
        }
        let _timer = self.config.trace_frames.then(|| Timer::new("Scene::render"));
        self.renderer.render(&self.field)
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn pointer(&self) -> Option<[f64; 2]> {
        self.pointer
    }

    pub fn surface(&self) -> &S {
        &self.renderer.surface
    }
}
