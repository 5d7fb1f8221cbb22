mod utils;

pub mod animation;
pub mod background;
pub mod color;
pub mod config;
pub mod cursor;
pub mod field;
pub mod input;
pub mod particle;
pub mod renderer;
pub mod scene;
pub mod simulation;

use wasm_bindgen::prelude::*;
use web_sys::console;

pub use background::{ParticleBackground, CANVAS_ID};
pub use config::{CursorConfig, ParticleConfig};
pub use cursor::CustomCursor;

// Use `wee_alloc` as the global allocator when the feature is enabled
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

// Scoped console timer, shows up in the browser's performance console
pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}
