//! Basket Catch core crate.
//!
//! A basket slides along the bottom of a 600x400 canvas and catches circles
//! that fall from the top, one new circle every two seconds, one point per
//! catch. Gameplay (`playfield`) and timing (`session`) are host-agnostic;
//! `web` wires them to the browser canvas, timers and keyboard.

use wasm_bindgen::prelude::*;

mod canvas;
pub mod config;
pub mod error;
pub mod playfield;
pub mod scheduler;
pub mod session;
pub mod surface;
mod web;

pub use canvas::CanvasSurface;
pub use config::{GameConfig, InputPolicy};
pub use error::GameError;
pub use playfield::{Basket, Direction, FallingObject, Key, Playfield, Stats, TickSummary};
pub use scheduler::{ManualScheduler, Scheduler, TaskHandle, Wakeup};
pub use session::Session;
pub use surface::{DrawCommand, RecordingSurface, Rect, Surface};
pub use web::{BrowserScheduler, score, start_game, stop_game};

#[cfg(feature = "serde_json")]
pub use web::start_game_with_config;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    // Fails only if a logger is already installed.
    console_log::init_with_level(level).ok();
}
