//! Browser host: canvas lookup, `requestAnimationFrame` / `setTimeout`
//! scheduling, keyboard listeners and the exported JS entry points.
//!
//! The running session lives in a thread-local; every browser callback
//! borrows it for the duration of one dispatch. Callbacks are always async
//! (frame, timer, key event), so a dispatch never overlaps another borrow.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, Window, window};

use crate::canvas::CanvasSurface;
use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::playfield::{Key, Playfield};
use crate::scheduler::{Scheduler, TaskHandle, Wakeup};
use crate::session::Session;

const CANVAS_ID: &str = "gameCanvas";

type WebSession = Session<BrowserScheduler, CanvasSurface>;

thread_local! {
    static SESSION: RefCell<Option<WebSession>> = const { RefCell::new(None) };
}

/// Scheduler on top of the window timers. The two closures are created once
/// and reused for every re-arm; they route back into the thread-local session.
pub struct BrowserScheduler {
    window: Window,
    frame_cb: Closure<dyn FnMut(f64)>,
    spawn_cb: Closure<dyn FnMut()>,
}

impl BrowserScheduler {
    fn new(window: Window) -> Self {
        let frame_cb = Closure::wrap(Box::new(|_ts: f64| dispatch(Wakeup::Frame)) as Box<dyn FnMut(f64)>);
        let spawn_cb = Closure::wrap(Box::new(|| dispatch(Wakeup::Spawn)) as Box<dyn FnMut()>);
        Self { window, frame_cb, spawn_cb }
    }
}

impl Scheduler for BrowserScheduler {
    fn on_next_frame(&mut self) -> Result<TaskHandle> {
        let id = self
            .window
            .request_animation_frame(self.frame_cb.as_ref().unchecked_ref())?;
        Ok(TaskHandle::Frame(id))
    }

    fn after_delay(&mut self, ms: u32) -> Result<TaskHandle> {
        let id = self.window.set_timeout_with_callback_and_timeout_and_arguments_0(
            self.spawn_cb.as_ref().unchecked_ref(),
            ms.min(i32::MAX as u32) as i32,
        )?;
        Ok(TaskHandle::Timer(id))
    }

    fn cancel(&mut self, handle: TaskHandle) {
        match handle {
            TaskHandle::Frame(id) => {
                self.window.cancel_animation_frame(id).ok();
            }
            TaskHandle::Timer(id) => self.window.clear_timeout_with_handle(id),
        }
    }
}

fn dispatch(wakeup: Wakeup) {
    SESSION.with(|cell| {
        if let Some(session) = cell.borrow_mut().as_mut() {
            if let Err(e) = session.wake(wakeup) {
                // No caller to hand this to; the loop for this wakeup stops here.
                log::error!("{wakeup:?} wakeup failed: {e}");
            }
        }
    });
}

fn with_session<T>(f: impl FnOnce(&mut WebSession) -> T) -> Option<T> {
    SESSION.with(|cell| cell.borrow_mut().as_mut().map(f))
}

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    launch(GameConfig::default())?;
    Ok(())
}

/// Start with a JSON config; fields left out keep their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    launch(GameConfig::from_json(json)?)?;
    Ok(())
}

/// Terminate the running game: no more frames, no more spawns.
#[wasm_bindgen]
pub fn stop_game() -> Result<(), JsValue> {
    with_session(|s| s.end()).ok_or(GameError::NotRunning)?;
    Ok(())
}

#[wasm_bindgen]
pub fn score() -> u32 {
    with_session(|s| s.playfield().score()).unwrap_or(0)
}

fn launch(cfg: GameConfig) -> Result<()> {
    if SESSION.with(|cell| cell.borrow().is_some()) {
        log::warn!("start_game called twice");
        return Err(GameError::AlreadyStarted);
    }
    let win = window().ok_or(GameError::NoWindow)?;
    let doc = win.document().ok_or(GameError::NoDocument)?;

    // Reuse the page's canvas when present, else append one.
    let canvas: HtmlCanvasElement = match doc.get_element_by_id(CANVAS_ID) {
        Some(el) => el.dyn_into().map_err(|_| GameError::Js(format!("#{CANVAS_ID} is not a canvas")))?,
        None => {
            let c: HtmlCanvasElement = doc
                .create_element("canvas")?
                .dyn_into()
                .map_err(|_| GameError::Js("created element is not a canvas".into()))?;
            c.set_id(CANVAS_ID);
            doc.body().ok_or(GameError::NoDocument)?.append_child(&c)?;
            c
        }
    };
    canvas.set_width(cfg.width as u32);
    canvas.set_height(cfg.height as u32);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or(GameError::NoContext)?
        .dyn_into()
        .map_err(|_| GameError::NoContext)?;

    let playfield = Playfield::new(cfg)?;
    let session = Session::new(playfield, BrowserScheduler::new(win.clone()), CanvasSurface::new(ctx));
    SESSION.with(|cell| session.start_in(&mut cell.borrow_mut()))?;
    install_key_listeners(&win)
}

fn install_key_listeners(win: &Window) -> Result<()> {
    {
        let closure = Closure::wrap(Box::new(move |evt: KeyboardEvent| {
            let key = Key::from_dom(&evt.key());
            with_session(|s| s.key_down(key));
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: KeyboardEvent| {
            let key = Key::from_dom(&evt.key());
            with_session(|s| s.key_up(key));
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}
