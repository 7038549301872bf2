//! Session: glues a [`Playfield`] to a surface and a scheduler and keeps the
//! two cadences (frames, spawns) alive by re-arming after each wakeup. Holding
//! the pending handles lets `end()` cancel both loops.

use crate::error::{GameError, Result};
use crate::playfield::{Key, Playfield, TickSummary};
use crate::scheduler::{ManualScheduler, Scheduler, TaskHandle, Wakeup};
use crate::surface::Surface;

pub struct Session<S: Scheduler, D: Surface> {
    playfield: Playfield,
    scheduler: S,
    surface: D,
    started: bool,
    frame: Option<TaskHandle>,
    spawn: Option<TaskHandle>,
}

impl<S: Scheduler, D: Surface> Session<S, D> {
    pub fn new(playfield: Playfield, scheduler: S, surface: D) -> Self {
        Self { playfield, scheduler, surface, started: false, frame: None, spawn: None }
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    pub fn is_running(&self) -> bool {
        self.started && !self.playfield.is_over()
    }

    /// Arm the spawn timer and the frame loop, then spawn the first object and
    /// draw the first frame right away. If the host refuses either callback,
    /// whatever was armed is cancelled and the session stays unstarted.
    pub fn start(&mut self) -> Result<()> {
        if self.started {
            log::warn!("start ignored: game already started");
            return Err(GameError::AlreadyStarted);
        }
        if let Err(e) = self.arm_spawn().and_then(|_| self.arm_frame()) {
            self.cancel_pending();
            return Err(e);
        }
        self.started = true;
        log::info!("game started");
        self.playfield.spawn();
        self.playfield.tick(&mut self.surface);
        Ok(())
    }

    /// Start `self` inside `slot`. On failure the slot is left empty, so a
    /// later start is not mistaken for a second one.
    pub fn start_in(self, slot: &mut Option<Self>) -> Result<()> {
        let result = slot.insert(self).start();
        if result.is_err() {
            *slot = None;
        }
        result
    }

    /// Dispatch a fired callback. Returns the tick summary for frames.
    pub fn wake(&mut self, wakeup: Wakeup) -> Result<Option<TickSummary>> {
        match wakeup {
            Wakeup::Spawn => {
                self.spawn = None;
                if !self.is_running() {
                    return Ok(None);
                }
                self.playfield.spawn();
                self.arm_spawn()?;
                Ok(None)
            }
            Wakeup::Frame => {
                self.frame = None;
                if !self.is_running() {
                    return Ok(None);
                }
                let summary = self.playfield.tick(&mut self.surface);
                self.arm_frame()?;
                Ok(Some(summary))
            }
        }
    }

    pub fn key_down(&mut self, key: Key) {
        self.playfield.key_down(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.playfield.key_up(key);
    }

    /// Mark the game over and drop both pending callbacks.
    pub fn end(&mut self) {
        if !self.playfield.is_over() {
            log::info!(
                "game ended: score {} ({:?})",
                self.playfield.score(),
                self.playfield.stats()
            );
        }
        self.playfield.end();
        self.cancel_pending();
    }

    fn cancel_pending(&mut self) {
        if let Some(h) = self.frame.take() {
            self.scheduler.cancel(h);
        }
        if let Some(h) = self.spawn.take() {
            self.scheduler.cancel(h);
        }
    }

    fn arm_spawn(&mut self) -> Result<()> {
        let ms = self.playfield.config().spawn_interval_ms;
        self.spawn = Some(self.scheduler.after_delay(ms)?);
        Ok(())
    }

    fn arm_frame(&mut self) -> Result<()> {
        self.frame = Some(self.scheduler.on_next_frame()?);
        Ok(())
    }
}

impl<D: Surface> Session<ManualScheduler, D> {
    /// Run the virtual clock forward, firing every wakeup that falls due.
    pub fn advance_by(&mut self, ms: f64) -> Result<()> {
        let until = self.scheduler.now_ms() + ms;
        while let Some(wakeup) = self.scheduler.pop_due(until) {
            self.wake(wakeup)?;
        }
        self.scheduler.set_now(until);
        Ok(())
    }
}
