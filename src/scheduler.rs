//! Host timing seam. Both primitives are single-shot and hand back a handle
//! that can be cancelled; repeating is the caller's job.

use crate::error::Result;

/// Which scheduled callback fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wakeup {
    Frame,
    Spawn,
}

/// Owned ticket for one pending callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskHandle {
    Frame(i32),
    Timer(i32),
}

pub trait Scheduler {
    /// Fire `Wakeup::Frame` at the next display refresh.
    fn on_next_frame(&mut self) -> Result<TaskHandle>;
    /// Fire `Wakeup::Spawn` once after `ms` milliseconds.
    fn after_delay(&mut self, ms: u32) -> Result<TaskHandle>;
    fn cancel(&mut self, handle: TaskHandle);
}

struct Pending {
    id: i32,
    due_ms: f64,
    wakeup: Wakeup,
}

/// Virtual-clock scheduler for headless runs. Frames land on a fixed refresh
/// interval; nothing fires until the clock is advanced.
pub struct ManualScheduler {
    now_ms: f64,
    frame_ms: f64,
    next_id: i32,
    pending: Vec<Pending>,
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new(1000.0 / 60.0)
    }
}

impl ManualScheduler {
    pub fn new(frame_ms: f64) -> Self {
        Self { now_ms: 0.0, frame_ms, next_id: 1, pending: Vec::new() }
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, wakeup: Wakeup) -> bool {
        self.pending.iter().any(|p| p.wakeup == wakeup)
    }

    /// Remove and return the earliest callback due at or before `until_ms`,
    /// moving the clock to its due time. Ties go to whichever was armed first.
    pub fn pop_due(&mut self, until_ms: f64) -> Option<Wakeup> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due_ms <= until_ms)
            .min_by(|(_, a), (_, b)| a.due_ms.total_cmp(&b.due_ms).then(a.id.cmp(&b.id)))
            .map(|(i, _)| i)?;
        let p = self.pending.remove(idx);
        self.now_ms = self.now_ms.max(p.due_ms);
        Some(p.wakeup)
    }

    /// Move the clock forward without firing anything.
    pub fn set_now(&mut self, now_ms: f64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    fn arm(&mut self, due_ms: f64, wakeup: Wakeup) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.push(Pending { id, due_ms, wakeup });
        id
    }
}

impl Scheduler for ManualScheduler {
    fn on_next_frame(&mut self) -> Result<TaskHandle> {
        let due = self.now_ms + self.frame_ms;
        Ok(TaskHandle::Frame(self.arm(due, Wakeup::Frame)))
    }

    fn after_delay(&mut self, ms: u32) -> Result<TaskHandle> {
        let due = self.now_ms + ms as f64;
        Ok(TaskHandle::Timer(self.arm(due, Wakeup::Spawn)))
    }

    fn cancel(&mut self, handle: TaskHandle) {
        let (TaskHandle::Frame(id) | TaskHandle::Timer(id)) = handle;
        self.pending.retain(|p| p.id != id);
    }
}
