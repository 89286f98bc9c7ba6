use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Handle for one requested tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickId(pub u64);

/// "Call me at the next frame-presentation opportunity."
///
/// The host owns the actual loop: when a requested tick comes due it calls
/// [`LiveDriver::tick`](crate::playback::driver::LiveDriver::tick) with the id it was given.
pub trait TickScheduler {
    /// Request one tick.
    fn request_tick(&mut self) -> TickId;
    /// Cancel a previously requested tick. Cancelling an unknown or fired id is a no-op.
    fn cancel_tick(&mut self, id: TickId);
}

#[derive(Debug, Default)]
struct ManualQueue {
    next_id: u64,
    pending: Vec<TickId>,
    requested: u64,
    cancelled: u64,
}

/// Deterministic scheduler for tests. Clones share the same queue.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<ManualQueue>>,
}

impl ManualScheduler {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return the oldest pending tick, as the host would when it fires.
    pub fn fire_next(&self) -> Option<TickId> {
        let mut q = self.queue.borrow_mut();
        if q.pending.is_empty() {
            None
        } else {
            Some(q.pending.remove(0))
        }
    }

    /// Number of ticks waiting to fire.
    pub fn pending_len(&self) -> usize {
        self.queue.borrow().pending.len()
    }

    /// Total ticks requested so far.
    pub fn requested(&self) -> u64 {
        self.queue.borrow().requested
    }

    /// Total ticks cancelled while still pending.
    pub fn cancelled(&self) -> u64 {
        self.queue.borrow().cancelled
    }
}

impl TickScheduler for ManualScheduler {
    fn request_tick(&mut self) -> TickId {
        let mut q = self.queue.borrow_mut();
        let id = TickId(q.next_id);
        q.next_id += 1;
        q.requested += 1;
        q.pending.push(id);
        id
    }

    fn cancel_tick(&mut self, id: TickId) {
        let mut q = self.queue.borrow_mut();
        let before = q.pending.len();
        q.pending.retain(|p| *p != id);
        if q.pending.len() != before {
            q.cancelled += 1;
        }
    }
}

/// Fixed-interval scheduler for headless hosts: a tick is due one `interval` after the request.
#[derive(Clone, Debug)]
pub struct SleepScheduler {
    interval: Duration,
    next_id: u64,
    pending: Option<TickId>,
}

impl SleepScheduler {
    /// Scheduler presenting `fps` frames per second.
    pub fn with_fps(fps: u32) -> Self {
        Self {
            interval: Duration::from_secs_f64(1.0 / f64::from(fps.max(1))),
            next_id: 0,
            pending: None,
        }
    }

    /// Block until the pending tick is due and return it.
    pub fn wait_next(&mut self) -> Option<TickId> {
        let id = self.pending.take()?;
        std::thread::sleep(self.interval);
        Some(id)
    }
}

impl TickScheduler for SleepScheduler {
    fn request_tick(&mut self) -> TickId {
        let id = TickId(self.next_id);
        self.next_id += 1;
        self.pending = Some(id);
        id
    }

    fn cancel_tick(&mut self, id: TickId) {
        if self.pending == Some(id) {
            self.pending = None;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/scheduler.rs"]
mod tests;
