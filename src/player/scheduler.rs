//! Tick scheduling for the sync loop.
//!
//! Models a display-refresh callback: a tick requested during frame N fires
//! once at frame N+1. The host calls [`Scheduler::take_due`] (through
//! [`PlaybackController::pump`](super::PlaybackController::pump)) once per frame.

use std::time::{Duration, Instant};

/// Identifies one outstanding tick request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

/// One-shot, frame-aligned tick source.
pub trait Scheduler {
    /// Request a tick on the next frame.
    fn request_tick(&mut self) -> TickHandle;

    /// Withdraw a request. Unknown or already-fired handles are ignored.
    fn cancel_tick(&mut self, handle: TickHandle);

    /// Remove and return the requests due on this frame.
    fn take_due(&mut self) -> Vec<TickHandle>;

    /// Number of requests still waiting for a frame.
    fn pending(&self) -> usize;
}

/// Host-driven scheduler: every call to `take_due` is one frame.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_id: u64,
    pending: Vec<TickHandle>,
    /// Total requests made (for diagnostics)
    requested: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total tick requests made since creation.
    pub fn requested(&self) -> u64 {
        self.requested
    }
}

impl Scheduler for FrameScheduler {
    fn request_tick(&mut self) -> TickHandle {
        self.next_id += 1;
        self.requested += 1;
        let handle = TickHandle(self.next_id);
        self.pending.push(handle);
        handle
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        self.pending.retain(|h| *h != handle);
    }

    fn take_due(&mut self) -> Vec<TickHandle> {
        std::mem::take(&mut self.pending)
    }

    fn pending(&self) -> usize {
        self.pending.len()
    }
}

/// Wall-clock paced scheduler: frames are at least `interval` apart.
#[derive(Debug)]
pub struct IntervalScheduler {
    frames: FrameScheduler,
    interval: Duration,
    last_frame: Option<Instant>,
}

impl IntervalScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            frames: FrameScheduler::new(),
            interval,
            last_frame: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// How long a host loop may sleep before the next frame is due.
    pub fn time_until_next_frame(&self) -> Duration {
        match self.last_frame {
            Some(last) => self.interval.saturating_sub(last.elapsed()),
            None => Duration::ZERO,
        }
    }
}

impl Scheduler for IntervalScheduler {
    fn request_tick(&mut self) -> TickHandle {
        self.frames.request_tick()
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        self.frames.cancel_tick(handle);
    }

    fn take_due(&mut self) -> Vec<TickHandle> {
        if !self.time_until_next_frame().is_zero() {
            return Vec::new();
        }
        self.last_frame = Some(Instant::now());
        self.frames.take_due()
    }

    fn pending(&self) -> usize {
        self.frames.pending()
    }
}
