//! Wall-clock time and frame pacing

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Milliseconds of wall-clock time since some fixed origin
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Monotonic clock starting at zero when created
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-advanced clock for tests and replays
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Sleeps out the remainder of each frame to hold a target rate
#[derive(Debug, Clone)]
pub struct FramePacer {
    frame: Duration,
    frame_start: Instant,
}

impl FramePacer {
    /// Pacer for `fps` frames per second
    pub fn new(fps: u32) -> Self {
        Self {
            frame: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            frame_start: Instant::now(),
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Time left in the current frame
    pub fn remaining(&self) -> Duration {
        self.frame.saturating_sub(self.frame_start.elapsed())
    }

    /// Block until the frame is over, then start the next one
    pub fn wait(&mut self) {
        let remaining = self.remaining();
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
        self.frame_start = Instant::now();
    }
}
