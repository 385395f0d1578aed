//! Frame timing for the outer loop
//!
//! The core treats the frame delta as an opaque number of seconds. This
//! clock is how a loop produces it: the wall-clock time since the previous
//! tick.

use std::time::{Duration, Instant};

/// Delta used for the very first frame, before any interval was measured.
pub const FIRST_FRAME_DELTA: f64 = 1.0e-4;

/// Measures the interval between consecutive frames.
pub struct FrameClock {
    last: Option<Instant>,
    frame_count: u64,
    elapsed: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: None,
            frame_count: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Start a new frame and return the previous frame's length in seconds.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let delta = match self.last.replace(now) {
            Some(previous) => {
                let interval = now.duration_since(previous);
                self.elapsed += interval;
                interval.as_secs_f64()
            }
            None => FIRST_FRAME_DELTA,
        };
        self.frame_count += 1;
        delta
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Wall-clock time covered by measured intervals.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
