//! Wall-clock frame timing

use super::ring_buffer::RingBuffer;
use std::time::{Duration, Instant};

/// Rolling frame-time statistics over the last `capacity` frames.
#[derive(Debug)]
pub struct FrameTimer {
    frame_start: Option<Instant>,
    frame_times: RingBuffer<Duration>,
    frames: u64,
}

impl FrameTimer {
    pub fn new(capacity: usize) -> Self {
        Self {
            frame_start: None,
            frame_times: RingBuffer::new(capacity),
            frames: 0,
        }
    }

    pub fn begin(&mut self) {
        self.frame_start = Some(Instant::now());
    }

    /// Closes the frame opened by `begin`; an unmatched `end` is ignored.
    pub fn end(&mut self) {
        if let Some(start) = self.frame_start.take() {
            self.frame_times.push(start.elapsed());
            self.frames += 1;
        }
    }

    /// Frames recorded since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn fps(&self) -> f64 {
        let avg = self.frame_times.average().as_secs_f64();
        if avg > 0.0 {
            1.0 / avg
        } else {
            0.0
        }
    }

    pub fn frame_time_ms(&self) -> f64 {
        self.frame_times.average().as_secs_f64() * 1000.0
    }

    pub fn frame_time_range_ms(&self) -> (f64, f64) {
        let (min, max) = self.frame_times.min_max();
        (min.as_secs_f64() * 1000.0, max.as_secs_f64() * 1000.0)
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_without_begin_records_nothing() {
        let mut timer = FrameTimer::new(4);
        timer.end();
        assert_eq!(timer.frames(), 0);
        assert_eq!(timer.fps(), 0.0);
    }

    #[test]
    fn frames_are_counted() {
        let mut timer = FrameTimer::new(4);
        for _ in 0..6 {
            timer.begin();
            std::thread::sleep(Duration::from_millis(1));
            timer.end();
        }
        assert_eq!(timer.frames(), 6);
        assert!(timer.frame_time_ms() >= 1.0);
        let (min, max) = timer.frame_time_range_ms();
        assert!(min <= max);
    }
}
