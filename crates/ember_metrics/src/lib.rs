//! Ember Metrics - frame and system timing for the simulation loop
//!
//! Everything here vanishes when the `metrics` feature is off: the public
//! types are replaced by empty stubs with the same method signatures, so
//! callers never need their own `cfg` guards.
//!
//! # Usage
//!
//! ```ignore
//! use ember_metrics::{FrameTimer, SystemProfiler};
//!
//! let mut frames = FrameTimer::new(120);
//! let mut systems = SystemProfiler::new();
//!
//! frames.begin();
//! systems.time_system("movement", || step_movement());
//! frames.end();
//! tracing::info!(fps = frames.fps(), "frame done");
//! ```

#[cfg(feature = "metrics")]
mod counter;
#[cfg(feature = "metrics")]
mod frame_timer;
#[cfg(feature = "metrics")]
mod ring_buffer;
#[cfg(feature = "metrics")]
mod system_profiler;

#[cfg(feature = "metrics")]
pub use counter::Counter;
#[cfg(feature = "metrics")]
pub use frame_timer::FrameTimer;
#[cfg(feature = "metrics")]
pub use ring_buffer::RingBuffer;
#[cfg(feature = "metrics")]
pub use system_profiler::{SystemProfiler, SystemTiming};

/// Whether this build collects metrics at all.
pub const ENABLED: bool = cfg!(feature = "metrics");

/// Time a block under the profiler (the stub profiler just runs it).
///
/// The `cfg` lives on the profiler type rather than in the expansion, so the
/// calling crate does not need a `metrics` feature of its own.
#[macro_export]
macro_rules! time_scope {
    ($profiler:expr, $name:expr, $body:block) => {
        $profiler.time_system($name, || $body)
    };
}

// ============================================================================
// No-op stubs when metrics disabled
// ============================================================================

#[cfg(not(feature = "metrics"))]
mod stubs {
    use std::time::Duration;

    #[derive(Debug, Default)]
    pub struct FrameTimer;

    impl FrameTimer {
        pub fn new(_capacity: usize) -> Self { Self }
        pub fn begin(&mut self) {}
        pub fn end(&mut self) {}
        pub fn frames(&self) -> u64 { 0 }
        pub fn fps(&self) -> f64 { 0.0 }
        pub fn frame_time_ms(&self) -> f64 { 0.0 }
        pub fn frame_time_range_ms(&self) -> (f64, f64) { (0.0, 0.0) }
    }

    #[derive(Debug, Default)]
    pub struct Counter;

    impl Counter {
        pub fn new() -> Self { Self }
        pub fn increment(&mut self, _name: &'static str, _value: u64) {}
        pub fn get(&self, _name: &str) -> u64 { 0 }
        pub fn reset_all(&mut self) {}
        pub fn iter(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ { std::iter::empty() }
    }

    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct SystemTiming {
        pub total: Duration,
        pub last: Duration,
        pub calls: u64,
    }

    impl SystemTiming {
        pub fn average(&self) -> Duration { Duration::ZERO }
    }

    #[derive(Debug, Default)]
    pub struct SystemProfiler;

    impl SystemProfiler {
        pub fn new() -> Self { Self }
        pub fn time_system<F, R>(&mut self, _name: &str, f: F) -> R where F: FnOnce() -> R { f() }
        pub fn timing(&self, _name: &str) -> Option<SystemTiming> { None }
        pub fn total(&self, _name: &str) -> Duration { Duration::ZERO }
        pub fn reset(&mut self) {}
        pub fn iter(&self) -> impl Iterator<Item = (&str, &SystemTiming)> { std::iter::empty() }
    }
}

#[cfg(not(feature = "metrics"))]
pub use stubs::{Counter, FrameTimer, SystemProfiler, SystemTiming};

#[cfg(test)]
mod tests {
    #[test]
    fn stubs_and_real_types_share_an_api() {
        let mut timer = super::FrameTimer::new(60);
        timer.begin();
        timer.end();

        let mut counter = super::Counter::new();
        counter.increment("spawned", 2);

        let mut profiler = super::SystemProfiler::new();
        let value = profiler.time_system("noop", || 7);
        assert_eq!(value, 7);

        if super::ENABLED {
            assert_eq!(counter.get("spawned"), 2);
            assert_eq!(profiler.timing("noop").map(|t| t.calls), Some(1));
        } else {
            assert_eq!(counter.get("spawned"), 0);
            assert!(profiler.timing("noop").is_none());
        }
    }

    #[test]
    fn time_scope_returns_the_body_value() {
        let mut profiler = super::SystemProfiler::new();
        let out = crate::time_scope!(profiler, "scoped", { 21 * 2 });
        assert_eq!(out, 42);
    }
}
