//! Per-system timing for the dispatch loop

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Accumulated timing for one named system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemTiming {
    pub total: Duration,
    pub last: Duration,
    pub calls: u64,
}

impl SystemTiming {
    pub fn average(&self) -> Duration {
        if self.calls == 0 {
            Duration::ZERO
        } else {
            self.total.div_f64(self.calls as f64)
        }
    }
}

#[derive(Debug, Default)]
pub struct SystemProfiler {
    timings: HashMap<String, SystemTiming>,
}

impl SystemProfiler {
    pub fn new() -> Self {
        Self {
            timings: HashMap::new(),
        }
    }

    pub fn time_system<F, R>(&mut self, name: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();

        // Avoid allocating a key on the hot path once the entry exists.
        let timing = match self.timings.get_mut(name) {
            Some(timing) => timing,
            None => self.timings.entry(name.to_string()).or_default(),
        };
        timing.total += elapsed;
        timing.last = elapsed;
        timing.calls += 1;
        result
    }

    pub fn timing(&self, name: &str) -> Option<SystemTiming> {
        self.timings.get(name).copied()
    }

    pub fn total(&self, name: &str) -> Duration {
        self.timings.get(name).map(|t| t.total).unwrap_or(Duration::ZERO)
    }

    pub fn reset(&mut self) {
        self.timings.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SystemTiming)> {
        self.timings.iter().map(|(name, timing)| (name.as_str(), timing))
    }
}
