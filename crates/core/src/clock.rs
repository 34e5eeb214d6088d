// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// A clock that provides the current time and can put the caller to sleep
pub trait Clock: Clone + Send + Sync {
    fn now(&self) -> Instant;

    /// Block the calling thread for `duration`
    fn sleep(&self, duration: Duration);
}

/// Real system clock
#[derive(Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[derive(Debug)]
struct FakeTime {
    current: Instant,
    slept: Duration,
    sleeps: usize,
}

/// Fake clock for testing with controllable time
///
/// `sleep` returns immediately and advances the clock instead.
#[derive(Clone, Debug)]
pub struct FakeClock {
    time: Arc<Mutex<FakeTime>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            time: Arc::new(Mutex::new(FakeTime {
                current: Instant::now(),
                slept: Duration::ZERO,
                sleeps: 0,
            })),
        }
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut time = self.time.lock().unwrap_or_else(|e| e.into_inner());
        time.current += duration;
    }

    /// Total time spent in `sleep`
    pub fn slept(&self) -> Duration {
        self.time.lock().unwrap_or_else(|e| e.into_inner()).slept
    }

    /// Number of `sleep` calls made
    pub fn sleep_count(&self) -> usize {
        self.time.lock().unwrap_or_else(|e| e.into_inner()).sleeps
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.time.lock().unwrap_or_else(|e| e.into_inner()).current
    }

    fn sleep(&self, duration: Duration) {
        let mut time = self.time.lock().unwrap_or_else(|e| e.into_inner());
        time.current += duration;
        time.slept += duration;
        time.sleeps += 1;
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
