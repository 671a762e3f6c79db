//! Clock and frame-pacing utilities for the tick loop.
//!
//! The eye runtime is a single-threaded cooperative loop at a fixed
//! nominal tick rate. This module provides:
//! - A monotonic clock anchored at loop start, yielding per-tick delta time
//! - A frame limiter that computes (and optionally sleeps) the pacing pause

use std::time::{Duration, Instant};

/// A tick clock that provides monotonic timestamps relative to a fixed
/// epoch (the moment the loop started) and per-tick delta time.
#[derive(Debug, Clone)]
pub struct TickClock {
    /// The instant the loop started.
    epoch: Instant,

    /// Wall-clock time at epoch (ISO 8601 string).
    epoch_wall: String,

    /// The instant of the previous tick.
    last_tick: Instant,
}

impl TickClock {
    /// Create a new tick clock anchored to now.
    pub fn start() -> Self {
        let now = Instant::now();
        Self {
            epoch: now,
            epoch_wall: chrono::Utc::now().to_rfc3339(),
            last_tick: now,
        }
    }

    /// Milliseconds elapsed since the previous tick, advancing the
    /// tick marker. The first call measures from loop start.
    pub fn tick_delta_ms(&mut self) -> f64 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick);
        self.last_tick = now;
        delta.as_secs_f64() * 1000.0
    }

    /// Milliseconds elapsed since loop start.
    pub fn elapsed_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    /// Wall-clock time at loop start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }

    /// The underlying epoch instant.
    pub fn epoch(&self) -> Instant {
        self.epoch
    }
}

/// Frame-rate limiter pacing the tick loop to a target Hz.
///
/// The pacing sleep is the loop's only suspension point besides the
/// blocking frame read. `next_pause` is pure so tests never sleep.
#[derive(Debug)]
pub struct FrameLimiter {
    target_interval: Duration,
    next_deadline: Option<Instant>,
}

impl FrameLimiter {
    /// Create a limiter targeting the given Hz rate.
    pub fn new(target_hz: u32) -> Self {
        let hz = target_hz.max(1);
        Self {
            target_interval: Duration::from_nanos(1_000_000_000 / hz as u64),
            next_deadline: None,
        }
    }

    /// Compute how long the loop should pause at `now` to hold the
    /// target rate, advancing the internal deadline. Returns `None`
    /// when the loop is already at or past the deadline (running
    /// behind); the deadline then resets from `now` rather than
    /// accumulating debt.
    pub fn next_pause(&mut self, now: Instant) -> Option<Duration> {
        match self.next_deadline {
            None => {
                self.next_deadline = Some(now + self.target_interval);
                None
            }
            Some(deadline) if now < deadline => {
                self.next_deadline = Some(deadline + self.target_interval);
                Some(deadline - now)
            }
            Some(_) => {
                self.next_deadline = Some(now + self.target_interval);
                None
            }
        }
    }

    /// Sleep out the remainder of the current tick, if any.
    pub fn pace(&mut self) {
        if let Some(pause) = self.next_pause(Instant::now()) {
            std::thread::sleep(pause);
        }
    }

    /// Target interval between ticks.
    pub fn interval(&self) -> Duration {
        self.target_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_elapsed() {
        let clock = TickClock::start();
        // Should be very small but non-negative
        assert!(clock.elapsed_ms() < 1000.0);
    }

    #[test]
    fn test_tick_delta_advances_marker() {
        let mut clock = TickClock::start();
        let first = clock.tick_delta_ms();
        let second = clock.tick_delta_ms();
        assert!(first >= 0.0);
        assert!(second >= 0.0);
        // Each delta measures from the previous tick, not from epoch
        assert!(second < 1000.0);
    }

    #[test]
    fn test_limiter_first_tick_never_pauses() {
        let mut limiter = FrameLimiter::new(60);
        assert!(limiter.next_pause(Instant::now()).is_none());
    }

    #[test]
    fn test_limiter_paces_fast_loop() {
        let mut limiter = FrameLimiter::new(60);
        let t0 = Instant::now();
        assert!(limiter.next_pause(t0).is_none());
        // Immediately back at loop top: a full interval remains
        let pause = limiter.next_pause(t0).expect("fast loop should pause");
        assert!(pause <= Duration::from_nanos(1_000_000_000 / 60));
    }

    #[test]
    fn test_limiter_resets_when_behind() {
        let mut limiter = FrameLimiter::new(60);
        let t0 = Instant::now();
        limiter.next_pause(t0);
        // A tick that took 100ms blew through the ~16.7ms deadline
        let late = t0 + Duration::from_millis(100);
        assert!(limiter.next_pause(late).is_none());
        // The deadline restarted from the late tick, so the next fast
        // tick pauses again instead of burning accumulated debt
        assert!(limiter.next_pause(late).is_some());
    }

    #[test]
    fn test_limiter_interval() {
        let limiter = FrameLimiter::new(60);
        let ns = limiter.interval().as_nanos() as u64;
        assert!((16_000_000..=17_000_000).contains(&ns));
    }
}
