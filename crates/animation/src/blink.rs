//! Autonomous blink state machine.
//!
//! Timer-driven and independent of frame content: the idle timer
//! accumulates wall-clock delta time every tick. When it crosses a
//! randomized interval the eye enters `Closing`, collapsing both eye
//! and pupil linearly over a randomized duration, then snaps back to
//! `Open` at full scale. The close-and-reopen is a straight line, not
//! an eased curve.

use iris_common::config::EyeConfig;

/// Source of randomized blink timing. Injected so tests and replays
/// can supply deterministic sequences.
pub trait BlinkRng {
    /// Uniform sample in `[min, max]` milliseconds, inclusive.
    fn sample_ms(&mut self, min: u64, max: u64) -> u64;
}

/// Default `BlinkRng` backed by the thread-local generator.
#[derive(Debug, Default)]
pub struct ThreadBlinkRng;

impl BlinkRng for ThreadBlinkRng {
    fn sample_ms(&mut self, min: u64, max: u64) -> u64 {
        use rand::Rng;
        rand::thread_rng().gen_range(min..=max)
    }
}

/// Deterministic `BlinkRng` replaying a fixed sequence, cycling when
/// exhausted. Values are clamped into the requested range.
#[derive(Debug, Clone)]
pub struct ScriptedBlinkRng {
    values: Vec<u64>,
    cursor: usize,
}

impl ScriptedBlinkRng {
    /// The machine samples blink duration first, next interval second.
    pub fn new(values: Vec<u64>) -> Self {
        assert!(!values.is_empty(), "scripted rng needs at least one value");
        Self { values, cursor: 0 }
    }
}

impl BlinkRng for ScriptedBlinkRng {
    fn sample_ms(&mut self, min: u64, max: u64) -> u64 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v.clamp(min, max)
    }
}

/// Blink timing ranges, fixed at startup.
#[derive(Debug, Clone, Copy)]
pub struct BlinkTiming {
    pub interval_min_ms: u64,
    pub interval_max_ms: u64,
    pub duration_min_ms: u64,
    pub duration_max_ms: u64,
}

impl From<&EyeConfig> for BlinkTiming {
    fn from(config: &EyeConfig) -> Self {
        Self {
            interval_min_ms: config.blink_interval_min_ms,
            interval_max_ms: config.blink_interval_max_ms,
            duration_min_ms: config.blink_duration_min_ms,
            duration_max_ms: config.blink_duration_max_ms,
        }
    }
}

/// Where the eyelid is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlinkPhase {
    /// Eye fully open, idle timer running.
    Open,
    /// Mid-blink: `elapsed_ms` of `duration_ms` spent closing.
    Closing { elapsed_ms: f64, duration_ms: f64 },
}

/// The blink state machine. Mutated exactly once per tick.
#[derive(Debug, Clone)]
pub struct BlinkState {
    timing: BlinkTiming,
    timer_ms: f64,
    interval_ms: f64,
    phase: BlinkPhase,
}

impl BlinkState {
    /// Start open, with the first interval already sampled.
    pub fn new(timing: BlinkTiming, rng: &mut dyn BlinkRng) -> Self {
        let interval_ms = rng.sample_ms(timing.interval_min_ms, timing.interval_max_ms) as f64;
        Self {
            timing,
            timer_ms: 0.0,
            interval_ms,
            phase: BlinkPhase::Open,
        }
    }

    /// Advance by `delta_ms` of wall-clock time.
    ///
    /// Open→Closing fires when the idle timer reaches the sampled
    /// interval: blink duration is sampled, the next interval is
    /// resampled, and the timer resets to zero. Closing→Open fires
    /// when the blink has run its duration.
    pub fn tick(&mut self, delta_ms: f64, rng: &mut dyn BlinkRng) {
        self.timer_ms += delta_ms;

        match &mut self.phase {
            BlinkPhase::Open => {
                if self.timer_ms >= self.interval_ms {
                    let duration_ms = rng
                        .sample_ms(self.timing.duration_min_ms, self.timing.duration_max_ms)
                        as f64;
                    self.interval_ms = rng
                        .sample_ms(self.timing.interval_min_ms, self.timing.interval_max_ms)
                        as f64;
                    self.timer_ms = 0.0;
                    self.phase = BlinkPhase::Closing {
                        elapsed_ms: 0.0,
                        duration_ms,
                    };
                    tracing::debug!(
                        duration_ms,
                        next_interval_ms = self.interval_ms,
                        "blinking"
                    );
                }
            }
            BlinkPhase::Closing {
                elapsed_ms,
                duration_ms,
            } => {
                *elapsed_ms += delta_ms;
                if *elapsed_ms >= *duration_ms {
                    self.phase = BlinkPhase::Open;
                }
            }
        }
    }

    pub fn phase(&self) -> BlinkPhase {
        self.phase
    }

    pub fn is_closing(&self) -> bool {
        matches!(self.phase, BlinkPhase::Closing { .. })
    }

    /// Idle time accumulated since the last blink fired (ms).
    pub fn timer_ms(&self) -> f64 {
        self.timer_ms
    }

    /// The currently armed interval (ms).
    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Current eye (sclera) scale in [0, 1]. 1 whenever Open.
    pub fn eye_scale(&self) -> f64 {
        self.phase_scale()
    }

    /// Current pupil scale in [0, 1]. 1 whenever Open; floored at 0
    /// so rounding can never produce a negative radius.
    pub fn pupil_scale(&self) -> f64 {
        self.phase_scale()
    }

    fn phase_scale(&self) -> f64 {
        match self.phase {
            BlinkPhase::Open => 1.0,
            BlinkPhase::Closing {
                elapsed_ms,
                duration_ms,
            } => (1.0 - elapsed_ms / duration_ms).clamp(0.0, 1.0),
        }
    }
}
