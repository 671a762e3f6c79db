//! Smoothed pursuit of the gaze target.

use iris_model::Vec2;

/// The current smoothed pupil offset.
///
/// Advanced once per tick by lerping toward the target: an
/// exponential-decay filter at fixed step. It never overshoots and
/// never quite reaches the target, which is what gives the gaze its
/// organic lag. Magnitude is deliberately unbounded; the damping
/// applied upstream keeps it proportionate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PursuitState {
    offset: Vec2,
}

impl PursuitState {
    /// Start centered.
    pub fn new() -> Self {
        Self { offset: Vec2::ZERO }
    }

    /// The current pupil offset.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Move the offset toward `target` by the fixed `step` in (0, 1].
    pub fn advance(&mut self, target: Vec2, step: f64) -> Vec2 {
        self.offset = Vec2::lerp(self.offset, target, step);
        self.offset
    }
}
