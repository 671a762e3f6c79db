//! Iris Animation — the eye-animation controller.
//!
//! Two independent per-tick updates and the fold that combines them:
//! - **Pursuit:** smoothed advance of the pupil offset toward the
//!   current gaze target (exponential-decay lerp)
//! - **Blink:** timer-driven state machine collapsing and reopening
//!   the eye at randomized intervals
//! - **Compositor:** folds both into `RenderParams` and the draw
//!   command list a rendering sink consumes
//!
//! Pure computation; randomness is injected through `BlinkRng` so
//! tests run on scripted sequences.

pub mod blink;
pub mod compositor;
pub mod pursuit;

pub use blink::{BlinkPhase, BlinkRng, BlinkState, BlinkTiming, ScriptedBlinkRng, ThreadBlinkRng};
pub use compositor::{compose, draw_commands};
pub use pursuit::PursuitState;
