//! Iris Runtime
//!
//! Owns the single-threaded tick loop and the seams to the outside
//! world: a frame source (camera) and a render sink (display surface).
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │                  EyeRuntime                    │
//! │                                                │
//! │  FrameSource ──► MotionExtractor ──► target    │
//! │                                        │       │
//! │                               PursuitState     │
//! │  TickClock ────► BlinkState            │       │
//! │                      └───── compose ◄──┘       │
//! │                               │                │
//! │                         DrawCommands           │
//! │                               ▼                │
//! │                          RenderSink            │
//! └────────────────────────────────────────────────┘
//! ```
//!
//! Every piece of mutable state (background model, blink, pursuit) is
//! touched exactly once per tick, in order, by the loop. The pacing
//! sleep and the blocking frame read are the only suspension points.

pub mod runner;
pub mod sink;
pub mod source;

pub use runner::EyeRuntime;
pub use sink::{AnsiTermSink, CaptureSink, RenderSink};
pub use source::{FrameSource, SyntheticCamera};
