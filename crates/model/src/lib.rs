//! Iris Model — shared value types.
//!
//! Plain data crossing crate boundaries: 2D vectors, eye geometry,
//! colors, per-tick render parameters, and the draw command vocabulary
//! consumed by rendering sinks. No behavior beyond small pure helpers.

pub mod geometry;
pub mod render;

pub use geometry::*;
pub use render::*;
