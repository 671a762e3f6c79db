//! Iris Vision — the motion-to-target pipeline.
//!
//! Reduces a raw camera frame to at most one 2D gaze target:
//! - **Background model:** per-pixel adaptive statistics separating
//!   moving foreground from the learned static scene
//! - **Mask filtering:** median denoise + near-saturation threshold
//! - **Blob extraction:** connected foreground regions with area and
//!   bounding box, largest-wins selection
//! - **Extractor:** the full chain, ending in a mirrored, damped
//!   offset from the eye center
//!
//! This crate is pure computation — no I/O, no platform dependencies.
//! All inputs are data; all outputs are data. The only state crossing
//! frame boundaries is the background model inside `MotionExtractor`.

pub mod background;
pub mod contour;
pub mod extractor;
pub mod frame;
pub mod mask;

pub use background::BackgroundModel;
pub use contour::{find_blobs, largest_blob, Blob};
pub use extractor::MotionExtractor;
pub use frame::Frame;
pub use mask::MotionMask;
