//! Iris Common Utilities
//!
//! Shared infrastructure for all Iris crates:
//! - Error types and result aliases
//! - Clock and frame-pacing utilities for the tick loop
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
