//! Render parameters and the draw command vocabulary.
//!
//! The compositor reduces each tick to a `RenderParams` value and a
//! short list of `DrawCommand`s; rendering sinks only ever see these.

use serde::{Deserialize, Serialize};

use crate::geometry::Vec2;

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Per-tick rendering parameters for the eye. Derived each tick from
/// blink scales and the pursuit offset; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderParams {
    /// Current eye (sclera) radius. In [0, full eye radius].
    pub eye_radius: f64,

    /// Current pupil radius. In [0, full pupil radius].
    pub pupil_radius: f64,

    /// Smoothed pupil offset from the eye center.
    pub pupil_offset: Vec2,

    /// Whether a blink is collapsing the eye this tick.
    pub closing: bool,
}

/// A single drawing instruction for a rendering sink.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Fill the whole surface.
    Clear(Color),

    /// A filled disc.
    Disc {
        center: Vec2,
        radius: f64,
        color: Color,
    },

    /// A filled axis-aligned rectangle (the collapsed-lid band).
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: Color,
    },
}
