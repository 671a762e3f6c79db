//! Render sinks.
//!
//! A sink consumes the compositor's draw commands and owns the actual
//! surface. Two implementations ship: a capture sink for tests and
//! headless simulation, and an ANSI terminal preview.

use std::io::Write;

use iris_common::error::IrisResult;
use iris_model::{Color, DrawCommand, Vec2};

/// Display surface for the eye.
pub trait RenderSink {
    fn clear(&mut self, color: Color);

    fn draw_disc(&mut self, center: Vec2, radius: f64, color: Color);

    fn draw_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color);

    /// Flush the composed frame to the display.
    fn present(&mut self) -> IrisResult<()>;

    /// Dispatch a compositor command list to the primitive calls.
    fn submit(&mut self, commands: &[DrawCommand]) {
        for command in commands {
            match *command {
                DrawCommand::Clear(color) => self.clear(color),
                DrawCommand::Disc {
                    center,
                    radius,
                    color,
                } => self.draw_disc(center, radius, color),
                DrawCommand::Rect { x, y, w, h, color } => self.draw_rect(x, y, w, h, color),
            }
        }
    }
}

/// Records every submitted command, frame by frame. Used by tests and
/// the headless `simulate` command to inspect what would be drawn.
#[derive(Debug, Default)]
pub struct CaptureSink {
    pending: Vec<DrawCommand>,
    frames: Vec<Vec<DrawCommand>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All presented frames so far.
    pub fn frames(&self) -> &[Vec<DrawCommand>] {
        &self.frames
    }

    /// The most recently presented frame.
    pub fn last_frame(&self) -> Option<&[DrawCommand]> {
        self.frames.last().map(|f| f.as_slice())
    }
}

impl RenderSink for CaptureSink {
    fn clear(&mut self, color: Color) {
        self.pending.push(DrawCommand::Clear(color));
    }

    fn draw_disc(&mut self, center: Vec2, radius: f64, color: Color) {
        self.pending.push(DrawCommand::Disc {
            center,
            radius,
            color,
        });
    }

    fn draw_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        self.pending.push(DrawCommand::Rect { x, y, w, h, color });
    }

    fn present(&mut self) -> IrisResult<()> {
        self.frames.push(std::mem::take(&mut self.pending));
        Ok(())
    }
}

/// Draws the eye as a block of 24-bit ANSI cells on stdout.
///
/// The surface is sampled down to a character grid; terminal cells are
/// roughly twice as tall as wide, so vertical sampling is doubled to
/// keep the eye round. Commands are replayed per cell, last cover
/// wins.
pub struct AnsiTermSink {
    surface_width: f64,
    surface_height: f64,
    cols: u32,
    rows: u32,
    pending: Vec<DrawCommand>,
    out: std::io::Stdout,
}

impl AnsiTermSink {
    pub fn new(surface_width: u32, surface_height: u32, cols: u32) -> Self {
        let aspect = surface_height as f64 / surface_width as f64;
        // Halve the row count to compensate for tall terminal cells
        let rows = ((cols as f64 * aspect) / 2.0).round().max(1.0) as u32;
        Self {
            surface_width: surface_width as f64,
            surface_height: surface_height as f64,
            cols,
            rows,
            pending: Vec::new(),
            out: std::io::stdout(),
        }
    }

    fn sample(&self, sx: f64, sy: f64) -> Color {
        let mut color = Color::BLACK;
        for command in &self.pending {
            match *command {
                DrawCommand::Clear(c) => color = c,
                DrawCommand::Disc {
                    center,
                    radius,
                    color: c,
                } => {
                    let dx = sx - center.x;
                    let dy = sy - center.y;
                    if dx * dx + dy * dy <= radius * radius {
                        color = c;
                    }
                }
                DrawCommand::Rect {
                    x,
                    y,
                    w,
                    h,
                    color: c,
                } => {
                    if sx >= x && sx < x + w && sy >= y && sy < y + h {
                        color = c;
                    }
                }
            }
        }
        color
    }
}

impl RenderSink for AnsiTermSink {
    fn clear(&mut self, color: Color) {
        self.pending.clear();
        self.pending.push(DrawCommand::Clear(color));
    }

    fn draw_disc(&mut self, center: Vec2, radius: f64, color: Color) {
        self.pending.push(DrawCommand::Disc {
            center,
            radius,
            color,
        });
    }

    fn draw_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        self.pending.push(DrawCommand::Rect { x, y, w, h, color });
    }

    fn present(&mut self) -> IrisResult<()> {
        let mut buffer = String::with_capacity((self.cols * self.rows * 20) as usize);
        buffer.push_str("\x1b[H");
        for row in 0..self.rows {
            for col in 0..self.cols {
                let sx = (col as f64 + 0.5) / self.cols as f64 * self.surface_width;
                let sy = (row as f64 + 0.5) / self.rows as f64 * self.surface_height;
                let c = self.sample(sx, sy);
                buffer.push_str(&format!("\x1b[48;2;{};{};{}m ", c.r, c.g, c.b));
            }
            buffer.push_str("\x1b[0m\n");
        }
        self.out.write_all(buffer.as_bytes())?;
        self.out.flush()?;
        self.pending.clear();
        Ok(())
    }
}
