//! Frame sources.
//!
//! A frame source hands the loop timestamp-ordered raster frames of
//! consistent dimensions. `Ok(None)` means no frame this tick — the
//! caller skips the motion stage and carries on.

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;

use iris_common::error::IrisResult;
use iris_vision::Frame;

/// Source of camera frames for the motion pipeline.
pub trait FrameSource {
    /// Frame dimensions, constant across calls.
    fn dimensions(&self) -> (u32, u32);

    /// Read the next frame. `Ok(None)` when no frame is available
    /// this tick; `Err` when the source itself has failed.
    fn read_frame(&mut self) -> IrisResult<Option<Frame>>;
}

/// A deterministic stand-in camera: a static dim backdrop with one
/// bright disc orbiting the frame center.
///
/// The first `warmup_blank` frames show only the backdrop so the
/// background model can learn an empty scene before the "object"
/// enters. With `angular_step` 0 the disc holds still, which is what
/// the tests want; with the default step it sweeps a slow orbit.
pub struct SyntheticCamera {
    width: u32,
    height: u32,
    backdrop: RgbImage,
    orbit_radius: f64,
    angle: f64,
    angular_step: f64,
    disc_radius: i32,
    warmup_blank: u64,
    dropout_every: Option<u64>,
    frame_index: u64,
}

impl SyntheticCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            backdrop: Self::make_backdrop(width, height),
            orbit_radius: width.min(height) as f64 / 3.0,
            angle: 0.0,
            angular_step: 0.05,
            disc_radius: (width.min(height) / 10).max(2) as i32,
            warmup_blank: 30,
            dropout_every: None,
            frame_index: 0,
        }
    }

    /// Hold the disc still at `angle` radians instead of orbiting.
    pub fn with_fixed_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self.angular_step = 0.0;
        self
    }

    /// Number of backdrop-only frames before the disc appears.
    pub fn with_warmup_blank(mut self, frames: u64) -> Self {
        self.warmup_blank = frames;
        self
    }

    /// Report no frame on every `n`th read, exercising the
    /// frame-unavailable path.
    pub fn with_dropout_every(mut self, n: u64) -> Self {
        self.dropout_every = Some(n.max(1));
        self
    }

    /// A dim backdrop with faint grid lines, so the scene has some
    /// static structure for the background model to learn.
    fn make_backdrop(width: u32, height: u32) -> RgbImage {
        let mut img = RgbImage::from_pixel(width, height, Rgb([28, 28, 34]));
        let line = Rgb([40, 40, 48]);
        for y in (0..height).step_by(16) {
            for x in 0..width {
                img.put_pixel(x, y, line);
            }
        }
        for x in (0..width).step_by(16) {
            for y in 0..height {
                img.put_pixel(x, y, line);
            }
        }
        img
    }

    fn disc_position(&self) -> (i32, i32) {
        let cx = self.width as f64 / 2.0 + self.orbit_radius * self.angle.cos();
        let cy = self.height as f64 / 2.0 + self.orbit_radius * self.angle.sin();
        (cx.round() as i32, cy.round() as i32)
    }
}

impl FrameSource for SyntheticCamera {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn read_frame(&mut self) -> IrisResult<Option<Frame>> {
        self.frame_index += 1;

        if let Some(n) = self.dropout_every {
            if self.frame_index % n == 0 {
                return Ok(None);
            }
        }

        let mut img = self.backdrop.clone();
        if self.frame_index > self.warmup_blank {
            let (x, y) = self.disc_position();
            draw_filled_circle_mut(&mut img, (x, y), self.disc_radius, Rgb([235, 235, 240]));
            self.angle += self.angular_step;
        }

        Ok(Some(Frame::from_rgb_image(&img)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_are_constant() {
        let mut camera = SyntheticCamera::new(64, 48);
        assert_eq!(camera.dimensions(), (64, 48));
        for _ in 0..5 {
            let frame = camera.read_frame().unwrap().unwrap();
            assert_eq!((frame.width(), frame.height()), (64, 48));
        }
    }

    #[test]
    fn test_warmup_frames_have_no_disc() {
        let mut camera = SyntheticCamera::new(64, 48).with_warmup_blank(3);
        let blank = camera.read_frame().unwrap().unwrap();
        for _ in 0..2 {
            camera.read_frame().unwrap();
        }
        let with_disc = camera.read_frame().unwrap().unwrap();
        // The disc brightens the frame noticeably
        let sum = |f: &Frame| f.data().iter().map(|&b| b as u64).sum::<u64>();
        assert!(sum(&with_disc) > sum(&blank));
    }

    #[test]
    fn test_dropout_skips_every_nth_frame() {
        let mut camera = SyntheticCamera::new(32, 32).with_dropout_every(3);
        let mut missing = 0;
        for _ in 0..9 {
            if camera.read_frame().unwrap().is_none() {
                missing += 1;
            }
        }
        assert_eq!(missing, 3);
    }
}
