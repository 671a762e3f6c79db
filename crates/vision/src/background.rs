//! Adaptive background model.
//!
//! Keeps a running mean and variance of luminance per pixel and marks
//! pixels statistically inconsistent with that distribution as
//! foreground. The model lives for the whole process and is updated,
//! never replaced, on every frame — the single place temporal state
//! crosses frame boundaries.

use iris_common::config::VisionConfig;
use iris_common::error::{IrisError, IrisResult};

use crate::frame::Frame;
use crate::mask::MotionMask;

/// Confidence value for pixels far outside the background distribution.
pub const FOREGROUND: u8 = 255;

/// Confidence value for marginal pixels (soft edges, shadows). Sits
/// below the near-saturation threshold so binarization drops it.
pub const MARGINAL: u8 = 127;

/// Variance floor so a perfectly static scene stays numerically sane.
const MIN_VARIANCE: f32 = 4.0;

/// Variance assigned to never-before-seen pixels.
const INITIAL_VARIANCE: f32 = 900.0;

/// Per-pixel running Gaussian model of the static scene.
#[derive(Debug, Clone)]
pub struct BackgroundModel {
    width: u32,
    height: u32,
    mean: Vec<f32>,
    variance: Vec<f32>,
    learning_rate: f32,
    foreground_sigma: f32,
    primed: bool,
}

impl BackgroundModel {
    pub fn new(width: u32, height: u32, config: &VisionConfig) -> Self {
        let n = width as usize * height as usize;
        Self {
            width,
            height,
            mean: vec![0.0; n],
            variance: vec![INITIAL_VARIANCE; n],
            learning_rate: config.learning_rate as f32,
            foreground_sigma: config.foreground_sigma as f32,
            primed: false,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Classify the frame against the learned background and fold the
    /// frame into the model.
    ///
    /// Returns a confidence mask: `FOREGROUND` where the pixel sits
    /// beyond `foreground_sigma` standard deviations from its learned
    /// mean, `MARGINAL` beyond half that distance, 0 otherwise. The
    /// first frame primes the model and yields an all-background mask.
    pub fn apply(&mut self, frame: &Frame) -> IrisResult<MotionMask> {
        if frame.width() != self.width || frame.height() != self.height {
            return Err(IrisError::vision(format!(
                "frame is {}x{}, background model is {}x{}",
                frame.width(),
                frame.height(),
                self.width,
                self.height
            )));
        }

        let luma = frame.luma_plane();
        let mut mask = MotionMask::new(self.width, self.height);

        if !self.primed {
            self.mean.copy_from_slice(&luma);
            self.primed = true;
            return Ok(mask);
        }

        let alpha = self.learning_rate;
        let out = mask.data_mut();
        for i in 0..luma.len() {
            let delta = luma[i] - self.mean[i];
            let dist2 = delta * delta;
            let sigma2 = self.variance[i].max(MIN_VARIANCE);

            let hi = self.foreground_sigma * self.foreground_sigma * sigma2;
            let lo = hi * 0.25; // half the sigma distance, squared
            out[i] = if dist2 > hi {
                FOREGROUND
            } else if dist2 > lo {
                MARGINAL
            } else {
                0
            };

            // Mean always adapts (parked objects get absorbed);
            // variance learns only from background-classified pixels
            self.mean[i] += alpha * delta;
            if out[i] == 0 {
                self.variance[i] = (self.variance[i] + alpha * (dist2 - self.variance[i]))
                    .max(MIN_VARIANCE);
            }
        }

        Ok(mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> VisionConfig {
        VisionConfig::default()
    }

    /// Feed a static scene until the model has settled.
    fn settle(model: &mut BackgroundModel, frame: &Frame, frames: usize) {
        for _ in 0..frames {
            model.apply(frame).unwrap();
        }
    }

    #[test]
    fn test_first_frame_primes_without_foreground() {
        let mut model = BackgroundModel::new(8, 8, &config());
        let mask = model.apply(&Frame::solid(8, 8, 200)).unwrap();
        assert_eq!(mask.foreground_count(FOREGROUND), 0);
    }

    #[test]
    fn test_static_scene_stays_background() {
        let mut model = BackgroundModel::new(8, 8, &config());
        let frame = Frame::solid(8, 8, 120);
        settle(&mut model, &frame, 30);
        let mask = model.apply(&frame).unwrap();
        assert_eq!(mask.foreground_count(FOREGROUND), 0);
    }

    #[test]
    fn test_sudden_bright_object_is_foreground() {
        let mut model = BackgroundModel::new(8, 8, &config());
        let background = Frame::solid(8, 8, 30);
        settle(&mut model, &background, 30);

        // A bright 2x2 patch appears
        let mut data = vec![30u8; 8 * 8 * 3];
        for y in 2..4u32 {
            for x in 2..4u32 {
                let i = (y as usize * 8 + x as usize) * 3;
                data[i] = 250;
                data[i + 1] = 250;
                data[i + 2] = 250;
            }
        }
        let moving = Frame::from_raw(8, 8, data).unwrap();
        let mask = model.apply(&moving).unwrap();

        assert_eq!(mask.foreground_count(FOREGROUND), 4);
        assert_eq!(mask.get(2, 2), FOREGROUND);
        assert_eq!(mask.get(0, 0), 0);
    }

    #[test]
    fn test_object_absorbed_over_time() {
        let mut model = BackgroundModel::new(4, 4, &config());
        settle(&mut model, &Frame::solid(4, 4, 30), 30);

        // The "object" parks: same bright frame over and over
        let parked = Frame::solid(4, 4, 220);
        settle(&mut model, &parked, 400);
        let mask = model.apply(&parked).unwrap();
        assert_eq!(mask.foreground_count(FOREGROUND), 0);
    }

    #[test]
    fn test_dimension_mismatch_is_error() {
        let mut model = BackgroundModel::new(8, 8, &config());
        assert!(model.apply(&Frame::solid(4, 4, 0)).is_err());
    }
}
