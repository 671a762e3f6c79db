//! The full motion-to-target chain.

use iris_common::config::VisionConfig;
use iris_common::error::IrisResult;
use iris_model::Vec2;

use crate::background::BackgroundModel;
use crate::contour::{find_blobs, largest_blob};
use crate::frame::Frame;

/// Reduces each camera frame to at most one gaze target.
///
/// Owns the process-lifetime background model; everything else in the
/// chain is recomputed per frame. The produced offset is in the eye's
/// coordinate space: displacement of the dominant moving object from
/// the eye center, x mirrored so the pupil looks *toward* the viewer's
/// side of the motion, divided by the damping factor.
pub struct MotionExtractor {
    background: BackgroundModel,
    eye_center: Vec2,
    damping: f64,
    median_window: u32,
    mask_threshold: u8,
    min_blob_area: u32,
}

impl MotionExtractor {
    pub fn new(
        frame_width: u32,
        frame_height: u32,
        eye_center: Vec2,
        damping: f64,
        config: &VisionConfig,
    ) -> Self {
        Self {
            background: BackgroundModel::new(frame_width, frame_height, config),
            eye_center,
            damping,
            median_window: config.median_window,
            mask_threshold: config.mask_threshold,
            min_blob_area: config.min_blob_area,
        }
    }

    /// Width of the frames this extractor was sized for.
    pub fn frame_width(&self) -> u32 {
        self.background.width()
    }

    /// Height of the frames this extractor was sized for.
    pub fn frame_height(&self) -> u32 {
        self.background.height()
    }

    /// Run the pipeline on one frame: update the background model,
    /// denoise and binarize the confidence mask, pick the largest
    /// foreground blob, and turn its bounding-box center into a gaze
    /// offset. `None` when nothing is moving.
    pub fn track(&mut self, frame: &Frame) -> IrisResult<Option<Vec2>> {
        let mask = self.background.apply(frame)?;
        let binary = mask
            .median_filter(self.median_window)
            .binarize(self.mask_threshold);

        let blobs = find_blobs(&binary, self.min_blob_area);
        let Some(blob) = largest_blob(&blobs) else {
            tracing::trace!("no moving blobs this frame");
            return Ok(None);
        };

        let (cx, cy) = blob.bbox_center();
        let offset = self.target_offset(cx, cy);
        tracing::trace!(
            area = blob.area,
            cx,
            cy,
            dx = offset.x,
            dy = offset.y,
            "tracking largest blob"
        );
        Ok(Some(offset))
    }

    /// Mirror-convention damped offset for a blob centered at
    /// `(cx, cy)` in frame coordinates.
    fn target_offset(&self, cx: f64, cy: f64) -> Vec2 {
        Vec2::new(
            -(cx - self.eye_center.x) / self.damping,
            (cy - self.eye_center.y) / self.damping,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor(w: u32, h: u32, eye_center: Vec2) -> MotionExtractor {
        MotionExtractor::new(w, h, eye_center, 5.0, &VisionConfig::default())
    }

    /// Paint a bright square onto a dark frame.
    fn frame_with_square(w: u32, h: u32, x0: u32, y0: u32, edge: u32) -> Frame {
        let mut data = vec![20u8; w as usize * h as usize * 3];
        for y in y0..y0 + edge {
            for x in x0..x0 + edge {
                let i = (y as usize * w as usize + x as usize) * 3;
                data[i] = 245;
                data[i + 1] = 245;
                data[i + 2] = 245;
            }
        }
        Frame::from_raw(w, h, data).unwrap()
    }

    #[test]
    fn test_offset_formula_worked_example() {
        // Eye at (400, 300), damping 5, blob box centered at (450, 320)
        let ex = extractor(16, 16, Vec2::new(400.0, 300.0));
        let offset = ex.target_offset(450.0, 320.0);
        assert_eq!(offset, Vec2::new(-10.0, 4.0));
    }

    #[test]
    fn test_x_axis_is_mirrored() {
        let ex = extractor(16, 16, Vec2::new(100.0, 100.0));
        // Motion to the right of center pulls the gaze left
        assert!(ex.target_offset(150.0, 100.0).x < 0.0);
        assert!(ex.target_offset(50.0, 100.0).x > 0.0);
        // y keeps screen orientation
        assert!(ex.target_offset(100.0, 150.0).y > 0.0);
    }

    #[test]
    fn test_static_scene_yields_no_target() {
        let mut ex = extractor(32, 32, Vec2::new(16.0, 16.0));
        let still = Frame::solid(32, 32, 60);
        for _ in 0..20 {
            assert!(ex.track(&still).unwrap().is_none());
        }
    }

    #[test]
    fn test_moving_square_is_tracked_mirrored() {
        let w = 64;
        let h = 48;
        let mut ex = extractor(w, h, Vec2::new(32.0, 24.0));

        let background = Frame::solid(w, h, 20);
        for _ in 0..30 {
            ex.track(&background).unwrap();
        }

        // 12x12 square in the lower-right quadrant
        let frame = frame_with_square(w, h, 40, 28, 12);
        let offset = ex
            .track(&frame)
            .unwrap()
            .expect("square should be detected");

        // Square bbox center ~ (45.5, 33.5) against eye (32, 24):
        // mirrored x negative, y positive
        assert!(offset.x < 0.0, "offset.x = {}", offset.x);
        assert!(offset.y > 0.0, "offset.y = {}", offset.y);
        assert!((offset.x - (-(45.5 - 32.0) / 5.0)).abs() < 1.5);
        assert!((offset.y - (33.5 - 24.0) / 5.0).abs() < 1.5);
    }

    #[test]
    fn test_largest_of_two_squares_wins() {
        let w = 96;
        let h = 64;
        let mut ex = extractor(w, h, Vec2::new(48.0, 32.0));

        let background = Frame::solid(w, h, 20);
        for _ in 0..30 {
            ex.track(&background).unwrap();
        }

        // Small square left of center, large square right of center
        let mut data = vec![20u8; w as usize * h as usize * 3];
        let mut paint = |x0: u32, y0: u32, edge: u32| {
            for y in y0..y0 + edge {
                for x in x0..x0 + edge {
                    let i = (y as usize * w as usize + x as usize) * 3;
                    data[i] = 245;
                    data[i + 1] = 245;
                    data[i + 2] = 245;
                }
            }
        };
        paint(8, 28, 7);
        paint(64, 20, 16);
        let frame = Frame::from_raw(w, h, data).unwrap();

        let offset = ex.track(&frame).unwrap().expect("blobs present");
        // The large square sits right of center; mirrored gaze goes left
        assert!(offset.x < 0.0, "offset.x = {}", offset.x);
    }
}
