//! Raster frame input to the motion pipeline.

use iris_common::error::{IrisError, IrisResult};

/// An immutable RGB8 raster frame from the camera.
///
/// Row-major, 3 bytes per pixel. Timestamped implicitly by arrival
/// order; the pipeline only ever reads it.
#[derive(Debug, Clone)]
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Frame {
    /// Wrap a raw RGB8 buffer. Fails if the buffer length does not
    /// match the dimensions.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> IrisResult<Self> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(IrisError::vision(format!(
                "frame buffer is {} bytes, expected {} for {}x{}",
                data.len(),
                expected,
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a frame from an `image` crate RGB buffer.
    pub fn from_rgb_image(img: &image::RgbImage) -> Self {
        Self {
            width: img.width(),
            height: img.height(),
            data: img.as_raw().clone(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGB bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Rec. 601 luminance of the pixel at `(x, y)`.
    pub fn luma(&self, x: u32, y: u32) -> f32 {
        let i = (y as usize * self.width as usize + x as usize) * 3;
        let r = self.data[i] as f32;
        let g = self.data[i + 1] as f32;
        let b = self.data[i + 2] as f32;
        0.299 * r + 0.587 * g + 0.114 * b
    }

    /// The whole frame reduced to a luminance plane.
    pub fn luma_plane(&self) -> Vec<f32> {
        self.data
            .chunks_exact(3)
            .map(|px| 0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32)
            .collect()
    }

    /// A frame filled with a single gray level. Test and synthetic-
    /// source helper.
    pub fn solid(width: u32, height: u32, level: u8) -> Self {
        Self {
            width,
            height,
            data: vec![level; width as usize * height as usize * 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_checks_length() {
        assert!(Frame::from_raw(4, 4, vec![0; 4 * 4 * 3]).is_ok());
        assert!(Frame::from_raw(4, 4, vec![0; 7]).is_err());
    }

    #[test]
    fn test_luma_weights() {
        let white = Frame::solid(2, 2, 255);
        assert!((white.luma(1, 1) - 255.0).abs() < 0.5);

        let mut data = vec![0u8; 2 * 2 * 3];
        data[0] = 255; // pure red at (0, 0)
        let frame = Frame::from_raw(2, 2, data).unwrap();
        assert!((frame.luma(0, 0) - 0.299 * 255.0).abs() < 1e-3);
        assert_eq!(frame.luma(1, 0), 0.0);
    }

    #[test]
    fn test_luma_plane_matches_pointwise() {
        let mut data = vec![0u8; 3 * 2 * 3];
        for (i, byte) in data.iter_mut().enumerate() {
            *byte = (i * 17 % 256) as u8;
        }
        let frame = Frame::from_raw(3, 2, data).unwrap();
        let plane = frame.luma_plane();
        for y in 0..2 {
            for x in 0..3 {
                let expected = frame.luma(x, y);
                assert!((plane[(y * 3 + x) as usize] - expected).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_from_rgb_image() {
        let img = image::RgbImage::from_pixel(5, 4, image::Rgb([10, 20, 30]));
        let frame = Frame::from_rgb_image(&img);
        assert_eq!(frame.width(), 5);
        assert_eq!(frame.height(), 4);
        assert_eq!(frame.data()[0..3], [10, 20, 30]);
    }
}
