//! Motion confidence masks and their filters.

/// A single-channel raster the same size as the source frame, holding
/// per-pixel motion confidence. Derived fresh each tick; never
/// persisted beyond it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotionMask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl MotionMask {
    /// An all-background mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, value: u8) {
        self.data[y as usize * self.width as usize + x as usize] = value;
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Number of pixels at or above the given confidence level.
    pub fn foreground_count(&self, level: u8) -> usize {
        self.data.iter().filter(|&&v| v >= level).count()
    }

    /// Median filter over a square `window` (odd edge length).
    ///
    /// Suppresses speckle noise before thresholding. The window is
    /// clipped at the borders; the median is taken over the pixels
    /// actually inside the mask.
    pub fn median_filter(&self, window: u32) -> MotionMask {
        let radius = (window.max(1) / 2) as i64;
        if radius == 0 {
            return self.clone();
        }

        let w = self.width as i64;
        let h = self.height as i64;
        let mut out = MotionMask::new(self.width, self.height);
        let mut neighborhood = Vec::with_capacity((window * window) as usize);

        for y in 0..h {
            for x in 0..w {
                neighborhood.clear();
                for ny in (y - radius).max(0)..=(y + radius).min(h - 1) {
                    for nx in (x - radius).max(0)..=(x + radius).min(w - 1) {
                        neighborhood.push(self.data[(ny * w + nx) as usize]);
                    }
                }
                neighborhood.sort_unstable();
                out.data[(y * w + x) as usize] = neighborhood[neighborhood.len() / 2];
            }
        }

        out
    }

    /// Keep only near-saturated confidence: pixels strictly above
    /// `threshold` become 255, everything else 0.
    pub fn binarize(&self, threshold: u8) -> MotionMask {
        MotionMask {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .map(|&v| if v > threshold { 255 } else { 0 })
                .collect(),
        }
    }
}
