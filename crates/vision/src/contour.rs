//! Connected foreground regions ("blobs") in a binary mask.
//!
//! Flood-fill labeling with 8-connectivity over an explicit work
//! stack and a visited grid. Each blob carries the aggregates the
//! extractor needs: pixel-count area and axis-aligned bounding box.

use crate::mask::MotionMask;

/// A connected foreground region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blob {
    /// Label in row-major discovery order, starting at 0.
    pub label: u32,
    /// Number of foreground pixels in the region.
    pub area: u32,
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl Blob {
    /// Center of the axis-aligned bounding box.
    pub fn bbox_center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) as f64 / 2.0,
            (self.min_y + self.max_y) as f64 / 2.0,
        )
    }

    /// Bounding box width in pixels.
    pub fn bbox_width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    /// Bounding box height in pixels.
    pub fn bbox_height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }
}

/// Label all 8-connected foreground regions (non-zero pixels) in the
/// mask, dropping regions smaller than `min_area`.
pub fn find_blobs(mask: &MotionMask, min_area: u32) -> Vec<Blob> {
    let w = mask.width() as i64;
    let h = mask.height() as i64;
    let data = mask.data();

    let mut visited = vec![false; data.len()];
    let mut blobs = Vec::new();
    let mut stack = Vec::new();

    for start in 0..data.len() {
        if data[start] == 0 || visited[start] {
            continue;
        }

        let label = blobs.len() as u32;
        let mut area = 0u32;
        let (sx, sy) = (start as i64 % w, start as i64 / w);
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (sx, sy, sx, sy);

        visited[start] = true;
        stack.push((sx, sy));

        while let Some((x, y)) = stack.pop() {
            area += 1;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);

            for dy in -1..=1i64 {
                for dx in -1..=1i64 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let (nx, ny) = (x + dx, y + dy);
                    if nx < 0 || nx >= w || ny < 0 || ny >= h {
                        continue;
                    }
                    let ni = (ny * w + nx) as usize;
                    if data[ni] != 0 && !visited[ni] {
                        visited[ni] = true;
                        stack.push((nx, ny));
                    }
                }
            }
        }

        if area >= min_area {
            blobs.push(Blob {
                label,
                area,
                min_x: min_x as u32,
                min_y: min_y as u32,
                max_x: max_x as u32,
                max_y: max_y as u32,
            });
        }
    }

    blobs
}

/// The blob with the largest area. Ties go to the lowest label, i.e.
/// the region discovered first in row-major scan order.
pub fn largest_blob(blobs: &[Blob]) -> Option<&Blob> {
    blobs.iter().reduce(|best, b| {
        if b.area > best.area {
            b
        } else {
            best
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_with_rect(w: u32, h: u32, rects: &[(u32, u32, u32, u32)]) -> MotionMask {
        let mut mask = MotionMask::new(w, h);
        for &(x0, y0, rw, rh) in rects {
            for y in y0..y0 + rh {
                for x in x0..x0 + rw {
                    mask.set(x, y, 255);
                }
            }
        }
        mask
    }

    #[test]
    fn test_empty_mask_has_no_blobs() {
        assert!(find_blobs(&MotionMask::new(16, 16), 1).is_empty());
        assert!(largest_blob(&[]).is_none());
    }

    #[test]
    fn test_single_rect_area_and_bbox() {
        let mask = mask_with_rect(20, 20, &[(4, 6, 5, 3)]);
        let blobs = find_blobs(&mask, 1);
        assert_eq!(blobs.len(), 1);
        let blob = &blobs[0];
        assert_eq!(blob.area, 15);
        assert_eq!((blob.min_x, blob.min_y, blob.max_x, blob.max_y), (4, 6, 8, 8));
        assert_eq!(blob.bbox_center(), (6.0, 7.0));
        assert_eq!(blob.bbox_width(), 5);
        assert_eq!(blob.bbox_height(), 3);
    }

    #[test]
    fn test_diagonal_pixels_connect() {
        let mut mask = MotionMask::new(8, 8);
        mask.set(1, 1, 255);
        mask.set(2, 2, 255);
        mask.set(3, 3, 255);
        let blobs = find_blobs(&mask, 1);
        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs[0].area, 3);
    }

    #[test]
    fn test_separate_regions_get_separate_labels() {
        let mask = mask_with_rect(20, 20, &[(1, 1, 2, 2), (10, 10, 3, 3)]);
        let blobs = find_blobs(&mask, 1);
        assert_eq!(blobs.len(), 2);
        assert_eq!(blobs[0].label, 0);
        assert_eq!(blobs[1].label, 1);
    }

    #[test]
    fn test_largest_wins_regardless_of_order() {
        // Area 10 first in scan order, area 50 second
        let mask = mask_with_rect(40, 20, &[(1, 1, 5, 2), (10, 5, 10, 5)]);
        let blobs = find_blobs(&mask, 1);
        assert_eq!(blobs.len(), 2);
        assert_eq!(blobs[0].area, 10);
        assert_eq!(blobs[1].area, 50);
        assert_eq!(largest_blob(&blobs).unwrap().area, 50);

        // Same shapes, discovery order flipped
        let mask = mask_with_rect(40, 20, &[(10, 1, 10, 5), (1, 10, 5, 2)]);
        let blobs = find_blobs(&mask, 1);
        assert_eq!(largest_blob(&blobs).unwrap().area, 50);
    }

    #[test]
    fn test_area_tie_goes_to_scan_order() {
        let mask = mask_with_rect(20, 20, &[(1, 1, 2, 2), (10, 10, 2, 2)]);
        let blobs = find_blobs(&mask, 1);
        assert_eq!(blobs[0].area, blobs[1].area);
        assert_eq!(largest_blob(&blobs).unwrap().label, 0);
    }

    #[test]
    fn test_min_area_filters_specks() {
        let mask = mask_with_rect(20, 20, &[(1, 1, 1, 1), (10, 10, 4, 4)]);
        let blobs = find_blobs(&mask, 4);
        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs[0].area, 16);
    }
}
