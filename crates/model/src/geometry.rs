//! 2D geometry types.
//!
//! Coordinates are in surface pixels; the y axis points down, matching
//! both raster frames and the rendering surface.

use serde::{Deserialize, Serialize};

/// A 2D vector / point in surface pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Componentwise linear interpolation from `a` toward `b`.
    ///
    /// At fixed `t` applied every tick this is an exponential-decay
    /// filter: it never overshoots and approaches `b` asymptotically.
    pub fn lerp(a: Vec2, b: Vec2, t: f64) -> Vec2 {
        Vec2 {
            x: a.x + (b.x - a.x) * t,
            y: a.y + (b.y - a.y) * t,
        }
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Fixed geometry of the rendered eye, built from configuration once
/// at startup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EyeGeometry {
    /// Center of the eye on the rendering surface.
    pub center: Vec2,

    /// Sclera radius at full size.
    pub eye_radius: f64,

    /// Pupil radius at full size.
    pub pupil_base_radius: f64,
}

impl EyeGeometry {
    pub fn new(center: Vec2, eye_radius: f64, pupil_base_radius: f64) -> Self {
        Self {
            center,
            eye_radius,
            pupil_base_radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let a = Vec2::new(0.0, 10.0);
        let b = Vec2::new(100.0, -10.0);
        assert_eq!(Vec2::lerp(a, b, 0.0), a);
        assert_eq!(Vec2::lerp(a, b, 1.0), b);
    }

    #[test]
    fn test_lerp_midpoint() {
        let mid = Vec2::lerp(Vec2::ZERO, Vec2::new(10.0, 20.0), 0.5);
        assert!((mid.x - 5.0).abs() < 1e-12);
        assert!((mid.y - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_length() {
        assert!((Vec2::new(3.0, 4.0).length() - 5.0).abs() < 1e-12);
        assert_eq!(Vec2::ZERO.length(), 0.0);
    }

    #[test]
    fn test_ops() {
        let v = Vec2::new(1.0, 2.0) + Vec2::new(3.0, 4.0);
        assert_eq!(v, Vec2::new(4.0, 6.0));
        assert_eq!(v - Vec2::new(4.0, 6.0), Vec2::ZERO);
        assert_eq!(Vec2::new(1.0, -2.0) * 3.0, Vec2::new(3.0, -6.0));
    }
}
