//! Arena positions

use std::ops::{Add, Sub};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::Vector2D;

/// A position in arena coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Position vector from the origin
    pub fn to_vector(self) -> Vector2D {
        Vector2D::new(self.x, self.y)
    }

    #[inline]
    pub fn distance(self, other: Point2D) -> f64 {
        DVec2::new(self.x, self.y).distance(DVec2::new(other.x, other.y))
    }
}

impl Add<Vector2D> for Point2D {
    type Output = Point2D;

    fn add(self, v: Vector2D) -> Point2D {
        Point2D::new(self.x + v.dx, self.y + v.dy)
    }
}

/// Displacement from `rhs` to `self`
impl Sub for Point2D {
    type Output = Vector2D;

    fn sub(self, rhs: Point2D) -> Vector2D {
        Vector2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_vector_ops() {
        let p = Point2D::new(1.0, 2.0);
        let q = Point2D::new(4.0, 6.0);

        assert_eq!(q - p, Vector2D::new(3.0, 4.0));
        assert_eq!(p + (q - p), q);
        assert!((p.distance(q) - 5.0).abs() < 1e-12);
    }
}
