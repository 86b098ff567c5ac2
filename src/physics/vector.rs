//! Displacement/velocity vectors
//!
//! Plain `f64` arithmetic; no rounding or clamping is ever applied.

use std::ops::{Add, Div, Mul, Neg, Sub};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::Point2D;
use crate::error::VectorError;

/// A 2D vector `(dx, dy)`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2D {
    pub dx: f64,
    pub dy: f64,
}

impl Vector2D {
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Euclidean length
    #[inline]
    pub fn magnitude(&self) -> f64 {
        DVec2::from(*self).length()
    }

    /// Direction angle in radians, in (-π, π]
    #[inline]
    pub fn radiant(&self) -> f64 {
        self.dy.atan2(self.dx)
    }

    /// Direction angle in degrees
    #[inline]
    pub fn degree(&self) -> f64 {
        self.radiant().to_degrees()
    }

    /// Same direction, length 1. Non-finite for the zero vector.
    #[inline]
    pub fn unit(&self) -> Vector2D {
        *self / self.magnitude()
    }

    /// Unit vector perpendicular to `self`.
    ///
    /// Built from the perpendicular slope `-dy/dx`, then flipped for vectors in the
    /// first and fourth quadrants so the result always points to the same
    /// rotational side. Vertical vectors have no slope and yield
    /// [`VectorError::UndefinedNormal`].
    pub fn normal(&self) -> Result<Vector2D, VectorError> {
        if self.dx == 0.0 {
            return Err(VectorError::UndefinedNormal { dy: self.dy });
        }

        let slope = -(self.dy / self.dx);
        let norm = (slope * slope + 1.0).sqrt();
        let candidate = Vector2D::new(slope / norm, 1.0 / norm);

        if self.is_in_first_quadrant() || self.is_in_fourth_quadrant() {
            Ok(-candidate)
        } else {
            Ok(candidate)
        }
    }

    pub fn is_in_first_quadrant(&self) -> bool {
        self.dx > 0.0 && self.dy > 0.0
    }

    pub fn is_in_fourth_quadrant(&self) -> bool {
        self.dx > 0.0 && self.dy < 0.0
    }

    #[inline]
    pub fn dot(&self, other: Vector2D) -> f64 {
        DVec2::from(*self).dot(other.into())
    }

    /// Length of `self` along `target`
    pub fn scalar_project(&self, target: Vector2D) -> f64 {
        self.dot(target.unit())
    }

    /// Component of `self` along `target`
    pub fn vector_project(&self, target: Vector2D) -> Vector2D {
        target.unit() * self.scalar_project(target)
    }
}

impl From<DVec2> for Vector2D {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector2D> for DVec2 {
    fn from(v: Vector2D) -> Self {
        DVec2::new(v.dx, v.dy)
    }
}

impl Add for Vector2D {
    type Output = Vector2D;

    fn add(self, rhs: Vector2D) -> Vector2D {
        Vector2D::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl Add<Point2D> for Vector2D {
    type Output = Point2D;

    fn add(self, rhs: Point2D) -> Point2D {
        Point2D::new(rhs.x + self.dx, rhs.y + self.dy)
    }
}

impl Sub for Vector2D {
    type Output = Vector2D;

    fn sub(self, rhs: Vector2D) -> Vector2D {
        Vector2D::new(self.dx - rhs.dx, self.dy - rhs.dy)
    }
}

impl Neg for Vector2D {
    type Output = Vector2D;

    fn neg(self) -> Vector2D {
        Vector2D::new(-self.dx, -self.dy)
    }
}

impl Mul<f64> for Vector2D {
    type Output = Vector2D;

    fn mul(self, scalar: f64) -> Vector2D {
        Vector2D::new(self.dx * scalar, self.dy * scalar)
    }
}

impl Mul<Vector2D> for f64 {
    type Output = Vector2D;

    fn mul(self, v: Vector2D) -> Vector2D {
        v * self
    }
}

impl Div<f64> for Vector2D {
    type Output = Vector2D;

    fn div(self, scalar: f64) -> Vector2D {
        Vector2D::new(self.dx / scalar, self.dy / scalar)
    }
}
