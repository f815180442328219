//! 2D vector value type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// An immutable 2D point / displacement in machine millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `angle` (radians, counter-clockwise from +X).
    pub fn from_angle(angle: f64) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    /// Magnitude of the vector.
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance_to(&self, other: &Vector2) -> f64 {
        (*other - *self).length()
    }

    pub fn distance_squared_to(&self, other: &Vector2) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Direction of travel from `self` to `other` in radians, in `(-π, π]`.
    pub fn angle_to(&self, other: &Vector2) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Point reached by travelling a signed `distance` along `angle` from `self`.
    ///
    /// A negative distance moves backwards along the heading, which is how the
    /// precut offset places the blade behind a corner.
    pub fn line_extension(&self, angle: f64, distance: f64) -> Vector2 {
        *self + Self::from_angle(angle) * distance
    }

    pub fn dot(&self, other: &Vector2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Linear interpolation, `t = 0` yields `self`.
    pub fn lerp(&self, other: &Vector2, t: f64) -> Vector2 {
        *self + (*other - *self) * t
    }

    /// True when both components are within `eps` of `other`.
    pub fn approx_eq(&self, other: &Vector2, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

impl From<(f64, f64)> for Vector2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_arithmetic() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(3.0, -1.0);
        assert_eq!(a + b, Vector2::new(4.0, 1.0));
        assert_eq!(a - b, Vector2::new(-2.0, 3.0));
        assert_eq!(a * 2.0, Vector2::new(2.0, 4.0));
        assert_eq!(-a, Vector2::new(-1.0, -2.0));
        assert_eq!(Vector2::new(3.0, 4.0).length(), 5.0);
    }

    #[test]
    fn test_line_extension_forward_and_back() {
        let corner = Vector2::new(10.0, 0.0);

        let over = corner.line_extension(0.0, 0.3);
        assert!(over.approx_eq(&Vector2::new(10.3, 0.0), 1e-12));

        let pre = corner.line_extension(FRAC_PI_2, -0.75);
        assert!(pre.approx_eq(&Vector2::new(10.0, -0.75), 1e-12));
    }

    #[test]
    fn test_angle_to() {
        let o = Vector2::ZERO;
        assert_eq!(o.angle_to(&Vector2::new(1.0, 0.0)), 0.0);
        assert!((o.angle_to(&Vector2::new(0.0, 5.0)) - FRAC_PI_2).abs() < 1e-12);
    }
}
