//! Curves as `lyon` segments.
//!
//! Evaluation, splitting and extents of the non-label curve variants are
//! delegated to `lyon::geom`, in `f64`.

use super::Vector2;
use lyon::geom::{self, point, vector, Arc, CubicBezierSegment, QuadraticBezierSegment};

pub type Point = geom::Point<f64>;

impl From<Vector2> for Point {
    fn from(v: Vector2) -> Self {
        point(v.x, v.y)
    }
}

impl From<Point> for Vector2 {
    fn from(p: Point) -> Self {
        Vector2::new(p.x, p.y)
    }
}

/// One drawable piece of a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    Line(geom::LineSegment<f64>),
    Quadratic(QuadraticBezierSegment<f64>),
    Cubic(CubicBezierSegment<f64>),
    Arc(Arc<f64>),
}

impl PathSegment {
    pub fn from(&self) -> Vector2 {
        match self {
            PathSegment::Line(s) => s.from.into(),
            PathSegment::Quadratic(s) => s.from.into(),
            PathSegment::Cubic(s) => s.from.into(),
            PathSegment::Arc(a) => a.from().into(),
        }
    }

    pub fn to(&self) -> Vector2 {
        match self {
            PathSegment::Line(s) => s.to.into(),
            PathSegment::Quadratic(s) => s.to.into(),
            PathSegment::Cubic(s) => s.to.into(),
            PathSegment::Arc(a) => a.to().into(),
        }
    }

    pub fn sample(&self, t: f64) -> Vector2 {
        match self {
            PathSegment::Line(s) => s.sample(t).into(),
            PathSegment::Quadratic(s) => s.sample(t).into(),
            PathSegment::Cubic(s) => s.sample(t).into(),
            PathSegment::Arc(a) => a.sample(t).into(),
        }
    }

    /// First derivative with respect to `t`.
    pub fn derivative(&self, t: f64) -> Vector2 {
        let d = match self {
            PathSegment::Line(s) => s.to_vector(),
            PathSegment::Quadratic(s) => s.derivative(t),
            PathSegment::Cubic(s) => s.derivative(t),
            PathSegment::Arc(a) => {
                let theta = a.start_angle.radians + a.sweep_angle.radians * t;
                let (sin, cos) = theta.sin_cos();
                let (rot_sin, rot_cos) = a.x_rotation.radians.sin_cos();
                let local = vector(-a.radii.x * sin, a.radii.y * cos) * a.sweep_angle.radians;
                vector(
                    local.x * rot_cos - local.y * rot_sin,
                    local.x * rot_sin + local.y * rot_cos,
                )
            }
        };
        Vector2::new(d.x, d.y)
    }

    /// Splits at parameter `t`. The halves share the split point exactly.
    pub fn split(&self, t: f64) -> (PathSegment, PathSegment) {
        match self {
            PathSegment::Line(s) => {
                let (a, b) = s.split(t);
                (PathSegment::Line(a), PathSegment::Line(b))
            }
            PathSegment::Quadratic(s) => {
                let (a, b) = s.split(t);
                (PathSegment::Quadratic(a), PathSegment::Quadratic(b))
            }
            PathSegment::Cubic(s) => {
                let (a, b) = s.split(t);
                (PathSegment::Cubic(a), PathSegment::Cubic(b))
            }
            PathSegment::Arc(arc) => {
                let (a, b) = arc.split(t);
                (PathSegment::Arc(a), PathSegment::Arc(b))
            }
        }
    }

    /// Tight axis-aligned box as `(min, max)`.
    pub fn bounding_box(&self) -> (Vector2, Vector2) {
        let b = match self {
            PathSegment::Line(s) => s.bounding_box(),
            PathSegment::Quadratic(s) => s.bounding_box(),
            PathSegment::Cubic(s) => s.bounding_box(),
            PathSegment::Arc(a) => a.bounding_box(),
        };
        (b.min.into(), b.max.into())
    }
}
