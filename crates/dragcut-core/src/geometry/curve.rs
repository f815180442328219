//! Parametric curves handed over by the vector import layer.
//!
//! Every curve is parameterised over `t ∈ [0, 1]`. The set of variants is
//! closed: the flattener and compiler match on it exhaustively.

use super::{Bounds, PathSegment, Vector2};
use lyon::geom::{self, Arc, CubicBezierSegment, QuadraticBezierSegment};
use serde::{Deserialize, Serialize};

/// Number of chords used when a length or bounds query has to sample a curve.
const SAMPLE_COUNT: usize = 64;

/// A text marker placed in the artwork. It has no cuttable geometry and is
/// rendered into pen strokes by a label renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Baseline insertion point.
    pub position: Vector2,
    /// Baseline direction in radians.
    #[serde(default)]
    pub angle: f64,
    pub text: String,
}

impl Label {
    pub fn new(position: Vector2, angle: f64, text: impl Into<String>) -> Self {
        Self {
            position,
            angle,
            text: text.into(),
        }
    }
}

/// A curve of the source artwork.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Curve {
    Line {
        start: Vector2,
        end: Vector2,
    },
    QuadraticBezier {
        start: Vector2,
        control: Vector2,
        end: Vector2,
    },
    CubicBezier {
        start: Vector2,
        control1: Vector2,
        control2: Vector2,
        end: Vector2,
    },
    /// Elliptical arc in centre parameterisation. `rotation`, `start_angle`
    /// and `sweep` are radians; a positive sweep runs counter-clockwise.
    Arc {
        center: Vector2,
        radius_x: f64,
        radius_y: f64,
        #[serde(default)]
        rotation: f64,
        start_angle: f64,
        sweep: f64,
    },
    Label(Label),
}

impl Curve {
    pub fn line(start: Vector2, end: Vector2) -> Self {
        Curve::Line { start, end }
    }

    pub fn quadratic(start: Vector2, control: Vector2, end: Vector2) -> Self {
        Curve::QuadraticBezier {
            start,
            control,
            end,
        }
    }

    pub fn cubic(start: Vector2, control1: Vector2, control2: Vector2, end: Vector2) -> Self {
        Curve::CubicBezier {
            start,
            control1,
            control2,
            end,
        }
    }

    /// Circular arc around `center`.
    pub fn circular_arc(center: Vector2, radius: f64, start_angle: f64, sweep: f64) -> Self {
        Curve::Arc {
            center,
            radius_x: radius,
            radius_y: radius,
            rotation: 0.0,
            start_angle,
            sweep,
        }
    }

    pub fn label(position: Vector2, angle: f64, text: impl Into<String>) -> Self {
        Curve::Label(Label::new(position, angle, text))
    }

    /// The curve as a `lyon` segment, `None` for labels.
    pub fn segment(&self) -> Option<PathSegment> {
        let segment = match *self {
            Curve::Line { start, end } => PathSegment::Line(geom::LineSegment {
                from: start.into(),
                to: end.into(),
            }),
            Curve::QuadraticBezier {
                start,
                control,
                end,
            } => PathSegment::Quadratic(QuadraticBezierSegment {
                from: start.into(),
                ctrl: control.into(),
                to: end.into(),
            }),
            Curve::CubicBezier {
                start,
                control1,
                control2,
                end,
            } => PathSegment::Cubic(CubicBezierSegment {
                from: start.into(),
                ctrl1: control1.into(),
                ctrl2: control2.into(),
                to: end.into(),
            }),
            Curve::Arc {
                center,
                radius_x,
                radius_y,
                rotation,
                start_angle,
                sweep,
            } => PathSegment::Arc(Arc {
                center: center.into(),
                radii: geom::vector(radius_x, radius_y),
                start_angle: geom::Angle::radians(start_angle),
                sweep_angle: geom::Angle::radians(sweep),
                x_rotation: geom::Angle::radians(rotation),
            }),
            Curve::Label(_) => return None,
        };
        Some(segment)
    }

    /// Position on the curve at parameter `t`.
    pub fn point(&self, t: f64) -> Vector2 {
        match self {
            Curve::Label(label) => label.position,
            _ => self.segment().map_or(Vector2::ZERO, |s| s.sample(t)),
        }
    }

    /// Tangent vector (first derivative with respect to `t`).
    pub fn tangent(&self, t: f64) -> Vector2 {
        self.segment().map_or(Vector2::ZERO, |s| s.derivative(t))
    }

    /// Tangent angle (direction of travel) at `t`, in radians.
    ///
    /// Bezier tangents vanish where a control point sits on an end point; the
    /// direction is then taken from a short secant instead.
    pub fn derivative(&self, t: f64) -> f64 {
        if let Curve::Label(label) = self {
            return label.angle;
        }

        let tangent = self.tangent(t);
        if tangent.length() > 1e-12 {
            return tangent.y.atan2(tangent.x);
        }

        let h = 1e-4;
        let (a, b) = if t + h <= 1.0 { (t, t + h) } else { (t - h, t) };
        self.point(a).angle_to(&self.point(b))
    }

    /// Arc length. Exact for lines, sampled for the other variants, zero for labels.
    pub fn length(&self) -> f64 {
        match self {
            Curve::Line { start, end } => start.distance_to(end),
            Curve::Label(_) => 0.0,
            _ => self
                .sample(SAMPLE_COUNT)
                .windows(2)
                .map(|w| w[0].distance_to(&w[1]))
                .sum(),
        }
    }

    /// Axis-aligned extent of the curve.
    pub fn bounds(&self) -> Bounds {
        Bounds::of_curve(self)
    }

    pub fn start(&self) -> Vector2 {
        self.point(0.0)
    }

    pub fn end(&self) -> Vector2 {
        self.point(1.0)
    }

    /// `count + 1` evenly spaced parameter samples, end points included.
    pub fn sample(&self, count: usize) -> Vec<Vector2> {
        let count = count.max(1);
        (0..=count)
            .map(|i| self.point(i as f64 / count as f64))
            .collect()
    }

    /// True when the curve has no cuttable length (within `eps`).
    pub fn is_degenerate(&self, eps: f64) -> bool {
        match self {
            Curve::Line { start, end } => start.distance_to(end) <= eps,
            Curve::QuadraticBezier {
                start,
                control,
                end,
            } => start.distance_to(control) <= eps && start.distance_to(end) <= eps,
            Curve::CubicBezier {
                start,
                control1,
                control2,
                end,
            } => {
                start.distance_to(control1) <= eps
                    && start.distance_to(control2) <= eps
                    && start.distance_to(end) <= eps
            }
            Curve::Arc {
                radius_x,
                radius_y,
                sweep,
                ..
            } => radius_x.abs() <= eps || radius_y.abs() <= eps || sweep.abs() <= f64::EPSILON,
            Curve::Label(_) => true,
        }
    }

    /// Copy of the curve shifted by `offset`.
    pub fn translated(&self, offset: Vector2) -> Curve {
        match self.clone() {
            Curve::Line { start, end } => Curve::Line {
                start: start + offset,
                end: end + offset,
            },
            Curve::QuadraticBezier {
                start,
                control,
                end,
            } => Curve::QuadraticBezier {
                start: start + offset,
                control: control + offset,
                end: end + offset,
            },
            Curve::CubicBezier {
                start,
                control1,
                control2,
                end,
            } => Curve::CubicBezier {
                start: start + offset,
                control1: control1 + offset,
                control2: control2 + offset,
                end: end + offset,
            },
            Curve::Arc {
                center,
                radius_x,
                radius_y,
                rotation,
                start_angle,
                sweep,
            } => Curve::Arc {
                center: center + offset,
                radius_x,
                radius_y,
                rotation,
                start_angle,
                sweep,
            },
            Curve::Label(mut label) => {
                label.position = label.position + offset;
                Curve::Label(label)
            }
        }
    }

    /// Copy of the curve scaled about the origin.
    ///
    /// Arcs scale exactly when unrotated or scaled uniformly; a rotated arc
    /// under non-uniform scale keeps its rotation and scales its radii.
    pub fn scaled(&self, sx: f64, sy: f64) -> Curve {
        let s = |p: Vector2| Vector2::new(p.x * sx, p.y * sy);
        match self.clone() {
            Curve::Line { start, end } => Curve::Line {
                start: s(start),
                end: s(end),
            },
            Curve::QuadraticBezier {
                start,
                control,
                end,
            } => Curve::QuadraticBezier {
                start: s(start),
                control: s(control),
                end: s(end),
            },
            Curve::CubicBezier {
                start,
                control1,
                control2,
                end,
            } => Curve::CubicBezier {
                start: s(start),
                control1: s(control1),
                control2: s(control2),
                end: s(end),
            },
            Curve::Arc {
                center,
                radius_x,
                radius_y,
                rotation,
                start_angle,
                sweep,
            } => Curve::Arc {
                center: s(center),
                radius_x: radius_x * sx,
                radius_y: radius_y * sy,
                rotation,
                start_angle,
                sweep,
            },
            Curve::Label(mut label) => {
                label.position = s(label.position);
                Curve::Label(label)
            }
        }
    }
}
