//! Adaptive curve flattening.
//!
//! Curves are approximated by chords through adaptive bisection of their
//! `lyon` segments. A piece is accepted once an upper bound of its distance
//! from its chord is within the chord tolerance:
//!
//! - Beziers lie in the convex hull of their control points, so the farthest
//!   control point from the chord bounds the curve.
//! - Elliptical arcs are bounded by the sagitta of a circle with the larger
//!   radius over the same sweep.

use crate::error::{Diagnostic, DiagnosticKind};
use dragcut_core::{Curve, LineSegment, PathSegment, SegmentChain, Vector2};
use std::f64::consts::PI;
use tracing::{trace, warn};

/// Lengths at or below this are treated as zero.
const DEGENERATE_EPSILON: f64 = 1e-9;

/// Output of flattening one curve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flattened {
    pub chain: SegmentChain,
    pub diagnostics: Vec<Diagnostic>,
}

/// Configurable curve flattener.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flattener {
    /// Maximum allowed deviation of the curve from its chords (mm).
    pub tolerance: f64,
    /// Intervals shorter than this are never split further (mm).
    pub min_segment_length: f64,
    /// Bisection depth cap.
    pub max_depth: u32,
}

impl Default for Flattener {
    fn default() -> Self {
        Self {
            tolerance: 0.05,
            min_segment_length: 1e-3,
            max_depth: 16,
        }
    }
}

impl Flattener {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    /// Flattens `curve` into a contiguous chain.
    ///
    /// Labels and zero-length curves produce an empty chain and a
    /// `DegenerateCurve` diagnostic.
    pub fn flatten(&self, curve: &Curve) -> Flattened {
        if let Curve::Label(label) = curve {
            return Self::degenerate(format!("label '{}' has no cuttable geometry", label.text));
        }
        if curve.is_degenerate(DEGENERATE_EPSILON) {
            return Self::degenerate(format!("zero-length curve starting at {}", curve.start()));
        }

        let segment = match curve.segment() {
            Some(PathSegment::Line(line)) => {
                return Flattened {
                    chain: SegmentChain::from_points(&[line.from.into(), line.to.into()]),
                    diagnostics: Vec::new(),
                };
            }
            Some(segment) => segment,
            None => return Self::degenerate("curve has no segment form".to_string()),
        };

        let mut walk = Walk {
            flattener: self,
            points: vec![curve.start()],
            overflowed: 0,
        };

        // Two initial halves keep closed curves from collapsing onto a
        // zero-length chord.
        let (first, second) = segment.split(0.5);
        walk.subdivide(&first, 1);
        walk.subdivide(&second, 1);

        let mut diagnostics = Vec::new();
        if walk.overflowed > 0 {
            let message = format!(
                "{} piece(s) could not be flattened to tolerance {} within depth {}",
                walk.overflowed, self.tolerance, self.max_depth
            );
            warn!("{}", message);
            diagnostics.push(Diagnostic::new(DiagnosticKind::ToleranceExceeded, message));
        }

        let chain = SegmentChain::from_points(&walk.points);
        trace!("Flattened curve into {} segments", chain.len());

        Flattened { chain, diagnostics }
    }

    fn degenerate(message: String) -> Flattened {
        warn!("Skipping degenerate curve: {}", message);
        Flattened {
            chain: SegmentChain::new(),
            diagnostics: vec![Diagnostic::new(DiagnosticKind::DegenerateCurve, message)],
        }
    }
}

/// Flattens `curve` with the default limits and the given chord tolerance.
pub fn flatten(curve: &Curve, tolerance: f64) -> SegmentChain {
    Flattener::new(tolerance).flatten(curve).chain
}

struct Walk<'a> {
    flattener: &'a Flattener,
    points: Vec<Vector2>,
    overflowed: usize,
}

impl Walk<'_> {
    fn subdivide(&mut self, piece: &PathSegment, depth: u32) {
        let tolerance = self.flattener.tolerance;
        if deviation_bound(piece) <= tolerance {
            self.accept(piece.to());
            return;
        }

        if depth >= self.flattener.max_depth || extent(piece) < self.flattener.min_segment_length {
            self.overflowed += 1;
            self.accept(piece.to());
            return;
        }

        let (first, second) = piece.split(0.5);
        self.subdivide(&first, depth + 1);
        self.subdivide(&second, depth + 1);
    }

    fn accept(&mut self, p: Vector2) {
        // Coincident points (cusps) would produce zero-length segments with
        // a meaningless slope.
        if let Some(last) = self.points.last() {
            if last.distance_to(&p) <= DEGENERATE_EPSILON {
                return;
            }
        }
        self.points.push(p);
    }
}

/// Upper bound of the distance between `piece` and its chord.
fn deviation_bound(piece: &PathSegment) -> f64 {
    let chord = LineSegment::new(piece.from(), piece.to());
    let farthest = |points: &[Vector2]| {
        points
            .iter()
            .map(|p| chord.distance_to_point(p))
            .fold(0.0_f64, f64::max)
    };

    match piece {
        PathSegment::Line(_) => 0.0,
        PathSegment::Quadratic(q) => farthest(&[q.ctrl.into()]),
        PathSegment::Cubic(c) => farthest(&[c.ctrl1.into(), c.ctrl2.into()]),
        PathSegment::Arc(arc) => {
            let sweep = arc.sweep_angle.radians.abs();
            if sweep > PI {
                return f64::INFINITY;
            }
            let radius = arc.radii.x.abs().max(arc.radii.y.abs());
            radius * (1.0 - (0.5 * sweep).cos())
        }
    }
}

/// Upper bound of the size of `piece`, measured from its start.
fn extent(piece: &PathSegment) -> f64 {
    let from = piece.from();
    let reach = |points: &[Vector2]| {
        points
            .iter()
            .map(|p| from.distance_to(p))
            .fold(0.0_f64, f64::max)
    };

    match piece {
        PathSegment::Line(_) => from.distance_to(&piece.to()),
        PathSegment::Quadratic(q) => reach(&[q.ctrl.into(), q.to.into()]),
        PathSegment::Cubic(c) => reach(&[c.ctrl1.into(), c.ctrl2.into(), c.to.into()]),
        PathSegment::Arc(arc) => {
            arc.radii.x.abs().max(arc.radii.y.abs()) * arc.sweep_angle.radians.abs()
        }
    }
}
