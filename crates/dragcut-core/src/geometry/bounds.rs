//! Axis-aligned extents of artwork, used to align a job to the machine origin.

use super::{Curve, SegmentChain, Vector2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vector2,
    pub max: Vector2,
}

impl Bounds {
    pub fn from_point(p: Vector2) -> Self {
        Self { min: p, max: p }
    }

    pub fn include(&mut self, p: Vector2) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        let mut out = *self;
        out.include(other.min);
        out.include(other.max);
        out
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Extent of a single curve. Labels contribute their insertion point.
    pub fn of_curve(curve: &Curve) -> Bounds {
        match curve.segment() {
            Some(segment) => {
                let (min, max) = segment.bounding_box();
                Bounds { min, max }
            }
            None => Bounds::from_point(curve.start()),
        }
    }

    /// Extent of a set of curves, `None` when the set is empty.
    pub fn of_curves<'a, I>(curves: I) -> Option<Bounds>
    where
        I: IntoIterator<Item = &'a Curve>,
    {
        curves
            .into_iter()
            .map(Bounds::of_curve)
            .reduce(|a, b| a.union(&b))
    }

    pub fn of_chain(chain: &SegmentChain) -> Option<Bounds> {
        let mut iter = chain.iter();
        let first = iter.next()?;
        let mut b = Bounds::from_point(first.start);
        b.include(first.end);
        for seg in iter {
            b.include(seg.end);
        }
        Some(b)
    }
}
