//! Line segments and contiguous segment chains produced by flattening.

use super::Vector2;
use crate::error::{GeometryError, GeometryResult};
use serde::{Deserialize, Serialize};

/// A straight piece of a flattened stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: Vector2,
    pub end: Vector2,
}

impl LineSegment {
    pub const fn new(start: Vector2, end: Vector2) -> Self {
        Self { start, end }
    }

    /// Tangent angle of the segment, `atan2(end - start)`.
    pub fn slope(&self) -> f64 {
        self.start.angle_to(&self.end)
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn is_degenerate(&self, eps: f64) -> bool {
        self.length() <= eps
    }

    /// Shortest distance from `p` to any point of the segment.
    pub fn distance_to_point(&self, p: &Vector2) -> f64 {
        let d = self.end - self.start;
        let len_sq = d.dot(&d);
        if len_sq <= f64::EPSILON {
            return self.start.distance_to(p);
        }
        let t = ((*p - self.start).dot(&d) / len_sq).clamp(0.0, 1.0);
        self.start.lerp(&self.end, t).distance_to(p)
    }
}

/// One continuous stroke: segment `i + 1` starts exactly where segment `i` ends.
///
/// Chains built through [`SegmentChain::push`] or [`SegmentChain::from_points`]
/// are contiguous by construction. [`SegmentChain::from_segments_unchecked`]
/// exists for chains assembled elsewhere; [`SegmentChain::validate`] reports
/// whether such a chain can be cut as one stroke.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentChain {
    segments: Vec<LineSegment>,
}

impl SegmentChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Polyline through `points`. Fewer than two points yield an empty chain.
    pub fn from_points(points: &[Vector2]) -> Self {
        let segments = points
            .windows(2)
            .map(|w| LineSegment::new(w[0], w[1]))
            .collect();
        Self { segments }
    }

    pub fn from_segments_unchecked(segments: Vec<LineSegment>) -> Self {
        Self { segments }
    }

    /// Appends a segment, rejecting it unless it starts at the current end.
    pub fn push(&mut self, segment: LineSegment) -> GeometryResult<()> {
        if let Some(last) = self.segments.last() {
            if last.end != segment.start {
                return Err(GeometryError::NonContiguous {
                    index: self.segments.len(),
                });
            }
        }
        self.segments.push(segment);
        Ok(())
    }

    /// Checks that the chain is non-empty and contiguous.
    pub fn validate(&self) -> GeometryResult<()> {
        if self.segments.is_empty() {
            return Err(GeometryError::EmptyChain);
        }
        for (i, pair) in self.segments.windows(2).enumerate() {
            if pair[0].end != pair[1].start {
                return Err(GeometryError::NonContiguous { index: i + 1 });
            }
        }
        Ok(())
    }

    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LineSegment> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn first(&self) -> Option<&LineSegment> {
        self.segments.first()
    }

    pub fn start(&self) -> Option<Vector2> {
        self.segments.first().map(|s| s.start)
    }

    pub fn end(&self) -> Option<Vector2> {
        self.segments.last().map(|s| s.end)
    }

    /// Total cut length of the chain.
    pub fn length(&self) -> f64 {
        self.segments.iter().map(LineSegment::length).sum()
    }

    pub fn translated(&self, offset: Vector2) -> SegmentChain {
        Self {
            segments: self
                .segments
                .iter()
                .map(|s| LineSegment::new(s.start + offset, s.end + offset))
                .collect(),
        }
    }

    /// Shortest distance from `p` to the chain, `None` for an empty chain.
    pub fn distance_to_point(&self, p: &Vector2) -> Option<f64> {
        self.segments
            .iter()
            .map(|s| s.distance_to_point(p))
            .min_by(|a, b| a.total_cmp(b))
    }
}

impl<'a> IntoIterator for &'a SegmentChain {
    type Item = &'a LineSegment;
    type IntoIter = std::slice::Iter<'a, LineSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
