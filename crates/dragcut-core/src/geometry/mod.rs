//! Geometry model shared by the flattener, sequencer and compiler.
//!
//! Coordinates are millimetres in a Y-up frame with the origin at the bottom
//! left of the artwork. Angles are radians, counter-clockwise from +X.

mod bounds;
mod curve;
mod path;
mod segment;
mod vector;

pub use bounds::Bounds;
pub use curve::{Curve, Label};
pub use path::PathSegment;
pub use segment::{LineSegment, SegmentChain};
pub use vector::Vector2;
