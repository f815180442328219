//! # dragcut Core
//!
//! Geometry model and shared types for dragcut.
//! Provides the curve abstraction handed over by the import layer, the
//! vector type the compiler reasons in, and the segment chains produced by
//! flattening.

pub mod error;
pub mod geometry;
pub mod types;

pub use error::{GeometryError, GeometryResult};

pub use geometry::{Bounds, Curve, Label, LineSegment, PathSegment, SegmentChain, Vector2};

pub use types::{shared, Shared};
