//! Error handling for dragcut
//!
//! Geometry errors: malformed segment chains.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Represents anomalies in the segment model. These are recoverable:
/// the compiler skips the offending geometry and records a diagnostic.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A segment chain with no segments
    #[error("Segment chain is empty")]
    EmptyChain,

    /// A segment does not start where the previous one ended
    #[error("Segment chain is not contiguous at segment {index}")]
    NonContiguous {
        /// Index of the first segment that breaks contiguity.
        index: usize,
    },
}

/// Result type for geometry operations
pub type GeometryResult<T> = std::result::Result<T, GeometryError>;
