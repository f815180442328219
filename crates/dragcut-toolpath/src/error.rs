//! Error types for the toolpath crate.
//!
//! Fatal conditions are [`CompileError`]s and abort the run. Recoverable
//! geometry anomalies never become errors: they are recorded as
//! [`Diagnostic`]s, logged, and the offending geometry is skipped.

use dragcut_core::GeometryError;
use std::fmt;
use thiserror::Error;

/// Errors that abort a compilation run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    /// A motion command was requested before any feed rate was established.
    #[error("Undefined feed rate: set a feed rate before issuing motion commands")]
    UndefinedFeedRate,

    /// A role referenced a tool index with no profile.
    #[error("No tool profile for tool {0}")]
    UnknownTool(usize),

    /// Compiler or role settings that cannot produce sane motion.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

/// Result type alias for compilation.
pub type CompileResult<T> = Result<T, CompileError>;

/// Kind of a recoverable anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// An empty or non-contiguous chain reached the compiler and was skipped.
    MalformedChain,
    /// A zero-length curve was flattened into an empty chain.
    DegenerateCurve,
    /// Adaptive subdivision hit its depth cap before meeting the tolerance.
    ToleranceExceeded,
    /// A label was found but no renderer was available.
    LabelSkipped,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedChain => write!(f, "malformed chain"),
            Self::DegenerateCurve => write!(f, "degenerate curve"),
            Self::ToleranceExceeded => write!(f, "tolerance exceeded"),
            Self::LabelSkipped => write!(f, "label skipped"),
        }
    }
}

/// A recoverable anomaly noticed while compiling.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Diagnostic for a chain that failed validation.
    pub fn malformed_chain(index: usize, err: &GeometryError) -> Self {
        Self::new(
            DiagnosticKind::MalformedChain,
            format!("chain {index} skipped: {err}"),
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}
