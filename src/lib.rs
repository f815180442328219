//! # dragcut
//!
//! Compiles vector artwork into G-Code for a cutting plotter with trailing
//! drag-knife blades on rotary axes.
//!
//! ## Architecture
//!
//! dragcut is organized as a workspace with multiple crates:
//!
//! 1. **dragcut-core** - Geometry model: vectors, curves, segment chains, bounds
//! 2. **dragcut-toolpath** - Flattening, sequencing, blade compensation, G-Code output
//! 3. **dragcut-settings** - Job configuration files (TOML/JSON)
//! 4. **dragcut** - Command line front end that ties the crates together
//!
//! ## Features
//!
//! - **Adaptive Flattening**: lines, quadratic/cubic Beziers and elliptical arcs
//! - **Travel Reduction**: nearest-neighbour ordering of strokes
//! - **Blade Control**: heading tracking, in-cut rotation, overcut and precut at hard corners
//! - **Multiple Heads**: per-tool axes and mounting offsets in one coordinate frame
//! - **Jobs**: roles, passes, header and footer, origin alignment

pub mod input;
pub mod output;
pub mod pipeline;

pub use dragcut_core::{Bounds, Curve, Label, LineSegment, SegmentChain, Vector2};
pub use dragcut_settings::{JobConfig, RoleConfig, SettingsError, ToolSettings};
pub use dragcut_toolpath::{
    CompileError, CompilerSettings, CutJob, Diagnostic, DiagnosticKind, MotionHistory, Program,
    ProgramBuilder, RoleInput, RoleSettings, ToolProfile,
};
pub use input::{CurveFile, RoleCurves};
pub use output::{next_output_path, write_program};
pub use pipeline::{compile, CompileOptions};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr so stdout stays free for instruction text
/// - RUST_LOG environment variable support, `info` when unset
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
