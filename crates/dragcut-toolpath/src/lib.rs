//! # dragcut Toolpath
//!
//! This crate turns vector artwork into G-Code for a cutting plotter that
//! carries trailing drag-knife blades on rotary axes.
//!
//! ## Pipeline
//!
//! - **Flatten**: adaptive subdivision of curves into tolerance-bounded chords
//! - **Sequence**: greedy nearest-neighbour ordering to cut down on travel
//! - **Compile**: blade heading tracking with overcut/precut corner compensation
//! - **Format**: fixed-precision G-Code lines with per-tool mounting offsets
//!
//! ## Supporting Infrastructure
//!
//! - **Tool Profiles**: per-head axes, heights, feeds and compensation distances
//! - **Machine**: the state the compiler drives and the G-Code implementation of it
//! - **History**: optional observer of every committed instruction
//! - **Labels**: bridge to an external text renderer
//! - **Program**: whole-job assembly with roles, passes, header and footer

pub mod compiler;
pub mod error;
pub mod flatten;
pub mod formatter;
pub mod history;
pub mod label;
pub mod machine;
pub mod profile;
pub mod program;
pub mod sequence;

pub use compiler::{CompilerSettings, OrientationMode, RoleSettings, ToolpathCompiler};
pub use error::{CompileError, CompileResult, Diagnostic, DiagnosticKind};
pub use flatten::{flatten, Flattened, Flattener};
pub use formatter::{Formatter, Instruction, MoveNote};
pub use history::{MotionHistory, MotionObserver, MoveKind, MoveRecord};
pub use label::{split_labels, LabelRenderer, LabelStyle};
pub use machine::{
    CompensationKind, GcodeMachine, LiftKind, MachineInterface, MachineState, MotionMode,
    ToolHeight, ZState,
};
pub use profile::{ToolKind, ToolProfile};
pub use program::{CutJob, JobStats, Program, ProgramBuilder, RoleInput};
pub use sequence::{order, travel_distance, Endpoints};
