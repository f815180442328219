//! Toolpath compiler - walks segment chains and drives a machine.
//!
//! The compiler tracks the blade heading of each drag knife. A heading
//! change above the tool's `slope_max` is a hard corner: the blade cuts on
//! past the corner (overcut), lifts, turns, backs up along the new heading
//! (precut) and lowers again. Smaller changes turn the blade in the cut.

use crate::error::{CompileError, CompileResult, Diagnostic};
use crate::machine::{CompensationKind, LiftKind, MachineInterface, MotionMode, ZState};
use crate::profile::ToolProfile;
use dragcut_core::{SegmentChain, Vector2};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use tracing::{debug, trace, warn};

/// How a new blade heading relates to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationMode {
    /// Headings are raw `atan2` angles; crossing ±180° is a large delta.
    #[default]
    Absolute,
    /// Headings are unwrapped to the equivalent angle nearest the current
    /// one, so the rotary axis never turns more than half a revolution.
    Continuous,
}

impl OrientationMode {
    /// Heading the blade should be commanded to for a travel direction of `angle`.
    pub fn resolve(self, angle: f64, current: f64) -> f64 {
        match self {
            OrientationMode::Absolute => angle,
            OrientationMode::Continuous => angle + TAU * ((current - angle) / TAU).round(),
        }
    }
}

/// Settings shared by every role of a job.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilerSettings {
    /// Feed for travel moves (mm/min).
    pub movement_feed: f64,
    /// Digits after the decimal point in emitted coordinates.
    pub precision: usize,
    /// Chain starts closer than this to the current position continue
    /// without a travel move.
    pub position_tolerance: f64,
    /// Heading changes at or below this emit no rotation.
    pub angle_tolerance: f64,
    pub orientation_mode: OrientationMode,
    pub tools: Vec<ToolProfile>,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            movement_feed: 25000.0,
            precision: 3,
            position_tolerance: 1e-6,
            angle_tolerance: 1e-6,
            orientation_mode: OrientationMode::Absolute,
            tools: vec![ToolProfile::groove_knife(), ToolProfile::cut_knife()],
        }
    }
}

impl CompilerSettings {
    pub fn tool(&self, index: usize) -> CompileResult<&ToolProfile> {
        self.tools
            .iter()
            .find(|t| t.index == index)
            .ok_or(CompileError::UnknownTool(index))
    }

    pub fn validate(&self) -> CompileResult<()> {
        if !(self.movement_feed > 0.0) {
            return Err(CompileError::InvalidSettings(format!(
                "movement feed must be positive, got {}",
                self.movement_feed
            )));
        }
        if self.position_tolerance < 0.0 || self.angle_tolerance < 0.0 {
            return Err(CompileError::InvalidSettings(
                "tolerances must not be negative".to_string(),
            ));
        }
        for tool in &self.tools {
            if tool.overcut < 0.0 {
                return Err(CompileError::InvalidSettings(format!(
                    "tool {} overcut must not be negative",
                    tool.index
                )));
            }
            if tool.slope_max < 0.0 {
                return Err(CompileError::InvalidSettings(format!(
                    "tool {} slope max must not be negative",
                    tool.index
                )));
            }
        }
        Ok(())
    }
}

/// Settings of one cutting role (grooves, cuts, labels...).
#[derive(Debug, Clone, PartialEq)]
pub struct RoleSettings {
    pub name: String,
    pub tool: usize,
    pub cutting_feed: f64,
    pub chord_tolerance: f64,
    /// Overrides the tool's `slope_max` for this role.
    pub slope_max: Option<f64>,
    /// Reorder the role's strokes to reduce travel.
    pub sequence: bool,
    /// Added to every curve of the role before flattening.
    pub offset: Vector2,
}

impl Default for RoleSettings {
    fn default() -> Self {
        Self::cuts()
    }
}

impl RoleSettings {
    pub fn new(name: impl Into<String>, tool: usize) -> Self {
        Self {
            name: name.into(),
            tool,
            ..Self::cuts()
        }
    }

    /// Creasing grooves on tool 0. Grooves never need corner compensation.
    pub fn grooves() -> Self {
        Self {
            name: "Grooves".to_string(),
            tool: 0,
            cutting_feed: 5000.0,
            chord_tolerance: 0.1,
            slope_max: Some(180f64.to_radians()),
            sequence: true,
            offset: Vector2::ZERO,
        }
    }

    /// Through cuts on tool 1.
    pub fn cuts() -> Self {
        Self {
            name: "Cuts".to_string(),
            tool: 1,
            cutting_feed: 3000.0,
            chord_tolerance: 0.1,
            slope_max: Some(15f64.to_radians()),
            sequence: true,
            offset: Vector2::ZERO,
        }
    }

    pub fn with_slope_max(mut self, slope_max: Option<f64>) -> Self {
        self.slope_max = slope_max;
        self
    }

    pub fn with_offset(mut self, offset: Vector2) -> Self {
        self.offset = offset;
        self
    }
}

/// Compiles segment chains against one machine.
///
/// A compiler owns its machine for the duration of a job; roles compiled
/// one after another continue from the position and blade headings the
/// previous role left behind.
pub struct ToolpathCompiler<M: MachineInterface> {
    machine: M,
    settings: CompilerSettings,
    diagnostics: Vec<Diagnostic>,
}

impl<M: MachineInterface> ToolpathCompiler<M> {
    pub fn new(machine: M, settings: CompilerSettings) -> Self {
        Self {
            machine,
            settings,
            diagnostics: Vec::new(),
        }
    }

    pub fn machine(&self) -> &M {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut M {
        &mut self.machine
    }

    pub fn into_machine(self) -> M {
        self.machine
    }

    pub fn settings(&self) -> &CompilerSettings {
        &self.settings
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Compiles `chains` in order with `tool`, then parks the tool.
    ///
    /// Malformed chains are skipped with a diagnostic. Returns the number of
    /// chains compiled.
    pub fn compile(
        &mut self,
        chains: &[SegmentChain],
        tool: usize,
        role: &RoleSettings,
    ) -> CompileResult<usize> {
        let mut profile = self.machine.profile(tool)?.clone();
        if let Some(slope_max) = role.slope_max {
            profile.slope_max = slope_max;
        }

        let mut compiled = 0;
        for (index, chain) in chains.iter().enumerate() {
            if let Err(err) = chain.validate() {
                warn!("Role '{}': skipping chain {}: {}", role.name, index, err);
                self.diagnostics.push(Diagnostic::malformed_chain(index, &err));
                continue;
            }
            self.compile_chain(chain, &profile, role)?;
            compiled += 1;
        }

        if compiled > 0 {
            self.park(tool)?;
        }
        debug!(
            "Role '{}': compiled {} of {} chains with tool {}",
            role.name,
            compiled,
            chains.len(),
            tool
        );
        Ok(compiled)
    }

    /// Selects `tool` and raises it to its parking height.
    pub fn park(&mut self, tool: usize) -> CompileResult<()> {
        self.machine.select_tool(tool)?;
        self.machine.lift(tool, LiftKind::Park)
    }

    fn compile_chain(
        &mut self,
        chain: &SegmentChain,
        profile: &ToolProfile,
        role: &RoleSettings,
    ) -> CompileResult<()> {
        let Some(first) = chain.first() else {
            return Ok(());
        };
        let tool = profile.index;
        let entry = first.slope();

        if self.needs_travel(first.start, tool) {
            self.enter(first.start, entry, profile, role)?;
        } else {
            trace!("Continuing at {} without travel", first.start);
        }

        for segment in chain {
            if profile.is_knife() {
                self.steer(segment.end, profile)?;
            }
            self.machine.linear_move(segment.end)?;
        }
        Ok(())
    }

    fn needs_travel(&self, start: Vector2, tool: usize) -> bool {
        let state = self.machine.state();
        match state.position {
            None => true,
            Some(position) => {
                position.distance_to(&start) > self.settings.position_tolerance
                    || state.active_tool != Some(tool)
                    || state.z_state(tool) != Some(ZState::Down)
            }
        }
    }

    /// Travels to the start of a chain and engages the blade on its heading.
    fn enter(
        &mut self,
        start: Vector2,
        entry: f64,
        profile: &ToolProfile,
        role: &RoleSettings,
    ) -> CompileResult<()> {
        let tool = profile.index;
        self.machine.select_tool(tool)?;
        self.machine.lift(tool, LiftKind::Up)?;
        self.machine.set_feed(self.settings.movement_feed);
        self.machine.set_mode(MotionMode::Travel);

        if profile.is_knife() {
            let current = self.machine.state().orientation(tool);
            let heading = self.settings.orientation_mode.resolve(entry, current);
            self.machine.linear_move(start.line_extension(entry, profile.precut))?;
            self.machine.rotate_to(tool, heading)?;
        } else {
            self.machine.linear_move(start)?;
        }

        self.machine.lift(tool, LiftKind::Down)?;
        self.machine.set_feed(role.cutting_feed);
        self.machine.set_mode(MotionMode::Cutting);
        Ok(())
    }

    /// Turns the blade toward `target` before the cut to it.
    fn steer(&mut self, target: Vector2, profile: &ToolProfile) -> CompileResult<()> {
        let tool = profile.index;
        let state = self.machine.state();
        let Some(position) = state.position else {
            return Ok(());
        };
        if position.distance_to(&target) <= self.settings.position_tolerance {
            return Ok(());
        }

        let current = state.orientation(tool);
        let heading = self
            .settings
            .orientation_mode
            .resolve(position.angle_to(&target), current);
        let delta = heading - current;

        if delta.abs() > profile.slope_max {
            trace!(
                "Hard corner at {}: {:.1} deg",
                position,
                delta.to_degrees()
            );
            self.machine.compensation_move(
                position.line_extension(current, profile.overcut),
                CompensationKind::Overcut,
            )?;
            self.machine.lift(tool, LiftKind::Up)?;
            self.machine.rotate_to(tool, heading)?;
            self.machine.compensation_move(
                position.line_extension(heading, profile.precut),
                CompensationKind::Precut,
            )?;
            self.machine.lift(tool, LiftKind::Down)?;
        } else if delta.abs() > self.settings.angle_tolerance {
            self.machine.rotate_to(tool, heading)?;
        }
        Ok(())
    }
}
