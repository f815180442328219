//! Machine state and the instruction-emitting machine.
//!
//! [`MachineInterface`] is the set of primitives the compiler drives.
//! [`GcodeMachine`] implements it by applying each state change, formatting
//! the resulting [`Instruction`], buffering the line and then notifying the
//! optional [`MotionObserver`].

use crate::error::{CompileError, CompileResult};
use crate::formatter::{Formatter, Instruction, MoveNote};
use crate::history::{MotionObserver, MoveKind, MoveRecord};
use crate::profile::ToolProfile;
use dragcut_core::Vector2;
use std::collections::{BTreeMap, HashMap};
use tracing::trace;

/// Motion mode selecting fast travel (`G0`) or feed-rate cutting (`G1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionMode {
    #[default]
    Travel,
    Cutting,
}

/// Vertical state of a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZState {
    Down,
    Up,
    Parked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiftKind {
    Up,
    Down,
    Park,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompensationKind {
    Overcut,
    Precut,
}

/// Vertical state plus the commanded height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolHeight {
    pub state: ZState,
    pub height: f64,
}

/// Everything the machine has been told so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MachineState {
    /// Internal (uncorrected) XY position, `None` before the first XY move.
    pub position: Option<Vector2>,
    pub z: HashMap<usize, ToolHeight>,
    /// Blade heading per tool in radians.
    pub orientation: HashMap<usize, f64>,
    pub active_tool: Option<usize>,
    pub feed: Option<f64>,
    pub mode: MotionMode,
}

impl MachineState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blade heading of `tool`, zero until it is first rotated.
    pub fn orientation(&self, tool: usize) -> f64 {
        self.orientation.get(&tool).copied().unwrap_or(0.0)
    }

    pub fn z_state(&self, tool: usize) -> Option<ZState> {
        self.z.get(&tool).map(|h| h.state)
    }

    pub fn height(&self, tool: usize) -> f64 {
        self.z.get(&tool).map_or(0.0, |h| h.height)
    }
}

/// Primitives the toolpath compiler drives.
pub trait MachineInterface {
    fn state(&self) -> &MachineState;

    /// Profile of `tool`, or `UnknownTool`.
    fn profile(&self, tool: usize) -> CompileResult<&ToolProfile>;

    /// Feed rate used by subsequent XY motion.
    fn set_feed(&mut self, feed: f64);

    fn set_mode(&mut self, mode: MotionMode);

    /// XY move to `target` in the current motion mode.
    fn linear_move(&mut self, target: Vector2) -> CompileResult<()>;

    /// Short cutting move to `target` around a hard corner.
    fn compensation_move(&mut self, target: Vector2, kind: CompensationKind) -> CompileResult<()>;

    /// Turns the blade of `tool` to `angle` radians.
    fn rotate_to(&mut self, tool: usize, angle: f64) -> CompileResult<()>;

    fn lift(&mut self, tool: usize, kind: LiftKind) -> CompileResult<()>;

    /// Makes `tool` active; its mounting offset applies to XY output.
    fn select_tool(&mut self, tool: usize) -> CompileResult<()>;

    fn comment(&mut self, text: &str);
}

/// [`MachineInterface`] that formats G-code into a line buffer.
pub struct GcodeMachine {
    state: MachineState,
    profiles: BTreeMap<usize, ToolProfile>,
    formatter: Formatter,
    lines: Vec<String>,
    observer: Option<Box<dyn MotionObserver>>,
}

impl GcodeMachine {
    pub fn new(profiles: impl IntoIterator<Item = ToolProfile>, formatter: Formatter) -> Self {
        Self {
            state: MachineState::new(),
            profiles: profiles.into_iter().map(|p| (p.index, p)).collect(),
            formatter,
            lines: Vec::new(),
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn MotionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn set_observer(&mut self, observer: Option<Box<dyn MotionObserver>>) {
        self.observer = observer;
    }

    /// Replaces the profile with the same index.
    pub fn set_profile(&mut self, profile: ToolProfile) {
        self.profiles.insert(profile.index, profile);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Appends a verbatim line (header, footer or role text).
    pub fn push_raw(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    fn emit(&mut self, instruction: Instruction, record: Option<MoveRecord>) {
        let line = self.formatter.format(&instruction);
        trace!("{}", line);
        self.lines.push(line);
        if let (Some(observer), Some(record)) = (self.observer.as_mut(), record) {
            observer.record(&record);
        }
    }

    fn active_offset(&self) -> Vector2 {
        self.state
            .active_tool
            .and_then(|t| self.profiles.get(&t))
            .map_or(Vector2::ZERO, |p| p.mounting_offset)
    }

    fn record(&self, kind: MoveKind, tool: Option<usize>, delta: Vector2, delta_z: f64) -> MoveRecord {
        MoveRecord {
            tool,
            kind,
            position: self.state.position.unwrap_or(Vector2::ZERO),
            z: tool.map_or(0.0, |t| self.state.height(t)),
            delta,
            delta_z,
        }
    }

    fn xy_move(
        &mut self,
        mode: MotionMode,
        target: Vector2,
        note: MoveNote,
        kind: MoveKind,
    ) -> CompileResult<()> {
        let feed = self.state.feed.ok_or(CompileError::UndefinedFeedRate)?;
        // Travel from an unknown position is measured from the machine origin.
        let from = self.state.position.unwrap_or(Vector2::ZERO);
        let tool = self.state.active_tool;
        let record = self.record(kind, tool, target - from, 0.0);

        self.state.position = Some(target);
        let instruction = Instruction::Move {
            mode,
            x: Some(target.x),
            y: Some(target.y),
            offset: self.active_offset(),
            feed,
            note,
        };
        self.emit(instruction, Some(record));
        Ok(())
    }
}

impl MachineInterface for GcodeMachine {
    fn state(&self) -> &MachineState {
        &self.state
    }

    fn profile(&self, tool: usize) -> CompileResult<&ToolProfile> {
        self.profiles.get(&tool).ok_or(CompileError::UnknownTool(tool))
    }

    fn set_feed(&mut self, feed: f64) {
        self.state.feed = Some(feed);
    }

    fn set_mode(&mut self, mode: MotionMode) {
        self.state.mode = mode;
    }

    fn linear_move(&mut self, target: Vector2) -> CompileResult<()> {
        let mode = self.state.mode;
        let kind = match mode {
            MotionMode::Travel => MoveKind::Travel,
            MotionMode::Cutting => MoveKind::Cut,
        };
        self.xy_move(mode, target, MoveNote::Plain, kind)
    }

    fn compensation_move(&mut self, target: Vector2, kind: CompensationKind) -> CompileResult<()> {
        let note = match kind {
            CompensationKind::Overcut => MoveNote::Overcut,
            CompensationKind::Precut => MoveNote::Precut,
        };
        self.xy_move(MotionMode::Cutting, target, note, MoveKind::Compensation)
    }

    fn rotate_to(&mut self, tool: usize, angle: f64) -> CompileResult<()> {
        let profile = self.profile(tool)?;
        let instruction = Instruction::Rotate {
            axis: profile.rotation_axis,
            degrees: profile.axis_degrees(angle),
            feed: profile.rotation_feed,
        };

        self.state.orientation.insert(tool, angle);
        let record = self.record(MoveKind::Rotate, Some(tool), Vector2::from_angle(angle), 0.0);
        self.emit(instruction, Some(record));
        Ok(())
    }

    fn lift(&mut self, tool: usize, kind: LiftKind) -> CompileResult<()> {
        let profile = self.profile(tool)?;
        let (state, height) = match kind {
            LiftKind::Up => (ZState::Up, profile.up_height()),
            LiftKind::Down => (ZState::Down, profile.cut_height),
            LiftKind::Park => (ZState::Parked, profile.parked_height()),
        };
        let instruction = Instruction::Lift {
            axis: profile.lift_axis,
            height,
            feed: profile.lift_feed,
            kind,
        };

        let record = self.record(
            MoveKind::Lift,
            Some(tool),
            Vector2::ZERO,
            height - self.state.height(tool),
        );
        self.state.z.insert(tool, ToolHeight { state, height });
        self.emit(instruction, Some(record));
        Ok(())
    }

    fn select_tool(&mut self, tool: usize) -> CompileResult<()> {
        self.profile(tool)?;
        self.state.active_tool = Some(tool);
        self.emit(Instruction::ToolComment(tool), None);
        Ok(())
    }

    fn comment(&mut self, text: &str) {
        self.emit(Instruction::Comment(text.to_string()), None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MotionHistory;
    use dragcut_core::shared;

    fn machine() -> GcodeMachine {
        GcodeMachine::new(
            [ToolProfile::groove_knife(), ToolProfile::cut_knife()],
            Formatter::default(),
        )
    }

    #[test]
    fn test_move_without_feed_is_fatal() {
        let mut m = machine();
        let err = m.linear_move(Vector2::new(1.0, 1.0)).unwrap_err();
        assert_eq!(err, CompileError::UndefinedFeedRate);
        assert!(m.lines().is_empty());
        assert_eq!(m.state().position, None);
    }

    #[test]
    fn test_unknown_tool() {
        let mut m = machine();
        assert_eq!(m.select_tool(7).unwrap_err(), CompileError::UnknownTool(7));
        assert_eq!(m.lift(9, LiftKind::Up).unwrap_err(), CompileError::UnknownTool(9));
    }

    #[test]
    fn test_offset_applied_to_output_only() {
        let mut m = machine();
        m.select_tool(1).unwrap();
        m.set_feed(25000.0);
        m.linear_move(Vector2::new(10.0, 5.0)).unwrap();

        assert_eq!(m.state().position, Some(Vector2::new(10.0, 5.0)));
        assert_eq!(m.lines(), &[";T1", "G0 X-68.000 Y5.000 F25000;"]);
    }

    #[test]
    fn test_state_tracking() {
        let mut m = machine();
        m.lift(1, LiftKind::Up).unwrap();
        assert_eq!(m.state().z_state(1), Some(ZState::Up));
        assert_eq!(m.state().height(1), 5.5);

        m.rotate_to(1, std::f64::consts::FRAC_PI_2).unwrap();
        assert_eq!(m.state().orientation(1), std::f64::consts::FRAC_PI_2);
        assert_eq!(m.state().orientation(0), 0.0);

        m.lift(1, LiftKind::Park).unwrap();
        assert_eq!(m.state().z_state(1), Some(ZState::Parked));
        assert_eq!(
            m.lines(),
            &[
                "G1 W5.500 F7000 ; lift up",
                "G1 B90.000 F25000",
                "G1 W25.000 F7000 ; park"
            ]
        );
    }

    #[test]
    fn test_observer_sees_committed_moves() {
        let history = shared(MotionHistory::new());
        let mut m = machine().with_observer(Box::new(history.clone()));
        m.select_tool(0).unwrap();
        m.set_feed(3000.0);
        m.linear_move(Vector2::new(1.0, 0.0)).unwrap();
        m.set_mode(MotionMode::Cutting);
        m.linear_move(Vector2::new(4.0, 0.0)).unwrap();

        let history = history.borrow();
        assert_eq!(history.travel.len(), 1);
        assert_eq!(history.cut_length(0), 3.0);
    }
}
