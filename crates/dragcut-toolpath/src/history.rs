//! Motion observers - an optional record of every committed instruction.
//!
//! The record feeds external plotting of travel and cut paths. Observing a
//! machine never changes the instructions it emits.

use dragcut_core::{Shared, Vector2};
use std::collections::BTreeMap;

/// What a committed instruction did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Travel,
    Cut,
    Compensation,
    Lift,
    Rotate,
}

/// One committed instruction as seen by an observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveRecord {
    pub tool: Option<usize>,
    pub kind: MoveKind,
    /// Internal XY position before the instruction.
    pub position: Vector2,
    /// Height of the tool's lift axis before the instruction.
    pub z: f64,
    /// XY displacement, or the blade heading for rotations.
    pub delta: Vector2,
    pub delta_z: f64,
}

/// Receives every instruction a machine commits, after it is committed.
pub trait MotionObserver {
    fn record(&mut self, record: &MoveRecord);
}

impl<T: MotionObserver + ?Sized> MotionObserver for Shared<T> {
    fn record(&mut self, record: &MoveRecord) {
        self.borrow_mut().record(record);
    }
}

/// Travel, per-tool cut and orientation history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MotionHistory {
    pub travel: Vec<MoveRecord>,
    pub cuts: BTreeMap<usize, Vec<MoveRecord>>,
    pub orientation: Vec<MoveRecord>,
}

impl MotionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.travel.len() + self.cuts.values().map(Vec::len).sum::<usize>() + self.orientation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Summed XY length of travel records.
    pub fn travel_length(&self) -> f64 {
        self.travel.iter().map(|r| r.delta.length()).sum()
    }

    /// Summed XY length of cut and compensation records of `tool`.
    pub fn cut_length(&self, tool: usize) -> f64 {
        self.cuts
            .get(&tool)
            .map_or(0.0, |records| records.iter().map(|r| r.delta.length()).sum())
    }
}

impl MotionObserver for MotionHistory {
    fn record(&mut self, record: &MoveRecord) {
        match (record.kind, record.tool) {
            (MoveKind::Rotate, _) => self.orientation.push(*record),
            (MoveKind::Cut | MoveKind::Compensation, Some(tool)) => {
                self.cuts.entry(tool).or_default().push(*record)
            }
            _ => self.travel.push(*record),
        }
    }
}
