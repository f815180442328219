//! Instruction formatter - turns abstract instructions into G-code lines.

use crate::machine::{LiftKind, MotionMode};
use dragcut_core::Vector2;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Annotation carried by a motion line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveNote {
    Plain,
    Overcut,
    Precut,
}

/// One abstract machine instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// XY motion. Coordinates are internal; `offset` is the active tool's
    /// mounting offset and is added on output.
    Move {
        mode: MotionMode,
        x: Option<f64>,
        y: Option<f64>,
        offset: Vector2,
        feed: f64,
        note: MoveNote,
    },
    Rotate {
        axis: char,
        degrees: f64,
        feed: f64,
    },
    Lift {
        axis: char,
        height: f64,
        feed: f64,
        kind: LiftKind,
    },
    ToolComment(usize),
    Comment(String),
}

/// Fixed-precision G-code formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formatter {
    /// Digits after the decimal point for coordinates and angles.
    pub precision: usize,
}

impl Default for Formatter {
    fn default() -> Self {
        Self { precision: 3 }
    }
}

impl Formatter {
    pub fn new(precision: usize) -> Self {
        Self { precision }
    }

    pub fn format(&self, instruction: &Instruction) -> String {
        let p = self.precision;
        match instruction {
            Instruction::Move {
                mode,
                x,
                y,
                offset,
                feed,
                note,
            } => {
                debug_assert!(
                    x.is_some() || y.is_some(),
                    "motion instruction without coordinates"
                );
                let mut line = String::from(match mode {
                    MotionMode::Travel => "G0",
                    MotionMode::Cutting => "G1",
                });
                if let Some(x) = x {
                    let _ = write!(line, " X{}", fixed(x + offset.x, p));
                }
                if let Some(y) = y {
                    let _ = write!(line, " Y{}", fixed(y + offset.y, p));
                }
                let _ = write!(line, " F{:.0}", feed);
                line.push_str(match note {
                    MoveNote::Plain => ";",
                    MoveNote::Overcut => " ; overCut",
                    MoveNote::Precut => " ; preCut",
                });
                line
            }
            Instruction::Rotate {
                axis,
                degrees,
                feed,
            } => format!("G1 {}{} F{:.0}", axis, fixed(*degrees, p), feed),
            Instruction::Lift {
                axis,
                height,
                feed,
                kind,
            } => format!(
                "G1 {}{} F{:.0} ; {}",
                axis,
                fixed(*height, p),
                feed,
                match kind {
                    LiftKind::Up => "lift up",
                    LiftKind::Down => "lift down",
                    LiftKind::Park => "park",
                }
            ),
            Instruction::ToolComment(tool) => format!(";T{}", tool),
            Instruction::Comment(text) => format!("; {}", text),
        }
    }
}

/// Fixed-point rendering that never prints a negative zero.
fn fixed(value: f64, precision: usize) -> String {
    let text = format!("{:.*}", precision, value);
    match text.strip_prefix('-') {
        Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => rest.to_string(),
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cut(x: f64, y: f64, offset: Vector2, note: MoveNote) -> Instruction {
        Instruction::Move {
            mode: MotionMode::Cutting,
            x: Some(x),
            y: Some(y),
            offset,
            feed: 3000.0,
            note,
        }
    }

    #[test]
    fn test_move_lines() {
        let f = Formatter::default();
        assert_eq!(
            f.format(&cut(10.0, 0.0, Vector2::ZERO, MoveNote::Plain)),
            "G1 X10.000 Y0.000 F3000;"
        );
        assert_eq!(
            f.format(&cut(10.3, 0.0, Vector2::new(-78.0, 0.0), MoveNote::Overcut)),
            "G1 X-67.700 Y0.000 F3000 ; overCut"
        );
        assert_eq!(
            f.format(&Instruction::Move {
                mode: MotionMode::Travel,
                x: Some(1.0),
                y: None,
                offset: Vector2::ZERO,
                feed: 25000.0,
                note: MoveNote::Plain,
            }),
            "G0 X1.000 F25000;"
        );
    }

    #[test]
    fn test_axis_lines() {
        let f = Formatter::new(2);
        assert_eq!(
            f.format(&Instruction::Rotate {
                axis: 'B',
                degrees: 90.0,
                feed: 25000.0
            }),
            "G1 B90.00 F25000"
        );
        assert_eq!(
            f.format(&Instruction::Lift {
                axis: 'W',
                height: 5.5,
                feed: 7000.0,
                kind: LiftKind::Up
            }),
            "G1 W5.50 F7000 ; lift up"
        );
        assert_eq!(f.format(&Instruction::ToolComment(1)), ";T1");
        assert_eq!(
            f.format(&Instruction::Rotate {
                axis: 'A',
                degrees: -0.001,
                feed: 25000.0
            }),
            "G1 A0.00 F25000"
        );
        assert_eq!(f.format(&Instruction::Comment("Cuts".into())), "; Cuts");
    }
}
