//! Per-tool machine parameters.

use dragcut_core::Vector2;
use serde::{Deserialize, Serialize};

/// How a tool behaves at corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// Trailing blade on a rotary axis; needs rotation and corner compensation.
    #[default]
    DragKnife,
    /// Pen or fixed tool without a rotary axis.
    Pen,
}

/// Parameters of one tool head.
///
/// Angles are radians except `rotation_zero`, which is the axis reading in
/// degrees for a blade pointing along +X.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolProfile {
    pub index: usize,
    pub kind: ToolKind,
    /// Added to every emitted X/Y while this tool is active.
    pub mounting_offset: Vector2,
    pub lift_axis: char,
    pub rotation_axis: char,
    pub cut_height: f64,
    /// Travel height, relative to `cut_height`.
    pub lift_height: f64,
    /// Parking height, relative to `cut_height`.
    pub park_height: f64,
    /// Depth added per extra pass.
    pub pass_depth: f64,
    pub lift_feed: f64,
    pub rotation_feed: f64,
    /// Extension past a hard corner while the blade is still down.
    pub overcut: f64,
    /// Signed lead-in distance along the new heading; negative backs up.
    pub precut: f64,
    /// Largest tangent change cut without lifting.
    pub slope_max: f64,
    pub rotation_zero: f64,
    pub rotation_reversed: bool,
}

impl Default for ToolProfile {
    fn default() -> Self {
        Self::groove_knife()
    }
}

impl ToolProfile {
    /// Tool 0: grooving knife on Z/A at the spindle position.
    pub fn groove_knife() -> Self {
        Self {
            index: 0,
            kind: ToolKind::DragKnife,
            mounting_offset: Vector2::ZERO,
            lift_axis: 'Z',
            rotation_axis: 'A',
            cut_height: 0.0,
            lift_height: 5.5,
            park_height: 25.0,
            pass_depth: 0.0,
            lift_feed: 7000.0,
            rotation_feed: 25000.0,
            overcut: 0.3,
            precut: -0.75,
            slope_max: 10f64.to_radians(),
            rotation_zero: 0.0,
            rotation_reversed: false,
        }
    }

    /// Tool 1: cutting knife on W/B, mounted 78 mm left of tool 0.
    pub fn cut_knife() -> Self {
        Self {
            index: 1,
            mounting_offset: Vector2::new(-78.0, 0.0),
            lift_axis: 'W',
            rotation_axis: 'B',
            ..Self::groove_knife()
        }
    }

    /// Pen on the Z lift with no rotation or compensation.
    pub fn pen(index: usize) -> Self {
        Self {
            index,
            kind: ToolKind::Pen,
            overcut: 0.0,
            precut: 0.0,
            ..Self::groove_knife()
        }
    }

    pub fn with_slope_max(mut self, slope_max: f64) -> Self {
        self.slope_max = slope_max;
        self
    }

    pub fn with_offset(mut self, offset: Vector2) -> Self {
        self.mounting_offset = offset;
        self
    }

    pub fn is_knife(&self) -> bool {
        self.kind == ToolKind::DragKnife
    }

    pub fn up_height(&self) -> f64 {
        self.cut_height + self.lift_height
    }

    pub fn parked_height(&self) -> f64 {
        self.cut_height + self.park_height
    }

    /// Axis reading in degrees for a blade heading of `angle` radians.
    ///
    /// A reversed head reads in `(0, 360]`.
    pub fn axis_degrees(&self, angle: f64) -> f64 {
        let degrees = angle.to_degrees();
        if self.rotation_reversed {
            let reading = (self.rotation_zero - degrees).rem_euclid(360.0);
            if reading == 0.0 {
                360.0
            } else {
                reading
            }
        } else {
            self.rotation_zero + degrees
        }
    }
}
