//! Bridge to an external label renderer.
//!
//! Label curves carry text, not geometry. A [`LabelRenderer`] turns each one
//! into pen strokes which are then compiled like any other chain.

use dragcut_core::{Curve, Label, SegmentChain};

/// Text appearance passed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelStyle {
    /// Cap height in millimetres.
    pub size: f64,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self { size: 5.0 }
    }
}

/// Renders label text into already flattened strokes.
pub trait LabelRenderer {
    fn render(&self, label: &Label, style: &LabelStyle) -> Vec<SegmentChain>;
}

impl<F> LabelRenderer for F
where
    F: Fn(&Label, &LabelStyle) -> Vec<SegmentChain>,
{
    fn render(&self, label: &Label, style: &LabelStyle) -> Vec<SegmentChain> {
        self(label, style)
    }
}

/// Separates label markers from cuttable curves, preserving order.
pub fn split_labels(curves: &[Curve]) -> (Vec<Curve>, Vec<Label>) {
    let mut geometry = Vec::with_capacity(curves.len());
    let mut labels = Vec::new();
    for curve in curves {
        match curve {
            Curve::Label(label) => labels.push(label.clone()),
            other => geometry.push(other.clone()),
        }
    }
    (geometry, labels)
}
