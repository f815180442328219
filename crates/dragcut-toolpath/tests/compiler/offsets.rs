use crate::common::compile_lines;
use dragcut_core::{SegmentChain, Vector2};
use dragcut_toolpath::ToolProfile;
use proptest::prelude::*;

/// Splits a line into its X/Y values and everything else.
fn split(line: &str) -> (Vec<f64>, Vec<f64>, Vec<&str>) {
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    let mut rest = Vec::new();
    for word in line.split_whitespace() {
        if let Some(v) = word.strip_prefix('X') {
            xs.push(v.parse().unwrap());
        } else if let Some(v) = word.strip_prefix('Y') {
            ys.push(v.parse().unwrap());
        } else {
            rest.push(word);
        }
    }
    (xs, ys, rest)
}

fn points() -> impl Strategy<Value = Vec<Vector2>> {
    prop::collection::vec((-200.0..200.0f64, -200.0..200.0f64), 2..10)
        .prop_map(|pts| pts.into_iter().map(Vector2::from).collect())
}

proptest! {
    #[test]
    fn offset_translates_every_coordinate(
        pts in points(),
        ox in -100.0..100.0f64,
        oy in -100.0..100.0f64,
    ) {
        let chain = SegmentChain::from_points(&pts);
        prop_assume!(chain.iter().all(|s| s.length() > 1e-3));

        let plain = compile_lines(ToolProfile::groove_knife(), &[chain.clone()], 20.0);
        let shifted = compile_lines(
            ToolProfile::groove_knife().with_offset(Vector2::new(ox, oy)),
            &[chain],
            20.0,
        );

        prop_assert_eq!(plain.len(), shifted.len());
        for (a, b) in plain.iter().zip(&shifted) {
            let (ax, ay, a_rest) = split(a);
            let (bx, by, b_rest) = split(b);
            prop_assert_eq!(a_rest, b_rest);
            prop_assert_eq!(ax.len(), bx.len());
            prop_assert_eq!(ay.len(), by.len());
            for (a, b) in ax.iter().zip(&bx) {
                prop_assert!((b - a - ox).abs() <= 1.5e-3, "{} vs {}", a, b);
            }
            for (a, b) in ay.iter().zip(&by) {
                prop_assert!((b - a - oy).abs() <= 1.5e-3, "{} vs {}", a, b);
            }
        }
    }
}

#[test]
fn test_cut_knife_preset_offsets_x() {
    let chain = SegmentChain::from_points(&[Vector2::new(100.0, 20.0), Vector2::new(120.0, 20.0)]);
    let lines = compile_lines(ToolProfile::cut_knife(), &[chain], 15.0);
    assert!(lines.contains(&"G0 X21.250 Y20.000 F25000;".to_string()));
    assert!(lines.contains(&"G1 X42.000 Y20.000 F3000;".to_string()));
    assert!(lines.iter().all(|l| !l.starts_with("G1 A")));
    assert!(lines.contains(&"G1 B0.000 F25000".to_string()));
}
