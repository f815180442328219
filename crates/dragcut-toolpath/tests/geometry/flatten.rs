use dragcut_core::{Curve, SegmentChain, Vector2};
use dragcut_toolpath::{DiagnosticKind, Flattener};
use proptest::prelude::*;
use std::f64::consts::TAU;

fn point() -> impl Strategy<Value = Vector2> {
    (-100.0..100.0f64, -100.0..100.0f64).prop_map(Vector2::from)
}

fn curve() -> impl Strategy<Value = Curve> {
    prop_oneof![
        (point(), point(), point()).prop_map(|(a, b, c)| Curve::quadratic(a, b, c)),
        (point(), point(), point(), point()).prop_map(|(a, b, c, d)| Curve::cubic(a, b, c, d)),
        (point(), 1.0..80.0f64, 1.0..80.0f64, 0.0..TAU, -TAU..TAU, -TAU..TAU).prop_map(
            |(center, radius_x, radius_y, rotation, start_angle, sweep)| Curve::Arc {
                center,
                radius_x,
                radius_y,
                rotation,
                start_angle,
                sweep,
            }
        ),
    ]
}

fn max_deviation(curve: &Curve, chain: &SegmentChain) -> f64 {
    curve
        .sample(4000)
        .iter()
        .filter_map(|p| chain.distance_to_point(p))
        .fold(0.0, f64::max)
}

proptest! {
    #[test]
    fn flattened_chain_stays_within_tolerance(
        curve in curve(),
        tolerance in 0.01..1.0f64,
    ) {
        prop_assume!(!curve.is_degenerate(1e-6));
        let out = Flattener::new(tolerance).flatten(&curve);
        prop_assert!(out.diagnostics.is_empty());
        prop_assert!(!out.chain.is_empty());

        let deviation = max_deviation(&curve, &out.chain);
        prop_assert!(
            deviation <= tolerance + 1e-9,
            "deviation {} exceeds tolerance {}",
            deviation,
            tolerance
        );
    }

    #[test]
    fn flattened_chain_is_contiguous(curve in curve(), tolerance in 0.01..1.0f64) {
        let chain = Flattener::new(tolerance).flatten(&curve).chain;
        for pair in chain.segments().windows(2) {
            prop_assert_eq!(pair[0].end, pair[1].start);
        }
        if !chain.is_empty() {
            prop_assert_eq!(chain.start(), Some(curve.start()));
        }
    }
}

#[test]
fn test_circular_arc_deviation_is_bounded() {
    let arc = Curve::circular_arc(Vector2::new(10.0, 10.0), 40.0, 0.3, 4.0);
    for tolerance in [0.5, 0.1, 0.01] {
        let chain = Flattener::new(tolerance).flatten(&arc).chain;
        assert!(max_deviation(&arc, &chain) <= tolerance + 1e-9);
    }
}

#[test]
fn test_s_curve_stays_within_tolerance() {
    let cubic = Curve::cubic(
        Vector2::new(15.44, 72.24),
        Vector2::new(28.14, 88.91),
        Vector2::new(-63.81, -32.01),
        Vector2::new(-96.43, -89.64),
    );
    let out = Flattener::new(0.57).flatten(&cubic);
    assert!(out.diagnostics.is_empty());
    assert!(max_deviation(&cubic, &out.chain) <= 0.57 + 1e-9);
}

#[test]
fn test_degenerate_bezier() {
    let p = Vector2::new(1.0, 2.0);
    let out = Flattener::default().flatten(&Curve::cubic(p, p, p, p));
    assert!(out.chain.is_empty());
    assert_eq!(out.diagnostics[0].kind, DiagnosticKind::DegenerateCurve);
}
