use crate::common::{compiler_for, polyline, role};
use dragcut_core::{Curve, LineSegment, SegmentChain, Vector2};
use dragcut_toolpath::{flatten, DiagnosticKind, MachineInterface, ToolProfile};
use std::f64::consts::FRAC_PI_2;

#[test]
fn test_right_angle_with_mounting_offset() {
    let tool = ToolProfile::groove_knife().with_offset(Vector2::new(-78.0, 0.0));
    let mut compiler = compiler_for(tool);
    let chain = polyline(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
    compiler.compile(&[chain], 0, &role(0, 30.0)).unwrap();

    assert_eq!(
        compiler.machine().lines(),
        &[
            ";T0",
            "G1 Z5.500 F7000 ; lift up",
            "G0 X-78.750 Y0.000 F25000;",
            "G1 A0.000 F25000",
            "G1 Z0.000 F7000 ; lift down",
            "G1 X-68.000 Y0.000 F3000;",
            "G1 X-67.700 Y0.000 F3000 ; overCut",
            "G1 Z5.500 F7000 ; lift up",
            "G1 A90.000 F25000",
            "G1 X-68.000 Y-0.750 F3000 ; preCut",
            "G1 Z0.000 F7000 ; lift down",
            "G1 X-68.000 Y10.000 F3000;",
            ";T0",
            "G1 Z25.000 F7000 ; park",
        ]
    );
    assert_eq!(compiler.machine().state().orientation(0), FRAC_PI_2);
    assert_eq!(
        compiler.machine().state().position,
        Some(Vector2::new(10.0, 10.0))
    );
}

#[test]
fn test_empty_chain_is_skipped_with_one_diagnostic() {
    let p = Vector2::new(4.0, 4.0);
    let empty = flatten(&Curve::line(p, p), 0.1);
    assert!(empty.is_empty());

    let valid = polyline(&[(0.0, 0.0), (10.0, 0.0)]);

    let mut with_empty = compiler_for(ToolProfile::groove_knife());
    let compiled = with_empty
        .compile(&[empty, valid.clone()], 0, &role(0, 30.0))
        .unwrap();
    assert_eq!(compiled, 1);
    assert_eq!(with_empty.diagnostics().len(), 1);
    assert_eq!(
        with_empty.diagnostics()[0].kind,
        DiagnosticKind::MalformedChain
    );

    let mut alone = compiler_for(ToolProfile::groove_knife());
    alone.compile(&[valid], 0, &role(0, 30.0)).unwrap();
    assert_eq!(with_empty.machine().lines(), alone.machine().lines());
}

#[test]
fn test_only_malformed_chains_emit_nothing() {
    let broken = SegmentChain::from_segments_unchecked(vec![
        LineSegment::new(Vector2::ZERO, Vector2::new(1.0, 0.0)),
        LineSegment::new(Vector2::new(3.0, 0.0), Vector2::new(4.0, 0.0)),
    ]);
    let mut compiler = compiler_for(ToolProfile::groove_knife());
    let compiled = compiler.compile(&[broken], 0, &role(0, 30.0)).unwrap();

    assert_eq!(compiled, 0);
    assert!(compiler.machine().lines().is_empty());
    assert_eq!(compiler.diagnostics().len(), 1);
}

#[test]
fn test_next_role_lifts_from_park() {
    let mut compiler = compiler_for(ToolProfile::groove_knife());
    compiler
        .compile(&[polyline(&[(0.0, 0.0), (0.0, 10.0)])], 0, &role(0, 30.0))
        .unwrap();
    let first_role = compiler.machine().lines().len();

    compiler
        .compile(&[polyline(&[(5.0, 0.0), (5.0, 10.0)])], 0, &role(0, 30.0))
        .unwrap();
    let second = &compiler.machine().lines()[first_role..];
    assert_eq!(second[0], ";T0");
    assert_eq!(second[1], "G1 Z5.500 F7000 ; lift up");
    assert!(second[2].starts_with("G0 X5.000"));
    assert_eq!(second[3], "G1 A90.000 F25000");
}
