use crate::common::{compile_lines, compiler_for, polyline, role};
use dragcut_core::{shared, SegmentChain, Vector2};
use dragcut_toolpath::{MachineInterface, MotionHistory, ToolProfile};
use proptest::prelude::*;

fn rotations(lines: &[String]) -> usize {
    lines.iter().filter(|l| l.starts_with("G1 A")).count()
}

proptest! {
    #[test]
    fn colinear_chain_rotates_once(
        x in -100.0..100.0f64,
        y in -100.0..100.0f64,
        heading in -3.1..3.1f64,
        lengths in prop::collection::vec(0.5..20.0f64, 1..12),
    ) {
        let direction = Vector2::from_angle(heading);
        let mut points = vec![Vector2::new(x, y)];
        let mut travelled = 0.0;
        for length in &lengths {
            travelled += length;
            points.push(Vector2::new(x, y) + direction * travelled);
        }
        let lines = compile_lines(
            ToolProfile::groove_knife(),
            &[SegmentChain::from_points(&points)],
            10.0,
        );

        prop_assert_eq!(rotations(&lines), 1);
        prop_assert!(!lines.iter().any(|l| l.contains("overCut") || l.contains("preCut")));
    }

    #[test]
    fn hard_corner_emits_compensation_in_order(
        turn in 0.6..2.9f64,
        left in any::<bool>(),
        leg in 1.0..50.0f64,
    ) {
        let turn = if left { turn } else { -turn };
        let corner = Vector2::new(leg, 0.0);
        let end = corner.line_extension(turn, leg);
        let chain = SegmentChain::from_points(&[Vector2::ZERO, corner, end]);

        let mut compiler = compiler_for(ToolProfile::groove_knife());
        compiler.compile(&[chain], 0, &role(0, 30.0)).unwrap();
        let lines = compiler.machine().lines();

        let overcut = lines.iter().position(|l| l.ends_with("; overCut")).unwrap();
        prop_assert!(lines[overcut + 1].ends_with("; lift up"));
        prop_assert!(lines[overcut + 2].starts_with("G1 A"));
        prop_assert!(lines[overcut + 3].ends_with("; preCut"));
        prop_assert!(lines[overcut + 4].ends_with("; lift down"));
        prop_assert!(lines[overcut + 5].starts_with("G1 X"));
        prop_assert_eq!(
            compiler.machine().state().orientation(0),
            corner.angle_to(&end)
        );
    }
}

#[test]
fn test_gentle_turns_rotate_without_lifting() {
    let lines = compile_lines(
        ToolProfile::groove_knife(),
        &[polyline(&[(0.0, 0.0), (10.0, 0.0), (20.0, 1.0), (30.0, 3.0)])],
        15.0,
    );
    assert_eq!(rotations(&lines), 3);
    assert_eq!(lines.iter().filter(|l| l.contains("lift up")).count(), 1);
}

#[test]
fn test_observer_does_not_change_output() {
    let chains = [
        polyline(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]),
        polyline(&[(20.0, 0.0), (25.0, 5.0)]),
    ];
    let plain = compile_lines(ToolProfile::groove_knife(), &chains, 30.0);

    let history = shared(MotionHistory::new());
    let mut observed = compiler_for(ToolProfile::groove_knife());
    observed
        .machine_mut()
        .set_observer(Some(Box::new(history.clone())));
    observed.compile(&chains, 0, &role(0, 30.0)).unwrap();

    assert_eq!(observed.machine().lines(), plain.as_slice());
    let history = history.borrow();
    assert_eq!(history.travel.iter().filter(|r| r.delta.length() > 0.0).count(), 2);
    assert!(history.cut_length(0) > 40.0);
    assert!(!history.orientation.is_empty());
}
